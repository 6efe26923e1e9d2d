use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;

use sheet_numerals::excel::Frame;
use sheet_numerals::json_export;
use sheet_numerals::utils::{
    AnsiColor, AnsiStyle, color_str, column_index_of, column_name_of, format_chinese_numeral,
    parse_chinese_numeral,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a 1-based column index to its letter name (28 -> AB)
    ColName {
        #[arg(allow_negative_numbers = true)]
        index: i64,
    },

    /// Convert a column letter name to its 1-based index (AB -> 28)
    ColIndex { name: String },

    /// Parse a Chinese numeral into an integer (三万二千一百 -> 32100)
    Cn2an { text: String },

    /// Format an integer as a Chinese numeral (108 -> 一百零八)
    An2cn { number: u64 },

    /// Export worksheet rows as JSON records
    Export {
        /// Excel file path (.xlsx, .xlsm or .xls)
        file_path: PathBuf,

        /// Worksheets to read; defaults to Sheet1
        #[arg(long, short = 's')]
        sheet: Vec<String>,

        /// Columns holding Chinese numerals to convert to integers
        #[arg(long)]
        cn2an: Vec<String>,

        /// Write JSON to this file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Read worksheets and write the combined table to a new .xlsx file
    Convert {
        file_path: PathBuf,

        output: PathBuf,

        #[arg(long, short = 's')]
        sheet: Vec<String>,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::ColName { index } => println!("{}", column_name_of(index)?),
        Command::ColIndex { name } => println!("{}", column_index_of(&name)?),
        Command::Cn2an { text } => println!("{}", parse_chinese_numeral(&text)?),
        Command::An2cn { number } => println!("{}", format_chinese_numeral(number)?),
        Command::Export {
            file_path,
            sheet,
            cn2an,
            output,
        } => {
            let mut frame = Frame::read(&file_path, &sheet)?;
            frame.parse_numeral_cols(&cn2an)?;

            match output {
                Some(path) => json_export::export_json(&frame, &path)?,
                None => {
                    let records = json_export::frame_to_records(&frame);
                    println!("{}", json_export::serialize_to_json(&records)?);
                }
            }
        }
        Command::Convert {
            file_path,
            output,
            sheet,
        } => {
            let frame = Frame::read(&file_path, &sheet)?;
            frame.write_xlsx(&output)?;
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        let msg = format!("Error: {:#}", e);
        if std::io::stderr().is_terminal() {
            eprintln!(
                "{}",
                color_str(&msg, AnsiStyle::Bold, AnsiColor::Black, AnsiColor::Red)
            );
        } else {
            eprintln!("{}", msg);
        }
        std::process::exit(1);
    }
}
