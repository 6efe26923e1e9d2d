use anyhow::{Context, Result};
use calamine::{Reader, open_workbook_auto};
use log::{debug, info, warn};
use std::ops::Range;
use std::path::Path;

use crate::excel::Cell;
use crate::utils::{
    SliceDiff, column_index_of, column_name_of, contains, duplicate_indices, first_mismatch,
    is_blank, parse_cell_reference, parse_chinese_numeral,
};

pub const DEFAULT_SHEET: &str = "Sheet1";

/// A header row plus data rows, read from one or more worksheets.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
    file_path: String,
    sheets: Vec<String>,
}

impl Frame {
    /// Builds a frame in memory. Rows are padded or cut to the header width.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize_with(width, Cell::empty);
                row
            })
            .collect();

        Self {
            headers,
            rows,
            ..Self::default()
        }
    }

    /// Reads `.xlsx`, `.xlsm` or `.xls` files.
    ///
    /// Only the worksheets named in `sheets` are visited (`Sheet1` when empty).
    /// In each one, blank rows are skipped and the first remaining row is the
    /// header. The table spans from the header's first non-empty cell to the
    /// cell before the next empty one. Every visited sheet must carry the same
    /// header; their data rows are concatenated in workbook order.
    pub fn read<P: AsRef<Path>, S: AsRef<str>>(path: P, sheets: &[S]) -> Result<Self> {
        let path_ref = path.as_ref();
        let path_str = path_ref.to_string_lossy().to_string();

        let mut wanted: Vec<String> = sheets.iter().map(|s| s.as_ref().to_string()).collect();
        if wanted.is_empty() {
            wanted.push(DEFAULT_SHEET.to_string());
        }

        let extension = path_ref
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase());

        if !matches!(extension.as_deref(), Some("xlsx" | "xlsm" | "xls")) {
            anyhow::bail!("Unsupported file type: {}", path_str);
        }

        let mut workbook = open_workbook_auto(path_ref)
            .with_context(|| format!("Unable to parse Excel file: {}", path_str))?;

        let mut frame = Frame {
            file_path: path_str.clone(),
            ..Frame::default()
        };
        let mut have_header = false;

        for name in workbook.sheet_names() {
            if !contains(&wanted, &name) {
                continue;
            }

            let range = workbook
                .worksheet_range(&name)
                .with_context(|| format!("Unable to read worksheet: {}", name))?;

            let rows = range
                .rows()
                .map(|row| row.iter().map(Cell::from_data).collect::<Vec<_>>());

            frame.sheets.push(name.clone());

            let Some((header, data)) = extract_table(rows) else {
                warn!("Worksheet '{}' has no non-blank rows, skipping", name);
                continue;
            };

            if have_header {
                match first_mismatch(&frame.headers, &header) {
                    SliceDiff::Equal => {}
                    SliceDiff::LengthDiffers => anyhow::bail!(
                        "Header of worksheet '{}' has {} columns, expected {}",
                        name,
                        header.len(),
                        frame.headers.len()
                    ),
                    SliceDiff::DiffersAt(i) => anyhow::bail!(
                        "Header of worksheet '{}' differs from earlier worksheets at column {}: {:?} != {:?}",
                        name,
                        column_name_of(i as i64 + 1)?,
                        header[i],
                        frame.headers[i]
                    ),
                }
            } else {
                frame.headers = header;
                have_header = true;
            }

            debug!("Worksheet '{}': {} data rows", name, data.len());
            frame.rows.extend(data);
        }

        if frame.sheets.is_empty() {
            anyhow::bail!(
                "None of the worksheets {:?} were found in {}",
                wanted,
                path_str
            );
        }

        for (header, positions) in duplicate_indices(&frame.headers) {
            warn!("Header {:?} appears in columns {:?}", header, positions);
        }

        info!(
            "Read {} rows x {} columns from {} ({} worksheets)",
            frame.nrows(),
            frame.ncols(),
            path_str,
            frame.sheets.len()
        );

        Ok(frame)
    }

    pub fn names(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn nrows(&self) -> usize {
        self.rows.len()
    }

    pub fn ncols(&self) -> usize {
        self.headers.len()
    }

    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    /// Worksheets that matched the filter, in workbook order.
    pub fn sheets(&self) -> &[String] {
        &self.sheets
    }

    fn position(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .with_context(|| format!("Unknown column: {}", name))
    }

    pub fn column(&self, name: &str) -> Result<Vec<&Cell>> {
        let col = self.position(name)?;
        Ok(self.rows.iter().map(|row| &row[col]).collect())
    }

    /// Looks a column up by its spreadsheet letter (`"A"` is the first column).
    pub fn column_by_letter(&self, letter: &str) -> Result<(&str, Vec<&Cell>)> {
        let index = column_index_of(letter)?;
        let col = usize::try_from(index - 1)?;

        let header = self
            .headers
            .get(col)
            .with_context(|| {
                format!(
                    "Column {} is out of range ({} columns)",
                    letter,
                    self.ncols()
                )
            })?;

        Ok((header.as_str(), self.rows.iter().map(|row| &row[col]).collect()))
    }

    /// Reads one cell by A1 reference, with row 1 holding the header.
    pub fn cell(&self, reference: &str) -> Result<&str> {
        let (row, col) = parse_cell_reference(reference)
            .with_context(|| format!("Invalid cell reference: {}", reference))?;
        let out_of_range = || format!("Cell {} is outside the table", reference);

        if row == 1 {
            return self
                .headers
                .get(col - 1)
                .map(String::as_str)
                .with_context(out_of_range);
        }

        self.rows
            .get(row - 2)
            .and_then(|r| r.get(col - 1))
            .map(|c| c.value.as_str())
            .with_context(out_of_range)
    }

    /// Column-major view of the named columns (all of them when `cols` is
    /// empty). Each column starts with its header cell.
    pub fn map_cols<S: AsRef<str>>(&self, cols: &[S]) -> Result<Vec<Vec<Cell>>> {
        let names: Vec<&str> = if cols.is_empty() {
            self.headers.iter().map(String::as_str).collect()
        } else {
            cols.iter().map(|c| c.as_ref()).collect()
        };

        let mut out = Vec::with_capacity(names.len());
        for name in names {
            let col = self.position(name)?;
            let mut values = Vec::with_capacity(self.rows.len() + 1);
            values.push(Cell::text(name));
            values.extend(self.rows.iter().map(|row| row[col].clone()));
            out.push(values);
        }

        Ok(out)
    }

    /// Rewrites every data cell of the named columns with `f`, re-inferring
    /// each cell's type from the new text.
    pub fn format_cols<F, S>(&mut self, mut f: F, cols: &[S]) -> Result<()>
    where
        F: FnMut(&Cell) -> String,
        S: AsRef<str>,
    {
        let positions = cols
            .iter()
            .map(|name| self.position(name.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        for row in &mut self.rows {
            for &col in &positions {
                let value = f(&row[col]);
                row[col] = Cell::new(value);
            }
        }

        Ok(())
    }

    /// Replaces Chinese numerals in the named columns with their integer
    /// value. Empty cells stay empty; cells that do not parse are kept as
    /// they are and logged.
    pub fn parse_numeral_cols<S: AsRef<str>>(&mut self, cols: &[S]) -> Result<()> {
        self.format_cols(
            |cell| {
                if cell.is_empty() {
                    return String::new();
                }
                match parse_chinese_numeral(&cell.value) {
                    Ok(n) => n.to_string(),
                    Err(e) => {
                        warn!("Keeping {:?} as text: {}", cell.value, e);
                        cell.value.clone()
                    }
                }
            },
            cols,
        )
    }
}

fn header_span(row: &[Cell]) -> Option<Range<usize>> {
    let start = row.iter().position(|c| !c.is_empty())?;
    let end = row[start..]
        .iter()
        .position(Cell::is_empty)
        .map_or(row.len(), |offset| start + offset);
    Some(start..end)
}

// Split worksheet rows into a header and data rows sliced to the header span
fn extract_table<I>(rows: I) -> Option<(Vec<String>, Vec<Vec<Cell>>)>
where
    I: IntoIterator<Item = Vec<Cell>>,
{
    let mut span: Option<Range<usize>> = None;
    let mut header = Vec::new();
    let mut data = Vec::new();

    for row in rows {
        let values: Vec<&str> = row.iter().map(|c| c.value.as_str()).collect();
        if is_blank(&values) {
            continue;
        }

        match &span {
            None => {
                let s = header_span(&row)?;
                header = row[s.clone()].iter().map(|c| c.value.clone()).collect();
                span = Some(s);
            }
            Some(s) => {
                let mut sliced: Vec<Cell> = row
                    .get(s.start..s.end.min(row.len()))
                    .map(<[Cell]>::to_vec)
                    .unwrap_or_default();
                sliced.resize_with(s.len(), Cell::empty);
                data.push(sliced);
            }
        }
    }

    span.map(|_| (header, data))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(values: &[&str]) -> Vec<Cell> {
        values.iter().map(|v| Cell::new(v.to_string())).collect()
    }

    fn sample() -> Frame {
        Frame::new(
            vec!["name".into(), "qty".into(), "note".into()],
            vec![row(&["apple", "三百", "x"]), row(&["pear", "十五"])],
        )
    }

    #[test]
    fn header_span_stops_at_first_gap() {
        assert_eq!(header_span(&row(&["", "a", "b", "", "c"])), Some(1..3));
        assert_eq!(header_span(&row(&["a", "b"])), Some(0..2));
        assert_eq!(header_span(&row(&["", "", "a"])), Some(2..3));
        assert_eq!(header_span(&row(&["", ""])), None);
    }

    #[test]
    fn extract_skips_blank_rows_and_slices() {
        let rows = vec![
            row(&["", "", ""]),
            row(&["", "id", "name", "", "junk"]),
            row(&["", "1", "a", "x", "y"]),
            row(&[]),
            row(&["", "2"]),
        ];

        let (header, data) = extract_table(rows).unwrap();
        assert_eq!(header, ["id", "name"]);
        assert_eq!(data.len(), 2);
        assert_eq!(data[0][1].value, "a");
        assert_eq!(data[1][0].value, "2");
        assert!(data[1][1].is_empty());
    }

    #[test]
    fn extract_blank_sheet() {
        assert!(extract_table(vec![row(&["", ""])]).is_none());
    }

    #[test]
    fn new_pads_short_rows() {
        let frame = sample();
        assert_eq!(frame.nrows(), 2);
        assert!(frame.rows()[1][2].is_empty());
    }

    #[test]
    fn lookup_by_letter_and_reference() {
        let frame = sample();

        let (header, cells) = frame.column_by_letter("B").unwrap();
        assert_eq!(header, "qty");
        assert_eq!(cells[0].value, "三百");

        assert!(frame.column_by_letter("D").is_err());
        assert!(frame.column_by_letter("b").is_err());

        assert_eq!(frame.cell("A1").unwrap(), "name");
        assert_eq!(frame.cell("a3").unwrap(), "pear");
        assert!(frame.cell("A4").is_err());
        assert!(frame.cell("1A").is_err());
    }

    #[test]
    fn map_cols_puts_header_first() {
        let frame = sample();
        let cols = frame.map_cols(&["qty"]).unwrap();
        assert_eq!(cols.len(), 1);
        let values: Vec<&str> = cols[0].iter().map(|c| c.value.as_str()).collect();
        assert_eq!(values, ["qty", "三百", "十五"]);

        assert_eq!(frame.map_cols::<&str>(&[]).unwrap().len(), 3);
        assert!(frame.map_cols(&["missing"]).is_err());
    }

    #[test]
    fn format_cols_retypes_cells() {
        let mut frame = sample();
        frame
            .format_cols(
                |c| {
                    crate::utils::parse_chinese_numeral(&c.value)
                        .map(|n| n.to_string())
                        .unwrap_or_else(|_| c.value.clone())
                },
                &["qty"],
            )
            .unwrap();

        let qty = frame.column("qty").unwrap();
        assert_eq!(qty[0].value, "300");
        assert_eq!(qty[1].value, "15");
        assert_eq!(qty[0].cell_type, crate::excel::CellType::Number);
    }

    #[test]
    fn parse_numeral_cols_keeps_empty_and_unparsed() {
        let mut frame = Frame::new(
            vec!["name".into(), "qty".into()],
            vec![
                row(&["apple", "两千零五"]),
                row(&["pear", ""]),
                row(&["fig", "n/a"]),
                row(&["plum", "12"]),
            ],
        );
        frame.parse_numeral_cols(&["qty"]).unwrap();

        let qty: Vec<&str> = frame
            .column("qty")
            .unwrap()
            .iter()
            .map(|c| c.value.as_str())
            .collect();
        assert_eq!(qty, ["2005", "", "n/a", "12"]);

        let qty = frame.column("qty").unwrap();
        assert_eq!(qty[0].cell_type, crate::excel::CellType::Number);
        assert_eq!(qty[1].cell_type, crate::excel::CellType::Empty);
        assert_eq!(qty[2].cell_type, crate::excel::CellType::Text);

        assert!(frame.parse_numeral_cols(&["missing"]).is_err());
    }
}
