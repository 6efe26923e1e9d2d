use anyhow::{Context, Result};
use log::{debug, info};
use rust_xlsxwriter::{Format, Formula, Workbook as XlsxWorkbook};
use std::path::Path;

use crate::excel::{CellType, DEFAULT_SHEET, Frame};
use crate::utils::{cell_reference, column_name_of};

const COLUMN_WIDTH: f64 = 15.0;

impl Frame {
    /// Writes the header row and all data rows into `Sheet1` of a new
    /// `.xlsx` file at `path`, replacing any existing file.
    pub fn write_xlsx<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut workbook = XlsxWorkbook::new();

        let number_format = Format::new().set_num_format("General");
        let date_format = Format::new().set_num_format("yyyy-mm-dd");

        let worksheet = workbook.add_worksheet().set_name(DEFAULT_SHEET)?;

        for (col, header) in self.names().iter().enumerate() {
            let letter = column_name_of(col as i64 + 1)?;
            let col_idx = u16::try_from(col)
                .with_context(|| format!("Column {} is beyond the xlsx column limit", letter))?;

            debug!("Writing column {} ({})", letter, header);

            worksheet.set_column_width(col_idx, COLUMN_WIDTH)?;
            worksheet.write_string(0, col_idx, header)?;

            for (row, cells) in self.rows().iter().enumerate() {
                let cell = &cells[col];
                if cell.is_empty() {
                    continue;
                }

                let row_idx = u32::try_from(row + 1)
                    .with_context(|| format!("Row {} is beyond the xlsx row limit", row + 2))?;

                let written = match cell.cell_type {
                    CellType::Number => match cell.value.parse::<f64>() {
                        Ok(num) => worksheet.write_number_with_format(
                            row_idx,
                            col_idx,
                            num,
                            &number_format,
                        ),
                        Err(_) => worksheet.write_string(row_idx, col_idx, &cell.value),
                    },
                    CellType::Date => worksheet.write_string_with_format(
                        row_idx,
                        col_idx,
                        &cell.value,
                        &date_format,
                    ),
                    CellType::Boolean => match cell.value.to_ascii_lowercase().parse::<bool>() {
                        Ok(b) => worksheet.write_boolean(row_idx, col_idx, b),
                        Err(_) => worksheet.write_string(row_idx, col_idx, &cell.value),
                    },
                    CellType::Text if cell.is_formula => {
                        worksheet.write_formula(row_idx, col_idx, Formula::new(&cell.value))
                    }
                    CellType::Text => worksheet.write_string(row_idx, col_idx, &cell.value),
                    CellType::Empty => continue,
                };

                written.with_context(|| {
                    format!(
                        "Failed to write cell {}",
                        cell_reference(row + 2, col + 1).unwrap_or_default()
                    )
                })?;
            }
        }

        workbook
            .save(path)
            .with_context(|| format!("Failed to save workbook: {}", path.display()))?;

        info!(
            "Wrote {} rows x {} columns to {}",
            self.nrows(),
            self.ncols(),
            path.display()
        );

        Ok(())
    }
}
