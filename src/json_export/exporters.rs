use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::Serialize;

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::excel::Frame;
use crate::json_export::converters::process_cell_value;
use crate::json_export::types::OrderedRecords;

pub fn serialize_to_json<T: Serialize>(data: &T) -> Result<String> {
    serde_json::to_string_pretty(data).context("Failed to serialize data to JSON")
}

fn write_json_to_file<T: Serialize>(data: &T, path: &Path) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("Failed to create file: {}", path.display()))?;

    let json_string = serialize_to_json(data)?;

    file.write_all(json_string.as_bytes())
        .with_context(|| format!("Failed to write to file: {}", path.display()))?;

    Ok(())
}

/// One ordered object per data row. Rows whose cells are all empty are dropped.
pub fn frame_to_records(frame: &Frame) -> OrderedRecords {
    let headers = frame.names();
    let mut records = Vec::with_capacity(frame.nrows());

    for row in frame.rows() {
        if row.iter().all(|cell| cell.is_empty()) {
            continue;
        }

        let mut record = IndexMap::with_capacity(headers.len());
        for (header, cell) in headers.iter().zip(row) {
            if !header.is_empty() {
                record.insert(header.clone(), process_cell_value(cell));
            }
        }
        records.push(record);
    }

    records
}

pub fn export_json(frame: &Frame, path: &Path) -> Result<()> {
    write_json_to_file(&frame_to_records(frame), path)
}
