use serde_json::{Value, json};

use crate::excel::{Cell, CellType, DataTypeInfo, excel_date_to_iso_string};

fn number_value(f: f64) -> Value {
    if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        json!(f.trunc() as i64)
    } else {
        json!(f)
    }
}

// Process cell value based on its type
pub fn process_cell_value(cell: &Cell) -> Value {
    if cell.value.is_empty() {
        return Value::Null;
    }

    if let Some(original_type) = &cell.original_type {
        match original_type {
            DataTypeInfo::Float(f) => number_value(*f),
            DataTypeInfo::Int(i) => json!(i),
            DataTypeInfo::DateTime(dt) => match excel_date_to_iso_string(*dt) {
                Some(iso) => json!(iso),
                None => json!(cell.value),
            },
            DataTypeInfo::DateTimeIso(s) => json!(s),
            DataTypeInfo::Bool(b) => json!(b),
            DataTypeInfo::Empty => Value::Null,
            _ => json!(cell.value),
        }
    } else {
        match cell.cell_type {
            // Integers stay exact; f64 only holds 53 bits
            CellType::Number => {
                if let Ok(i) = cell.value.parse::<i64>() {
                    json!(i)
                } else if let Ok(u) = cell.value.parse::<u64>() {
                    json!(u)
                } else if let Ok(num) = cell.value.parse::<f64>() {
                    number_value(num)
                } else {
                    json!(cell.value)
                }
            }
            CellType::Boolean => match cell.value.to_ascii_lowercase().as_str() {
                "true" => json!(true),
                "false" => json!(false),
                _ => json!(cell.value),
            },
            CellType::Empty => Value::Null,
            // Text and dates that were typed in as text
            _ => json!(cell.value),
        }
    }
}
