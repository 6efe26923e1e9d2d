use calamine::Data;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub value: String,
    pub is_formula: bool,
    pub cell_type: CellType,
    pub original_type: Option<DataTypeInfo>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellType {
    Text,
    Number,
    Date,
    Boolean,
    Empty,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DataTypeInfo {
    Empty,
    String,
    Float(f64),
    Int(i64),
    Bool(bool),
    DateTime(f64),
    DateTimeIso(String),
    DurationIso(String),
    Error,
}

impl Cell {
    /// Builds a cell from a plain string, guessing its type from the text.
    pub fn new(value: String) -> Self {
        let is_formula = value.starts_with('=');
        let cell_type = if value.is_empty() {
            CellType::Empty
        } else if is_formula {
            CellType::Text
        } else if value.parse::<f64>().is_ok() {
            CellType::Number
        } else if (value.contains('/') && value.split('/').count() == 3)
            || (value.contains('-') && value.split('-').count() == 3)
        {
            CellType::Date
        } else if value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("false") {
            CellType::Boolean
        } else {
            CellType::Text
        };

        Self::new_with_type(value, is_formula, cell_type, None)
    }

    pub fn new_with_type(
        value: String,
        is_formula: bool,
        cell_type: CellType,
        original_type: Option<DataTypeInfo>,
    ) -> Self {
        Self {
            value,
            is_formula,
            cell_type,
            original_type,
        }
    }

    /// A text cell that is never re-typed, used for headers.
    pub fn text(value: impl Into<String>) -> Self {
        Self::new_with_type(
            value.into(),
            false,
            CellType::Text,
            Some(DataTypeInfo::String),
        )
    }

    pub fn empty() -> Self {
        Self {
            value: String::new(),
            is_formula: false,
            cell_type: CellType::Empty,
            original_type: Some(DataTypeInfo::Empty),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Converts a calamine cell, keeping the source type alongside the text.
    pub fn from_data(cell: &Data) -> Self {
        let (value, cell_type, original_type) = match cell {
            Data::Empty => (String::new(), CellType::Empty, DataTypeInfo::Empty),

            Data::String(s) => (s.clone(), CellType::Text, DataTypeInfo::String),

            Data::Float(f) => {
                let value = if *f == (*f as i64) as f64 && f.abs() < 1e10 {
                    (*f as i64).to_string()
                } else {
                    f.to_string()
                };
                (value, CellType::Number, DataTypeInfo::Float(*f))
            }

            Data::Int(i) => (i.to_string(), CellType::Number, DataTypeInfo::Int(*i)),

            Data::Bool(b) => (
                if *b { "TRUE" } else { "FALSE" }.to_string(),
                CellType::Boolean,
                DataTypeInfo::Bool(*b),
            ),

            Data::Error(e) => (format!("Error: {:?}", e), CellType::Text, DataTypeInfo::Error),

            Data::DateTime(dt) => {
                let serial = dt.as_f64();
                let value = excel_date_to_iso_string(serial).unwrap_or_else(|| dt.to_string());
                (value, CellType::Date, DataTypeInfo::DateTime(serial))
            }

            Data::DateTimeIso(s) => (
                s.clone(),
                CellType::Date,
                DataTypeInfo::DateTimeIso(s.clone()),
            ),

            Data::DurationIso(s) => (
                s.clone(),
                CellType::Text,
                DataTypeInfo::DurationIso(s.clone()),
            ),
        };

        let is_formula = value.starts_with('=');
        Self::new_with_type(value, is_formula, cell_type, Some(original_type))
    }
}

// Convert Excel date number to ISO date string
pub fn excel_date_to_iso_string(excel_date: f64) -> Option<String> {
    if excel_date < 0.0 {
        return None;
    }

    // Excel counts the non-existent 1900-02-29 as day 60
    let days = if excel_date > 59.0 {
        excel_date - 1.0
    } else {
        excel_date
    };

    let base_date = NaiveDate::from_ymd_opt(1900, 1, 1)?;
    let whole_days = days.trunc() as i64;
    let fractional_day = days.fract();

    let date = base_date + Duration::days(whole_days - 1);

    if fractional_day > 0.0 {
        let seconds = (fractional_day * 86_400.0).round() as u32;
        // Rounding can push a late time onto midnight
        let seconds = seconds.min(86_399);

        let time = NaiveTime::from_hms_opt(seconds / 3600, (seconds % 3600) / 60, seconds % 60)?;

        Some(
            NaiveDateTime::new(date, time)
                .format("%Y-%m-%dT%H:%M:%S")
                .to_string(),
        )
    } else {
        Some(date.format("%Y-%m-%d").to_string())
    }
}
