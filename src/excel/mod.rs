mod cell;
mod frame;
mod writer;

pub use cell::{Cell, CellType, DataTypeInfo, excel_date_to_iso_string};
pub use frame::{DEFAULT_SHEET, Frame};
