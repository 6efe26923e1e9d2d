//! Spreadsheet column letters, Chinese numerals, and a small worksheet table
//! loader built on `calamine` and `rust_xlsxwriter`.

pub mod error;
pub mod excel;
pub mod json_export;
pub mod utils;

pub use error::CodecError;
pub use excel::Frame;
