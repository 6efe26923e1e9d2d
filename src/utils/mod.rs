mod column;
mod numeral;
mod slice;
mod text;

pub use column::{cell_reference, column_index_of, column_name_of, parse_cell_reference};
pub use numeral::{MAX_FORMATTABLE, format_chinese_numeral, parse_chinese_numeral};
pub use slice::{
    SliceDiff, contains, duplicate_indices, first_mismatch, insert_at, is_blank, pop_at,
};
pub use text::{AnsiColor, AnsiStyle, color_str, han_count, is_digit, is_han};
