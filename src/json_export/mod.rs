mod converters;
mod exporters;
mod types;

pub use converters::process_cell_value;
pub use exporters::{export_json, frame_to_records, serialize_to_json};
pub use types::OrderedRecords;
