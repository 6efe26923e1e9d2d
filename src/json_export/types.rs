use indexmap::IndexMap;
use serde_json::Value;

/// One JSON object per data row, keys in header order.
pub type OrderedRecords = Vec<IndexMap<String, Value>>;
