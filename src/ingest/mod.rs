//! Ingestion of delimited county data
//!
//! Rows are validated into [`Record`](crate::model::Record)s; invalid rows are
//! reported and skipped. The accepted stream feeds both indexes.

mod reader;
mod report;
mod series;

pub use reader::{parse_row, read_records, validate_record, COLUMNS};
pub use report::{IngestReport, SkippedRow};
pub use series::{county_segment, trie_path, Series, SeriesBuilder};
