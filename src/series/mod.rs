pub mod parse;
pub mod store;

pub use parse::{parse_row, parse_timestamp};
pub use store::{GapDiagnostics, Partition, SeriesWindow, SkippedRow, TimeSeriesStore};
