pub mod csv;
pub mod json;

pub use csv::{write_emissions, write_emissions_file};
pub use json::{
    write_summary, write_summary_file, DatasetSummary, PlaybackSummary, RadiusRange, Span,
};
