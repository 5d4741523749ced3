pub mod aggregate;
pub mod etl;
pub mod ingest;
pub mod pipeline;
pub mod report;

pub use crate::domain::model::{
    AggregateResult, Delimiter, IngestResult, Record, ReportOutcome, ReportRow, RunSummary,
    TransformResult, PERFORMANCE_FIELD, POSITION_FIELD, REQUIRED_FIELDS,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
