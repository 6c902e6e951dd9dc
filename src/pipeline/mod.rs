// ETL pipeline: processing (transform), loading, orchestration, and the
// in-memory storage used for development and tests.

pub mod load;
pub mod processing;
pub mod runner;
pub mod storage;

pub use load::{LoadReport, Loader, LoaderStats};
pub use runner::{EtlPipeline, PipelineSummary, StreamingRun};
