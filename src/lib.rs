pub mod app;
pub mod config;
pub mod constants;
pub mod domain;
pub mod error;
pub mod logging;
pub mod pipeline;

pub use config::EtlConfig;
pub use domain::{CanonicalRecord, EngagementLevel, RawRecord, SentimentLabel};
pub use error::{EtlError, Result};
pub use pipeline::{EtlPipeline, PipelineSummary};
