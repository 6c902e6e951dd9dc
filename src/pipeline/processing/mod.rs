//! The Transform stage: pure, deterministic normalization and labeling.

pub mod engagement;
pub mod normalize;
pub mod sentiment;
pub mod text;
pub mod transform;

pub use engagement::{EngagementClassifier, EngagementThresholds};
pub use normalize::{RecordNormalizer, RejectReason};
pub use sentiment::{SentimentEstimator, SentimentLexicon};
pub use transform::{TransformStats, Transformer};
