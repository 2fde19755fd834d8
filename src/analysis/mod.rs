pub mod classifier;
pub mod pipeline;
pub mod summary;

pub use classifier::{classify, matches_pain_keyword};
pub use pipeline::IngestPipeline;
pub use summary::{dominant_category, MarketSummary, StatsReport};
