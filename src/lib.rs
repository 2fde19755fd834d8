pub mod config;
pub mod error;
pub mod models;
pub mod stackexchange;
pub mod analysis;
pub mod storage;
pub mod report;

pub use config::{Config, IngestConfig, RenderConfig};
pub use error::{Error, Result};
pub use stackexchange::{QuestionSource, StackExchangeClient};
pub use analysis::{classify, IngestPipeline, MarketSummary, StatsReport};
pub use report::ReportRenderer;
pub use storage::Store;
