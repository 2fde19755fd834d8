pub mod client;
pub mod source;

pub use client::StackExchangeClient;
pub use source::QuestionSource;
