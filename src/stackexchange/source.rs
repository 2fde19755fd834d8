use async_trait::async_trait;

use crate::error::Result;
use crate::models::Question;

/// Upstream feed of recent questions for a tag.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Newest questions for `tag`, one fixed-size page.
    async fn recent_questions(&self, tag: &str) -> Result<Vec<Question>>;
    fn name(&self) -> &str;
}
