use indicatif::{ProgressBar, ProgressStyle};

use crate::analysis::classifier::{classify, matches_pain_keyword};
use crate::config::IngestConfig;
use crate::error::Result;
use crate::models::{FrictionRecord, Question};
use crate::stackexchange::QuestionSource;
use crate::storage::Store;

/// Fetch, filter, classify and persist friction points, one tag at a time.
pub struct IngestPipeline {
    source: Box<dyn QuestionSource>,
    store: Store,
    config: IngestConfig,
}

impl IngestPipeline {
    pub fn new(source: impl QuestionSource + 'static, store: Store, config: IngestConfig) -> Self {
        Self {
            source: Box::new(source),
            store,
            config,
        }
    }

    /// Runs over the configured tags and keywords.
    pub async fn run_configured(&self) -> Result<usize> {
        self.run(&self.config.tags, &self.config.keywords).await
    }

    /// Returns the number of records actually inserted across all tags.
    ///
    /// A tag whose fetch or decode fails is logged and skipped; nothing from it
    /// is committed. Storage failures abort the run.
    pub async fn run(&self, tags: &[String], keywords: &[String]) -> Result<usize> {
        let pb = self.progress_bar(tags.len());
        let mut total_new = 0;

        for (i, tag) in tags.iter().enumerate() {
            pb.set_message(tag.clone());
            tracing::info!("Scanning {} stream via {}", tag, self.source.name());

            match self.ingest_tag(tag, keywords).await {
                Ok(inserted) => {
                    tracing::info!("{}: {} new friction points", tag, inserted);
                    total_new += inserted;
                }
                Err(e) if e.is_recoverable() => {
                    tracing::warn!("Error scanning {}: {}", tag, e);
                }
                Err(e) => {
                    pb.abandon();
                    return Err(e);
                }
            }

            pb.inc(1);

            if i + 1 < tags.len() && !self.config.tag_delay.is_zero() {
                tokio::time::sleep(self.config.tag_delay).await;
            }
        }

        pb.finish_with_message("scan complete");
        Ok(total_new)
    }

    async fn ingest_tag(&self, tag: &str, keywords: &[String]) -> Result<usize> {
        let questions = self.source.recent_questions(tag).await?;
        tracing::debug!("{}: fetched {} questions", tag, questions.len());

        let records = select_friction(&questions, tag, keywords);
        if records.is_empty() {
            return Ok(0);
        }

        self.store.insert_batch(&records)
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} tags {msg}")
            .map(|s| s.progress_chars("#>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        pb.set_style(style);
        pb
    }
}

/// Keeps questions whose title carries a pain keyword and classifies them.
pub fn select_friction(questions: &[Question], tag: &str, keywords: &[String]) -> Vec<FrictionRecord> {
    questions
        .iter()
        .filter(|q| matches_pain_keyword(&q.title, keywords))
        .map(|q| FrictionRecord::from_question(q, tag, classify(&q.title)))
        .collect()
}
