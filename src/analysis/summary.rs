use std::collections::HashMap;

use serde::Serialize;

use crate::error::Result;
use crate::models::{FrictionRecord, PainCategory};
use crate::report::decode_entities;
use crate::storage::Store;

/// Most frequent category among `records`. Ties resolve to any one of the tied
/// categories; callers must not rely on which.
pub fn dominant_category(records: &[FrictionRecord]) -> Option<PainCategory> {
    category_counts(records)
        .into_iter()
        .max_by_key(|(_, count)| *count)
        .map(|(category, _)| category)
}

pub fn category_counts(records: &[FrictionRecord]) -> HashMap<PainCategory, usize> {
    let mut counts = HashMap::new();
    for record in records {
        *counts.entry(record.pain_category).or_insert(0) += 1;
    }
    counts
}

/// Aggregate view over stored friction points.
#[derive(Debug, Clone, Serialize)]
pub struct MarketSummary {
    pub total: usize,
    pub competitor_count: usize,
    pub dominant_category: Option<PainCategory>,
    pub by_competitor: Vec<(String, usize)>,
    pub by_category: Vec<(PainCategory, usize)>,
}

impl MarketSummary {
    pub fn from_records(records: &[FrictionRecord]) -> Self {
        let mut competitors: HashMap<&str, usize> = HashMap::new();
        for record in records {
            *competitors.entry(record.competitor.as_str()).or_insert(0) += 1;
        }

        let mut by_competitor: Vec<_> = competitors
            .into_iter()
            .map(|(name, count)| (name.to_string(), count))
            .collect();
        by_competitor.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let counts = category_counts(records);
        let by_category: Vec<_> = PainCategory::ALL
            .iter()
            .filter_map(|c| counts.get(c).map(|n| (*c, *n)))
            .collect();

        Self {
            total: records.len(),
            competitor_count: by_competitor.len(),
            dominant_category: dominant_category(records),
            by_competitor,
            by_category,
        }
    }
}

/// What `stats` shows: the summary, every tag seen in the store, and the newest rows.
#[derive(Debug, Clone, Serialize)]
pub struct StatsReport {
    pub tracked_competitors: Vec<String>,
    pub summary: MarketSummary,
    pub feed: Vec<FrictionRecord>,
}

impl StatsReport {
    pub fn load(store: &Store, competitor: Option<&str>, limit: usize) -> Result<Self> {
        let records = store.query_all(competitor)?;
        let feed = records
            .iter()
            .rev()
            .take(limit)
            .map(|r| FrictionRecord {
                title: decode_entities(&r.title),
                ..r.clone()
            })
            .collect();

        Ok(Self {
            tracked_competitors: store.competitors()?,
            summary: MarketSummary::from_records(&records),
            feed,
        })
    }
}
