use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::question::Question;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PainCategory {
    Pricing,
    Reliability,
    Performance,
    Implementation,
}

impl PainCategory {
    pub const ALL: [PainCategory; 4] = [
        PainCategory::Pricing,
        PainCategory::Reliability,
        PainCategory::Performance,
        PainCategory::Implementation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PainCategory::Pricing => "Pricing",
            PainCategory::Reliability => "Reliability",
            PainCategory::Performance => "Performance",
            PainCategory::Implementation => "Implementation",
        }
    }
}

impl std::fmt::Display for PainCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PainCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Pricing" => Ok(PainCategory::Pricing),
            "Reliability" => Ok(PainCategory::Reliability),
            "Performance" => Ok(PainCategory::Performance),
            "Implementation" => Ok(PainCategory::Implementation),
            other => Err(format!("unknown pain category: {}", other)),
        }
    }
}

/// A complaint collected under one competitor tag. Never mutated once stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrictionRecord {
    pub id: String,
    pub competitor: String,
    pub title: String,
    pub link: String,
    pub score: i64,
    pub view_count: i64,
    pub is_answered: bool,
    pub pain_category: PainCategory,
    pub timestamp: DateTime<Utc>,
}

impl FrictionRecord {
    pub fn from_question(question: &Question, competitor: &str, category: PainCategory) -> Self {
        Self {
            id: question.question_id.to_string(),
            competitor: competitor.to_string(),
            title: question.title.clone(),
            link: question.link.clone(),
            score: question.score,
            view_count: question.view_count,
            is_answered: question.is_answered,
            pain_category: category,
            timestamp: Utc::now(),
        }
    }
}
