use crate::error::{Error, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_TAGS: &[&str] = &["twilio", "messagebird", "plivo", "sendgrid"];
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "error", "fail", "slow", "stuck", "limit", "bug", "exception", "help",
];
pub const PAGE_SIZE: u32 = 50;

#[derive(Debug, Clone)]
pub struct Config {
    pub tags: Vec<String>,
    pub keywords: Vec<String>,
    pub redact_list: Vec<String>,
    pub data_dir: PathBuf,
    pub db_name: String,
    pub output_dir: PathBuf,
    pub api_url: String,
    pub site: String,
    pub api_key: Option<String>,
    pub tag_delay_ms: u64,
    pub placeholder: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let tags = env::var("FRICTION_TAGS")
            .map(|v| split_list(&v))
            .unwrap_or_else(|_| to_owned_list(DEFAULT_TAGS));

        let keywords = env::var("FRICTION_KEYWORDS")
            .map(|v| split_list(&v))
            .unwrap_or_else(|_| to_owned_list(DEFAULT_KEYWORDS));

        let redact_list = env::var("FRICTION_REDACT")
            .map(|v| split_list(&v))
            .unwrap_or_else(|_| tags.clone());

        let data_dir = env::var("FRICTION_DATA_DIR")
            .unwrap_or_else(|_| "analyze_store".to_string())
            .into();

        let db_name = env::var("FRICTION_DB_NAME")
            .unwrap_or_else(|_| "market_friction.db".to_string());

        let output_dir = env::var("FRICTION_OUTPUT_DIR")
            .unwrap_or_else(|_| "campaign_pages".to_string())
            .into();

        let api_url = env::var("STACKEXCHANGE_API_URL")
            .unwrap_or_else(|_| "https://api.stackexchange.com/2.3".to_string());

        let site = env::var("STACKEXCHANGE_SITE").unwrap_or_else(|_| "stackoverflow".to_string());

        let api_key = env::var("STACKEXCHANGE_KEY").ok().filter(|k| !k.is_empty());

        let tag_delay_ms = match env::var("FRICTION_TAG_DELAY_MS") {
            Ok(v) => v.parse().map_err(|_| {
                Error::Config(format!("FRICTION_TAG_DELAY_MS must be an integer, got {:?}", v))
            })?,
            Err(_) => 1000,
        };

        let placeholder =
            env::var("FRICTION_PLACEHOLDER").unwrap_or_else(|_| "[Provider]".to_string());

        Ok(Self {
            tags,
            keywords,
            redact_list,
            data_dir,
            db_name,
            output_dir,
            api_url,
            site,
            api_key,
            tag_delay_ms,
            placeholder,
        })
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(&self.db_name)
    }
}

impl Default for Config {
    fn default() -> Self {
        let tags = to_owned_list(DEFAULT_TAGS);
        Self {
            redact_list: tags.clone(),
            tags,
            keywords: to_owned_list(DEFAULT_KEYWORDS),
            data_dir: PathBuf::from("analyze_store"),
            db_name: "market_friction.db".to_string(),
            output_dir: PathBuf::from("campaign_pages"),
            api_url: "https://api.stackexchange.com/2.3".to_string(),
            site: "stackoverflow".to_string(),
            api_key: None,
            tag_delay_ms: 1000,
            placeholder: "[Provider]".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct IngestConfig {
    pub tags: Vec<String>,
    pub keywords: Vec<String>,
    pub tag_delay: Duration,
    pub show_progress: bool,
}

impl From<&Config> for IngestConfig {
    fn from(config: &Config) -> Self {
        Self {
            tags: config.tags.clone(),
            keywords: config.keywords.clone(),
            tag_delay: Duration::from_millis(config.tag_delay_ms),
            show_progress: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub database_path: PathBuf,
    pub output_dir: PathBuf,
    pub redact_list: Vec<String>,
    pub placeholder: String,
}

impl From<&Config> for RenderConfig {
    fn from(config: &Config) -> Self {
        Self {
            database_path: config.database_path(),
            output_dir: config.output_dir.clone(),
            redact_list: config.redact_list.clone(),
            placeholder: config.placeholder.clone(),
        }
    }
}

pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
