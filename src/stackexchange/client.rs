use async_trait::async_trait;
use reqwest::{header, Client};

use crate::config::{Config, PAGE_SIZE};
use crate::error::{Error, Result};
use crate::models::{Question, SearchResponse};
use crate::stackexchange::source::QuestionSource;

pub struct StackExchangeClient {
    client: Client,
    base_url: String,
    site: String,
    api_key: Option<String>,
}

impl StackExchangeClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("frictionwatch/0.1"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .gzip(true)
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            site: config.site.clone(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn search_url(&self) -> String {
        format!("{}/search/advanced", self.base_url)
    }

    pub fn search_params(&self, tag: &str) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("order", "desc".to_string()),
            ("sort", "creation".to_string()),
            ("tagged", tag.to_string()),
            ("site", self.site.clone()),
            ("pagesize", PAGE_SIZE.to_string()),
            ("filter", "withbody".to_string()),
        ];
        if let Some(ref key) = self.api_key {
            params.push(("key", key.clone()));
        }
        params
    }

    pub async fn search_recent(&self, tag: &str) -> Result<SearchResponse> {
        let url = self.search_url();
        tracing::debug!("Searching {} for tag {}", url, tag);

        let response = self
            .client
            .get(&url)
            .query(&self.search_params(tag))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::NetworkFailure(format!(
                "search for {} returned {} - {}",
                tag, status, body
            )));
        }

        let body = response.text().await?;
        parse_search_response(&body)
    }
}

/// Decodes a search body, turning an API error payload into a failure.
pub fn parse_search_response(body: &str) -> Result<SearchResponse> {
    let parsed: SearchResponse = serde_json::from_str(body)?;

    if let Some(message) = parsed.error_message.as_deref() {
        return Err(Error::NetworkFailure(format!(
            "API error {}: {}",
            parsed.error_id.unwrap_or_default(),
            message
        )));
    }

    if let Some(quota) = parsed.quota_remaining {
        tracing::debug!("API quota remaining: {}", quota);
    }

    if parsed.has_more {
        tracing::debug!(
            "{} questions returned, older pages not fetched",
            parsed.items.len()
        );
    }

    Ok(parsed)
}

#[async_trait]
impl QuestionSource for StackExchangeClient {
    async fn recent_questions(&self, tag: &str) -> Result<Vec<Question>> {
        Ok(self.search_recent(tag).await?.items)
    }

    fn name(&self) -> &str {
        "stackexchange"
    }
}
