use std::path::PathBuf;

use crate::analysis::dominant_category;
use crate::config::RenderConfig;
use crate::error::{Error, Result};
use crate::models::{FrictionRecord, PainCategory};
use crate::report::html::{decode_entities, escape_html};
use crate::report::redact::Redactor;
use crate::storage::Store;

const HIGHLIGHT_COUNT: usize = 3;
const SUBHEAD: &str = "Switch to Us for reliable delivery.";

#[derive(Debug, Clone)]
pub struct Highlight {
    pub title: String,
    pub pain_category: PainCategory,
}

/// Everything a campaign page shows, already redacted.
#[derive(Debug, Clone)]
pub struct CampaignPage {
    pub target: Option<String>,
    pub top_pain: PainCategory,
    pub highlights: Vec<Highlight>,
}

impl CampaignPage {
    pub fn headline(&self) -> String {
        format!("Tired of {} Issues?", self.top_pain)
    }

    pub fn target_label(&self) -> &str {
        self.target.as_deref().unwrap_or("all competitors")
    }

    pub fn to_html(&self) -> String {
        let items: String = self
            .highlights
            .iter()
            .map(|h| {
                format!(
                    "                    <li>\"{}\" <span class=\"text-red-500 text-xs font-bold\">({})</span></li>\n",
                    escape_html(&h.title),
                    h.pain_category
                )
            })
            .collect();

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Comparison: {target} vs Us</title>
    <script src="https://cdn.tailwindcss.com"></script>
</head>
<body class="bg-slate-50 text-slate-800 font-sans p-10">
    <div class="max-w-3xl mx-auto bg-white p-8 rounded shadow">
        <h1 class="text-3xl font-bold text-indigo-700 mb-4">{headline}</h1>
        <p class="text-lg text-slate-600 mb-6">{subhead}</p>
        <div class="bg-gray-100 p-4 rounded mb-6">
            <h3 class="font-bold mb-2 text-sm uppercase text-gray-500">Real User Complaints:</h3>
            <ul class="list-disc pl-5 space-y-2">
{items}            </ul>
        </div>
        <p class="text-xs text-center text-gray-400">Generated from public data. Names redacted where applicable.</p>
    </div>
</body>
</html>
"#,
            target = escape_html(self.target_label()),
            headline = escape_html(&self.headline()),
            subhead = SUBHEAD,
            items = items,
        )
    }
}

pub struct ReportRenderer {
    config: RenderConfig,
    redactor: Redactor,
}

impl ReportRenderer {
    pub fn new(config: RenderConfig) -> Result<Self> {
        let redactor = Redactor::new(&config.redact_list, &config.placeholder)?;
        Ok(Self { config, redactor })
    }

    /// Writes the campaign page for `target` (or every competitor) and returns its path.
    ///
    /// Fails with `StoreNotFound` when no database exists yet and with
    /// `NoDataForTarget` when the filtered set is empty.
    pub fn render(&self, target: Option<&str>) -> Result<PathBuf> {
        let store = Store::open_existing(&self.config.database_path)?;
        let records = store.query_all(target)?;
        drop(store);

        let page = self.build_page(&records, target)?;

        std::fs::create_dir_all(&self.config.output_dir)?;
        let output_path = self.config.output_dir.join(campaign_file_name(target));
        std::fs::write(&output_path, page.to_html())?;

        tracing::info!(
            "Campaign for {} written to {}",
            page.target_label(),
            output_path.display()
        );
        Ok(output_path)
    }

    /// Builds the page model from records in insertion order.
    pub fn build_page(&self, records: &[FrictionRecord], target: Option<&str>) -> Result<CampaignPage> {
        let top_pain = dominant_category(records).ok_or_else(|| {
            Error::NoDataForTarget(target.unwrap_or("any competitor").to_string())
        })?;

        let highlights = records
            .iter()
            .rev()
            .take(HIGHLIGHT_COUNT)
            .map(|r| Highlight {
                title: self.redactor.redact(&decode_entities(&r.title)),
                pain_category: r.pain_category,
            })
            .collect();

        Ok(CampaignPage {
            target: target.map(str::to_string),
            top_pain,
            highlights,
        })
    }
}

/// `campaign_<target>.html`, lower-cased; `campaign_generic.html` without a target.
pub fn campaign_file_name(target: Option<&str>) -> String {
    let safe_name = match target {
        Some(t) if !t.trim().is_empty() => t
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                    c
                } else {
                    '-'
                }
            })
            .collect(),
        _ => "generic".to_string(),
    };
    format!("campaign_{}.html", safe_name)
}
