use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use frictionwatch::config::split_list;
use frictionwatch::models::FrictionRecord;
use frictionwatch::{
    Config, IngestConfig, IngestPipeline, RenderConfig, ReportRenderer, StackExchangeClient,
    StatsReport, Store,
};

#[derive(Parser, Debug)]
#[command(name = "frictionwatch")]
#[command(version = "0.1.0")]
#[command(about = "Track developer friction around competitor APIs and draft campaign pages")]
struct Args {
    /// Database path (defaults to <data dir>/<db name> from the environment)
    #[arg(long, global = true, env = "FRICTION_DATABASE")]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Poll the Q&A API and store new friction points
    Ingest {
        /// Competitor tags to scan (comma-separated)
        #[arg(long)]
        tags: Option<String>,

        /// Pain keywords a title must contain (comma-separated)
        #[arg(long)]
        keywords: Option<String>,

        /// Hide the progress bar
        #[arg(short, long)]
        quiet: bool,
    },

    /// Generate a redacted campaign page
    Render {
        /// Competitor tag to target; all competitors when omitted
        #[arg(short, long)]
        target: Option<String>,

        /// Directory for generated pages
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// Summarize stored friction points
    Stats {
        /// Restrict to one competitor tag
        #[arg(short, long)]
        competitor: Option<String>,

        /// Number of raw feed rows to print
        #[arg(long, default_value = "20")]
        limit: usize,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

const DEFAULT_LOG_FILTER: &str = "frictionwatch=info,reqwest=warn";

/// `RUST_LOG` wins whole when set and valid; otherwise the defaults apply.
fn log_filter(rust_log: Option<String>) -> EnvFilter {
    rust_log
        .filter(|v| !v.trim().is_empty())
        .and_then(|v| EnvFilter::try_new(v).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok()))
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let mut config = Config::from_env()?;
    let database_path = args
        .database
        .clone()
        .unwrap_or_else(|| config.database_path());

    match args.command {
        Command::Ingest {
            tags,
            keywords,
            quiet,
        } => {
            if let Some(tags) = tags {
                config.tags = split_list(&tags);
            }
            if let Some(keywords) = keywords {
                config.keywords = split_list(&keywords);
            }

            tracing::info!("Starting friction analysis (target: {})", database_path.display());
            let store = Store::open(&database_path)?;
            let client = StackExchangeClient::new(&config)?;

            let mut ingest_config = IngestConfig::from(&config);
            ingest_config.show_progress = !quiet;

            let pipeline = IngestPipeline::new(client, store, ingest_config);
            let new_records = pipeline.run_configured().await?;
            println!("Added {} new friction points to database.", new_records);
        }
        Command::Render { target, output_dir } => {
            let mut render_config = RenderConfig::from(&config);
            render_config.database_path = database_path;
            if let Some(dir) = output_dir {
                render_config.output_dir = dir;
            }

            let renderer = ReportRenderer::new(render_config)?;
            match renderer.render(target.as_deref()) {
                Ok(path) => println!("{}", path.display()),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Command::Stats {
            competitor,
            limit,
            format,
        } => {
            let report = match Store::open_existing(&database_path)
                .and_then(|store| StatsReport::load(&store, competitor.as_deref(), limit))
            {
                Ok(report) => report,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return Ok(ExitCode::FAILURE);
                }
            };

            match format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&report)?),
                _ if report.summary.total == 0 => println!("The database is currently empty."),
                _ => {
                    print!("{}", format_summary(&report));
                    print!("{}", format_feed(&report.feed));
                }
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn format_summary(report: &StatsReport) -> String {
    let summary = &report.summary;
    let mut output = String::new();

    output.push_str("\n=== Market Friction ===\n\n");
    output.push_str(&format!("Friction Points: {}\n", summary.total));
    output.push_str(&format!(
        "Top Pain: {}\n",
        summary
            .dominant_category
            .map(|c| c.to_string())
            .unwrap_or_else(|| "N/A".to_string())
    ));
    output.push_str(&format!("Competitors: {}\n", summary.competitor_count));
    output.push_str(&format!(
        "Tracked: {}\n",
        report.tracked_competitors.join(", ")
    ));

    output.push_str("\nBy Competitor:\n");
    for (competitor, count) in &summary.by_competitor {
        output.push_str(&format!("  {:<16} {}\n", competitor, count));
    }

    output.push_str("\nBy Pain Category:\n");
    for (category, count) in &summary.by_category {
        output.push_str(&format!("  {:<16} {}\n", category.as_str(), count));
    }

    output
}

fn format_feed(feed: &[FrictionRecord]) -> String {
    let mut output = String::new();

    output.push_str("\nRaw Data Feed:\n");
    for record in feed {
        output.push_str(&format!(
            "  [{}] {} - {}\n      {}\n",
            record.competitor, record.pain_category, record.title, record.link
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rust_log_overrides_defaults() {
        let filter = log_filter(Some("frictionwatch=debug".to_string())).to_string();
        assert!(filter.contains("frictionwatch=debug"));
        assert!(!filter.contains("frictionwatch=info"));
    }

    #[test]
    fn test_default_filter_without_rust_log() {
        let filter = log_filter(None).to_string();
        assert!(filter.contains("frictionwatch=info"));
        assert!(filter.contains("reqwest=warn"));
        assert_eq!(log_filter(Some("  ".to_string())).to_string(), filter);
    }
}
