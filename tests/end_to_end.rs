use std::time::Duration;

use async_trait::async_trait;
use tempfile::TempDir;

use frictionwatch::models::{PainCategory, Question};
use frictionwatch::{
    Config, Error, IngestConfig, IngestPipeline, QuestionSource, RenderConfig, ReportRenderer,
    Result, Store,
};

struct AcmeFeed;

#[async_trait]
impl QuestionSource for AcmeFeed {
    async fn recent_questions(&self, tag: &str) -> Result<Vec<Question>> {
        if tag != "acme" {
            return Err(Error::NetworkFailure(format!("no feed for {}", tag)));
        }
        Ok(vec![
            Question {
                question_id: 501,
                title: "Acme API timeout error".to_string(),
                link: "https://stackoverflow.com/q/501".to_string(),
                score: 4,
                view_count: 88,
                is_answered: false,
            },
            Question {
                question_id: 502,
                title: "great docs".to_string(),
                link: "https://stackoverflow.com/q/502".to_string(),
                score: 10,
                view_count: 300,
                is_answered: true,
            },
        ])
    }

    fn name(&self) -> &str {
        "acme-feed"
    }
}

fn config_in(dir: &TempDir) -> Config {
    Config {
        tags: vec!["acme".to_string(), "offline".to_string()],
        redact_list: vec!["acme".to_string()],
        data_dir: dir.path().join("analyze_store"),
        output_dir: dir.path().join("campaign_pages"),
        tag_delay_ms: 0,
        ..Config::default()
    }
}

#[tokio::test]
async fn ingest_then_render() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);

    let renderer = ReportRenderer::new(RenderConfig::from(&config)).unwrap();
    assert!(matches!(renderer.render(Some("acme")), Err(Error::StoreNotFound(_))));

    let mut ingest_config = IngestConfig::from(&config);
    ingest_config.show_progress = false;
    assert_eq!(ingest_config.tag_delay, Duration::ZERO);

    let store = Store::open(config.database_path()).unwrap();
    let pipeline = IngestPipeline::new(AcmeFeed, store, ingest_config);
    assert_eq!(pipeline.run_configured().await.unwrap(), 1);
    assert_eq!(pipeline.run_configured().await.unwrap(), 0);

    let stored = pipeline.store().query_all(Some("acme")).unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, "501");
    assert_eq!(stored[0].pain_category, PainCategory::Reliability);
    drop(pipeline);

    let path = renderer.render(Some("acme")).unwrap();
    assert_eq!(path, config.output_dir.join("campaign_acme.html"));

    let html = std::fs::read_to_string(&path).unwrap();
    assert!(html.contains("Tired of Reliability Issues?"));
    assert!(html.contains("[Provider] API timeout error"));
    assert!(!html.contains("Acme API"));

    assert!(matches!(renderer.render(Some("offline")), Err(Error::NoDataForTarget(_))));
}
