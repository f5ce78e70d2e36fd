// tests/summarize_stage.rs
use anyhow::{bail, Result};
use async_trait::async_trait;

use ai_news_aggregator::summarize::{SummaryProvider, Summarizer};
use ai_news_aggregator::{DelayPolicy, NewsRecord, NewsSource, SourceId};

fn record(title: &str, url: &str) -> NewsRecord {
    NewsRecord {
        title: title.to_string(),
        url: url.to_string(),
        content: "body".to_string(),
        source: NewsSource::ProductHunt,
        score: 10,
        timestamp: 0,
        comments_count: 0,
        source_id: SourceId::Text("p1".to_string()),
        summary: None,
    }
}

/// Succeeds for every title except those containing "fail".
struct FlakyProvider;

#[async_trait]
impl SummaryProvider for FlakyProvider {
    async fn summarize(&self, title: &str, _content: &str) -> Result<String> {
        if title.contains("fail") {
            bail!("provider outage");
        }
        Ok(format!("要約: {title}"))
    }
    fn name(&self) -> &'static str {
        "flaky"
    }
}

#[tokio::test]
async fn length_and_order_are_preserved_across_failures() {
    let summarizer = Summarizer::new(Box::new(FlakyProvider)).with_delay(DelayPolicy::none());
    let input = vec![
        record("first", "http://a"),
        record("will fail", "http://b"),
        record("third", "http://c"),
    ];
    let out = summarizer.summarize(input.clone()).await;

    assert_eq!(out.len(), input.len());
    let urls: Vec<&str> = out.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(urls, vec!["http://a", "http://b", "http://c"]);

    assert_eq!(out[0].summary.as_deref(), Some("要約: first"));
    // Failed item is the original, unmodified record.
    assert_eq!(out[1], input[1]);
    assert!(out[1].summary.is_none());
    assert_eq!(out[2].summary.as_deref(), Some("要約: third"));
}

#[tokio::test]
async fn success_changes_only_the_summary_field() {
    let summarizer = Summarizer::new(Box::new(FlakyProvider)).with_delay(DelayPolicy::none());
    let input = vec![record("one", "http://a")];
    let out = summarizer.summarize(input.clone()).await;
    let mut expected = input[0].clone();
    expected.summary = out[0].summary.clone();
    assert_eq!(out[0], expected);
    assert!(!out[0].summary.as_deref().unwrap().is_empty());
}

#[tokio::test]
async fn disabled_summarizer_returns_input_unchanged() {
    let summarizer = Summarizer::disabled();
    let input = vec![record("one", "http://a"), record("two", "http://b")];
    let out = summarizer.summarize(input.clone()).await;
    assert_eq!(out, input);
}

#[tokio::test]
async fn missing_credential_builds_disabled_stage() {
    let summarizer = Summarizer::from_credentials("", "gpt-4o-mini");
    let input = vec![record("one", "http://a")];
    let out = summarizer.summarize(input.clone()).await;
    assert_eq!(out, input);
}

#[tokio::test]
async fn empty_input_stays_empty() {
    let summarizer = Summarizer::new(Box::new(FlakyProvider)).with_delay(DelayPolicy::none());
    let out = summarizer.summarize(Vec::new()).await;
    assert!(out.is_empty());
}
