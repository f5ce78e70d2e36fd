// tests/social_dedup.rs
use ai_news_aggregator::collect::social::{dedup_by_url, derive_title};
use ai_news_aggregator::{NewsRecord, NewsSource, SourceId};

fn record(id: u64, url: &str) -> NewsRecord {
    NewsRecord {
        title: format!("tweet {id}"),
        url: url.to_string(),
        content: String::new(),
        source: NewsSource::Twitter,
        score: 0,
        timestamp: 0,
        comments_count: 0,
        source_id: SourceId::Int(id),
        summary: None,
    }
}

#[test]
fn one_record_per_distinct_url_first_seen_wins() {
    let input = vec![
        record(1, "http://a"),
        record(2, "http://b"),
        record(3, "http://a"),
        record(4, "http://c"),
        record(5, "http://b"),
    ];
    let out = dedup_by_url(input);
    let ids: Vec<_> = out.iter().map(|r| r.source_id.clone()).collect();
    assert_eq!(
        ids,
        vec![SourceId::Int(1), SourceId::Int(2), SourceId::Int(4)]
    );
}

#[test]
fn dedup_is_idempotent() {
    let input = vec![record(1, "http://a"), record(2, "http://a"), record(3, "http://b")];
    let once = dedup_by_url(input);
    let twice = dedup_by_url(once.clone());
    assert_eq!(once, twice);
}

#[test]
fn url_variants_stay_distinct() {
    // Raw comparison by design: tracking parameters are not normalized.
    let input = vec![record(1, "http://a?utm=x"), record(2, "http://a")];
    assert_eq!(dedup_by_url(input).len(), 2);
}

#[test]
fn title_derivation_cleans_and_collapses() {
    let raw = "Check   this out @someone https://t.co/xyz #AI is moving fast";
    assert_eq!(derive_title(raw), "Check this out #AI is moving fast");
}

#[test]
fn title_derivation_truncates_long_text() {
    let raw = "word ".repeat(60);
    let title = derive_title(&raw);
    assert!(title.ends_with("..."));
    assert_eq!(title.chars().count(), 103);
}
