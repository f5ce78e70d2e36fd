// tests/filter_relevance.rs
use ai_news_aggregator::filter::AiContentFilter;
use ai_news_aggregator::{NewsRecord, NewsSource, SourceId};

fn record(title: &str, url: &str, content: &str, score: u32) -> NewsRecord {
    NewsRecord {
        title: title.to_string(),
        url: url.to_string(),
        content: content.to_string(),
        source: NewsSource::HackerNews,
        score,
        timestamp: 0,
        comments_count: 0,
        source_id: SourceId::Int(1),
        summary: None,
    }
}

#[test]
fn score_floor_is_inclusive() {
    let filter = AiContentFilter::new(5);
    let below = record("ChatGPT news", "http://a", "", 4);
    let at = record("ChatGPT news", "http://b", "", 5);
    assert!(filter.filter(&[below]).is_empty());
    assert_eq!(filter.filter(&[at]).len(), 1);
}

#[test]
fn low_score_excludes_regardless_of_keywords() {
    let filter = AiContentFilter::new(5);
    let rec = record(
        "artificial intelligence machine learning chatgpt",
        "http://a",
        "llm claude gemini",
        4,
    );
    assert!(filter.filter(&[rec]).is_empty());
}

#[test]
fn whole_word_match_does_not_hit_inside_words() {
    let filter = AiContentFilter::new(0);
    // "ai" inside "said" and "air" must not match.
    let miss = record("He said the air was fresh", "http://a", "", 10);
    let hit = record("AI beats benchmark", "http://b", "", 10);
    let out = filter.filter(&[miss, hit]);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].url, "http://b");
}

#[test]
fn keyword_in_content_alone_is_enough() {
    let filter = AiContentFilter::new(0);
    let rec = record("Weekly roundup", "http://a", "including a new LLM release", 10);
    assert_eq!(filter.filter(&[rec]).len(), 1);
}

#[test]
fn japanese_terms_match() {
    let filter = AiContentFilter::new(0);
    let rec = record("人工知能 の最新動向", "http://a", "", 10);
    assert_eq!(filter.filter(&[rec]).len(), 1);
}

#[test]
fn filter_is_idempotent_and_order_preserving() {
    let filter = AiContentFilter::new(5);
    let input = vec![
        record("GPT-5 launches", "http://a", "", 50),
        record("New chair design", "http://b", "", 50),
        record("Claude update", "http://c", "", 7),
        record("Old LLM post", "http://d", "", 1),
    ];
    let once = filter.filter(&input);
    let twice = filter.filter(&once);
    assert_eq!(once, twice);
    // Subset in original relative order.
    let urls: Vec<&str> = once.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(urls, vec!["http://a", "http://c"]);
}

#[test]
fn records_pass_through_unmutated() {
    let filter = AiContentFilter::new(5);
    let rec = record("ChatGPT news", "http://a", "body", 9);
    let out = filter.filter(std::slice::from_ref(&rec));
    assert_eq!(out, vec![rec]);
}

#[test]
fn custom_vocabulary_replaces_builtin() {
    let filter = AiContentFilter::with_keywords(0, &["quantum".to_string()]);
    let quantum = record("Quantum leap", "http://a", "", 10);
    let gpt = record("ChatGPT news", "http://b", "", 10);
    let out = filter.filter(&[quantum, gpt]);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].url, "http://a");
}
