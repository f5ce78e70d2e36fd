// src/record.rs
use serde::{Deserialize, Serialize};

/// Originating provider of a news record. Serialized with the human-readable
/// label so persisted output matches what readers expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NewsSource {
    #[serde(rename = "Hacker News")]
    HackerNews,
    #[serde(rename = "Product Hunt")]
    ProductHunt,
    #[serde(rename = "Twitter")]
    Twitter,
}

impl NewsSource {
    pub fn label(&self) -> &'static str {
        match self {
            NewsSource::HackerNews => "Hacker News",
            NewsSource::ProductHunt => "Product Hunt",
            NewsSource::Twitter => "Twitter",
        }
    }

    /// CSS class suffix used by the HTML report.
    pub fn css_class(&self) -> &'static str {
        match self {
            NewsSource::HackerNews => "hackernews",
            NewsSource::ProductHunt => "producthunt",
            NewsSource::Twitter => "twitter",
        }
    }
}

impl std::fmt::Display for NewsSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Opaque per-provider identifier. Hacker News and Twitter use numeric ids,
/// Product Hunt may not; not unique across sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceId {
    Int(u64),
    Text(String),
}

/// One normalized news item. Constructed exactly once by a collector,
/// mutated exactly once by the summarizer (adding `summary`), otherwise
/// read-only through the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsRecord {
    pub title: String,
    /// Canonical link; dedup identity within a single run.
    pub url: String,
    pub content: String,
    pub source: NewsSource,
    /// Source-native popularity metric (points, votes, favorites).
    pub score: u32,
    /// Unix seconds of original publication; 0 if unknown.
    pub timestamp: i64,
    pub comments_count: u32,
    pub source_id: SourceId,
    /// Populated by the summarizer; absent means not attempted or failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_serializes_as_label() {
        let json = serde_json::to_string(&NewsSource::HackerNews).unwrap();
        assert_eq!(json, r#""Hacker News""#);
    }

    #[test]
    fn summary_is_omitted_when_absent() {
        let rec = NewsRecord {
            title: "t".into(),
            url: "http://a".into(),
            content: String::new(),
            source: NewsSource::Twitter,
            score: 1,
            timestamp: 0,
            comments_count: 0,
            source_id: SourceId::Int(7),
            summary: None,
        };
        let json = serde_json::to_string(&rec).unwrap();
        assert!(!json.contains("summary"));
        assert!(json.contains(r#""source_id":7"#));
    }
}
