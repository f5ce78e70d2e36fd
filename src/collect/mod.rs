// src/collect/mod.rs
//! Source collectors: one per external provider, all sharing the same
//! infallible `collect()` surface. Provider-level failure is absorbed
//! inside each collector and contributes zero records.

pub mod hacker_news;
pub mod product_hunt;
pub mod social;

use std::time::Duration;

use crate::record::NewsRecord;

/// Common capability of the three provider variants. `collect()` never
/// errors: each implementation catches its own failures, logs them, and
/// degrades to an empty contribution.
#[async_trait::async_trait]
pub trait Collector: Send + Sync {
    async fn collect(&self) -> Vec<NewsRecord>;
    fn name(&self) -> &'static str;
}

/// Fixed pause inserted between successive provider calls to respect
/// implicit rate limits. Injectable so tests run without real waiting.
#[derive(Debug, Clone, Copy)]
pub struct DelayPolicy {
    pause: Option<Duration>,
}

impl DelayPolicy {
    pub fn fixed(pause: Duration) -> Self {
        Self { pause: Some(pause) }
    }

    pub fn none() -> Self {
        Self { pause: None }
    }

    pub async fn pause(&self) {
        if let Some(d) = self.pause {
            tokio::time::sleep(d).await;
        }
    }
}

/// Shared HTTP client: custom user agent plus bounded per-request timeouts.
/// A timed-out call is treated as that call's failure.
pub(crate) fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent("ai-news-aggregator/0.1")
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(30))
        .build()
        .expect("reqwest client")
}

/// Normalize provider body text: HTML entity decode, tag strip, whitespace
/// collapse. Hacker News `text` fields arrive HTML-encoded.
pub fn strip_html(s: &str) -> String {
    let decoded = html_escape::decode_html_entities(s).to_string();

    static RE_TAGS: once_cell::sync::Lazy<regex::Regex> =
        once_cell::sync::Lazy::new(|| regex::Regex::new(r"(?is)</?[^>]+>").unwrap());
    let stripped = RE_TAGS.replace_all(&decoded, " ");

    static RE_WS: once_cell::sync::Lazy<regex::Regex> =
        once_cell::sync::Lazy::new(|| regex::Regex::new(r"\s+").unwrap());
    RE_WS.replace_all(&stripped, " ").trim().to_string()
}
