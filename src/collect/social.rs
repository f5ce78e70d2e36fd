// src/collect/social.rs
//! Twitter collector: one search per AI-related term, accumulated with a
//! per-id pass during collection and a final link-keyed dedup pass.

use std::collections::HashSet;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use tracing::{error, info};

use super::{http_client, Collector, DelayPolicy};
use crate::record::{NewsRecord, NewsSource, SourceId};

const TOKEN_URL: &str = "https://api.twitter.com/oauth2/token";
const SEARCH_URL: &str = "https://api.twitter.com/1.1/search/tweets.json";

/// Search terms covering AI news, English and Japanese.
const AI_SEARCH_TERMS: &[&str] = &[
    "artificial intelligence",
    "#AI",
    "#artificialintelligence",
    "machine learning",
    "#ML",
    "#machinelearning",
    "deep learning",
    "#DL",
    "#deeplearning",
    "LLM",
    "大規模言語モデル",
    "#LLM",
    "GPT",
    "ChatGPT",
    "#GPT",
    "#ChatGPT",
    "Anthropic",
    "Claude",
    "#Claude",
    "Gemini",
    "#Gemini",
    "AI開発",
    "AIモデル",
    "#AI開発",
];

/// Title derivation caps at this many characters (plus an ellipsis).
const MAX_TITLE_LEN: usize = 100;

#[derive(Debug, Clone, Default)]
pub struct TwitterCredentials {
    pub api_key: String,
    pub api_secret: String,
    pub access_token: String,
    pub access_secret: String,
}

impl TwitterCredentials {
    /// All four values are required; any missing one disables the source.
    pub fn complete(&self) -> bool {
        !self.api_key.is_empty()
            && !self.api_secret.is_empty()
            && !self.access_token.is_empty()
            && !self.access_secret.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    statuses: Vec<Tweet>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Tweet {
    id: u64,
    full_text: Option<String>,
    text: Option<String>,
    #[serde(default)]
    favorite_count: u32,
    #[serde(default)]
    retweet_count: u32,
    created_at: Option<String>,
    #[serde(default)]
    entities: Entities,
}

#[derive(Debug, Default, Deserialize)]
struct Entities {
    #[serde(default)]
    urls: Vec<UrlEntity>,
}

#[derive(Debug, Deserialize)]
struct UrlEntity {
    expanded_url: Option<String>,
}

pub struct TwitterCollector {
    client: reqwest::Client,
    creds: TwitterCredentials,
    max_tweets: usize,
    delay: DelayPolicy,
}

impl TwitterCollector {
    pub fn new(creds: TwitterCredentials, max_tweets: usize) -> Self {
        Self {
            client: http_client(),
            creds,
            max_tweets,
            // Standard search is tightly rate limited; pause between terms.
            delay: DelayPolicy::fixed(Duration::from_secs(2)),
        }
    }

    pub fn with_delay(mut self, delay: DelayPolicy) -> Self {
        self.delay = delay;
        self
    }

    /// App-only bearer token exchange (client credentials grant).
    async fn bearer_token(&self) -> Result<String> {
        let resp = self
            .client
            .post(TOKEN_URL)
            .basic_auth(&self.creds.api_key, Some(&self.creds.api_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .context("requesting bearer token")?;
        if !resp.status().is_success() {
            bail!("bearer token request failed with {}", resp.status());
        }
        let token: TokenResponse = resp.json().await.context("parsing bearer token")?;
        Ok(token.access_token)
    }

    async fn search(&self, bearer: &str, term: &str) -> Result<Vec<Tweet>> {
        let query = format!("{term} filter:links -filter:retweets");
        let count = self.max_tweets.min(100);
        let resp: SearchResponse = self
            .client
            .get(SEARCH_URL)
            .bearer_auth(bearer)
            .query(&[
                ("q", query.as_str()),
                ("count", &count.to_string()),
                ("result_type", "mixed"),
                ("tweet_mode", "extended"),
                ("lang", "en"),
            ])
            .send()
            .await
            .context("searching tweets")?
            .error_for_status()
            .context("search status")?
            .json()
            .await
            .context("parsing search response")?;
        Ok(resp.statuses)
    }

    async fn try_collect(&self) -> Result<Vec<NewsRecord>> {
        let bearer = self.bearer_token().await?;
        info!("Twitter authentication succeeded");

        let mut seen_ids: HashSet<u64> = HashSet::new();
        let mut collected = Vec::new();
        for term in AI_SEARCH_TERMS {
            match self.search(&bearer, term).await {
                Ok(tweets) => {
                    info!(term = %term, count = tweets.len(), "searched tweets");
                    for tweet in tweets {
                        if seen_ids.insert(tweet.id) {
                            collected.push(tweet_to_record(tweet));
                        }
                    }
                }
                // One failing term does not abort the remaining terms.
                Err(e) => error!(term = %term, error = ?e, "skipping search term"),
            }
            self.delay.pause().await;
        }

        Ok(dedup_by_url(collected))
    }
}

#[async_trait]
impl Collector for TwitterCollector {
    async fn collect(&self) -> Vec<NewsRecord> {
        info!("collecting from Twitter");
        if !self.creds.complete() {
            error!("Twitter credentials are incomplete");
            return Vec::new();
        }
        match self.try_collect().await {
            Ok(records) => {
                info!(count = records.len(), "Twitter collection finished");
                records
            }
            Err(e) => {
                error!(error = ?e, "Twitter collection failed");
                Vec::new()
            }
        }
    }

    fn name(&self) -> &'static str {
        "Twitter"
    }
}

/// Keep the first record for each distinct URL, preserving order.
/// URLs are compared verbatim; variants of the same link (tracking
/// parameters, shorteners) count as distinct.
pub fn dedup_by_url(records: Vec<NewsRecord>) -> Vec<NewsRecord> {
    let mut seen: HashSet<String> = HashSet::new();
    records
        .into_iter()
        .filter(|r| seen.insert(r.url.clone()))
        .collect()
}

pub(crate) fn tweet_to_record(tweet: Tweet) -> NewsRecord {
    let text = tweet
        .full_text
        .or(tweet.text)
        .unwrap_or_default();
    let url = tweet
        .entities
        .urls
        .iter()
        .find_map(|u| u.expanded_url.clone())
        .unwrap_or_else(|| format!("https://twitter.com/i/web/status/{}", tweet.id));
    NewsRecord {
        title: derive_title(&text),
        url,
        content: text,
        source: NewsSource::Twitter,
        score: tweet.favorite_count,
        timestamp: tweet
            .created_at
            .as_deref()
            .map(parse_created_at)
            .unwrap_or(0),
        comments_count: tweet.retweet_count,
        source_id: SourceId::Int(tweet.id),
        summary: None,
    }
}

/// Twitter v1.1 timestamps look like `Wed Oct 10 20:19:24 +0000 2018`.
fn parse_created_at(s: &str) -> i64 {
    chrono::DateTime::parse_from_str(s, "%a %b %d %H:%M:%S %z %Y")
        .map(|dt| dt.timestamp())
        .unwrap_or(0)
}

/// Derive a display title from raw tweet text: drop link and mention
/// tokens, collapse whitespace, truncate with an ellipsis past the cap.
pub fn derive_title(text: &str) -> String {
    static RE_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+").unwrap());
    static RE_MENTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"@\w+").unwrap());

    let without_links = RE_LINK.replace_all(text, " ");
    let without_mentions = RE_MENTION.replace_all(&without_links, " ");
    let cleaned = without_mentions
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    if cleaned.chars().count() > MAX_TITLE_LEN {
        let truncated: String = cleaned.chars().take(MAX_TITLE_LEN).collect();
        format!("{truncated}...")
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_title_strips_links_and_mentions() {
        let text = "Big news from @OpenAI today: https://t.co/abc123  GPT update!";
        assert_eq!(derive_title(text), "Big news from today: GPT update!");
    }

    #[test]
    fn derive_title_truncates_with_ellipsis() {
        let text = "x".repeat(150);
        let title = derive_title(&text);
        assert_eq!(title.chars().count(), MAX_TITLE_LEN + 3);
        assert!(title.ends_with("..."));
    }

    #[test]
    fn tweet_without_link_gets_permalink() {
        let raw = r#"{"id": 42, "full_text": "hello", "favorite_count": 3, "retweet_count": 1}"#;
        let tweet: Tweet = serde_json::from_str(raw).unwrap();
        let rec = tweet_to_record(tweet);
        assert_eq!(rec.url, "https://twitter.com/i/web/status/42");
        assert_eq!(rec.score, 3);
        assert_eq!(rec.comments_count, 1);
    }

    #[test]
    fn tweet_created_at_parses() {
        assert_eq!(parse_created_at("Wed Oct 10 20:19:24 +0000 2018"), 1_539_202_764);
        assert_eq!(parse_created_at("garbage"), 0);
    }

    #[test]
    fn incomplete_credentials_are_rejected() {
        let mut creds = TwitterCredentials {
            api_key: "k".into(),
            api_secret: "s".into(),
            access_token: "t".into(),
            access_secret: "x".into(),
        };
        assert!(creds.complete());
        creds.access_secret.clear();
        assert!(!creds.complete());
    }
}
