// src/collect/product_hunt.rs
//! Product Hunt collector: one paginated request per calendar day over a
//! trailing window, most recent day first. Requires an API credential.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{Days, Local, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use tracing::{error, info};

use super::{http_client, Collector};
use crate::record::{NewsRecord, NewsSource, SourceId};

const POSTS_URL: &str = "https://api.producthunt.com/v1/posts";
const PAGE_SIZE: u32 = 50;

#[derive(Debug, Deserialize)]
struct PostsResponse {
    #[serde(default)]
    posts: Vec<Post>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Post {
    id: u64,
    #[serde(default)]
    name: String,
    #[serde(default)]
    tagline: String,
    #[serde(default)]
    discussion_url: String,
    #[serde(default)]
    votes_count: u32,
    #[serde(default)]
    comments_count: u32,
    created_at: Option<String>,
}

pub struct ProductHuntCollector {
    client: reqwest::Client,
    api_key: String,
    days_back: u32,
}

impl ProductHuntCollector {
    pub fn new(api_key: String, days_back: u32) -> Self {
        Self {
            client: http_client(),
            api_key,
            days_back,
        }
    }

    async fn posts_for_day(&self, day: NaiveDate) -> Result<Vec<Post>> {
        let resp: PostsResponse = self
            .client
            .get(POSTS_URL)
            .bearer_auth(&self.api_key)
            .header("Accept", "application/json")
            .query(&[
                ("day", day.format("%Y-%m-%d").to_string()),
                ("per_page", PAGE_SIZE.to_string()),
            ])
            .send()
            .await
            .context("fetching posts")?
            .error_for_status()
            .context("posts status")?
            .json()
            .await
            .context("parsing posts")?;
        Ok(resp.posts)
    }

    async fn try_collect(&self) -> Vec<NewsRecord> {
        let mut records = Vec::new();
        for day in day_window(Local::now().date_naive(), self.days_back) {
            match self.posts_for_day(day).await {
                Ok(posts) => {
                    info!(day = %day, count = posts.len(), "fetched Product Hunt posts");
                    records.extend(posts.into_iter().map(post_to_record));
                }
                // One bad day does not lose the rest of the window.
                Err(e) => error!(day = %day, error = ?e, "skipping Product Hunt day"),
            }
        }
        records
    }
}

#[async_trait]
impl Collector for ProductHuntCollector {
    async fn collect(&self) -> Vec<NewsRecord> {
        info!("collecting from Product Hunt");
        if self.api_key.is_empty() {
            error!("Product Hunt API key is not configured");
            return Vec::new();
        }
        let records = self.try_collect().await;
        info!(count = records.len(), "Product Hunt collection finished");
        records
    }

    fn name(&self) -> &'static str {
        "Product Hunt"
    }
}

/// Inclusive trailing window of calendar days, most recent first.
pub(crate) fn day_window(today: NaiveDate, days_back: u32) -> Vec<NaiveDate> {
    (0..days_back)
        .filter_map(|offset| today.checked_sub_days(Days::new(offset as u64)))
        .collect()
}

pub(crate) fn post_to_record(post: Post) -> NewsRecord {
    NewsRecord {
        title: post.name,
        url: post.discussion_url,
        content: post.tagline,
        source: NewsSource::ProductHunt,
        score: post.votes_count,
        timestamp: post
            .created_at
            .as_deref()
            .map(parse_created_at)
            .unwrap_or(0),
        comments_count: post.comments_count,
        source_id: SourceId::Int(post.id),
        summary: None,
    }
}

/// Product Hunt timestamps look like `2024-05-01T00:05:12.000Z`.
/// A malformed value degrades to 0 rather than losing the post.
fn parse_created_at(s: &str) -> i64 {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.fZ")
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or(0)
}
