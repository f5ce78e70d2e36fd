// src/collect/hacker_news.rs
//! Hacker News collector: merges the top and newest story rankings, then
//! fetches each story's detail individually with a short pause in between.

use std::collections::HashSet;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{error, info};

use super::{http_client, strip_html, Collector, DelayPolicy};
use crate::record::{NewsRecord, NewsSource, SourceId};

const BASE_URL: &str = "https://hacker-news.firebaseio.com/v0";

/// Wire shape of `item/<id>.json`. Every field is optional on the API.
#[derive(Debug, Deserialize)]
pub(crate) struct HnItem {
    #[serde(rename = "type")]
    kind: Option<String>,
    title: Option<String>,
    url: Option<String>,
    text: Option<String>,
    score: Option<u32>,
    time: Option<i64>,
    descendants: Option<u32>,
}

pub struct HackerNewsCollector {
    client: reqwest::Client,
    max_items: usize,
    delay: DelayPolicy,
}

impl HackerNewsCollector {
    pub fn new(max_items: usize) -> Self {
        Self {
            client: http_client(),
            max_items,
            // Unofficial API; keep 10 req/s headroom between item fetches.
            delay: DelayPolicy::fixed(Duration::from_millis(100)),
        }
    }

    pub fn with_delay(mut self, delay: DelayPolicy) -> Self {
        self.delay = delay;
        self
    }

    async fn story_ids(&self, endpoint: &str) -> Result<Vec<u64>> {
        let url = format!("{BASE_URL}/{endpoint}");
        let ids: Vec<u64> = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("fetching {endpoint}"))?
            .error_for_status()
            .with_context(|| format!("{endpoint} status"))?
            .json()
            .await
            .with_context(|| format!("parsing {endpoint}"))?;
        Ok(ids)
    }

    async fn item(&self, id: u64) -> Result<HnItem> {
        let url = format!("{BASE_URL}/item/{id}.json");
        let item: HnItem = self
            .client
            .get(&url)
            .send()
            .await
            .context("fetching item")?
            .error_for_status()
            .context("item status")?
            .json()
            .await
            .context("parsing item")?;
        Ok(item)
    }

    async fn try_collect(&self) -> Result<Vec<NewsRecord>> {
        let top = self.story_ids("topstories.json").await?;
        let newest = self.story_ids("newstories.json").await?;
        let ids = merge_ranked_ids(&top, &newest, self.max_items);
        info!(count = ids.len(), "fetched Hacker News story ids");

        let mut records = Vec::with_capacity(ids.len());
        for id in ids {
            match self.item(id).await {
                Ok(item) => {
                    if let Some(rec) = story_to_record(id, item) {
                        records.push(rec);
                    }
                }
                // One bad item never aborts the remaining fetches.
                Err(e) => error!(id, error = ?e, "skipping Hacker News story"),
            }
            self.delay.pause().await;
        }
        Ok(records)
    }
}

#[async_trait]
impl Collector for HackerNewsCollector {
    async fn collect(&self) -> Vec<NewsRecord> {
        info!("collecting from Hacker News");
        match self.try_collect().await {
            Ok(records) => {
                info!(count = records.len(), "Hacker News collection finished");
                records
            }
            Err(e) => {
                error!(error = ?e, "Hacker News collection failed");
                Vec::new()
            }
        }
    }

    fn name(&self) -> &'static str {
        "Hacker News"
    }
}

/// Concatenate the two rankings (top first), drop repeated ids while
/// preserving first-seen order, and cap at `max_items`.
pub(crate) fn merge_ranked_ids(top: &[u64], newest: &[u64], max_items: usize) -> Vec<u64> {
    let mut seen = HashSet::new();
    top.iter()
        .chain(newest.iter())
        .copied()
        .filter(|id| seen.insert(*id))
        .take(max_items)
        .collect()
}

/// Only items of type "story" that carry a URL become records.
pub(crate) fn story_to_record(id: u64, item: HnItem) -> Option<NewsRecord> {
    if item.kind.as_deref() != Some("story") {
        return None;
    }
    let url = item.url?;
    Some(NewsRecord {
        title: item.title.unwrap_or_default(),
        url,
        content: item.text.as_deref().map(strip_html).unwrap_or_default(),
        source: NewsSource::HackerNews,
        score: item.score.unwrap_or(0),
        timestamp: item.time.unwrap_or(0),
        comments_count: item.descendants.unwrap_or(0),
        source_id: SourceId::Int(id),
        summary: None,
    })
}
