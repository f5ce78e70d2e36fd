// src/summarize.rs
//! Japanese summarization stage. Each record gets at most one attempt; a
//! failed attempt keeps the original record so nothing is dropped here.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::collect::DelayPolicy;
use crate::record::NewsRecord;

const COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

const SYSTEM_PROMPT: &str =
    "あなたはAI技術に関するニュースを簡潔に日本語で要約するアシスタントです。";

/// Remote summarization capability: one call per record.
#[async_trait]
pub trait SummaryProvider: Send + Sync {
    async fn summarize(&self, title: &str, content: &str) -> Result<String>;
    fn name(&self) -> &'static str;
}

/// OpenAI chat-completions provider.
pub struct OpenAiProvider {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl OpenAiProvider {
    pub fn new(api_key: String, model: String) -> Self {
        let http = reqwest::Client::builder()
            .user_agent("ai-news-aggregator/0.1")
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()
            .expect("reqwest client");
        Self {
            http,
            api_key,
            model,
        }
    }
}

#[async_trait]
impl SummaryProvider for OpenAiProvider {
    async fn summarize(&self, title: &str, content: &str) -> Result<String> {
        #[derive(Serialize)]
        struct Msg<'a> {
            role: &'a str,
            content: &'a str,
        }
        #[derive(Serialize)]
        struct Req<'a> {
            model: &'a str,
            messages: Vec<Msg<'a>>,
            temperature: f32,
            max_tokens: u32,
        }
        #[derive(Deserialize)]
        struct Resp {
            choices: Vec<Choice>,
        }
        #[derive(Deserialize)]
        struct Choice {
            message: ChoiceMsg,
        }
        #[derive(Deserialize)]
        struct ChoiceMsg {
            content: String,
        }

        let prompt = build_prompt(title, content);
        let req = Req {
            model: &self.model,
            messages: vec![
                Msg {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                Msg {
                    role: "user",
                    content: &prompt,
                },
            ],
            temperature: 0.3,
            max_tokens: 300,
        };

        let resp = self
            .http
            .post(COMPLETIONS_URL)
            .bearer_auth(&self.api_key)
            .json(&req)
            .send()
            .await
            .context("summarization request")?;
        if !resp.status().is_success() {
            bail!("summarization request failed with {}", resp.status());
        }
        let body: Resp = resp.json().await.context("parsing summarization response")?;
        let summary = body
            .choices
            .first()
            .map(|c| c.message.content.trim().to_string())
            .unwrap_or_default();
        if summary.is_empty() {
            bail!("summarization returned no text");
        }
        Ok(summary)
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}

/// Fixed instruction template; asks for roughly 200 Japanese characters.
/// The model is not guaranteed to honor the length exactly.
fn build_prompt(title: &str, content: &str) -> String {
    format!(
        "以下のAI技術に関するニュースを日本語で簡潔に要約してください。\n\
         要約は200文字程度で、最も重要なポイントを含めてください。\n\n\
         タイトル: {title}\n\
         内容: {content}\n\n\
         要約:"
    )
}

pub struct Summarizer {
    provider: Option<Box<dyn SummaryProvider>>,
    delay: DelayPolicy,
}

impl Summarizer {
    pub fn new(provider: Box<dyn SummaryProvider>) -> Self {
        Self {
            provider: Some(provider),
            delay: DelayPolicy::fixed(Duration::from_secs(1)),
        }
    }

    /// No-op stage used when no credential is configured.
    pub fn disabled() -> Self {
        Self {
            provider: None,
            delay: DelayPolicy::none(),
        }
    }

    /// Build from settings: an empty API key disables the stage.
    pub fn from_credentials(api_key: &str, model: &str) -> Self {
        if api_key.is_empty() {
            return Self::disabled();
        }
        Self::new(Box::new(OpenAiProvider::new(
            api_key.to_string(),
            model.to_string(),
        )))
    }

    pub fn with_delay(mut self, delay: DelayPolicy) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the same records in the same order; on success a copy with
    /// `summary` set, on per-item failure the original unchanged.
    pub async fn summarize(&self, records: Vec<NewsRecord>) -> Vec<NewsRecord> {
        let provider = match &self.provider {
            Some(p) => p,
            None => {
                error!("no summarization credential configured, returning records unchanged");
                return records;
            }
        };

        let total = records.len();
        info!(total, provider = provider.name(), "summarizing records");
        let mut out = Vec::with_capacity(total);
        for (idx, record) in records.into_iter().enumerate() {
            match provider.summarize(&record.title, &record.content).await {
                Ok(summary) => {
                    let mut summarized = record;
                    summarized.summary = Some(summary);
                    out.push(summarized);
                }
                Err(e) => {
                    // The item itself is never dropped; single attempt only.
                    error!(index = idx + 1, total, error = ?e, "summarization failed for record");
                    out.push(record);
                }
            }
            self.delay.pause().await;
        }
        out
    }
}
