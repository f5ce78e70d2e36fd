// src/filter.rs
//! Relevance gate: a score floor plus whole-word matching against a curated
//! AI vocabulary. Pure and order-preserving; records are never mutated here.

use anyhow::{anyhow, Context, Result};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::record::NewsRecord;

pub const DEFAULT_MIN_SCORE: u32 = 5;
pub const ENV_KEYWORDS_PATH: &str = "FILTER_KEYWORDS_PATH";

/// Built-in vocabulary: general terminology, named models and products,
/// technical jargon, application domains, and Japanese equivalents.
const AI_KEYWORDS: &[&str] = &[
    // General terminology
    "artificial intelligence",
    "ai",
    "a.i",
    "machine learning",
    "ml",
    "deep learning",
    "neural network",
    "neural nets",
    "computer vision",
    // Named models and products
    "gpt",
    "chatgpt",
    "gpt-4",
    "gpt-5",
    "llm",
    "large language model",
    "claude",
    "gemini",
    "midjourney",
    "dall-e",
    "dalle",
    "stable diffusion",
    "openai",
    "anthropic",
    "meta ai",
    "mistral",
    "llama",
    "copilot",
    // Technical jargon
    "prompt engineering",
    "fine-tuning",
    "transformer",
    "transformers",
    "diffusion model",
    "generative",
    "nlp",
    "natural language processing",
    "embedding",
    "semantic search",
    "vector database",
    "foundation model",
    "language model",
    "multimodal",
    "reinforcement learning",
    "self-supervised",
    "attention mechanism",
    "transfer learning",
    "inference",
    // Application domains
    "ai agent",
    "ai assistant",
    "autonomous",
    "automation",
    "recommendation system",
    "speech recognition",
    "face recognition",
    "voice assistant",
    // Japanese terms
    "人工知能",
    "機械学習",
    "ディープラーニング",
    "ニューラルネットワーク",
    "大規模言語モデル",
    "生成ai",
    "生成モデル",
    "エーアイ",
    "ai開発",
    "aiモデル",
];

pub struct AiContentFilter {
    min_score: u32,
    patterns: Vec<Regex>,
}

impl AiContentFilter {
    /// Filter with the built-in vocabulary.
    pub fn new(min_score: u32) -> Self {
        let terms: Vec<String> = AI_KEYWORDS.iter().map(|s| s.to_string()).collect();
        Self::with_keywords(min_score, &terms)
    }

    /// Filter with a caller-supplied vocabulary (used by the file override
    /// and by tests). Terms that fail to compile are skipped with a warning.
    pub fn with_keywords(min_score: u32, terms: &[String]) -> Self {
        let patterns = terms
            .iter()
            .filter_map(|term| {
                let pat = format!(r"(?i)\b{}\b", regex::escape(&term.to_lowercase()));
                match Regex::new(&pat) {
                    Ok(re) => Some(re),
                    Err(e) => {
                        warn!(term = %term, error = ?e, "skipping unusable keyword");
                        None
                    }
                }
            })
            .collect();
        Self {
            min_score,
            patterns,
        }
    }

    /// Filter using `$FILTER_KEYWORDS_PATH` when set and readable,
    /// otherwise the built-in vocabulary.
    pub fn from_env(min_score: u32) -> Self {
        if let Ok(p) = std::env::var(ENV_KEYWORDS_PATH) {
            let path = PathBuf::from(p);
            match load_keywords_from(&path) {
                Ok(terms) if !terms.is_empty() => {
                    info!(path = %path.display(), count = terms.len(), "loaded keyword file");
                    return Self::with_keywords(min_score, &terms);
                }
                Ok(_) => warn!(path = %path.display(), "keyword file is empty, using built-ins"),
                Err(e) => warn!(path = %path.display(), error = ?e, "keyword file unusable, using built-ins"),
            }
        }
        Self::new(min_score)
    }

    /// Keep records that clear the score floor and match at least one
    /// vocabulary term in the combined title + content text.
    pub fn filter(&self, records: &[NewsRecord]) -> Vec<NewsRecord> {
        let kept: Vec<NewsRecord> = records
            .iter()
            .filter(|r| r.score >= self.min_score && self.is_relevant(r))
            .cloned()
            .collect();
        info!(total = records.len(), kept = kept.len(), "relevance filter applied");
        kept
    }

    fn is_relevant(&self, record: &NewsRecord) -> bool {
        let combined = format!("{} {}", record.title, record.content).to_lowercase();
        self.patterns.iter().any(|p| p.is_match(&combined))
    }
}

/// Load a keyword list from TOML (`keywords = [...]`) or a JSON array,
/// decided by extension first and by parse fallback second.
pub fn load_keywords_from(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading keywords from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    if ext == "toml" {
        if let Ok(v) = parse_toml(&content) {
            return Ok(v);
        }
    }
    if let Ok(v) = parse_json(&content) {
        return Ok(v);
    }
    if ext != "toml" {
        if let Ok(v) = parse_toml(&content) {
            return Ok(v);
        }
    }
    Err(anyhow!("unsupported keyword file format"))
}

fn parse_toml(s: &str) -> Result<Vec<String>> {
    #[derive(serde::Deserialize)]
    struct KeywordFile {
        keywords: Vec<String>,
    }
    let v: KeywordFile = toml::from_str(s)?;
    Ok(clean_terms(v.keywords))
}

fn parse_json(s: &str) -> Result<Vec<String>> {
    let v: Vec<String> = serde_json::from_str(s)?;
    Ok(clean_terms(v))
}

fn clean_terms(terms: Vec<String>) -> Vec<String> {
    let mut out = Vec::new();
    for t in terms {
        let t = t.trim();
        if !t.is_empty() && !out.iter().any(|x: &String| x == t) {
            out.push(t.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_and_json_formats_parse() {
        let toml_out = parse_toml(r#"keywords = [" gpt ", "", "llm", "llm"]"#).unwrap();
        assert_eq!(toml_out, vec!["gpt".to_string(), "llm".to_string()]);
        let json_out = parse_json(r#"["claude", "  gemini  ", ""]"#).unwrap();
        assert_eq!(json_out, vec!["claude".to_string(), "gemini".to_string()]);
    }

    #[test]
    fn builtin_vocabulary_compiles() {
        let f = AiContentFilter::new(0);
        assert_eq!(f.patterns.len(), AI_KEYWORDS.len());
    }
}
