// src/config.rs
//! Environment-backed settings. Credentials are never required: a missing
//! key disables the affected source/stage instead of failing the run.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::collect::social::TwitterCredentials;

pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_MIN_SCORE: u32 = 5;
pub const DEFAULT_HN_MAX_ITEMS: usize = 100;
pub const DEFAULT_PH_DAYS_BACK: u32 = 7;
pub const DEFAULT_MAX_TWEETS: usize = 100;
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Clone)]
pub struct Settings {
    pub product_hunt_api_key: String,
    pub twitter: TwitterCredentials,
    pub openai_api_key: String,
    pub openai_model: String,
    pub output_dir: PathBuf,
    pub min_score: u32,
    pub hn_max_items: usize,
    pub ph_days_back: u32,
    pub max_tweets: usize,
}

impl Settings {
    /// Read settings from the process environment (after `dotenvy::dotenv()`
    /// in the binary). Unparseable numeric values fall back to defaults.
    pub fn from_env() -> Self {
        Self {
            product_hunt_api_key: env_string("PRODUCT_HUNT_API_KEY"),
            twitter: TwitterCredentials {
                api_key: env_string("TWITTER_API_KEY"),
                api_secret: env_string("TWITTER_API_SECRET"),
                access_token: env_string("TWITTER_ACCESS_TOKEN"),
                access_secret: env_string("TWITTER_ACCESS_SECRET"),
            },
            openai_api_key: env_string("OPENAI_API_KEY"),
            openai_model: env::var("OPENAI_MODEL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            output_dir: env::var("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            min_score: env_parsed("MIN_SCORE", DEFAULT_MIN_SCORE),
            hn_max_items: env_parsed("HN_MAX_ITEMS", DEFAULT_HN_MAX_ITEMS),
            ph_days_back: env_parsed("PH_DAYS_BACK", DEFAULT_PH_DAYS_BACK),
            max_tweets: env_parsed("MAX_TWEETS", DEFAULT_MAX_TWEETS),
        }
    }
}

fn env_string(name: &str) -> String {
    env::var(name).unwrap_or_default().trim().to_string()
}

fn env_parsed<T: FromStr + Copy>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|s| s.trim().parse::<T>().ok())
        .unwrap_or(default)
}
