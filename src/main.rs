//! AI News Aggregator — Binary Entrypoint
//! Collects AI news from Hacker News, Product Hunt and Twitter, filters it,
//! summarizes it in Japanese, and writes the result set to disk.

use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ai_news_aggregator::collect::hacker_news::HackerNewsCollector;
use ai_news_aggregator::collect::product_hunt::ProductHuntCollector;
use ai_news_aggregator::collect::social::TwitterCollector;
use ai_news_aggregator::collect::Collector;
use ai_news_aggregator::config::Settings;
use ai_news_aggregator::filter::AiContentFilter;
use ai_news_aggregator::output::OutputManager;
use ai_news_aggregator::pipeline::run_pipeline;
use ai_news_aggregator::summarize::Summarizer;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    let settings = Settings::from_env();

    // Fixed source order: forum ranking, product launches, social stream.
    let collectors: Vec<Box<dyn Collector>> = vec![
        Box::new(HackerNewsCollector::new(settings.hn_max_items)),
        Box::new(ProductHuntCollector::new(
            settings.product_hunt_api_key.clone(),
            settings.ph_days_back,
        )),
        Box::new(TwitterCollector::new(
            settings.twitter.clone(),
            settings.max_tweets,
        )),
    ];
    let filter = AiContentFilter::from_env(settings.min_score);
    let summarizer = Summarizer::from_credentials(&settings.openai_api_key, &settings.openai_model);
    let output = match OutputManager::new(&settings.output_dir) {
        Ok(o) => o,
        Err(e) => {
            error!(error = ?e, "could not prepare output directory");
            return;
        }
    };

    match run_pipeline(&collectors, &filter, &summarizer, &output).await {
        Ok(path) if path.as_os_str().is_empty() => {
            info!("run completed, nothing to save");
        }
        Ok(path) => {
            info!(path = %path.display(), "run completed");
        }
        Err(e) => {
            error!(error = ?e, "run failed");
        }
    }
}
