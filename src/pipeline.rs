// src/pipeline.rs
//! Run coordinator: collectors in fixed order, then filter, summarizer and
//! output sink. Per-source and per-item failures are absorbed by the stages
//! themselves; only structural failures (in practice: output writes) escape.

use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use crate::collect::Collector;
use crate::filter::AiContentFilter;
use crate::output::OutputManager;
use crate::summarize::Summarizer;

/// One complete, stateless run. Returns the canonical output path; empty
/// when no records survived to the sink.
pub async fn run_pipeline(
    collectors: &[Box<dyn Collector>],
    filter: &AiContentFilter,
    summarizer: &Summarizer,
    output: &OutputManager,
) -> Result<PathBuf> {
    info!("starting news aggregation run");

    let mut all = Vec::new();
    for collector in collectors {
        let mut records = collector.collect().await;
        info!(source = collector.name(), count = records.len(), "source contributed");
        all.append(&mut records);
    }
    info!(total = all.len(), "collection finished");

    let relevant = filter.filter(&all);
    let summarized = summarizer.summarize(relevant).await;
    let path = output.save(&summarized)?;
    Ok(path)
}
