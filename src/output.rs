// src/output.rs
//! Output sink: writes the final record set as JSON, CSV, plain text, and
//! HTML, all sharing one run timestamp. The JSON file is the canonical
//! artifact; write failures propagate since persistence is the run's
//! terminal guarantee.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local, TimeZone};
use tracing::{info, warn};

use crate::record::NewsRecord;

const NO_SUMMARY: &str = "no summary";
const UNKNOWN_DATE: &str = "unknown";

/// Columns of the tabular form, in order. `summary` is only emitted when at
/// least one record carries one.
const CSV_COLUMNS: &[&str] = &["title", "url", "source", "score", "timestamp", "summary"];

pub struct OutputManager {
    output_dir: PathBuf,
}

impl OutputManager {
    /// Creates the output directory idempotently.
    pub fn new(output_dir: impl AsRef<Path>) -> Result<Self> {
        let output_dir = output_dir.as_ref().to_path_buf();
        fs::create_dir_all(&output_dir)
            .with_context(|| format!("creating output dir {}", output_dir.display()))?;
        Ok(Self { output_dir })
    }

    /// Write all four representations and return the JSON path. An empty
    /// record set writes nothing and returns an empty path.
    pub fn save(&self, records: &[NewsRecord]) -> Result<PathBuf> {
        if records.is_empty() {
            warn!("no news records to save");
            return Ok(PathBuf::new());
        }

        let now = Local::now();
        let stamp = now.format("%Y%m%d_%H%M%S").to_string();
        let generated = now.format("%Y-%m-%d %H:%M:%S").to_string();

        let json_path = self.write_json(records, &stamp)?;
        let csv_path = self.write_csv(records, &stamp)?;
        let txt_path = self.write_text(records, &stamp, &generated)?;
        let html_path = self.write_html(records, &stamp, &generated)?;

        info!(
            json = %json_path.display(),
            csv = %csv_path.display(),
            txt = %txt_path.display(),
            html = %html_path.display(),
            "saved news output"
        );
        Ok(json_path)
    }

    fn file_path(&self, stamp: &str, ext: &str) -> PathBuf {
        self.output_dir.join(format!("ai_news_{stamp}.{ext}"))
    }

    /// Full-fidelity form: every attribute, pretty-printed, non-ASCII kept.
    fn write_json(&self, records: &[NewsRecord], stamp: &str) -> Result<PathBuf> {
        let path = self.file_path(stamp, "json");
        let json = serde_json::to_string_pretty(records).context("serializing records")?;
        fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }

    fn write_csv(&self, records: &[NewsRecord], stamp: &str) -> Result<PathBuf> {
        let path = self.file_path(stamp, "csv");
        let with_summary = records.iter().any(|r| r.summary.is_some());
        let columns: Vec<&str> = CSV_COLUMNS
            .iter()
            .copied()
            .filter(|c| *c != "summary" || with_summary)
            .collect();

        let mut out = String::new();
        out.push_str(&columns.join(","));
        out.push('\n');
        for r in records {
            let mut fields = vec![
                csv_field(&r.title),
                csv_field(&r.url),
                csv_field(r.source.label()),
                r.score.to_string(),
                r.timestamp.to_string(),
            ];
            if with_summary {
                fields.push(csv_field(r.summary.as_deref().unwrap_or_default()));
            }
            out.push_str(&fields.join(","));
            out.push('\n');
        }
        fs::write(&path, out).with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }

    /// Human-readable digest: header, then one numbered block per record.
    fn write_text(&self, records: &[NewsRecord], stamp: &str, generated: &str) -> Result<PathBuf> {
        let path = self.file_path(stamp, "txt");
        let mut out = String::new();
        let _ = writeln!(out, "AI News Summary - {generated}");
        let _ = writeln!(out, "{}", "=".repeat(80));
        let _ = writeln!(out);
        for (idx, r) in records.iter().enumerate() {
            let _ = writeln!(out, "[{}] {}", idx + 1, r.title);
            let _ = writeln!(out, "Source: {} (score: {})", r.source, r.score);
            let _ = writeln!(out, "URL: {}", r.url);
            let _ = writeln!(out);
            let _ = writeln!(out, "Summary:");
            let _ = writeln!(out, "{}", r.summary.as_deref().unwrap_or(NO_SUMMARY));
            let _ = writeln!(out);
            let _ = writeln!(out, "{}", "-".repeat(40));
            let _ = writeln!(out);
        }
        fs::write(&path, out).with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }

    /// Self-contained browsable report with per-source labels.
    fn write_html(&self, records: &[NewsRecord], stamp: &str, generated: &str) -> Result<PathBuf> {
        let path = self.file_path(stamp, "html");
        let mut out = String::new();
        out.push_str(&format!(
            r#"<!DOCTYPE html>
<html lang="ja">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>AI News Summary - {generated}</title>
<style>
body {{ font-family: 'Helvetica Neue', Arial, sans-serif; max-width: 800px; margin: 0 auto; padding: 20px; }}
h1 {{ color: #333; }}
.news-item {{ border: 1px solid #ddd; border-radius: 8px; padding: 15px; margin-bottom: 20px; }}
.news-title {{ font-size: 1.4em; margin-top: 0; color: #0066cc; }}
.news-meta {{ color: #666; font-size: 0.9em; }}
.news-summary {{ line-height: 1.6; }}
.news-url {{ word-break: break-all; }}
.source-label {{ display: inline-block; padding: 3px 8px; border-radius: 4px; font-size: 0.8em; }}
.source-hackernews {{ background-color: #ff6600; color: white; }}
.source-producthunt {{ background-color: #da552f; color: white; }}
.source-twitter {{ background-color: #1da1f2; color: white; }}
</style>
</head>
<body>
<h1>AI News Summary</h1>
<p>Generated: {generated}</p>
<div class="news-container">
"#
        ));

        for r in records {
            let title = html_escape::encode_safe(&r.title);
            let summary = html_escape::encode_safe(r.summary.as_deref().unwrap_or(NO_SUMMARY));
            let href = html_escape::encode_double_quoted_attribute(&r.url);
            let date = format_publication_date(r.timestamp);
            out.push_str(&format!(
                r#"<div class="news-item">
<h2 class="news-title">{title}</h2>
<div class="news-meta">
<span class="source-label source-{class}">{source}</span>
<span class="news-date">{date}</span>
<span class="news-score">score: {score}</span>
</div>
<div class="news-summary"><p>{summary}</p></div>
<div class="news-url"><a href="{href}" target="_blank">original article</a></div>
</div>
"#,
                class = r.source.css_class(),
                source = r.source,
                score = r.score,
            ));
        }

        out.push_str("</div>\n</body>\n</html>\n");
        fs::write(&path, out).with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }
}

/// Local-time publication date, or an explicit placeholder when unknown.
fn format_publication_date(timestamp: i64) -> String {
    if timestamp == 0 {
        return UNKNOWN_DATE.to_string();
    }
    match Local.timestamp_opt(timestamp, 0) {
        chrono::LocalResult::Single(dt) => format_local(dt),
        _ => UNKNOWN_DATE.to_string(),
    }
}

fn format_local(dt: DateTime<Local>) -> String {
    dt.format("%Y-%m-%d %H:%M").to_string()
}

/// RFC 4180-style quoting: wrap when the value contains a comma, quote, or
/// newline; embedded quotes are doubled.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_field_quotes_when_needed() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_field("line\nbreak"), "\"line\nbreak\"");
    }

    #[test]
    fn zero_timestamp_formats_as_unknown() {
        assert_eq!(format_publication_date(0), UNKNOWN_DATE);
        assert_ne!(format_publication_date(1_700_000_000), UNKNOWN_DATE);
    }
}
