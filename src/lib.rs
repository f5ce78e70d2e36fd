// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod collect;
pub mod config;
pub mod filter;
pub mod output;
pub mod pipeline;
pub mod record;
pub mod summarize;

// ---- Re-exports for stable public API ----
pub use crate::collect::{Collector, DelayPolicy};
pub use crate::record::{NewsRecord, NewsSource, SourceId};
