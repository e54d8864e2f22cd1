// Choosing which URLs to capture.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::info;

use super::manifest::{Manifest, PreviewStatus};
use super::PreviewConfig;

/// Whether the previous run's output can be reused as-is.
///
/// Requires both an unchanged content hash and an existing manifest.
pub fn content_unchanged(stored_hash: Option<&str>, current_hash: &str, manifest: Option<&Manifest>) -> bool {
    manifest.is_some() && stored_hash == Some(current_hash)
}

/// URLs for a regular build: never captured, or captured successfully but
/// older than the max age. Failed captures are left alone until a repair run.
pub fn plan_incremental(
    urls: &[String],
    manifest: Option<&Manifest>,
    now: DateTime<Utc>,
    cfg: &PreviewConfig,
) -> Vec<String> {
    let max_age = Duration::days(cfg.max_age_days);

    let plan: Vec<String> = urls
        .iter()
        .filter(|url| match manifest.and_then(|m| m.get(url)) {
            None => true,
            Some(entry) if entry.status == PreviewStatus::Failed => false,
            Some(entry) => now.signed_duration_since(entry.generated_at) > max_age,
        })
        .cloned()
        .collect();

    info!(found = urls.len(), to_capture = plan.len(), "planned incremental preview run");
    plan
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RepairPlan {
    /// URLs with no manifest entry.
    pub missing: Vec<String>,
    /// URLs whose last capture failed (only when retrying failures).
    pub failed: Vec<String>,
    /// Everything to capture, in URL order.
    pub to_process: Vec<String>,
}

/// URLs for a repair run: every missing URL, plus failed ones if `retry_failed`.
pub fn plan_repair(urls: &[String], manifest: Option<&Manifest>, retry_failed: bool) -> RepairPlan {
    let mut plan = RepairPlan::default();

    for url in urls {
        match manifest.and_then(|m| m.get(url)) {
            None => {
                plan.missing.push(url.clone());
                plan.to_process.push(url.clone());
            }
            Some(entry) if entry.status == PreviewStatus::Failed && retry_failed => {
                plan.failed.push(url.clone());
                plan.to_process.push(url.clone());
            }
            Some(_) => {}
        }
    }

    info!(
        missing = plan.missing.len(),
        failed = plan.failed.len(),
        "planned preview repair run"
    );
    plan
}

/// Split work into batches of at most `concurrency` URLs.
pub fn batches(urls: &[String], concurrency: usize) -> impl Iterator<Item = &[String]> {
    urls.chunks(concurrency.max(1))
}
