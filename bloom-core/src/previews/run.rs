// Preview runs: plan, capture, record, persist.
//
// Two entry points mirror the two build scripts:
// - run_incremental: regular build, skipped entirely when post content is
//   unchanged; captures new and stale URLs
// - run_repair: fills gaps in an existing manifest, optionally retrying
//   failed captures
//
// The capture itself is a caller-supplied closure, so the browser stays
// outside this crate.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use super::links::{collect_post_urls, content_hash, screenshot_filename, Post};
use super::manifest::{
    load_content_hash, save_content_hash, CaptureOutcome, Manifest, ManifestSummary,
};
use super::plan::{batches, content_unchanged, plan_incremental, plan_repair};
use super::{ImageFormat, PreviewConfig};
use crate::error::{Result, WallError};

/// Everything the capture step needs to take one screenshot.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureRequest<'a> {
    pub url: &'a str,
    /// Where the image file goes, under `output_dir`.
    pub output_path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub format: ImageFormat,
    /// Encoder quality; `None` for lossless formats.
    pub quality: Option<u8>,
    pub timeout_ms: u64,
}

impl<'a> CaptureRequest<'a> {
    pub fn new(url: &'a str, cfg: &PreviewConfig) -> Self {
        let file = screenshot_filename(url, cfg.image_format);
        Self {
            url,
            output_path: Path::new(&cfg.output_dir).join(file),
            width: cfg.screenshot_width,
            height: cfg.screenshot_height,
            format: cfg.image_format,
            quality: match cfg.image_format {
                ImageFormat::Jpeg => Some(cfg.image_quality),
                ImageFormat::Png => None,
            },
            timeout_ms: cfg.timeout_ms,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RunReport {
    /// Nothing was planned or written because post content is unchanged.
    pub skipped: bool,
    /// Captures requested in this run.
    pub attempted: usize,
    pub succeeded: usize,
    /// Manifest counts after the run.
    pub summary: ManifestSummary,
}

fn capture_all(
    urls: &[String],
    concurrency: usize,
    manifest: &mut Manifest,
    now: DateTime<Utc>,
    cfg: &PreviewConfig,
    capture: &mut impl FnMut(&CaptureRequest<'_>) -> CaptureOutcome,
) -> usize {
    let total = urls.len();
    let mut done = 0;
    let mut succeeded = 0;

    for batch in batches(urls, concurrency) {
        for url in batch {
            let outcome = capture(&CaptureRequest::new(url, cfg));
            match &outcome {
                CaptureOutcome::Captured => succeeded += 1,
                CaptureOutcome::Failed(msg) | CaptureOutcome::TimedOut(msg) => {
                    warn!(url = url.as_str(), error = msg.as_str(), "preview capture failed");
                }
            }
            manifest.record(url, outcome, now, cfg);
        }
        done += batch.len();
        info!(done, total, "preview batch finished");
    }

    succeeded
}

/// Regular build: capture URLs that are new or stale, then persist the
/// manifest and the content hash at the configured paths.
///
/// When the stored content hash matches the posts and a manifest exists,
/// nothing is captured or written.
pub fn run_incremental(
    posts: &[Post],
    cfg: &PreviewConfig,
    now: DateTime<Utc>,
    mut capture: impl FnMut(&CaptureRequest<'_>) -> CaptureOutcome,
) -> Result<RunReport> {
    let output_dir = Path::new(&cfg.output_dir);
    fs::create_dir_all(output_dir)
        .map_err(|source| WallError::Io { path: output_dir.to_path_buf(), source })?;

    let manifest_path = Path::new(&cfg.manifest_path);
    let hash_path = Path::new(&cfg.content_hash_path);
    let existing = Manifest::load(manifest_path)?;

    let current_hash = content_hash(posts);
    let stored_hash = load_content_hash(hash_path)?;
    if content_unchanged(stored_hash.as_deref(), &current_hash, existing.as_ref()) {
        info!("no content changes, skipping preview run");
        let summary = existing.map(|m| m.summary()).unwrap_or_default();
        return Ok(RunReport { skipped: true, summary, ..RunReport::default() });
    }

    let urls = collect_post_urls(posts, cfg);
    let plan = plan_incremental(&urls, existing.as_ref(), now, cfg);
    let mut manifest = existing.unwrap_or_else(|| Manifest::new(now));

    let succeeded = capture_all(&plan, cfg.concurrency, &mut manifest, now, cfg, &mut capture);

    manifest.touch(now);
    manifest.save(manifest_path)?;
    save_content_hash(hash_path, &current_hash)?;

    let summary = manifest.summary();
    info!(
        total = summary.total,
        successful = summary.successful,
        failed = summary.failed,
        "preview manifest written"
    );
    Ok(RunReport { skipped: false, attempted: plan.len(), succeeded, summary })
}

/// Repair run over an existing manifest: capture URLs that have no entry,
/// and failed ones too when `retry_failed` is set. Captures run one at a time.
///
/// The manifest is only rewritten when something was captured; the content
/// hash is left alone.
pub fn run_repair(
    posts: &[Post],
    cfg: &PreviewConfig,
    now: DateTime<Utc>,
    retry_failed: bool,
    mut capture: impl FnMut(&CaptureRequest<'_>) -> CaptureOutcome,
) -> Result<RunReport> {
    let manifest_path = Path::new(&cfg.manifest_path);
    let Some(mut manifest) = Manifest::load(manifest_path)? else {
        return Err(WallError::MissingManifest { path: manifest_path.to_path_buf() });
    };

    let urls = collect_post_urls(posts, cfg);
    let plan = plan_repair(&urls, Some(&manifest), retry_failed);
    if plan.to_process.is_empty() {
        info!("every preview is present, nothing to repair");
        return Ok(RunReport { summary: manifest.summary(), ..RunReport::default() });
    }

    let output_dir = Path::new(&cfg.output_dir);
    fs::create_dir_all(output_dir)
        .map_err(|source| WallError::Io { path: output_dir.to_path_buf(), source })?;

    let succeeded = capture_all(&plan.to_process, 1, &mut manifest, now, cfg, &mut capture);

    manifest.touch(now);
    manifest.save(manifest_path)?;

    Ok(RunReport {
        skipped: false,
        attempted: plan.to_process.len(),
        succeeded,
        summary: manifest.summary(),
    })
}
