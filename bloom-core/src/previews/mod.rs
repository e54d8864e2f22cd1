// Link preview planning.
//
// Blog posts link out to external sites; each link gets a screenshot taken at
// build time. This module decides which URLs need one and keeps the manifest:
// - links: URL keys, internal/external classification, href extraction
// - manifest: on-disk record of captured screenshots keyed by URL key
// - plan: incremental and repair selection, batching
// - run: drives a whole pass and persists the results
//
// Capturing the screenshot (headless browser) belongs to the caller; it gets
// a `CaptureRequest` and reports back through `CaptureOutcome`.

use serde::{Deserialize, Serialize};

mod links;
mod manifest;
mod plan;
mod run;

pub use links::{
    collect_post_urls, content_hash, extract_urls, is_external_url, preview_key,
    screenshot_filename, should_generate_preview, Post,
};
pub use manifest::{
    load_content_hash, save_content_hash, CaptureOutcome, Manifest, ManifestSummary, PreviewEntry,
    PreviewStatus, MANIFEST_VERSION,
};
pub use plan::{batches, content_unchanged, plan_incremental, plan_repair, RepairPlan};
pub use run::{run_incremental, run_repair, CaptureRequest, RunReport};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Jpeg,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpeg",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    pub screenshot_width: u32,
    pub screenshot_height: u32,
    /// Page load timeout for the capture step, in milliseconds.
    pub timeout_ms: u64,
    pub output_dir: String,
    pub manifest_path: String,
    pub content_hash_path: String,
    /// Public URL prefix of `output_dir`.
    pub public_prefix: String,
    pub image_format: ImageFormat,
    /// JPEG quality; ignored for PNG.
    pub image_quality: u8,
    /// Captures running at once.
    pub concurrency: usize,
    /// Screenshots older than this are taken again.
    pub max_age_days: i64,
    /// Hosts never captured (matched as substrings of the hostname).
    pub excluded_domains: Vec<String>,
    /// Our own host; links to it are internal.
    pub site_host: String,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            screenshot_width: 1200,
            screenshot_height: 630,
            timeout_ms: 30_000,
            output_dir: "public/previews".to_string(),
            manifest_path: "public/previews/manifest.json".to_string(),
            content_hash_path: "public/previews/.content-hash".to_string(),
            public_prefix: "/previews".to_string(),
            image_format: ImageFormat::Jpeg,
            image_quality: 80,
            concurrency: 3,
            max_age_days: 180,
            excluded_domains: [
                "twitter.com",
                "x.com",
                "facebook.com",
                "instagram.com",
                "linkedin.com",
                "youtube.com",
                "youtu.be",
                "tiktok.com",
                "reddit.com",
                "discord.com",
                "slack.com",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            site_host: "braydoncoyer.dev".to_string(),
        }
    }
}
