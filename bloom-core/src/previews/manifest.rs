// Screenshot manifest: one entry per captured URL, keyed by `preview_key`.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::links::{preview_key, screenshot_filename};
use super::PreviewConfig;
use crate::error::{Result, WallError};

pub const MANIFEST_VERSION: &str = "1.0";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewStatus {
    Success,
    Failed,
    Timeout,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewEntry {
    pub url: String,
    /// Public path of the image, e.g. `/previews/000025b884ce.jpeg`.
    pub screenshot_path: String,
    pub width: u32,
    pub height: u32,
    pub generated_at: DateTime<Utc>,
    pub status: PreviewStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// Result of one capture attempt, reported by the capture step.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureOutcome {
    Captured,
    Failed(String),
    TimedOut(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub generated: DateTime<Utc>,
    pub version: String,
    pub previews: IndexMap<String, PreviewEntry>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ManifestSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub timed_out: usize,
}

impl Manifest {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            generated: now,
            version: MANIFEST_VERSION.to_string(),
            previews: IndexMap::new(),
        }
    }

    /// Read a manifest; a missing file is `Ok(None)`.
    pub fn load(path: &Path) -> Result<Option<Manifest>> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(WallError::Io { path: path.to_path_buf(), source }),
        };
        Self::from_json(&text).map(Some)
    }

    pub fn from_json(text: &str) -> Result<Manifest> {
        serde_json::from_str(text).map_err(WallError::Manifest)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(WallError::Manifest)
    }

    /// Write the manifest, creating the parent directory if needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|source| WallError::Io { path: dir.to_path_buf(), source })?;
        }
        let json = self.to_json()?;
        fs::write(path, json).map_err(|source| WallError::Io { path: path.to_path_buf(), source })
    }

    pub fn get(&self, url: &str) -> Option<&PreviewEntry> {
        self.previews.get(&preview_key(url))
    }

    /// Store the outcome of capturing `url`, replacing any earlier entry.
    pub fn record(&mut self, url: &str, outcome: CaptureOutcome, now: DateTime<Utc>, cfg: &PreviewConfig) {
        let (status, error_message) = match outcome {
            CaptureOutcome::Captured => (PreviewStatus::Success, None),
            CaptureOutcome::Failed(msg) => (PreviewStatus::Failed, Some(msg)),
            CaptureOutcome::TimedOut(msg) => (PreviewStatus::Timeout, Some(msg)),
        };
        let entry = PreviewEntry {
            url: url.to_string(),
            screenshot_path: format!("{}/{}", cfg.public_prefix, screenshot_filename(url, cfg.image_format)),
            width: cfg.screenshot_width,
            height: cfg.screenshot_height,
            generated_at: now,
            status,
            error_message,
        };
        self.previews.insert(preview_key(url), entry);
    }

    /// Mark the manifest as regenerated.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.generated = now;
    }

    pub fn summary(&self) -> ManifestSummary {
        self.previews.values().fold(ManifestSummary::default(), |mut s, e| {
            s.total += 1;
            match e.status {
                PreviewStatus::Success => s.successful += 1,
                PreviewStatus::Failed => s.failed += 1,
                PreviewStatus::Timeout => s.timed_out += 1,
            }
            s
        })
    }
}

/// Content hash stored by the previous run, if any.
pub fn load_content_hash(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text.trim().to_string())),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(WallError::Io { path: path.to_path_buf(), source }),
    }
}

pub fn save_content_hash(path: &Path, hash: &str) -> Result<()> {
    fs::write(path, hash).map_err(|source| WallError::Io { path: path.to_path_buf(), source })
}
