//! Output types for frontend consumption.
//!
//! These structs are serialized to JSON and handed to the React host. Errors
//! travel inside the payload rather than as exceptions.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{Result, WallError};
use crate::layout::LayoutConfig;
use crate::previews::{self, Manifest, Post, PreviewConfig};
use crate::wall::{parse_messages, place_messages, PlacedMessage};

/// Error information shown by the host
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub message: String,
}

impl From<&WallError> for ErrorInfo {
    fn from(e: &WallError) -> Self {
        ErrorInfo { message: e.to_string() }
    }
}

/// The positioned wall sent to React
#[derive(Debug, Clone, Default, Serialize)]
pub struct WallOutput {
    pub cards: Vec<PlacedMessage>,
    /// Cards that could not find a free spot.
    pub fallbacks: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

impl WallOutput {
    /// Decode message rows (and an optional config override) and lay them out.
    pub fn build(messages_json: &str, config_json: Option<&str>) -> Result<WallOutput> {
        let cfg = match config_json {
            Some(json) if !json.trim().is_empty() => {
                serde_json::from_str::<LayoutConfig>(json).map_err(WallError::InvalidInput)?
            }
            _ => LayoutConfig::default(),
        };
        cfg.validate()?;

        let messages = parse_messages(messages_json)?;
        let cards = place_messages(&messages, &cfg);
        let fallbacks = cards.iter().filter(|c| c.placement.is_fallback()).count();
        Ok(WallOutput { cards, fallbacks, error: None })
    }

    pub fn failed(e: &WallError) -> WallOutput {
        WallOutput { error: Some(e.into()), ..WallOutput::default() }
    }
}

/// Which links the next build should capture
#[derive(Debug, Clone, Default, Serialize)]
pub struct PreviewPlanOutput {
    /// Every preview-worthy URL in published posts.
    pub urls: Vec<String>,
    pub to_capture: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

impl PreviewPlanOutput {
    pub fn build(posts_json: &str, manifest_json: Option<&str>, now_rfc3339: &str) -> Result<PreviewPlanOutput> {
        let cfg = PreviewConfig::default();
        let posts: Vec<Post> = serde_json::from_str(posts_json).map_err(WallError::InvalidInput)?;
        let manifest = match manifest_json {
            Some(json) if !json.trim().is_empty() => Some(Manifest::from_json(json)?),
            _ => None,
        };
        let now = DateTime::parse_from_rfc3339(now_rfc3339)?.with_timezone(&Utc);

        let urls = previews::collect_post_urls(&posts, &cfg);
        let to_capture = previews::plan_incremental(&urls, manifest.as_ref(), now, &cfg);
        Ok(PreviewPlanOutput { urls, to_capture, error: None })
    }

    pub fn failed(e: &WallError) -> PreviewPlanOutput {
        PreviewPlanOutput { error: Some(e.into()), ..PreviewPlanOutput::default() }
    }
}
