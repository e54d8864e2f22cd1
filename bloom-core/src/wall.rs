//! Community wall messages and their canvas placement.
//!
//! Rows arrive from the database newest first, so the oldest message is last
//! and becomes the center card under the default anchor policy.

use serde::{Deserialize, Serialize};

use crate::error::{Result, WallError};
use crate::layout::{layout_items, LayoutConfig, Placement, PointI};

/// A message row as stored in the `messages` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallMessage {
    pub id: String,
    pub message: String,
    /// Index of the card background pattern.
    #[serde(default)]
    pub patternindex: i32,
    /// Card tilt in degrees.
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub creator_name: String,
    #[serde(default)]
    pub creator_avatar_url: String,
}

/// A message annotated with its canvas position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedMessage {
    #[serde(flatten)]
    pub message: WallMessage,
    pub position: PointI,
    pub placement: Placement,
}

pub fn parse_messages(json: &str) -> Result<Vec<WallMessage>> {
    serde_json::from_str(json).map_err(WallError::InvalidInput)
}

/// Place every message on the canvas, preserving input order.
pub fn place_messages(messages: &[WallMessage], cfg: &LayoutConfig) -> Vec<PlacedMessage> {
    let ids: Vec<&str> = messages.iter().map(|m| m.id.as_str()).collect();
    let layout = layout_items(&ids, cfg);

    messages
        .iter()
        .zip(layout.positions)
        .zip(layout.placements)
        .map(|((message, position), placement)| PlacedMessage {
            message: message.clone(),
            position,
            placement,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(id: &str) -> WallMessage {
        WallMessage {
            id: id.to_string(),
            message: format!("hello from {id}"),
            patternindex: 2,
            rotation: -3.5,
            creator_name: "Ada".to_string(),
            creator_avatar_url: "https://example.com/ada.png".to_string(),
        }
    }

    #[test]
    fn test_parse_rows() {
        let json = r#"[
            {"id": "b", "message": "hi", "patternindex": 1, "rotation": 2.5,
             "creator_name": "Bo", "creator_avatar_url": "https://example.com/b.png",
             "created_at": "2024-11-02T10:00:00Z"},
            {"id": "a", "message": "first!"}
        ]"#;
        let messages = parse_messages(json).unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].patternindex, 1);
        assert_eq!(messages[0].rotation, 2.5);
        assert_eq!(messages[1].creator_name, "");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(parse_messages("{not json"), Err(WallError::InvalidInput(_))));
        assert!(parse_messages(r#"[{"message": "no id"}]"#).is_err());
    }

    #[test]
    fn test_place_messages() {
        let messages = vec![message("a"), message("b"), message("c")];
        let placed = place_messages(&messages, &LayoutConfig::default());

        assert_eq!(placed.len(), 3);
        assert_eq!(placed[0].message.id, "a");
        assert_eq!(placed[0].position, PointI { x: -256, y: -162 });
        assert_eq!(placed[1].position, PointI { x: -169, y: 375 });
        assert_eq!(placed[2].position, PointI::ORIGIN);
        assert_eq!(placed[2].placement, Placement::Anchored);
    }

    #[test]
    fn test_placed_message_json_shape() {
        let placed = place_messages(&[message("solo")], &LayoutConfig::default());
        let value = serde_json::to_value(&placed[0]).unwrap();

        assert_eq!(value["id"], "solo");
        assert_eq!(value["patternindex"], 2);
        assert_eq!(value["position"]["x"], 0);
        assert_eq!(value["placement"]["kind"], "anchored");
    }
}
