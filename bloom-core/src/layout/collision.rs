// Axis-aligned bounding boxes for card collision checks.

use super::{LayoutConfig, PointI};

/// A padded card footprint, ephemeral: built only while testing a candidate.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    /// Box centered on `(cx, cy)` covering the card plus its padding margin.
    pub fn padded(cx: f64, cy: f64, cfg: &LayoutConfig) -> Self {
        let width = (cfg.card_size.w + cfg.card_padding) as f64;
        let height = (cfg.card_size.h + cfg.card_padding) as f64;
        Self {
            x: cx - width / 2.0,
            y: cy - height / 2.0,
            width,
            height,
        }
    }

    pub fn around(p: PointI, cfg: &LayoutConfig) -> Self {
        Self::padded(p.x as f64, p.y as f64, cfg)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// True when the boxes share any area or touch along an edge.
///
/// Boxes are separated only when one lies strictly beyond the other on some
/// axis, so `collides(a, b) == collides(b, a)`.
pub fn collides(a: &BoundingBox, b: &BoundingBox) -> bool {
    !(a.right() < b.x || b.right() < a.x || a.bottom() < b.y || b.bottom() < a.y)
}
