// Community wall canvas layout.
//
// Goals:
// - Deterministic: positions are a pure function of the id sequence
// - One anchored card at the origin, everything else blooms around it
// - No overlap while free spots can be found; bounded work when they can't
// - Nothing persisted: every pass starts from an empty accumulator
//
// Submodules:
// - seeded: string -> [0, 1) hash used instead of a global RNG
// - collision: padded bounding boxes
// - spatial_grid: placed-position accumulator
// - radial_placement: per-card position generator
// - memo: reuse of the last pass
//
// Output:
// - One position (and how it was found) per input item, in input order.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, WallError};

pub mod collision;
pub mod memo;
pub mod radial_placement;
pub mod seeded;
pub mod spatial_grid;

pub use memo::LayoutMemo;
pub use radial_placement::{generate_position, Placement};
pub use spatial_grid::PlacedSet;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PointI {
    pub x: i32,
    pub y: i32,
}

impl PointI {
    pub const ORIGIN: PointI = PointI { x: 0, y: 0 };
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeI {
    pub w: i32,
    pub h: i32,
}

/// Which item of the sequence is pinned at the origin.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorPolicy {
    /// Last item (the oldest message when rows arrive newest first).
    #[default]
    Last,
    First,
}

impl AnchorPolicy {
    fn index(self, len: usize) -> Option<usize> {
        match (self, len) {
            (_, 0) => None,
            (AnchorPolicy::Last, n) => Some(n - 1),
            (AnchorPolicy::First, _) => Some(0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Card footprint before padding.
    pub card_size: SizeI,
    /// Extra space between cards, added to both dimensions.
    pub card_padding: i32,
    /// Minimum distance of layer 0 from the origin.
    pub base_radius: i32,
    /// Random spread added on top of the layer radius.
    pub radius_jitter: i32,
    pub items_per_layer: usize,
    /// Radius added per layer.
    pub layer_spacing: i32,
    /// Seeded candidates tried before falling back.
    pub max_attempts: u32,
    /// Resolution of seeded values (buckets in [0, 1)).
    pub hash_range: i32,
    pub anchor: AnchorPolicy,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            card_size: SizeI { w: 250, h: 300 },
            card_padding: 80,
            base_radius: 250,
            radius_jitter: 200,
            items_per_layer: 8,
            layer_spacing: 380,
            max_attempts: 100,
            hash_range: 10_000,
            anchor: AnchorPolicy::Last,
        }
    }
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<()> {
        if self.items_per_layer == 0 {
            return Err(WallError::InvalidConfig {
                msg: "items_per_layer must be at least 1".to_string(),
            });
        }
        if self.hash_range <= 0 {
            return Err(WallError::InvalidConfig {
                msg: format!("hash_range must be positive, got {}", self.hash_range),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutResult {
    /// One position per input item, in input order.
    pub positions: Vec<PointI>,
    pub placements: Vec<Placement>,
}

impl LayoutResult {
    pub fn fallback_count(&self) -> usize {
        self.placements.iter().filter(|p| p.is_fallback()).count()
    }
}

/// Lay out a sequence of ids on the canvas.
///
/// The anchored item sits at the origin; every other item is placed by the
/// radial generator. Each item joins the accumulator in sequence order, the
/// anchored one included, so with `AnchorPolicy::Last` the center card is not
/// seen by the others while with `First` everyone avoids it.
pub fn layout_items<S: AsRef<str>>(ids: &[S], cfg: &LayoutConfig) -> LayoutResult {
    let anchor = cfg.anchor.index(ids.len());
    let mut placed = PlacedSet::new(cfg);
    let mut placements = Vec::with_capacity(ids.len());

    for (index, id) in ids.iter().enumerate() {
        let (position, how) = if Some(index) == anchor {
            (PointI::ORIGIN, Placement::Anchored)
        } else {
            generate_position(id.as_ref(), index, &placed, cfg)
        };
        placed.push(position);
        placements.push(how);
    }

    let result = LayoutResult { positions: placed.into_positions(), placements };
    debug!(
        items = ids.len(),
        fallbacks = result.fallback_count(),
        "canvas layout pass complete"
    );
    result
}
