// Radial "bloom" placement.
//
// Cards scatter in full 360 degree arcs around a center card:
// 1. The ordinal index picks a layer; each layer pushes the minimum radius out
// 2. Angle and radius are seeded from the card id plus the attempt number
// 3. A candidate is accepted when its padded box clears every placed card
// 4. After `max_attempts` collisions the card goes one layer further out,
//    unchecked, so placement always terminates
//
// Properties:
// - Deterministic (seeded from ids, never from a global RNG)
// - Total: every call returns a position

use std::f64::consts::TAU;

use serde::Serialize;
use tracing::debug;

use super::seeded::{angle_seed, fallback_seed, radius_seed, seeded_random};
use super::spatial_grid::PlacedSet;
use super::{LayoutConfig, PointI};

/// How a position was obtained.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Placement {
    /// Pinned to the origin by the anchor policy.
    Anchored,
    /// Collision-free candidate found on this attempt (0-based).
    Accepted { attempt: u32 },
    /// Every attempt collided; placed one layer out without checking.
    Fallback,
}

impl Placement {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Placement::Fallback)
    }
}

/// Round half toward positive infinity, so -2.5 becomes -2 and 2.5 becomes 3.
fn round_half_up(v: f64) -> i32 {
    (v + 0.5).floor() as i32
}

fn polar(angle: f64, radius: f64) -> (f64, f64) {
    (angle.cos() * radius, angle.sin() * radius)
}

/// Minimum extra radius for the layer containing `index`.
pub fn layer_offset(index: usize, cfg: &LayoutConfig) -> f64 {
    let layer = index / cfg.items_per_layer.max(1);
    layer as f64 * cfg.layer_spacing as f64
}

/// Generate a position for card `id` at ordinal `index`, avoiding `placed`.
///
/// `placed` is only used for collision checks; seeds depend on `id` alone.
pub fn generate_position(
    id: &str,
    index: usize,
    placed: &PlacedSet,
    cfg: &LayoutConfig,
) -> (PointI, Placement) {
    let layer_radius = layer_offset(index, cfg);
    let base = cfg.base_radius as f64;

    for attempt in 0..cfg.max_attempts {
        let angle = seeded_random(&angle_seed(id, attempt), cfg.hash_range) * TAU;
        let jitter =
            seeded_random(&radius_seed(id, attempt), cfg.hash_range) * cfg.radius_jitter as f64;
        let radius = base + jitter + layer_radius;

        let (x, y) = polar(angle, radius);
        if !placed.collides_with_any(x, y, cfg) {
            let p = PointI { x: round_half_up(x), y: round_half_up(y) };
            return (p, Placement::Accepted { attempt });
        }
    }

    let angle = seeded_random(&fallback_seed(id), cfg.hash_range) * TAU;
    let radius = base + layer_radius + cfg.layer_spacing as f64;
    let (x, y) = polar(angle, radius);
    let p = PointI { x: round_half_up(x), y: round_half_up(y) };

    debug!(
        id,
        index,
        x = p.x,
        y = p.y,
        "no free spot after {} attempts, using fallback",
        cfg.max_attempts
    );
    (p, Placement::Fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn distance(p: PointI) -> f64 {
        ((p.x as f64).powi(2) + (p.y as f64).powi(2)).sqrt()
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-2.51), -3);
        assert_eq!(round_half_up(0.49), 0);
    }

    #[test]
    fn test_layer_offset() {
        let cfg = LayoutConfig::default();
        assert_eq!(layer_offset(0, &cfg), 0.0);
        assert_eq!(layer_offset(7, &cfg), 0.0);
        assert_eq!(layer_offset(8, &cfg), 380.0);
        assert_eq!(layer_offset(17, &cfg), 760.0);
    }

    #[test]
    fn test_first_attempt_on_empty_canvas() {
        let cfg = LayoutConfig::default();
        let placed = PlacedSet::new(&cfg);

        let (p, how) = generate_position("a", 0, &placed, &cfg);
        assert_eq!(how, Placement::Accepted { attempt: 0 });
        assert_eq!(p, PointI { x: -256, y: -162 });
    }

    #[test]
    fn test_retries_past_collisions() {
        let cfg = LayoutConfig::default();
        let mut placed = PlacedSet::new(&cfg);
        placed.push(PointI { x: -256, y: -162 });

        let (p, how) = generate_position("b", 1, &placed, &cfg);
        assert_eq!(how, Placement::Accepted { attempt: 10 });
        assert_eq!(p, PointI { x: -169, y: 375 });
        assert!(!placed.collides_with_any(p.x as f64, p.y as f64, &cfg));
    }

    #[test]
    fn test_layer_zero_radius_band() {
        let cfg = LayoutConfig::default();
        let placed = PlacedSet::new(&cfg);
        for id in ["a", "b", "c", "msg-1", "4f1c9a"] {
            let (p, _) = generate_position(id, 3, &placed, &cfg);
            let d = distance(p);
            assert!(d >= 249.0 && d <= 451.0, "{id} at {d}");
        }
    }

    #[test]
    fn test_fallback_when_crowded() {
        let cfg = LayoutConfig::default();
        let mut placed = PlacedSet::new(&cfg);
        for gx in -12..=12 {
            for gy in -12..=12 {
                placed.push(PointI { x: gx * 100, y: gy * 100 });
            }
        }

        let (p, how) = generate_position("crowded", 2, &placed, &cfg);
        assert_eq!(how, Placement::Fallback);
        assert!(how.is_fallback());

        // base + one layer spacing, independent of the crowding
        let d = distance(p);
        assert!((d - 630.0).abs() <= 1.0, "fallback radius {d}");
    }

    #[test]
    fn test_fallback_pushes_one_layer_out() {
        let cfg = LayoutConfig { max_attempts: 0, ..LayoutConfig::default() };
        let placed = PlacedSet::new(&cfg);

        let (p, how) = generate_position("late", 9, &placed, &cfg);
        assert_eq!(how, Placement::Fallback);
        let d = distance(p);
        assert!((d - 1010.0).abs() <= 1.0, "fallback radius {d}");
    }

    #[test]
    fn test_same_input_same_output() {
        let cfg = LayoutConfig::default();
        let mut placed = PlacedSet::new(&cfg);
        placed.push(PointI { x: 300, y: 0 });
        placed.push(PointI { x: -300, y: 10 });

        let first = generate_position("stable", 4, &placed, &cfg);
        let second = generate_position("stable", 4, &placed, &cfg);
        assert_eq!(first, second);
    }
}
