// Placed-position accumulator with a spatial hash index.
//
// A layout pass appends every accepted card center here. Candidates are tested
// only against centers in nearby cells instead of the whole history; the exact
// test is still `collides` on padded boxes, so answers match a full scan.

use std::collections::HashMap;

use super::collision::{collides, BoundingBox};
use super::{LayoutConfig, PointI};

/// Cells searched on each side of the candidate's cell. A colliding center lies
/// within one padded footprint, i.e. one cell; the extra ring absorbs float
/// rounding at cell borders.
const REACH: i64 = 2;

/// Ordered set of accepted positions for one layout pass.
#[derive(Debug, Clone)]
pub struct PlacedSet {
    cell_w: f64,
    cell_h: f64,
    positions: Vec<PointI>,
    /// Cell coordinates -> indices into `positions`.
    cells: HashMap<(i64, i64), Vec<usize>>,
}

impl PlacedSet {
    /// Cells are one padded card footprint wide and tall.
    pub fn new(cfg: &LayoutConfig) -> Self {
        Self {
            cell_w: ((cfg.card_size.w + cfg.card_padding) as f64).max(1.0),
            cell_h: ((cfg.card_size.h + cfg.card_padding) as f64).max(1.0),
            positions: Vec::new(),
            cells: HashMap::new(),
        }
    }

    fn cell_of(&self, x: f64, y: f64) -> (i64, i64) {
        ((x / self.cell_w).floor() as i64, (y / self.cell_h).floor() as i64)
    }

    /// Append an accepted position. Positions are never removed within a pass.
    pub fn push(&mut self, p: PointI) {
        let cell = self.cell_of(p.x as f64, p.y as f64);
        self.cells.entry(cell).or_default().push(self.positions.len());
        self.positions.push(p);
    }

    /// Check whether a card centered on `(x, y)` would collide with any placed card.
    pub fn collides_with_any(&self, x: f64, y: f64, cfg: &LayoutConfig) -> bool {
        let candidate = BoundingBox::padded(x, y, cfg);
        let (cx, cy) = self.cell_of(x, y);

        for gx in (cx - REACH)..=(cx + REACH) {
            for gy in (cy - REACH)..=(cy + REACH) {
                let Some(indices) = self.cells.get(&(gx, gy)) else {
                    continue;
                };
                for &i in indices {
                    let placed = BoundingBox::around(self.positions[i], cfg);
                    if collides(&candidate, &placed) {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Accepted positions in placement order.
    pub fn positions(&self) -> &[PointI] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn into_positions(self) -> Vec<PointI> {
        self.positions
    }
}
