//! Proportional three-pane layout

use crate::{
    types::{PaneId, PANE_COUNT},
    weights::normalize,
};

/// Pixel rectangle inside the window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x as f64
            && x < (self.x + self.width) as f64
            && y >= self.y as f64
            && y < (self.y + self.height) as f64
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// Maps weights to pane rectangles for a given window size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneLayout {
    width: u32,
    height: u32,
    gap: u32,
}

impl PaneLayout {
    pub fn new(width: u32, height: u32, gap: u32) -> Self {
        Self { width, height, gap }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Video rectangles for each pane, left to right.
    ///
    /// Slots are `width * w / sum(w)` wide, the last slot takes the rounding
    /// remainder, and the middle pane is inset by the gap on both sides.
    pub fn compute(&self, weights: [f32; PANE_COUNT]) -> [Rect; PANE_COUNT] {
        let fractions = normalize(weights);
        let total = self.width as i32;
        let height = self.height as i32;
        let gap = self.gap as i32;

        let mut rects = [Rect::default(); PANE_COUNT];
        let mut x = 0;
        for (i, fraction) in fractions.iter().enumerate() {
            let slot = if i == PANE_COUNT - 1 {
                total - x
            } else {
                ((total as f32) * fraction).round() as i32
            };
            let slot = slot.clamp(0, total - x);

            rects[i] = if i == PaneId::SECOND.index() {
                Rect {
                    x: x + gap,
                    y: 0,
                    width: (slot - 2 * gap).max(0),
                    height,
                }
            } else {
                Rect {
                    x,
                    y: 0,
                    width: slot,
                    height,
                }
            };
            x += slot;
        }
        rects
    }

    /// Pane whose video rectangle contains the point, if any
    pub fn pane_at(&self, weights: [f32; PANE_COUNT], x: f64, y: f64) -> Option<PaneId> {
        let rects = self.compute(weights);
        PaneId::ALL
            .into_iter()
            .find(|pane| rects[pane.index()].contains(x, y))
    }
}
