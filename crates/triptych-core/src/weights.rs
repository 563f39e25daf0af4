//! Pane weight distribution
//!
//! Three weights drive a proportional horizontal layout. Each weight is
//! clamped on its own to `[min, max]`; clamping one pane never adjusts the
//! others, so the sum drifts when a bound is hit. The layout normalizes the
//! triple at render time.

use crate::{
    types::{PaneId, PANE_COUNT},
    Error, Result,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Inclusive bounds for a single pane weight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightBounds {
    pub min: f32,
    pub max: f32,
}

impl WeightBounds {
    pub fn new(min: f32, max: f32) -> Result<Self> {
        if !(min.is_finite() && max.is_finite()) || min > max {
            return Err(Error::InvalidConfig(format!(
                "invalid weight bounds [{}, {}]",
                min, max
            )));
        }
        Ok(Self { min, max })
    }

    pub fn clamp(&self, weight: f32) -> f32 {
        weight.clamp(self.min, self.max)
    }

    pub fn contains(&self, weight: f32) -> bool {
        (self.min..=self.max).contains(&weight)
    }
}

impl Default for WeightBounds {
    fn default() -> Self {
        Self { min: 0.1, max: 0.8 }
    }
}

/// Owns the three target weights and applies drag/maximize updates
#[derive(Debug, Clone, PartialEq)]
pub struct WeightDistributor {
    weights: [f32; PANE_COUNT],
    bounds: WeightBounds,
}

impl WeightDistributor {
    /// Create a distributor; every initial weight must lie inside `bounds`
    pub fn new(initial: [f32; PANE_COUNT], bounds: WeightBounds) -> Result<Self> {
        if let Some(bad) = initial.iter().find(|w| !bounds.contains(**w)) {
            return Err(Error::InvalidConfig(format!(
                "initial weight {} outside [{}, {}]",
                bad, bounds.min, bounds.max
            )));
        }
        Ok(Self {
            weights: initial,
            bounds,
        })
    }

    /// Current target weights
    pub fn weights(&self) -> [f32; PANE_COUNT] {
        self.weights
    }

    pub fn weight(&self, pane: PaneId) -> f32 {
        self.weights[pane.index()]
    }

    pub fn bounds(&self) -> WeightBounds {
        self.bounds
    }

    /// Weights scaled so they sum to 1.0
    pub fn normalized(&self) -> [f32; PANE_COUNT] {
        normalize(self.weights)
    }

    /// Apply a horizontal drag on `pane`.
    ///
    /// `delta` is the drag distance divided by the pane width. The dragged
    /// pane moves by `delta` and the other two absorb `delta / 2` each in the
    /// opposite direction. For the last pane the sign flips, so dragging its
    /// boundary toward the middle pane grows the middle pane.
    pub fn apply_drag(&mut self, pane: PaneId, delta: f32) {
        if !delta.is_finite() {
            warn!(pane = %pane, delta, "Ignoring non-finite drag delta");
            return;
        }

        let delta = if pane == PaneId::THIRD { -delta } else { delta };
        let i = pane.index();
        self.weights[i] = self.bounds.clamp(self.weights[i] + delta);
        for other in pane.others() {
            let j = other.index();
            self.weights[j] = self.bounds.clamp(self.weights[j] - delta / 2.0);
        }

        debug!(pane = %pane, delta, weights = ?self.weights, "Drag applied");
    }

    /// Give `pane` the maximum weight and the other two the minimum
    pub fn apply_maximize(&mut self, pane: PaneId) {
        self.weights[pane.index()] = self.bounds.max;
        for other in pane.others() {
            self.weights[other.index()] = self.bounds.min;
        }

        debug!(pane = %pane, weights = ?self.weights, "Pane maximized");
    }
}

impl Default for WeightDistributor {
    fn default() -> Self {
        Self {
            weights: [0.7, 0.2, 0.1],
            bounds: WeightBounds::default(),
        }
    }
}

/// Scale a weight triple to sum to 1.0 (equal split if the sum is not positive)
pub fn normalize(weights: [f32; PANE_COUNT]) -> [f32; PANE_COUNT] {
    let total: f32 = weights.iter().sum();
    if !(total.is_finite() && total > 0.0) {
        return [1.0 / PANE_COUNT as f32; PANE_COUNT];
    }
    weights.map(|w| w / total)
}
