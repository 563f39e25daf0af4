//! Weight animation
//!
//! Displayed weights follow the target weights with a critically damped
//! spring. The closed-form solution is used, so a long frame gap lands
//! closer to the target instead of overshooting.

use crate::types::PANE_COUNT;
use std::time::Duration;

/// One critically damped spring value
#[derive(Debug, Clone, Copy, PartialEq)]
struct Spring {
    value: f32,
    velocity: f32,
}

impl Spring {
    fn step(&mut self, target: f32, omega: f32, t: f32, threshold: f32) {
        let x0 = self.value - target;
        let v0 = self.velocity;
        let decay = (-omega * t).exp();
        let c = v0 + omega * x0;

        self.value = target + (x0 + c * t) * decay;
        self.velocity = (v0 - omega * c * t) * decay;

        if (self.value - target).abs() < threshold && self.velocity.abs() < threshold {
            self.value = target;
            self.velocity = 0.0;
        }
    }

    fn settled_at(&self, target: f32) -> bool {
        self.value == target && self.velocity == 0.0
    }
}

/// Animates the displayed weight triple toward target weights
#[derive(Debug, Clone)]
pub struct WeightAnimator {
    springs: [Spring; PANE_COUNT],
    omega: f32,
    threshold: f32,
}

impl WeightAnimator {
    /// `stiffness` is the spring constant for a unit mass; damping is critical.
    pub fn new(initial: [f32; PANE_COUNT], stiffness: f32, threshold: f32) -> Self {
        Self {
            springs: initial.map(|value| Spring {
                value,
                velocity: 0.0,
            }),
            omega: stiffness.max(f32::EPSILON).sqrt(),
            threshold,
        }
    }

    /// Weights to draw this frame
    pub fn current(&self) -> [f32; PANE_COUNT] {
        self.springs.map(|s| s.value)
    }

    /// Advance by `dt` toward `targets`. Returns true while still moving.
    pub fn step(&mut self, targets: [f32; PANE_COUNT], dt: Duration) -> bool {
        let t = dt.as_secs_f32();
        for (spring, target) in self.springs.iter_mut().zip(targets) {
            spring.step(target, self.omega, t, self.threshold);
        }
        !self.is_settled(targets)
    }

    /// True when every displayed weight sits exactly on its target
    pub fn is_settled(&self, targets: [f32; PANE_COUNT]) -> bool {
        self.springs
            .iter()
            .zip(targets)
            .all(|(spring, target)| spring.settled_at(target))
    }

    /// Jump straight to `targets`, dropping any velocity
    pub fn snap_to(&mut self, targets: [f32; PANE_COUNT]) {
        self.springs = targets.map(|value| Spring {
            value,
            velocity: 0.0,
        });
    }
}
