use std::collections::BTreeMap;

use foundation::math::lerp;
use foundation::time::Time;
use model::{Coordinate, Unit};

/// Full convergence time for one retarget batch.
pub const ANIMATION_DURATION_MS: f64 = 1000.0;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Mid-interpolation; schedule another frame.
    Animating,
    /// Progress reached 1; stop scheduling ticks.
    Settled,
}

/// Linear marker interpolator for mobile-unit positions.
///
/// On each retarget the origin of every surviving unit is its *currently
/// rendered* position, so a new target set arriving mid-animation restarts
/// smoothly instead of jumping. Units new to the batch have no meaningful
/// origin and render at their target from the first frame; units absent from
/// the new batch drop immediately.
#[derive(Debug)]
pub struct MarkerAnimator {
    origins: BTreeMap<String, Coordinate>,
    targets: Vec<Unit>,
    rendered: Vec<Unit>,
    started_at: Time,
    settled: bool,
}

impl Default for MarkerAnimator {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkerAnimator {
    pub fn new() -> Self {
        Self {
            origins: BTreeMap::new(),
            targets: Vec::new(),
            rendered: Vec::new(),
            started_at: Time::ZERO,
            settled: true,
        }
    }

    /// Begins animating toward a new target set at `now`.
    pub fn retarget(&mut self, targets: Vec<Unit>, now: Time) {
        let mut origins = BTreeMap::new();
        for unit in &targets {
            let origin = self
                .rendered
                .iter()
                .find(|r| r.id == unit.id)
                .map(|r| r.coordinate)
                // Newly created unit: progress is effectively 1 from tick zero.
                .unwrap_or(unit.coordinate);
            origins.insert(unit.id.clone(), origin);
        }

        self.rendered = targets
            .iter()
            .map(|unit| Unit::new(unit.id.clone(), origins[&unit.id]))
            .collect();
        self.origins = origins;
        self.targets = targets;
        self.started_at = now;
        self.settled = false;
    }

    /// Advances one frame. Returns `Settled` once the whole batch converged.
    pub fn step(&mut self, now: Time) -> StepOutcome {
        if self.settled {
            return StepOutcome::Settled;
        }

        let progress = (now.since(self.started_at) / ANIMATION_DURATION_MS).min(1.0);
        self.rendered = self
            .targets
            .iter()
            .map(|unit| {
                let origin = self.origins[&unit.id];
                Unit::new(
                    unit.id.clone(),
                    Coordinate::new(
                        lerp(origin.lat, unit.coordinate.lat, progress),
                        lerp(origin.lng, unit.coordinate.lng, progress),
                    ),
                )
            })
            .collect();

        if progress >= 1.0 {
            self.settled = true;
            StepOutcome::Settled
        } else {
            StepOutcome::Animating
        }
    }

    /// Currently rendered unit positions.
    pub fn positions(&self) -> &[Unit] {
        &self.rendered
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }
}
