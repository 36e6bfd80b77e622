//! The external decision-maker interface.
//!
//! The simulation core never depends on a specific policy representation;
//! anything that can map an observation to a scalar activation plugs in.

/// What a controller sees for its bird each tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Observation {
    /// The bird's vertical position
    pub y: f32,
    /// Absolute distance from the bird to the target obstacle's gap top
    pub gap_top_distance: f32,
    /// Absolute distance from the bird to the target obstacle's gap bottom
    pub gap_bottom_distance: f32,
}

impl Observation {
    pub fn as_array(&self) -> [f32; 3] {
        [self.y, self.gap_top_distance, self.gap_bottom_distance]
    }
}

/// A policy driving one bird. `decide` must be a pure function of the
/// observation; it runs in parallel across the population.
pub trait Controller: Send + Sync {
    /// Scalar activation; the simulation flaps the bird when it exceeds the
    /// configured jump threshold.
    fn decide(&self, observation: &Observation) -> f32;

    /// Called exactly once, with the final fitness, when the bird is removed
    /// or the epoch is cut short. External trainers attribute scores here.
    fn report_fitness(&mut self, _fitness: f32) {}
}

/// Always emits the same activation. A zero constant never flaps.
pub struct Constant(pub f32);

impl Controller for Constant {
    fn decide(&self, _observation: &Observation) -> f32 {
        self.0
    }
}

/// Flaps whenever the bird has sunk closer to the gap bottom than to the
/// gap top. A serviceable stand-in policy for headless runs and benches.
pub struct GapSeeker;

impl Controller for GapSeeker {
    fn decide(&self, observation: &Observation) -> f32 {
        if observation.gap_bottom_distance < observation.gap_top_distance {
            1.0
        } else {
            0.0
        }
    }
}
