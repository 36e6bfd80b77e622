//! Scrolling gated obstacle: a vertically-gapped pair of collision segments.

use crate::config::ObstacleConfig;
use rand::Rng;

/// One obstacle. The top segment spans `[top, gap_top]`, the bottom segment
/// `[gap_bottom, gap_bottom + sprite_height]`; the opening between them is
/// the configured gap.
#[derive(Clone, Debug)]
pub struct Obstacle {
    pub x: f32,
    /// Lower edge of the top segment (top of the gap)
    pub gap_top: f32,
    /// Upper edge of the bottom segment (bottom of the gap)
    pub gap_bottom: f32,
    /// Upper edge of the top segment, usually above the screen
    pub top: f32,
    /// Set once, the first tick any bird's x exceeds this obstacle's x
    pub passed: bool,
}

impl Obstacle {
    /// Spawn at `x` with a gap top drawn uniformly from the configured
    /// range. The RNG is injected so epochs are reproducible under a seed.
    pub fn new<R: Rng + ?Sized>(x: f32, rng: &mut R, config: &ObstacleConfig) -> Self {
        let gap_top = rng.gen_range(config.gap_top_min..config.gap_top_max);
        Self {
            x,
            gap_top,
            gap_bottom: gap_top + config.gap,
            top: gap_top - config.sprite_height as f32,
            passed: false,
        }
    }

    /// Scroll left one tick
    pub fn advance(&mut self, config: &ObstacleConfig) {
        self.x -= config.velocity;
    }

    /// X of the obstacle's right edge
    pub fn right_edge(&self, config: &ObstacleConfig) -> f32 {
        self.x + config.sprite_width as f32
    }

    /// True once the obstacle has fully scrolled past the left boundary
    pub fn is_offscreen(&self, config: &ObstacleConfig) -> bool {
        self.right_edge(config) < 0.0
    }
}
