//! Scrolling ground: two horizontally-tiled strips and the fatal floor line.

use crate::config::GroundConfig;

/// Two ground tiles leapfrog each other to look like an infinite strip.
/// The `line_y` is the lower fatal bound for birds.
#[derive(Clone, Debug)]
pub struct Ground {
    pub line_y: f32,
    pub x1: f32,
    pub x2: f32,
}

impl Ground {
    pub fn new(config: &GroundConfig) -> Self {
        Self {
            line_y: config.line_y,
            x1: 0.0,
            x2: config.tile_width,
        }
    }

    /// Scroll both tiles left; a tile that fully leaves the screen wraps
    /// around behind the other one.
    pub fn advance(&mut self, config: &GroundConfig) {
        self.x1 -= config.velocity;
        self.x2 -= config.velocity;

        if self.x1 + config.tile_width < 0.0 {
            self.x1 = self.x2 + config.tile_width;
        }
        if self.x2 + config.tile_width < 0.0 {
            self.x2 = self.x1 + config.tile_width;
        }
    }
}
