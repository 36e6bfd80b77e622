//! Bird kinematics and tilt behavior.

use crate::config::BirdConfig;

/// A simulated bird. Horizontal position is fixed for the whole epoch;
/// only the vertical axis is dynamic.
#[derive(Clone, Debug)]
pub struct Bird {
    pub x: f32,
    pub y: f32,
    /// Velocity accumulator set by the last flap (negative = upward)
    pub velocity: f32,
    /// Ticks elapsed since the last flap
    pub ticks_since_flap: u32,
    /// Visual tilt in degrees, clamped to [min_tilt, max_tilt]
    pub tilt: f32,
    /// Y at the moment of the last flap, drives the tilt policy
    pub flap_height: f32,
}

impl Bird {
    /// Spawn a bird at the configured position
    pub fn new(config: &BirdConfig) -> Self {
        Self {
            x: config.spawn_x,
            y: config.spawn_y,
            velocity: 0.0,
            ticks_since_flap: 0,
            tilt: 0.0,
            flap_height: config.spawn_y,
        }
    }

    /// One tick of vertical physics.
    ///
    /// Displacement is the closed-form `v*t + gravity*t^2`, clamped above by
    /// the terminal velocity and boosted while still negative (rising).
    pub fn advance(&mut self, config: &BirdConfig) {
        self.ticks_since_flap += 1;
        let t = self.ticks_since_flap as f32;

        let mut d = self.velocity * t + config.gravity * t * t;
        if d >= config.terminal_velocity {
            d = config.terminal_velocity;
        }
        if d < 0.0 {
            d -= config.rise_boost;
        }

        self.y += d;

        // Nose up while rising or still above the flap reference; otherwise
        // decay into a dive, never past the floor.
        if d < 0.0 || self.y < self.flap_height + config.tilt_margin {
            if self.tilt < config.max_tilt {
                self.tilt = config.max_tilt;
            }
        } else if self.tilt > config.min_tilt {
            self.tilt = (self.tilt - config.tilt_rate).max(config.min_tilt);
        }
    }

    /// Apply the flap impulse and reset the jump reference.
    pub fn flap(&mut self, config: &BirdConfig) {
        self.velocity = config.jump_impulse;
        self.ticks_since_flap = 0;
        self.flap_height = self.y;
    }
}
