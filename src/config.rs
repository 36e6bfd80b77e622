//! Configuration system for the simulation.
//!
//! Supports YAML configuration files. Defaults describe the classic course:
//! 550x800 screen, 200-unit gap, 5 units/tick scroll.

use crate::error::SimError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub screen: ScreenConfig,
    pub bird: BirdConfig,
    pub obstacles: ObstacleConfig,
    pub ground: GroundConfig,
    pub population: PopulationConfig,
    pub logging: LoggingConfig,
}

/// Screen dimensions (simulation units, not pixels on any real display)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenConfig {
    pub width: f32,
    pub height: f32,
}

/// Bird physics and geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BirdConfig {
    /// Horizontal spawn position; birds never move horizontally
    pub spawn_x: f32,
    /// Vertical spawn position
    pub spawn_y: f32,
    /// Velocity set by a flap (negative = upward)
    pub jump_impulse: f32,
    /// Quadratic displacement coefficient per tick
    pub gravity: f32,
    /// Maximum downward displacement per tick
    pub terminal_velocity: f32,
    /// Extra lift applied while displacement is still negative
    pub rise_boost: f32,
    /// Nose-up tilt saturation, degrees
    pub max_tilt: f32,
    /// Nose-dive tilt floor, degrees
    pub min_tilt: f32,
    /// Tilt decay per tick, degrees
    pub tilt_rate: f32,
    /// Height above the flap reference that still counts as rising
    pub tilt_margin: f32,
    /// Sprite width used for the collision silhouette
    pub sprite_width: usize,
    /// Sprite height used for the collision silhouette
    pub sprite_height: usize,
}

/// Obstacle geometry and lifecycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleConfig {
    /// Vertical opening between the top and bottom segments
    pub gap: f32,
    /// Leftward scroll per tick
    pub velocity: f32,
    /// Lower bound for the gap top draw (inclusive)
    pub gap_top_min: f32,
    /// Upper bound for the gap top draw (exclusive)
    pub gap_top_max: f32,
    /// X position of the first obstacle of an epoch
    pub initial_x: f32,
    /// X position of obstacles spawned on a pass event
    pub respawn_x: f32,
    /// Segment sprite width
    pub sprite_width: usize,
    /// Segment sprite height
    pub sprite_height: usize,
}

/// Scrolling ground strip
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundConfig {
    /// Y of the fatal floor line
    pub line_y: f32,
    /// Leftward scroll per tick
    pub velocity: f32,
    /// Width of one ground tile
    pub tile_width: f32,
}

/// Fitness shaping and action thresholding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationConfig {
    /// Fitness granted to every live bird each tick
    pub survival_reward: f32,
    /// Fitness deducted when a bird hits an obstacle
    pub collision_penalty: f32,
    /// Fitness granted to every survivor when an obstacle is passed
    pub pass_bonus: f32,
    /// Controller activation above which the bird flaps
    pub jump_threshold: f32,
}

/// Logging and stats recording
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Ticks between stats history snapshots
    pub stats_interval: u64,
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            screen: ScreenConfig::default(),
            bird: BirdConfig::default(),
            obstacles: ObstacleConfig::default(),
            ground: GroundConfig::default(),
            population: PopulationConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 550.0,
            height: 800.0,
        }
    }
}

impl Default for BirdConfig {
    fn default() -> Self {
        Self {
            spawn_x: 230.0,
            spawn_y: 350.0,
            jump_impulse: -10.0,
            gravity: 1.5,
            terminal_velocity: 16.0,
            rise_boost: 2.0,
            max_tilt: 25.0,
            min_tilt: -90.0,
            tilt_rate: 20.0,
            tilt_margin: 50.0,
            sprite_width: 68,
            sprite_height: 48,
        }
    }
}

impl Default for ObstacleConfig {
    fn default() -> Self {
        Self {
            gap: 200.0,
            velocity: 5.0,
            gap_top_min: 50.0,
            gap_top_max: 450.0,
            initial_x: 550.0,
            respawn_x: 700.0,
            sprite_width: 104,
            sprite_height: 640,
        }
    }
}

impl Default for GroundConfig {
    fn default() -> Self {
        Self {
            line_y: 730.0,
            velocity: 5.0,
            tile_width: 672.0,
        }
    }
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            survival_reward: 0.1,
            collision_penalty: 1.0,
            pass_bonus: 5.0,
            jump_threshold: 0.5,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            stats_interval: 50,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Validate configuration values, failing fast on nonsensical physics
    pub fn validate(&self) -> Result<(), SimError> {
        let fail = |msg: &str| Err(SimError::InvalidConfig(msg.to_string()));

        if self.screen.width <= 0.0 || self.screen.height <= 0.0 {
            return fail("screen dimensions must be > 0");
        }
        if self.bird.gravity <= 0.0 {
            return fail("bird.gravity must be > 0");
        }
        if self.bird.terminal_velocity <= 0.0 {
            return fail("bird.terminal_velocity must be > 0");
        }
        if self.bird.jump_impulse >= 0.0 {
            return fail("bird.jump_impulse must be negative (upward)");
        }
        if self.bird.tilt_rate <= 0.0 {
            return fail("bird.tilt_rate must be > 0");
        }
        if self.bird.min_tilt >= self.bird.max_tilt {
            return fail("bird.min_tilt must be below bird.max_tilt");
        }
        if self.bird.sprite_width == 0 || self.bird.sprite_height == 0 {
            return fail("bird sprite dimensions must be > 0");
        }
        if self.bird.spawn_x < 0.0 || self.bird.spawn_x >= self.screen.width {
            return fail("bird.spawn_x must lie within the screen");
        }
        if self.bird.spawn_y < 0.0 || self.bird.spawn_y >= self.ground.line_y {
            return fail("bird.spawn_y must lie above the ground line");
        }
        if self.obstacles.gap <= 0.0 {
            return fail("obstacles.gap must be > 0");
        }
        if self.obstacles.velocity <= 0.0 {
            return fail("obstacles.velocity must be > 0");
        }
        if self.obstacles.gap_top_min < 0.0
            || self.obstacles.gap_top_min >= self.obstacles.gap_top_max
        {
            return fail("obstacles gap top range must satisfy 0 <= min < max");
        }
        if self.obstacles.gap_top_max + self.obstacles.gap > self.screen.height {
            return fail("obstacle gap range must fit within the screen");
        }
        if self.obstacles.sprite_width == 0 || self.obstacles.sprite_height == 0 {
            return fail("obstacle sprite dimensions must be > 0");
        }
        if self.obstacles.initial_x <= self.bird.spawn_x
            || self.obstacles.respawn_x <= self.bird.spawn_x
        {
            return fail("obstacle spawn positions must be ahead of the bird");
        }
        if self.ground.line_y <= 0.0 || self.ground.line_y > self.screen.height {
            return fail("ground.line_y must lie within the screen");
        }
        if self.ground.velocity <= 0.0 || self.ground.tile_width <= 0.0 {
            return fail("ground velocity and tile width must be > 0");
        }
        if self.population.survival_reward < 0.0
            || self.population.collision_penalty < 0.0
            || self.population.pass_bonus < 0.0
        {
            return fail("fitness shaping values must be >= 0");
        }
        if !self.population.jump_threshold.is_finite() {
            return fail("population.jump_threshold must be finite");
        }
        if self.logging.stats_interval == 0 {
            return fail("logging.stats_interval must be > 0");
        }
        Ok(())
    }
}
