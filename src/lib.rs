//! # AVIARY
//!
//! Headless, deterministic simulation core for populations of birds
//! navigating scrolling gated obstacles.
//!
//! ## Features
//!
//! - **Deterministic**: closed-form per-tick physics, seeded obstacle
//!   placement, reproducible epochs
//! - **Pluggable**: controllers are external policies behind a single
//!   `decide(observation) -> activation` trait
//! - **Accurate**: pixel-mask collision, not bounding boxes
//! - **Parallel**: controller evaluation fans out via Rayon
//! - **Configurable**: YAML configuration, every physics constant overridable
//!
//! ## Quick Start
//!
//! ```rust
//! use aviary::{Config, Simulation};
//! use aviary::controller::{Controller, GapSeeker};
//!
//! let controllers: Vec<Box<dyn Controller>> = (0..20)
//!     .map(|_| Box::new(GapSeeker) as Box<dyn Controller>)
//!     .collect();
//!
//! let mut sim = Simulation::new_with_seed(Config::default(), controllers, 42).unwrap();
//! sim.run(1_000);
//! println!("score: {}, survivors: {}", sim.score, sim.population_count());
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use aviary::Config;
//!
//! let mut config = Config::default();
//! config.obstacles.gap = 250.0;
//! config.bird.jump_impulse = -12.0;
//! assert!(config.validate().is_ok());
//! ```

pub mod bird;
pub mod config;
pub mod controller;
pub mod error;
pub mod ground;
pub mod mask;
pub mod obstacle;
pub mod population;
pub mod sim;
pub mod stats;

// Re-export main types
pub use config::Config;
pub use controller::{Controller, Observation};
pub use error::SimError;
pub use sim::{SimState, Simulation};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run a quick benchmark epoch with the built-in gap-seeking controller
pub fn benchmark(ticks: u64, population: usize) -> Result<BenchmarkResult, SimError> {
    use crate::controller::GapSeeker;
    use std::time::Instant;

    let controllers: Vec<Box<dyn Controller>> = (0..population)
        .map(|_| Box::new(GapSeeker) as Box<dyn Controller>)
        .collect();
    let mut sim = Simulation::new_with_seed(Config::default(), controllers, 42)?;

    let start = Instant::now();
    sim.run(ticks);
    let elapsed = start.elapsed();

    Ok(BenchmarkResult {
        ticks: sim.tick_count,
        initial_population: population,
        final_population: sim.population_count(),
        score: sim.score,
        elapsed_secs: elapsed.as_secs_f64(),
        ticks_per_second: sim.tick_count as f64 / elapsed.as_secs_f64(),
    })
}

/// Benchmark result
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    pub ticks: u64,
    pub initial_population: usize,
    pub final_population: usize,
    pub score: u32,
    pub elapsed_secs: f64,
    pub ticks_per_second: f64,
}

impl std::fmt::Display for BenchmarkResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Benchmark Results ===")?;
        writeln!(f, "Ticks: {}", self.ticks)?;
        writeln!(
            f,
            "Population: {} -> {}",
            self.initial_population, self.final_population
        )?;
        writeln!(f, "Score: {}", self.score)?;
        writeln!(f, "Time: {:.3}s", self.elapsed_secs)?;
        writeln!(f, "Speed: {:.1} ticks/s", self.ticks_per_second)?;
        Ok(())
    }
}
