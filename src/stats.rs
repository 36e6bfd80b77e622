//! Statistics tracking for the simulation.

use crate::population::Member;
use serde::{Deserialize, Serialize};

/// Statistics snapshot for a simulation tick
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Stats {
    /// Current tick
    pub tick: u64,
    /// Live population count
    pub population: usize,
    /// Shared score (obstacles passed by the population)
    pub score: u32,
    /// Mean fitness across live members
    pub fitness_mean: f32,
    /// Best fitness across live members
    pub fitness_max: f32,
    /// Live obstacle count
    pub obstacle_count: usize,
    /// Members removed this tick
    pub removals: usize,
    /// Obstacles pruned this tick
    pub obstacles_pruned: usize,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update from the current population
    pub fn update(&mut self, members: &[Member], obstacle_count: usize) {
        self.population = members.len();
        self.obstacle_count = obstacle_count;

        if members.is_empty() {
            self.fitness_mean = 0.0;
            self.fitness_max = 0.0;
        } else {
            let total: f32 = members.iter().map(|m| m.fitness).sum();
            self.fitness_mean = total / members.len() as f32;
            self.fitness_max = members
                .iter()
                .map(|m| m.fitness)
                .fold(f32::NEG_INFINITY, f32::max);
        }
    }

    /// Save stats to JSON file
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }

    /// Load stats from JSON file
    pub fn load_json(path: &str) -> std::io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    /// Format stats as a one-line summary
    pub fn summary(&self) -> String {
        format!(
            "T:{:6} | Pop:{:4} | Score:{:3} | Fit:{:.1}/{:.1} | Pipes:{:2} | Out:{}",
            self.tick,
            self.population,
            self.score,
            self.fitness_mean,
            self.fitness_max,
            self.obstacle_count,
            self.removals,
        )
    }
}

/// Historical statistics tracker
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StatsHistory {
    /// All recorded stats snapshots
    pub snapshots: Vec<Stats>,
    /// Recording interval in ticks
    pub interval: u64,
}

impl StatsHistory {
    pub fn new(interval: u64) -> Self {
        Self {
            snapshots: Vec::new(),
            interval,
        }
    }

    /// Record a stats snapshot
    pub fn record(&mut self, stats: Stats) {
        self.snapshots.push(stats);
    }

    /// Population over time
    pub fn population_series(&self) -> Vec<(u64, usize)> {
        self.snapshots.iter().map(|s| (s.tick, s.population)).collect()
    }

    /// Score over time
    pub fn score_series(&self) -> Vec<(u64, u32)> {
        self.snapshots.iter().map(|s| (s.tick, s.score)).collect()
    }

    /// Best fitness over time
    pub fn fitness_series(&self) -> Vec<(u64, f32)> {
        self.snapshots.iter().map(|s| (s.tick, s.fitness_max)).collect()
    }

    /// Save history to file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let json = serde_json::to_string(self)?;
        std::fs::write(path, json)
    }

    /// Load history from file
    pub fn load(path: &str) -> std::io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}
