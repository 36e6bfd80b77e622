//! Simulation loop: physics, decisions, collisions, attrition, scoring.
//!
//! One `Simulation` is one epoch: it runs from population spawn to
//! extinction (or until the harness cuts it short with [`Simulation::finish`]).

use crate::config::Config;
use crate::controller::{Controller, Observation};
use crate::error::SimError;
use crate::ground::Ground;
use crate::mask::Silhouettes;
use crate::obstacle::Obstacle;
use crate::population::Population;
use crate::stats::{Stats, StatsHistory};
use log::debug;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Loop state. `Ended` is terminal; ticking past it is a caller error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimState {
    Running,
    Ended,
}

/// The simulation session for one epoch
pub struct Simulation {
    // Population and course
    pub population: Population,
    pub obstacles: Vec<Obstacle>,
    pub ground: Ground,

    // State
    pub score: u32,
    pub tick_count: u64,
    /// Highest fitness any member reached this epoch
    pub best_fitness: f32,

    // Configuration and assets
    pub config: Config,
    silhouettes: Silhouettes,

    // Statistics
    pub stats: Stats,
    pub stats_history: StatsHistory,

    state: SimState,

    // Random number generator (seeded for reproducibility)
    rng: ChaCha8Rng,
    seed: u64,
}

impl Simulation {
    /// Create a new epoch with a random seed
    pub fn new(config: Config, controllers: Vec<Box<dyn Controller>>) -> Result<Self, SimError> {
        let seed = rand::thread_rng().gen();
        Self::new_with_seed(config, controllers, seed)
    }

    /// Create a new epoch with a specific seed for reproducibility
    pub fn new_with_seed(
        config: Config,
        controllers: Vec<Box<dyn Controller>>,
        seed: u64,
    ) -> Result<Self, SimError> {
        config.validate()?;
        if controllers.is_empty() {
            return Err(SimError::InvalidConfig(
                "at least one controller is required".to_string(),
            ));
        }

        let silhouettes = Silhouettes::from_config(&config)?;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let obstacles = vec![Obstacle::new(
            config.obstacles.initial_x,
            &mut rng,
            &config.obstacles,
        )];
        let population = Population::new(controllers, &config.bird);
        let ground = Ground::new(&config.ground);
        let stats_interval = config.logging.stats_interval;

        Ok(Self {
            population,
            obstacles,
            ground,
            score: 0,
            tick_count: 0,
            best_fitness: 0.0,
            config,
            silhouettes,
            stats: Stats::new(),
            stats_history: StatsHistory::new(stats_interval),
            state: SimState::Running,
            rng,
            seed,
        })
    }

    /// Replace the default silhouettes, e.g. with masks derived from real
    /// sprite alpha channels.
    pub fn set_silhouettes(&mut self, silhouettes: Silhouettes) {
        self.silhouettes = silhouettes;
    }

    pub fn state(&self) -> SimState {
        self.state
    }

    /// Seed for reproducibility
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Shared target-obstacle index for this tick's observations.
    ///
    /// Derived from the first member only: index 1 when that member has
    /// cleared obstacle 0's right edge and a second obstacle exists,
    /// otherwise 0. Shared deliberately: all members observe the same
    /// obstacle on a given tick.
    fn target_index(&self) -> usize {
        if let Some(first) = self.population.first() {
            if self.obstacles.len() > 1
                && first.bird.x > self.obstacles[0].right_edge(&self.config.obstacles)
            {
                return 1;
            }
        }
        0
    }

    /// Advance one tick. Returns the state after the tick, or
    /// [`SimError::EpochOver`] if the epoch had already ended.
    pub fn tick(&mut self) -> Result<SimState, SimError> {
        if self.state == SimState::Ended {
            return Err(SimError::EpochOver);
        }

        let target = self.target_index();

        // Phase 1: physics and survival reward
        for m in self.population.members_mut() {
            m.bird.advance(&self.config.bird);
        }
        self.population.reward_all(self.config.population.survival_reward);

        // Phase 2: controller decisions (parallel, pure), then flaps
        let gap_top = self.obstacles[target].gap_top;
        let gap_bottom = self.obstacles[target].gap_bottom;
        let activations = self.population.decide(|bird| Observation {
            y: bird.y,
            gap_top_distance: (bird.y - gap_top).abs(),
            gap_bottom_distance: (bird.y - gap_bottom).abs(),
        });

        let threshold = self.config.population.jump_threshold;
        for (m, activation) in self.population.members_mut().iter_mut().zip(&activations) {
            if *activation > threshold {
                m.bird.flap(&self.config.bird);
            }
        }

        // Phase 3: obstacle interaction. Each obstacle is tested at its
        // pre-move position, then advances.
        let mut doomed = vec![false; self.population.len()];
        let mut spawn = false;
        let obstacle_count = self.obstacles.len();
        let mut off_screen = vec![false; obstacle_count];

        for pi in 0..obstacle_count {
            for i in 0..doomed.len() {
                if doomed[i] {
                    continue;
                }
                let hit = {
                    let m = &self.population.members()[i];
                    self.silhouettes.collides(&m.bird, &self.obstacles[pi])
                };
                if hit {
                    self.population.penalize(i, self.config.population.collision_penalty);
                    doomed[i] = true;
                    continue;
                }

                let bird_x = self.population.members()[i].bird.x;
                let pipe = &mut self.obstacles[pi];
                if !pipe.passed && pipe.x < bird_x {
                    pipe.passed = true;
                    spawn = true;
                }
            }

            off_screen[pi] = self.obstacles[pi].is_offscreen(&self.config.obstacles);
            self.obstacles[pi].advance(&self.config.obstacles);
        }

        // Phase 4: pass event — shared score, survivor bonus, next obstacle
        if spawn {
            self.score += 1;
            self.population.bonus_survivors(self.config.population.pass_bonus, &doomed);
            self.obstacles.push(Obstacle::new(
                self.config.obstacles.respawn_x,
                &mut self.rng,
                &self.config.obstacles,
            ));
            debug!("obstacle passed, score now {}", self.score);
        }

        // Phase 5: prune obstacles that had fully left the screen
        let mut pruned = 0;
        for pi in (0..obstacle_count).rev() {
            if off_screen[pi] {
                self.obstacles.remove(pi);
                pruned += 1;
            }
        }

        // Phase 6: out-of-bounds attrition (ground and ceiling), no penalty
        let ground_y = self.ground.line_y;
        let bird_height = self.config.bird.sprite_height as f32;
        for (i, m) in self.population.members().iter().enumerate() {
            if doomed[i] {
                continue;
            }
            if m.bird.y + bird_height >= ground_y || m.bird.y < 0.0 {
                doomed[i] = true;
            }
        }

        // Phase 7: compact removals, reporting fitness to each controller
        for m in self.population.members() {
            if m.fitness > self.best_fitness {
                self.best_fitness = m.fitness;
            }
        }
        let removals = self.population.retire_marked(&doomed);

        // Phase 8: scroll the ground
        self.ground.advance(&self.config.ground);

        self.tick_count += 1;
        self.update_stats(removals, pruned);

        if self.population.is_empty() {
            self.state = SimState::Ended;
            debug!("population extinct at tick {}", self.tick_count);
        }
        Ok(self.state)
    }

    /// Run until the epoch ends or `max_ticks` elapse
    pub fn run(&mut self, max_ticks: u64) -> SimState {
        for _ in 0..max_ticks {
            if self.state == SimState::Ended {
                break;
            }
            if self.tick().is_err() {
                break;
            }
        }
        self.state
    }

    /// End the epoch early, reporting final fitness for every survivor.
    /// Returns the number of survivors retired.
    pub fn finish(&mut self) -> usize {
        let retired = self.population.retire_all();
        self.state = SimState::Ended;
        retired
    }

    /// Get current population count
    pub fn population_count(&self) -> usize {
        self.population.len()
    }

    /// Check if the population is extinct
    pub fn is_extinct(&self) -> bool {
        self.population.is_empty()
    }

    fn update_stats(&mut self, removals: usize, pruned: usize) {
        self.stats.tick = self.tick_count;
        self.stats.score = self.score;
        self.stats.removals = removals;
        self.stats.obstacles_pruned = pruned;
        self.stats.update(self.population.members(), self.obstacles.len());

        if self.tick_count % self.config.logging.stats_interval == 0 {
            self.stats_history.record(self.stats.clone());
        }
    }
}
