//! Integration tests for AVIARY

use aviary::controller::{Constant, Controller, GapSeeker, Observation};
use aviary::{Config, SimState, Simulation};
use std::sync::{Arc, Mutex};

/// Records final fitness reports for assertions.
struct Recorder {
    output: f32,
    reports: Arc<Mutex<Vec<f32>>>,
}

impl Controller for Recorder {
    fn decide(&self, _observation: &Observation) -> f32 {
        self.output
    }

    fn report_fitness(&mut self, fitness: f32) {
        self.reports.lock().unwrap().push(fitness);
    }
}

/// Flaps whenever the bird has sagged below its spawn height; hovers around
/// y = 350 indefinitely.
struct Hover;

impl Controller for Hover {
    fn decide(&self, observation: &Observation) -> f32 {
        if observation.y > 350.0 {
            1.0
        } else {
            0.0
        }
    }
}

fn boxed<C: Controller + 'static>(n: usize, make: impl Fn() -> C) -> Vec<Box<dyn Controller>> {
    (0..n).map(|_| Box::new(make()) as Box<dyn Controller>).collect()
}

/// A wide, fixed-position gap the hover controller flies through cleanly.
fn wide_gap_config() -> Config {
    let mut config = Config::default();
    config.obstacles.gap = 300.0;
    config.obstacles.gap_top_min = 200.0;
    config.obstacles.gap_top_max = 201.0;
    config
}

#[test]
fn test_free_fall_monotonic_and_clamped() {
    let mut sim =
        Simulation::new_with_seed(Config::default(), boxed(1, || Constant(0.0)), 11).unwrap();

    let mut last_y = sim.population.members()[0].bird.y;
    while sim.state() == SimState::Running {
        sim.tick().unwrap();
        if let Some(m) = sim.population.members().first() {
            let dy = m.bird.y - last_y;
            assert!(dy > 0.0, "free fall must descend");
            assert!(dy <= sim.config.bird.terminal_velocity + 1e-4);
            last_y = m.bird.y;
        }
    }

    assert!(sim.is_extinct());
    assert_eq!(sim.score, 0);
}

#[test]
fn test_tilt_decays_to_nose_dive_in_free_fall() {
    let mut sim =
        Simulation::new_with_seed(Config::default(), boxed(1, || Constant(0.0)), 11).unwrap();

    let mut final_tilt = 0.0;
    while sim.state() == SimState::Running {
        sim.tick().unwrap();
        if let Some(m) = sim.population.members().first() {
            final_tilt = m.bird.tilt;
        }
    }
    assert_eq!(final_tilt, sim.config.bird.min_tilt);
}

#[test]
fn test_collision_below_gap_removes_and_penalizes() {
    // Tall bottom segment and a distant ground so the falling bird must hit
    // the obstacle, not the floor.
    let mut config = Config::default();
    config.screen.height = 3000.0;
    config.ground.line_y = 2900.0;
    config.obstacles.sprite_height = 2000;
    config.obstacles.gap_top_min = 200.0;
    config.obstacles.gap_top_max = 201.0;

    let reports = Arc::new(Mutex::new(Vec::new()));
    let controllers: Vec<Box<dyn Controller>> = vec![Box::new(Recorder {
        output: 0.0,
        reports: Arc::clone(&reports),
    })];

    let mut sim = Simulation::new_with_seed(config, controllers, 17).unwrap();
    let state = sim.run(1_000);

    assert_eq!(state, SimState::Ended);
    assert!(sim.is_extinct());
    assert_eq!(sim.score, 0, "a collision must not count as a pass");

    // Survival reward accrued every tick, one collision penalty at the end
    let reports = reports.lock().unwrap();
    assert_eq!(reports.len(), 1);
    let expected = 0.1 * sim.tick_count as f32 - 1.0;
    assert!(
        (reports[0] - expected).abs() < 1e-3,
        "reported {} expected {}",
        reports[0],
        expected
    );
}

#[test]
fn test_pass_event_scores_and_spawns() {
    let mut sim = Simulation::new_with_seed(wide_gap_config(), boxed(1, || Hover), 23).unwrap();

    while sim.score == 0 {
        assert_eq!(sim.tick().unwrap(), SimState::Running);
        assert!(sim.tick_count < 200, "hover bird should pass the first gap");
    }

    assert_eq!(sim.score, 1);
    assert!(sim.obstacles[0].passed);
    assert_eq!(sim.obstacles.len(), 2);
    assert_eq!(sim.obstacles[1].x, sim.config.obstacles.respawn_x);

    // Survivor got the continuous reward plus exactly one pass bonus
    let fitness = sim.population.members()[0].fitness;
    let expected = 0.1 * sim.tick_count as f32 + 5.0;
    assert!((fitness - expected).abs() < 1e-3);
}

#[test]
fn test_passed_obstacle_marks_only_once() {
    let mut sim = Simulation::new_with_seed(wide_gap_config(), boxed(1, || Hover), 23).unwrap();

    while sim.score == 0 {
        sim.tick().unwrap();
    }
    let score_after_pass = sim.score;

    // The passed obstacle stays on screen for a while longer; no rescore
    for _ in 0..10 {
        sim.tick().unwrap();
    }
    assert_eq!(sim.score, score_after_pass);
}

#[test]
fn test_hover_survives_many_gates() {
    let mut sim = Simulation::new_with_seed(wide_gap_config(), boxed(3, || Hover), 29).unwrap();

    sim.run(3_000);
    assert_eq!(sim.population_count(), 3);
    assert!(sim.score >= 5, "score was {}", sim.score);
}

#[test]
fn test_obstacle_counts_bounded_per_tick() {
    let mut sim = Simulation::new_with_seed(wide_gap_config(), boxed(2, || Hover), 31).unwrap();

    let mut last = sim.obstacles.len();
    for _ in 0..2_000 {
        if sim.state() == SimState::Ended {
            break;
        }
        sim.tick().unwrap();
        let now = sim.obstacles.len();
        assert!(
            now as i64 - last as i64 <= 1,
            "at most one spawn per tick (was {}, now {})",
            last,
            now
        );
        last = now;
    }
}

#[test]
fn test_same_tick_double_collision_keeps_survivor() {
    // Two recorders fall into the pipe together; the hover bird stays up.
    let mut config = Config::default();
    config.screen.height = 3000.0;
    config.ground.line_y = 2900.0;
    config.obstacles.sprite_height = 2000;
    config.obstacles.gap_top_min = 200.0;
    config.obstacles.gap_top_max = 201.0;
    config.obstacles.gap = 300.0;

    let reports = Arc::new(Mutex::new(Vec::new()));
    let controllers: Vec<Box<dyn Controller>> = vec![
        Box::new(Recorder {
            output: 0.0,
            reports: Arc::clone(&reports),
        }),
        Box::new(Recorder {
            output: 0.0,
            reports: Arc::clone(&reports),
        }),
        Box::new(Hover),
    ];

    let mut sim = Simulation::new_with_seed(config, controllers, 37).unwrap();

    while reports.lock().unwrap().is_empty() {
        assert_eq!(sim.tick().unwrap(), SimState::Running);
        assert!(sim.tick_count < 1_000);
    }

    // Identical fall trajectories: both recorders die on the same tick
    assert_eq!(reports.lock().unwrap().len(), 2);
    assert_eq!(sim.population_count(), 1);

    // The survivor keeps flying
    sim.run(50);
    assert_eq!(sim.population_count(), 1);
}

#[test]
fn test_reproducibility_under_fixed_seed() {
    let run = |seed: u64| {
        let mut sim =
            Simulation::new_with_seed(Config::default(), boxed(25, || GapSeeker), seed).unwrap();
        sim.run(2_000);
        let gaps: Vec<f32> = sim.obstacles.iter().map(|o| o.gap_top).collect();
        (sim.tick_count, sim.score, sim.population_count(), gaps)
    };

    assert_eq!(run(4242), run(4242));
}

#[test]
fn test_stats_history_records_snapshots() {
    let mut config = wide_gap_config();
    config.logging.stats_interval = 10;

    let mut sim = Simulation::new_with_seed(config, boxed(2, || Hover), 41).unwrap();
    sim.run(100);

    let history = &sim.stats_history;
    assert!(!history.snapshots.is_empty());
    assert_eq!(history.population_series().len(), history.snapshots.len());

    let last = history.snapshots.last().unwrap();
    assert!(last.tick <= 100);
    assert_eq!(last.population, 2);
}

#[test]
fn test_epoch_restart_is_fresh() {
    let config = wide_gap_config();

    let mut first = Simulation::new_with_seed(config.clone(), boxed(2, || Hover), 43).unwrap();
    first.run(500);
    assert!(first.score > 0);

    // A new epoch re-seeds population, obstacles, and score
    let second = Simulation::new_with_seed(config.clone(), boxed(2, || Hover), 43).unwrap();
    assert_eq!(second.score, 0);
    assert_eq!(second.tick_count, 0);
    assert_eq!(second.population_count(), 2);
    assert_eq!(second.obstacles.len(), 1);
    assert_eq!(second.obstacles[0].x, config.obstacles.initial_x);
}
