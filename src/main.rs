//! AVIARY - CLI entry point
//!
//! Headless epoch runner for the bird/obstacle population simulator.

use aviary::controller::{Controller, GapSeeker};
use aviary::{benchmark, Config, SimState, Simulation};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "aviary")]
#[command(version)]
#[command(about = "Headless flappy-style population simulator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run headless epochs with the built-in gap-seeking controller
    Run {
        /// Configuration file (YAML)
        #[arg(short, long, default_value = "config.yaml")]
        config: PathBuf,

        /// Number of epochs to run
        #[arg(short, long, default_value = "1")]
        epochs: u64,

        /// Maximum ticks per epoch
        #[arg(short, long, default_value = "10000")]
        ticks: u64,

        /// Population size per epoch
        #[arg(short, long, default_value = "100")]
        population: usize,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,

        /// Quiet mode (final summaries only)
        #[arg(short, long)]
        quiet: bool,

        /// Write stats history JSON here after the last epoch
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run a performance benchmark
    Benchmark {
        /// Number of ticks
        #[arg(short, long, default_value = "5000")]
        ticks: u64,

        /// Population size
        #[arg(short, long, default_value = "500")]
        population: usize,
    },

    /// Generate a default configuration file
    Init {
        /// Output path
        #[arg(short, long, default_value = "config.yaml")]
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            epochs,
            ticks,
            population,
            seed,
            quiet,
            output,
        } => run_epochs(config, epochs, ticks, population, seed, quiet, output),

        Commands::Benchmark { ticks, population } => run_benchmark(ticks, population),

        Commands::Init { output } => generate_config(output),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_epochs(
    config_path: PathBuf,
    epochs: u64,
    max_ticks: u64,
    population: usize,
    seed: Option<u64>,
    quiet: bool,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = if config_path.exists() {
        println!("Loading config from: {:?}", config_path);
        Config::from_file(&config_path)?
    } else {
        println!("Using default configuration");
        Config::default()
    };

    let base_seed = seed.unwrap_or_else(rand::random);
    println!("Base seed: {}", base_seed);
    println!("Population: {} birds, up to {} ticks per epoch", population, max_ticks);
    println!();

    let start = Instant::now();
    let mut last_history = None;

    for epoch in 0..epochs {
        let controllers: Vec<Box<dyn Controller>> = (0..population)
            .map(|_| Box::new(GapSeeker) as Box<dyn Controller>)
            .collect();

        let mut sim =
            Simulation::new_with_seed(config.clone(), controllers, base_seed.wrapping_add(epoch))?;

        let stats_interval = config.logging.stats_interval;
        while sim.state() == SimState::Running && sim.tick_count < max_ticks {
            sim.tick()?;
            if !quiet && sim.tick_count % stats_interval == 0 {
                println!("{}", sim.stats.summary());
            }
        }
        let survivors = sim.finish();

        println!(
            "Epoch {:3}: score {:4} | {:6} ticks | {:4} survivors | best fitness {:.1}",
            epoch, sim.score, sim.tick_count, survivors, sim.best_fitness,
        );
        last_history = Some(sim.stats_history);
    }

    let elapsed = start.elapsed();
    println!();
    println!("=== Run Complete ===");
    println!("Epochs: {}", epochs);
    println!("Time: {:.2}s", elapsed.as_secs_f64());

    if let (Some(path), Some(history)) = (output, last_history) {
        history.save(path.to_str().ok_or("invalid output path")?)?;
        println!("Stats history: {:?}", path);
    }

    Ok(())
}

fn run_benchmark(ticks: u64, population: usize) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== AVIARY Benchmark ===");
    println!("Ticks: {}", ticks);
    println!("Population: {}", population);
    println!();

    let result = benchmark(ticks, population)?;
    println!("{}", result);

    Ok(())
}

fn generate_config(output: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    config.save(&output)?;
    println!("Configuration saved to: {:?}", output);
    Ok(())
}
