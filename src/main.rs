use circlenoise::{PopulationSimulator, SimulationConfig, TraitHistogram, Trial};
use clap::{Parser, ValueEnum};
use rand::Rng;
use rayon::prelude::*;
use std::time::Instant;

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Scenario {
    /// One mixed population; reports how the noise trait spreads.
    Spread,
    /// Full-circle and noisy populations side by side; counts extinctions.
    Extinction,
}

#[derive(Parser, Debug)]
#[command(name = "circlenoise")]
#[command(about = "Headless driver for the circle-noise population simulation")]
struct Cli {
    #[arg(long, value_enum, default_value = "spread")]
    scenario: Scenario,

    /// Number of ticks to run
    #[arg(short, long, default_value = "2000")]
    ticks: u64,

    /// Print a report every N ticks
    #[arg(long, default_value = "100")]
    report_every: u64,

    /// Seed for reproducible runs (entropy when omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Population cap (the initial population is half of it)
    #[arg(long)]
    max_population: Option<usize>,

    /// Override the particle lifetime in ticks
    #[arg(long)]
    max_age: Option<u32>,
}

impl Cli {
    fn apply(&self, mut config: SimulationConfig) -> SimulationConfig {
        if let Some(max_population) = self.max_population {
            config = config.with_max_population(max_population);
        }
        if let Some(max_age) = self.max_age {
            config.max_age = max_age;
        }
        config
    }

    fn base_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| rand::thread_rng().r#gen())
    }
}

fn format_histogram(histogram: &TraitHistogram) -> String {
    histogram
        .bins()
        .iter()
        .map(|bin| format!("{:.2}:{:.3}", bin.center, bin.mass))
        .collect::<Vec<_>>()
        .join(" ")
}

fn run_spread(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = cli.apply(SimulationConfig::trait_spread());
    let mut simulator = PopulationSimulator::seeded(config, cli.base_seed())?;

    for tick in 1..=cli.ticks {
        simulator.tick()?;
        if simulator.is_extinct() {
            println!("Tick {tick}: population extinct");
            break;
        }
        if tick % cli.report_every == 0 {
            let offspring = simulator
                .average_offspring()
                .map(|avg| format!("{avg:.2}"))
                .unwrap_or_else(|_| "-".to_string());
            println!(
                "Tick {}: n={} reproductions={} offspring/reproduction={}",
                tick,
                simulator.population(),
                simulator.reproduction_count(),
                offspring
            );
            println!("  noise histogram {}", format_histogram(&simulator.histogram()?));
        }
    }
    Ok(())
}

fn run_extinction(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let seed = cli.base_seed();
    let mut trials = vec![
        Trial::seeded("noisy", cli.apply(SimulationConfig::extinction_trial(0.0)), seed)?,
        Trial::seeded(
            "circles",
            cli.apply(SimulationConfig::extinction_trial(1.0)),
            seed.wrapping_add(1),
        )?,
    ];

    for tick in 1..=cli.ticks {
        // Trials share nothing, so each frame they advance in parallel.
        trials.par_iter_mut().try_for_each(|trial| trial.step().map(|_| ()))?;
        if tick % cli.report_every == 0 {
            println!("Tick {tick}:");
            for trial in &trials {
                println!("  {}", trial.status_line());
            }
        }
    }
    Ok(())
}

// --- Main Function ---
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();
    if cli.report_every == 0 {
        return Err("--report-every must be at least 1".into());
    }

    let started = Instant::now();
    match cli.scenario {
        Scenario::Spread => run_spread(&cli)?,
        Scenario::Extinction => run_extinction(&cli)?,
    }
    log::info!(
        "Ran {} ticks of {:?} in {:.2}s",
        cli.ticks,
        cli.scenario,
        started.elapsed().as_secs_f64()
    );
    Ok(())
}
