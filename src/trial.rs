// --- File: trial.rs ---
use crate::config::SimulationConfig;
use crate::error::Result;
use crate::simulation::{PopulationSimulator, SimRng, TickSummary};
use rand::Rng;

/// A long-running simulator that restarts itself after extinction and keeps
/// score across restarts.
pub struct Trial<R: Rng = SimRng> {
    label: String,
    simulator: PopulationSimulator<R>,
    extinctions: u32,
    // Last known offspring-per-reproduction; survives restarts.
    average_offspring: f32,
}

impl Trial<SimRng> {
    pub fn seeded(label: impl Into<String>, config: SimulationConfig, seed: u64) -> Result<Self> {
        Ok(Self::new(label, PopulationSimulator::seeded(config, seed)?))
    }
}

impl<R: Rng> Trial<R> {
    pub fn new(label: impl Into<String>, simulator: PopulationSimulator<R>) -> Self {
        Self {
            label: label.into(),
            simulator,
            extinctions: 0,
            average_offspring: 0.0,
        }
    }

    /// Refreshes the offspring average, restarts an extinct population, then
    /// ticks once.
    pub fn step(&mut self) -> Result<TickSummary> {
        if let Ok(average) = self.simulator.average_offspring() {
            self.average_offspring = average;
        }

        if self.simulator.is_extinct() {
            self.extinctions += 1;
            log::warn!(
                "{}: population extinct (extinction #{}), reinitializing",
                self.label,
                self.extinctions
            );
            self.simulator.reinitialize();
        }

        self.simulator.tick()
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn simulator(&self) -> &PopulationSimulator<R> {
        &self.simulator
    }

    pub fn extinctions(&self) -> u32 {
        self.extinctions
    }

    pub fn average_offspring(&self) -> f32 {
        self.average_offspring
    }

    /// One-line status: population, extinctions, offspring per reproduction.
    pub fn status_line(&self) -> String {
        format!(
            "{} - n:{} | Extinctions:{} | Offspring:{:.2}",
            self.label,
            self.simulator.population(),
            self.extinctions,
            self.average_offspring
        )
    }
}
