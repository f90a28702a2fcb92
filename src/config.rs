// --- File: config.rs ---
use crate::constants::*;
use crate::error::{Result, SimError};
use crate::region::Region;

/// Construction-time settings. Immutable for the lifetime of a simulator;
/// `PopulationSimulator::reinitialize` rebuilds from the same values.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub width: f32,
    pub height: f32,
    pub max_population: usize,
    pub initial_population: usize,
    // Fraction of the initial population seeded with trait 0 (full circles);
    // the rest start at trait 1.
    pub initial_proportion: f32,
    pub radius: f32,
    pub shape_resolution: usize,
    pub max_speed: f32,
    pub max_age: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_REGION_WIDTH,
            height: DEFAULT_REGION_HEIGHT,
            max_population: DEFAULT_MAX_POPULATION,
            initial_population: initial_population_for(DEFAULT_MAX_POPULATION),
            initial_proportion: DEFAULT_INITIAL_PROPORTION,
            radius: DEFAULT_PARTICLE_RADIUS,
            shape_resolution: DEFAULT_SHAPE_RESOLUTION,
            max_speed: DEFAULT_MAX_SPEED,
            max_age: DEFAULT_MAX_AGE,
        }
    }
}

// Half the cap, rounded down
fn initial_population_for(max_population: usize) -> usize {
    (max_population as f32 * INITIAL_POPULATION_FRACTION).floor() as usize
}

impl SimulationConfig {
    /// Mixed population: half full circles, half maximally noisy.
    pub fn trait_spread() -> Self {
        Self::default()
    }

    /// Uniform population used for the extinction comparison. `proportion`
    /// of 1.0 seeds only full circles, 0.0 only noisy ones.
    pub fn extinction_trial(proportion: f32) -> Self {
        Self {
            initial_proportion: proportion,
            max_age: EXTINCTION_TRIAL_MAX_AGE,
            ..Self::default()
        }
    }

    /// Sets the cap and re-derives the initial population from it.
    pub fn with_max_population(mut self, max_population: usize) -> Self {
        self.max_population = max_population;
        self.initial_population = initial_population_for(max_population);
        self
    }

    pub fn region(&self) -> Result<Region> {
        Region::sized(self.width, self.height)
    }

    pub fn validate(&self) -> Result<()> {
        self.region()?;
        if !(self.radius > 0.0 && self.radius.is_finite()) {
            return Err(SimError::InvalidConfig(format!(
                "radius must be positive and finite, got {}",
                self.radius
            )));
        }
        if 2.0 * self.radius > self.width.min(self.height) {
            return Err(SimError::InvalidConfig(format!(
                "radius {} does not fit inside a {}x{} region",
                self.radius, self.width, self.height
            )));
        }
        if self.shape_resolution == 0 {
            return Err(SimError::InvalidConfig(
                "shape_resolution must be at least 1".to_string(),
            ));
        }
        if !(self.max_speed >= 0.0 && self.max_speed.is_finite()) {
            return Err(SimError::InvalidConfig(format!(
                "max_speed must be non-negative and finite, got {}",
                self.max_speed
            )));
        }
        if !(0.0..=1.0).contains(&self.initial_proportion) {
            return Err(SimError::InvalidConfig(format!(
                "initial_proportion must lie in [0, 1], got {}",
                self.initial_proportion
            )));
        }
        if self.initial_population > self.max_population {
            return Err(SimError::InvalidConfig(format!(
                "initial_population {} exceeds max_population {}",
                self.initial_population, self.max_population
            )));
        }
        Ok(())
    }
}

// --- End of File: config.rs ---
