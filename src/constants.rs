// --- File: constants.rs ---
// --- Default Simulation Constants ---
pub const DEFAULT_REGION_WIDTH: f32 = 400.0;
pub const DEFAULT_REGION_HEIGHT: f32 = 300.0;
pub const DEFAULT_MAX_POPULATION: usize = 100;
// Fraction of max_population seeded at start
pub const INITIAL_POPULATION_FRACTION: f32 = 0.5;
pub const DEFAULT_INITIAL_PROPORTION: f32 = 0.5;
pub const DEFAULT_PARTICLE_RADIUS: f32 = 8.0;
pub const DEFAULT_SHAPE_RESOLUTION: usize = 20;
pub const DEFAULT_MAX_SPEED: f32 = 1.0;
pub const DEFAULT_MAX_AGE: u32 = 500;
// Extinction trials live shorter so populations turn over faster
pub const EXTINCTION_TRIAL_MAX_AGE: u32 = 200;

// --- Reproduction ---
// Cooldown saturates here; a particle is reproductive only at this value.
pub const REPRODUCTIVE_COOLDOWN: u32 = 100;
// Initial cooldowns are drawn from [MIN, REPRODUCTIVE_COOLDOWN) so the
// seeded population does not become fertile all at once.
pub const INITIAL_COOLDOWN_MIN: u32 = 50;
// Odd perimeter vertices are pushed out by up to radius * this * trait
pub const PERIMETER_NOISE_FACTOR: f32 = 0.5;

// --- Statistics ---
pub const HISTOGRAM_BUCKETS: usize = 10;

// --- End of File: constants.rs ---
