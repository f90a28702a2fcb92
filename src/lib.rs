//! Circles drifting in a box: they collide, reproduce when both parents are
//! fertile, age out, and pass a heritable "noise" trait to their children.

pub mod config;
pub mod constants;
pub mod error;
pub mod histogram;
pub mod particle;
pub mod region;
pub mod simulation;
pub mod trial;
pub mod utils;
pub mod vector;

pub use config::SimulationConfig;
pub use error::{Result, SimError};
pub use histogram::{HistogramBin, TraitHistogram, trait_histogram};
pub use particle::{Edge, Particle};
pub use region::Region;
pub use simulation::{ParticleInstance, PopulationSimulator, SimRng, TickSummary};
pub use trial::Trial;
pub use vector::Vector2;
