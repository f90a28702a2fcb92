// File: simulation.rs
use crate::config::SimulationConfig;
use crate::constants::*;
use crate::error::{Result, SimError};
use crate::histogram::{TraitHistogram, trait_histogram};
use crate::particle::Particle;
use crate::region::Region;
use crate::utils::random_between;
use crate::vector::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// --- Render Data Structure ---
// Flat, C-compatible view of a particle for an external renderer.
// `reproductive` is 0 or 1 (selects the fill color). Perimeter points are
// variable-length and stay on `Particle::perimeter_points`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleInstance {
    pub position: [f32; 2],
    pub radius: f32,
    pub reproductive: u32,
    pub age: u32,
}

impl From<&Particle> for ParticleInstance {
    fn from(particle: &Particle) -> Self {
        Self {
            position: particle.position.to_array(),
            radius: particle.radius(),
            reproductive: particle.is_reproductive() as u32,
            age: particle.age(),
        }
    }
}

pub type SimRng = StdRng;

/// What happened during one `tick`.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct TickSummary {
    /// Collisions that yielded at least one child.
    pub reproductions: u64,
    /// Children owed by those collisions, including ones the cap blocked.
    pub offspring: u64,
    /// Particles actually appended.
    pub births: usize,
    /// Particles removed for exceeding `max_age`.
    pub deaths: usize,
}

pub struct PopulationSimulator<R: Rng = SimRng> {
    particles: Vec<Particle>,
    region: Region,
    config: SimulationConfig,
    rng: R,
    reproduction_count: u64,
    offspring_count: u64,
    // Children spawned this tick; appended once the scan finishes.
    birth_buffer: Vec<Particle>,
}

impl PopulationSimulator<SimRng> {
    pub fn new(config: SimulationConfig) -> Result<Self> {
        Self::with_rng(config, SimRng::from_entropy())
    }

    pub fn seeded(config: SimulationConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, SimRng::seed_from_u64(seed))
    }
}

impl<R: Rng> PopulationSimulator<R> {
    /// Builds a simulator seeded with `config.initial_population` particles.
    pub fn with_rng(config: SimulationConfig, rng: R) -> Result<Self> {
        let mut state = Self::empty(config, rng)?;
        state.initialize_particles();
        Ok(state)
    }

    /// Builds a simulator around a hand-made population. `reinitialize`
    /// still reseeds from `config`.
    pub fn with_particles(config: SimulationConfig, rng: R, particles: Vec<Particle>) -> Result<Self> {
        if particles.len() > config.max_population {
            return Err(SimError::InvalidConfig(format!(
                "{} particles exceed max_population {}",
                particles.len(),
                config.max_population
            )));
        }
        let mut state = Self::empty(config, rng)?;
        state.particles = particles;
        Ok(state)
    }

    fn empty(config: SimulationConfig, rng: R) -> Result<Self> {
        config.validate()?;
        let region = config.region()?;
        Ok(Self {
            particles: Vec::with_capacity(config.max_population),
            region,
            rng,
            reproduction_count: 0,
            offspring_count: 0,
            birth_buffer: Vec::with_capacity(config.max_population / 4),
            config,
        })
    }

    fn initialize_particles(&mut self) {
        self.particles.clear();
        let count = self.config.initial_population;
        let full_circles = count as f32 * self.config.initial_proportion;
        for i in 0..count {
            let noise = if (i as f32) < full_circles { 0.0 } else { 1.0 };
            self.particles.push(Self::create_particle(
                &mut self.rng,
                &self.region,
                &self.config,
                noise,
            ));
        }
        log::info!(
            "Seeded {} particles ({} full circles) in {}x{}",
            count,
            full_circles.ceil() as usize,
            self.region.width(),
            self.region.height()
        );
    }

    fn create_particle(rng: &mut R, region: &Region, config: &SimulationConfig, noise: f32) -> Particle {
        let position = Vector2::new(
            rng.gen_range(region.xmin()..region.xmax()),
            rng.gen_range(region.ymin()..region.ymax()),
        );
        let mut particle = Particle::new(
            rng,
            position,
            config.radius,
            config.shape_resolution,
            noise,
            config.max_speed,
        );
        // Stagger ages and cooldowns so the seeded population does not
        // reproduce or die in lockstep.
        particle.set_age(rng.gen_range(0..=config.max_age / 2));
        particle.set_cooldown(rng.gen_range(INITIAL_COOLDOWN_MIN..REPRODUCTIVE_COOLDOWN));
        particle
    }

    fn create_offspring(rng: &mut R, a: &Particle, b: &Particle) -> Particle {
        let position = Vector2::new(
            random_between(rng, a.position.x(), b.position.x()),
            random_between(rng, a.position.y(), b.position.y()),
        );
        let noise = (a.noise() + b.noise()) / 2.0;
        Particle::new(rng, position, a.radius(), a.resolution(), noise, a.max_speed())
    }

    /// Advances every particle by one step.
    ///
    /// Particles are visited from the last index down. Each one moves,
    /// reflects off the region, resamples its perimeter and is then tested
    /// against every lower index. Reproduction yield always reads the other
    /// particle's perimeter as committed at the start of the tick. Children
    /// are appended after the scan and are not visited until the next tick.
    ///
    /// An error aborts the tick midway; the population is then left in an
    /// unspecified state and should be reinitialized.
    pub fn tick(&mut self) -> Result<TickSummary> {
        let mut summary = TickSummary::default();
        self.birth_buffer.clear();

        for particle in &mut self.particles {
            particle.commit_snapshot();
        }

        let max_population = self.config.max_population;
        let max_age = self.config.max_age;
        let mut population = self.particles.len();

        for i in (0..population).rev() {
            {
                let (lower, rest) = self.particles.split_at_mut(i);
                let p = &mut rest[0];
                p.advance(&mut self.rng);
                p.reflect_off_boundary(&self.region);
                p.sample();

                for j in (0..i).rev() {
                    let other = &mut lower[j];
                    let Some(children) = p.test_collision(other)? else {
                        continue;
                    };
                    if children == 0 {
                        continue;
                    }

                    self.reproduction_count += 1;
                    summary.reproductions += 1;
                    for _ in 0..children {
                        self.offspring_count += 1;
                        summary.offspring += 1;
                        if population + self.birth_buffer.len() < max_population {
                            let child = Self::create_offspring(&mut self.rng, p, other);
                            log::trace!(
                                "Particles {} and {} spawned child with noise {:.3}",
                                i,
                                j,
                                child.noise()
                            );
                            self.birth_buffer.push(child);
                        }
                        // Only the driving parent pays the cooldown.
                        if p.is_reproductive() {
                            p.reset_cooldown();
                        }
                    }
                }
            }

            if self.particles[i].age() > max_age {
                self.particles.remove(i);
                population -= 1;
                summary.deaths += 1;
            }
        }

        summary.births = self.birth_buffer.len();
        self.particles.append(&mut self.birth_buffer);

        log::debug!(
            "Tick: n={} births={} deaths={} reproductions={} offspring={}",
            self.particles.len(),
            summary.births,
            summary.deaths,
            summary.reproductions,
            summary.offspring
        );
        Ok(summary)
    }

    /// Rebuilds the population from the stored configuration and clears
    /// the counters.
    pub fn reinitialize(&mut self) {
        self.reproduction_count = 0;
        self.offspring_count = 0;
        self.birth_buffer.clear();
        self.initialize_particles();
    }

    // --- Getters ---
    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[inline]
    pub fn population(&self) -> usize {
        self.particles.len()
    }

    /// An extinct population never recovers on its own.
    #[inline]
    pub fn is_extinct(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn reproduction_count(&self) -> u64 {
        self.reproduction_count
    }

    pub fn offspring_count(&self) -> u64 {
        self.offspring_count
    }

    pub fn average_offspring(&self) -> Result<f32> {
        if self.reproduction_count == 0 {
            return Err(SimError::NoReproductions);
        }
        Ok(self.offspring_count as f32 / self.reproduction_count as f32)
    }

    pub fn histogram(&self) -> Result<TraitHistogram> {
        trait_histogram(&self.particles)
    }

    pub fn instances(&self) -> Vec<ParticleInstance> {
        self.particles.iter().map(ParticleInstance::from).collect()
    }
}
