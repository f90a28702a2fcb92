use crate::constants::HISTOGRAM_BUCKETS;
use crate::error::{Result, SimError};
use crate::particle::Particle;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HistogramBin {
    pub center: f32,
    pub mass: f32,
}

/// Distribution of particle traits over ten equal-width buckets of [0, 1].
/// Masses sum to one.
#[derive(Debug, Clone, PartialEq)]
pub struct TraitHistogram {
    bins: [HistogramBin; HISTOGRAM_BUCKETS],
}

impl TraitHistogram {
    pub fn bins(&self) -> &[HistogramBin] {
        &self.bins
    }

    pub fn total_mass(&self) -> f32 {
        self.bins.iter().map(|bin| bin.mass).sum()
    }

    /// (center, mass) pairs in ascending bucket order, ready for charting.
    pub fn to_pairs(&self) -> Vec<(f32, f32)> {
        self.bins.iter().map(|bin| (bin.center, bin.mass)).collect()
    }
}

/// Bucket index for a trait value; 1.0 lands in the last bucket.
#[inline]
pub fn bucket_index(noise: f32) -> usize {
    ((noise * HISTOGRAM_BUCKETS as f32).floor().max(0.0) as usize).min(HISTOGRAM_BUCKETS - 1)
}

pub fn trait_histogram(particles: &[Particle]) -> Result<TraitHistogram> {
    if particles.is_empty() {
        return Err(SimError::EmptyPopulation);
    }

    let width = 1.0 / HISTOGRAM_BUCKETS as f32;
    let mut bins: [HistogramBin; HISTOGRAM_BUCKETS] = std::array::from_fn(|i| HistogramBin {
        center: i as f32 * width + width / 2.0,
        mass: 0.0,
    });

    let weight = 1.0 / particles.len() as f32;
    for particle in particles {
        bins[bucket_index(particle.noise())].mass += weight;
    }
    Ok(TraitHistogram { bins })
}
