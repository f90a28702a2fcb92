// --- File: particle.rs ---
use crate::constants::{PERIMETER_NOISE_FACTOR, REPRODUCTIVE_COOLDOWN};
use crate::error::Result;
use crate::region::Region;
use crate::utils::{random_between, random_symmetric};
use crate::vector::Vector2;
use rand::Rng;
use std::f32::consts::TAU;

/// Which region edge a boundary reflection corrected.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Edge {
    XMax,
    XMin,
    YMax,
    YMin,
}

#[derive(Debug, Clone)]
pub struct Particle {
    pub position: Vector2,
    pub velocity: Vector2,
    radius: f32,
    noise: f32,
    max_speed: f32,
    perimeter_radii: Vec<f32>,
    // Written by `sample`, once per tick.
    perimeter_points: Vec<Vector2>,
    // Perimeter as it stood at the end of the previous tick. Reproduction
    // tests read this one, never `perimeter_points`.
    previous_points: Vec<Vector2>,
    age: u32,
    cooldown: u32,
}

impl Particle {
    /// New particle at rest. Odd perimeter vertices are pushed outward by up
    /// to half the radius, scaled by `noise`; even vertices sit on the circle.
    pub fn new<R: Rng + ?Sized>(
        rng: &mut R,
        position: Vector2,
        radius: f32,
        resolution: usize,
        noise: f32,
        max_speed: f32,
    ) -> Self {
        let perimeter_radii = (0..resolution)
            .map(|i| {
                let odd = (i % 2) as f32;
                radius + random_between(rng, 0.0, radius * PERIMETER_NOISE_FACTOR) * noise * odd
            })
            .collect();

        // Until the first sample every vertex sits on the center.
        let perimeter_points = vec![position; resolution];
        Self {
            position,
            velocity: Vector2::ZERO,
            radius,
            noise,
            max_speed,
            perimeter_radii,
            previous_points: perimeter_points.clone(),
            perimeter_points,
            age: 0,
            cooldown: 0,
        }
    }

    // --- Accessors ---
    pub fn radius(&self) -> f32 {
        self.radius
    }
    /// The heritable trait. Fixed at creation.
    pub fn noise(&self) -> f32 {
        self.noise
    }
    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }
    pub fn resolution(&self) -> usize {
        self.perimeter_radii.len()
    }
    pub fn perimeter_radii(&self) -> &[f32] {
        &self.perimeter_radii
    }
    pub fn perimeter_points(&self) -> &[Vector2] {
        &self.perimeter_points
    }
    pub fn previous_points(&self) -> &[Vector2] {
        &self.previous_points
    }
    pub fn age(&self) -> u32 {
        self.age
    }
    pub fn cooldown(&self) -> u32 {
        self.cooldown
    }

    pub fn set_age(&mut self, age: u32) {
        self.age = age;
    }

    /// Values above the ceiling saturate.
    pub fn set_cooldown(&mut self, cooldown: u32) {
        self.cooldown = cooldown.min(REPRODUCTIVE_COOLDOWN);
    }

    pub fn reset_cooldown(&mut self) {
        self.cooldown = 0;
    }

    #[inline]
    pub fn is_reproductive(&self) -> bool {
        self.cooldown == REPRODUCTIVE_COOLDOWN
    }

    /// Integrates velocity, then perturbs it with a bounded random walk and
    /// ticks the reproductive cooldown.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.position += self.velocity;

        let m = self.max_speed;
        let vx = (self.velocity.x() + random_symmetric(rng, m)).clamp(-m, m);
        let vy = (self.velocity.y() + random_symmetric(rng, m)).clamp(-m, m);
        self.velocity = Vector2::new(vx, vy);

        if self.cooldown < REPRODUCTIVE_COOLDOWN {
            self.cooldown += 1;
        }
    }

    /// Corrects at most one edge per call, tested in the order xmax, xmin,
    /// ymax, ymin. A particle past a corner is pulled back along x first and
    /// along y on a later tick.
    pub fn reflect_off_boundary(&mut self, region: &Region) -> Option<Edge> {
        let r = self.radius;
        let p = self.position;
        let edge = if p.x() > region.xmax() - r {
            self.position = p.with_x(region.xmax() - r);
            Edge::XMax
        } else if p.x() < region.xmin() + r {
            self.position = p.with_x(region.xmin() + r);
            Edge::XMin
        } else if p.y() > region.ymax() - r {
            self.position = p.with_y(region.ymax() - r);
            Edge::YMax
        } else if p.y() < region.ymin() + r {
            self.position = p.with_y(region.ymin() + r);
            Edge::YMin
        } else {
            return None;
        };

        match edge {
            Edge::XMax | Edge::XMin => {
                self.velocity = self.velocity.with_x(-self.velocity.x());
            }
            Edge::YMax | Edge::YMin => {
                self.velocity = self.velocity.with_y(-self.velocity.y());
            }
        }
        Some(edge)
    }

    /// Recomputes the perimeter from the current position and ages the
    /// particle by one tick.
    pub fn sample(&mut self) {
        let n = self.perimeter_radii.len();
        let center = self.position;
        for (i, (point, &r)) in self
            .perimeter_points
            .iter_mut()
            .zip(&self.perimeter_radii)
            .enumerate()
        {
            *point = if i == 0 {
                // Vertex 0 is pinned to the plain radius on the +x axis.
                Vector2::new(center.x() + self.radius, center.y())
            } else {
                let angle = TAU * (i as f32 / n as f32);
                center + Vector2::new(angle.cos() * r, angle.sin() * r)
            };
        }
        self.age += 1;
    }

    /// Freezes the current perimeter as the "previous tick" snapshot.
    /// Called for every particle before any particle of the tick moves.
    pub fn commit_snapshot(&mut self) {
        self.previous_points.clone_from(&self.perimeter_points);
    }

    /// Separates `self` and `other` if they overlap, then, if both are
    /// reproductive, counts how many of `other`'s previous-tick perimeter
    /// points fall strictly inside `self`'s circle.
    ///
    /// Returns `None` when the circles do not overlap or either particle is
    /// not reproductive, otherwise `Some(yield)` (which may be zero).
    pub fn test_collision(&mut self, other: &mut Particle) -> Result<Option<usize>> {
        let offset = other.position - self.position;
        let distance = offset.magnitude();
        let min_distance = self.radius + other.radius;
        if distance >= min_distance {
            return Ok(None);
        }

        let correction = offset.normalize()? * ((min_distance - distance) / 2.0);
        other.position += correction;
        self.position -= correction;

        if !(self.is_reproductive() && other.is_reproductive()) {
            return Ok(None);
        }

        let children = other
            .previous_points
            .iter()
            .filter(|&&point| (point - self.position).magnitude() < self.radius)
            .count();
        Ok(Some(children))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0x5EED)
    }

    fn particle_at(rng: &mut StdRng, x: f32, y: f32, noise: f32) -> Particle {
        Particle::new(rng, Vector2::new(x, y), 8.0, 20, noise, 1.0)
    }

    #[test]
    fn only_odd_vertices_carry_noise() {
        let mut rng = rng();
        let p = particle_at(&mut rng, 50.0, 50.0, 1.0);
        for (i, &r) in p.perimeter_radii().iter().enumerate() {
            if i % 2 == 0 {
                assert_eq!(r, 8.0);
            } else {
                assert!((8.0..=12.0).contains(&r), "vertex {i} radius {r}");
            }
        }

        let smooth = particle_at(&mut rng, 50.0, 50.0, 0.0);
        assert!(smooth.perimeter_radii().iter().all(|&r| r == 8.0));
    }

    #[test]
    fn advance_keeps_velocity_bounded_and_saturates_cooldown() {
        let mut rng = rng();
        let mut p = particle_at(&mut rng, 50.0, 50.0, 0.0);
        p.set_cooldown(98);
        for _ in 0..500 {
            p.advance(&mut rng);
            assert!(p.velocity.x().abs() <= 1.0);
            assert!(p.velocity.y().abs() <= 1.0);
        }
        assert_eq!(p.cooldown(), REPRODUCTIVE_COOLDOWN);
        assert!(p.is_reproductive());
    }

    #[test]
    fn advance_integrates_previous_velocity() {
        let mut rng = rng();
        let mut p = particle_at(&mut rng, 50.0, 50.0, 0.0);
        p.velocity = Vector2::new(0.5, -0.25);
        p.advance(&mut rng);
        assert_eq!(p.position, Vector2::new(50.5, 49.75));
    }

    #[test]
    fn cooldown_setter_saturates() {
        let mut rng = rng();
        let mut p = particle_at(&mut rng, 50.0, 50.0, 0.0);
        p.set_cooldown(250);
        assert_eq!(p.cooldown(), REPRODUCTIVE_COOLDOWN);
        p.set_cooldown(99);
        assert!(!p.is_reproductive());
    }

    #[test]
    fn boundary_reflection_clamps_and_inverts() {
        let region = Region::sized(100.0, 100.0).unwrap();
        let mut rng = rng();
        let mut p = particle_at(&mut rng, 97.0, 50.0, 0.0);
        p.velocity = Vector2::new(0.8, 0.3);
        assert_eq!(p.reflect_off_boundary(&region), Some(Edge::XMax));
        assert_eq!(p.position, Vector2::new(92.0, 50.0));
        assert_eq!(p.velocity, Vector2::new(-0.8, 0.3));

        let mut low = particle_at(&mut rng, 50.0, 2.0, 0.0);
        low.velocity = Vector2::new(0.1, -0.5);
        assert_eq!(low.reflect_off_boundary(&region), Some(Edge::YMin));
        assert_eq!(low.position, Vector2::new(50.0, 8.0));
        assert_eq!(low.velocity, Vector2::new(0.1, 0.5));

        let mut inside = particle_at(&mut rng, 50.0, 50.0, 0.0);
        assert_eq!(inside.reflect_off_boundary(&region), None);
    }

    #[test]
    fn reflected_centers_stay_inside_region() {
        let region = Region::sized(100.0, 80.0).unwrap();
        let mut rng = rng();
        for _ in 0..500 {
            let x = rng.gen_range(0.0..=100.0);
            let y = rng.gen_range(0.0..=80.0);
            let mut p = particle_at(&mut rng, x, y, 1.0);
            p.reflect_off_boundary(&region);
            assert!(region.contains(p.position), "{:?}", p.position);
        }
    }

    #[test]
    fn snug_region_keeps_reflected_center_inside() {
        let region = Region::sized(16.0, 16.0).unwrap();
        let mut rng = rng();
        let mut p = particle_at(&mut rng, 15.0, 5.0, 0.0);
        assert_eq!(p.reflect_off_boundary(&region), Some(Edge::XMax));
        assert_eq!(p.position, Vector2::new(8.0, 5.0));
        assert!(region.contains(p.position));
    }

    #[test]
    fn corner_violation_corrects_x_before_y() {
        let region = Region::sized(100.0, 100.0).unwrap();
        let mut rng = rng();
        let mut p = particle_at(&mut rng, 99.0, 99.0, 0.0);
        assert_eq!(p.reflect_off_boundary(&region), Some(Edge::XMax));
        assert_eq!(p.position, Vector2::new(92.0, 99.0));
        assert_eq!(p.reflect_off_boundary(&region), Some(Edge::YMax));
        assert_eq!(p.position, Vector2::new(92.0, 92.0));
    }

    #[test]
    fn sample_places_vertices_and_ages() {
        let mut rng = rng();
        let mut p = Particle::new(&mut rng, Vector2::new(10.0, 20.0), 8.0, 4, 0.0, 1.0);
        p.sample();
        let pts = p.perimeter_points();
        assert_eq!(pts[0], Vector2::new(18.0, 20.0));
        assert!((pts[1].x() - 10.0).abs() < 1e-4 && (pts[1].y() - 28.0).abs() < 1e-4);
        assert!((pts[2].x() - 2.0).abs() < 1e-4 && (pts[2].y() - 20.0).abs() < 1e-4);
        assert!((pts[3].x() - 10.0).abs() < 1e-4 && (pts[3].y() - 12.0).abs() < 1e-4);
        assert_eq!(p.age(), 1);
        // snapshot not touched until committed
        assert!(p.previous_points().iter().all(|&q| q == Vector2::new(10.0, 20.0)));
        p.commit_snapshot();
        assert_eq!(p.previous_points(), p.perimeter_points());
    }

    #[test]
    fn overlap_is_separated_exactly() {
        let mut rng = rng();
        let mut a = particle_at(&mut rng, 50.0, 50.0, 0.0);
        let mut b = particle_at(&mut rng, 60.0, 53.0, 0.0);
        let result = a.test_collision(&mut b).unwrap();
        assert_eq!(result, None);
        let distance = (b.position - a.position).magnitude();
        assert!((distance - 16.0).abs() < 1e-4, "distance {distance}");
    }

    #[test]
    fn distant_particles_do_not_move() {
        let mut rng = rng();
        let mut a = particle_at(&mut rng, 10.0, 10.0, 0.0);
        let mut b = particle_at(&mut rng, 40.0, 10.0, 0.0);
        assert_eq!(a.test_collision(&mut b).unwrap(), None);
        assert_eq!(a.position, Vector2::new(10.0, 10.0));
        assert_eq!(b.position, Vector2::new(40.0, 10.0));
    }

    #[test]
    fn coincident_centers_fail_loudly() {
        let mut rng = rng();
        let mut a = particle_at(&mut rng, 10.0, 10.0, 0.0);
        let mut b = particle_at(&mut rng, 10.0, 10.0, 0.0);
        assert_eq!(a.test_collision(&mut b), Err(SimError::DegenerateGeometry));
    }

    #[test]
    fn reproduction_yield_reads_previous_snapshot() {
        let mut rng = rng();
        let mut other = Particle::new(&mut rng, Vector2::new(100.0, 100.0), 8.0, 4, 0.0, 1.0);
        other.sample();
        other.commit_snapshot();
        other.set_cooldown(REPRODUCTIVE_COOLDOWN);

        // Re-sampling after moving must not change what the test sees.
        other.position = Vector2::new(300.0, 300.0);
        other.sample();
        other.position = Vector2::new(100.0, 100.0);

        let mut p = Particle::new(&mut rng, Vector2::new(112.0, 100.0), 8.0, 4, 0.0, 1.0);
        p.set_cooldown(REPRODUCTIVE_COOLDOWN);

        // After separation p sits at x=114, 6 units from vertex 0 at x=108.
        let result = p.test_collision(&mut other).unwrap();
        assert_eq!(result, Some(1));
        assert!((p.position.x() - 114.0).abs() < 1e-4);
        assert!((other.position.x() - 98.0).abs() < 1e-4);
    }

    #[test]
    fn non_reproductive_overlap_still_separates() {
        let mut rng = rng();
        let mut a = particle_at(&mut rng, 100.0, 100.0, 0.0);
        let mut b = particle_at(&mut rng, 104.0, 100.0, 0.0);
        a.set_cooldown(REPRODUCTIVE_COOLDOWN);
        b.set_cooldown(10);
        assert_eq!(a.test_collision(&mut b).unwrap(), None);
        assert!(((b.position - a.position).magnitude() - 16.0).abs() < 1e-4);
    }
}
// --- End of File: particle.rs ---
