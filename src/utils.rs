use rand::Rng;

// --- Helper Functions ---

/// Uniform sample between `a` and `b`, in whichever order they are given.
pub fn random_between<R: Rng + ?Sized>(rng: &mut R, a: f32, b: f32) -> f32 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    rng.gen_range(lo..=hi)
}

// random_symmetric
pub fn random_symmetric<R: Rng + ?Sized>(rng: &mut R, max_delta: f32) -> f32 {
    random_between(rng, -max_delta, max_delta)
}
