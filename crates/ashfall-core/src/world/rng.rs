//! RNG trait abstraction for the simulation
//!
//! Every probabilistic rule draws through this trait so tests can
//! inject a deterministic generator while the world runs on a seeded
//! Xoshiro generator.

/// Random number generator trait for simulation rules
pub trait SimRng {
    /// Generate random boolean with 50% probability
    fn gen_bool(&mut self) -> bool;

    /// Generate random f32 in [0.0, 1.0)
    fn gen_f32(&mut self) -> f32;

    /// Pick a random index in [0, len)
    fn gen_index(&mut self, len: usize) -> usize {
        (self.gen_f32() * len as f32) as usize % len.max(1)
    }

    /// Check if random value is less than probability threshold
    fn check_probability(&mut self, probability: f32) -> bool {
        self.gen_f32() < probability
    }
}

// Blanket implementation for any type implementing rand::Rng,
// covering both the world's seeded Xoshiro and thread_rng
impl<T: ?Sized + rand::Rng> SimRng for T {
    fn gen_bool(&mut self) -> bool {
        rand::Rng::r#gen(self)
    }

    fn gen_f32(&mut self) -> f32 {
        rand::Rng::r#gen(self)
    }

    fn gen_index(&mut self, len: usize) -> usize {
        rand::Rng::gen_range(self, 0..len)
    }
}
