//! Deterministic per-pixel random source.
//!
//! Every pixel sample owns its own generator seeded from
//! `(x, y, frame_index, sample_index)`, so results are reproducible
//! regardless of how rows are scheduled across threads.

use glint_math::Vec3;

/// One round of PCG-style integer mixing.
#[inline]
fn pcg_hash(input: u32) -> u32 {
    let state = input.wrapping_mul(747796405).wrapping_add(2891336453);
    let word = ((state >> ((state >> 28) + 4)) ^ state).wrapping_mul(277803737);
    (word >> 22) ^ word
}

/// Stateful pseudo-random float generator over a 32-bit seed.
///
/// Output is a pure function of the seed state; there is no global or
/// thread-local state behind it.
#[derive(Clone, Copy, Debug)]
pub struct PathRng {
    state: u32,
}

impl PathRng {
    /// Create a generator from an initial seed.
    #[inline]
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Advance the state and return a float in [0, 1], nominally [0, 1).
    ///
    /// The `state / u32::MAX` normalization is preserved from existing
    /// renders; states within a few ulps of the top of the range can
    /// round to exactly 1.0 (about 1 in 2^25 draws).
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        self.state = pcg_hash(self.state);
        self.state as f32 / u32::MAX as f32
    }

    /// Draw a direction by normalizing three uniform draws mapped to
    /// [-1, 1]. Not uniformly distributed over the sphere, but cheap;
    /// kept as-is for render reproducibility.
    #[inline]
    pub fn in_unit_sphere(&mut self) -> Vec3 {
        Vec3::new(
            self.next_f32() * 2.0 - 1.0,
            self.next_f32() * 2.0 - 1.0,
            self.next_f32() * 2.0 - 1.0,
        )
        .normalize()
    }
}

/// Derive the seed for one pixel sample.
///
/// Wrapping integer products give every `(pixel, frame, sample)` triple
/// its own stream with no state shared between pixels.
#[inline]
pub fn pixel_seed(x: u32, y: u32, width: u32, frame_index: u32, sample: u32) -> u32 {
    let pixel = x.wrapping_add(y.wrapping_mul(width));
    pixel.wrapping_mul(frame_index.wrapping_mul(sample.wrapping_mul(sample).wrapping_add(293123)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_f32_in_unit_range() {
        // Upper bound is inclusive: the preserved normalization can
        // round states near u32::MAX to exactly 1.0
        for seed in [0u32, 1, 42, 293123, u32::MAX] {
            let mut rng = PathRng::new(seed);
            for _ in 0..1000 {
                let value = rng.next_f32();
                assert!((0.0..=1.0).contains(&value), "seed {seed} gave {value}");
            }
        }
    }

    #[test]
    fn test_stream_is_a_pure_function_of_seed() {
        let mut a = PathRng::new(1337);
        let mut b = PathRng::new(1337);
        for _ in 0..100 {
            assert_eq!(a.next_f32().to_bits(), b.next_f32().to_bits());
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = PathRng::new(1);
        let mut b = PathRng::new(2);
        let same = (0..32).filter(|_| a.next_f32() == b.next_f32()).count();
        assert!(same < 32);
    }

    #[test]
    fn test_in_unit_sphere_is_unit_length() {
        let mut rng = PathRng::new(7);
        for _ in 0..100 {
            let v = rng.in_unit_sphere();
            assert!((v.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_pixel_seed_varies_per_sample_and_frame() {
        let base = pixel_seed(3, 4, 64, 1, 0);
        assert_ne!(base, pixel_seed(3, 4, 64, 1, 1));
        assert_ne!(base, pixel_seed(3, 4, 64, 2, 0));

        // Deterministic
        assert_eq!(base, pixel_seed(3, 4, 64, 1, 0));
    }
}
