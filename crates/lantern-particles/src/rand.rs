//! Small xorshift32 PRNG for particle spawn jitter

pub struct ParticleRng {
    state: u32,
}

impl ParticleRng {
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Returns a float in [0, 1)
    pub fn next_f32(&mut self) -> f32 {
        // 24 high bits fit the f32 mantissa exactly, so 1.0 is unreachable
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Returns a float in [min, max). Reversed bounds are swapped; NaN or
    /// infinite bounds collapse to 0 instead of propagating.
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        let (lo, hi) = (finite_or_zero(min), finite_or_zero(max));
        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        lo + self.next_f32() * (hi - lo)
    }

    /// Returns an integer in [min, max] (inclusive)
    pub fn range_u64(&mut self, min: u64, max: u64) -> u64 {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        let span = hi - lo;
        if span == 0 {
            return lo;
        }
        let offset = (self.next_f32() as f64 * (span as f64 + 1.0)) as u64;
        lo + offset.min(span)
    }
}

fn finite_or_zero(v: f32) -> f32 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rng_range_bounds() {
        let mut rng = ParticleRng::new(42);
        for _ in 0..1000 {
            let v = rng.range(0.0, 10.0);
            assert!((0.0..10.0).contains(&v));
        }
    }

    #[test]
    fn rng_unit_interval() {
        let mut rng = ParticleRng::new(7);
        for _ in 0..10_000 {
            let v = rng.next_f32();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn rng_is_deterministic() {
        let mut a = ParticleRng::new(99);
        let mut b = ParticleRng::new(99);
        for _ in 0..100 {
            assert_eq!(a.next_f32(), b.next_f32());
        }
    }

    #[test]
    fn degenerate_ranges_are_clamped() {
        let mut rng = ParticleRng::new(1);
        assert_eq!(rng.range(0.0, 0.0), 0.0);
        let v = rng.range(10.0, 0.0);
        assert!((0.0..10.0).contains(&v));
        let nan = rng.range(f32::NAN, f32::NAN);
        assert_eq!(nan, 0.0);
    }

    #[test]
    fn integer_range_is_inclusive() {
        let mut rng = ParticleRng::new(3);
        let mut seen_min = false;
        let mut seen_max = false;
        for _ in 0..5000 {
            let v = rng.range_u64(5, 8);
            assert!((5..=8).contains(&v));
            seen_min |= v == 5;
            seen_max |= v == 8;
        }
        assert!(seen_min && seen_max);
        assert_eq!(rng.range_u64(10, 10), 10);
    }

    #[test]
    fn zero_seed_is_remapped() {
        let mut rng = ParticleRng::new(0);
        assert_ne!(rng.next_u32(), 0);
    }
}
