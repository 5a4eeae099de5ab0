use crate::foundation::core::{CountRange, Interval};

/// Source of uniform samples in `[0, 1)`.
///
/// Every generator in the crate takes one of these instead of reaching for a global RNG, so a
/// fixed seed (or a scripted sequence in tests) reproduces the exact same clouds.
pub trait RandomSource {
    /// Next uniform value in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Uniform value in `[min, max)`.
    fn range(&mut self, min: f64, max: f64) -> f64 {
        self.next_f64() * (max - min) + min
    }

    /// Uniform value inside `interval`.
    fn sample(&mut self, interval: Interval) -> f64 {
        self.range(interval.min(), interval.max())
    }

    /// Uniform integer in `[min, max)`; returns `min` when the range is empty.
    fn int_range(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }
        let v = self.range(f64::from(min), f64::from(max)).floor() as u32;
        v.min(max - 1)
    }

    /// Uniform integer inside `range`.
    fn count(&mut self, range: CountRange) -> u32 {
        self.int_range(range.0, range.1)
    }

    /// Uniformly chosen element, `None` for an empty slice.
    fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.int_range(0, items.len() as u32) as usize;
        items.get(idx)
    }

    /// In-place Fisher-Yates shuffle, walking from the back.
    fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.int_range(0, i as u32 + 1) as usize;
            items.swap(i, j);
        }
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

/// Seedable SplitMix64 generator.
#[derive(Clone, Copy, Debug)]
pub struct Rng64 {
    state: u64,
}

impl Rng64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u64(&mut self) -> u64 {
        // SplitMix64
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }
}

impl RandomSource for Rng64 {
    fn next_f64(&mut self) -> f64 {
        // 53 bits of precision.
        let v = self.next_u64() >> 11;
        (v as f64) * (1.0 / ((1u64 << 53) as f64))
    }
}

/// Replays a fixed list of samples, cycling when exhausted.
#[derive(Clone, Debug)]
pub struct SequenceRng {
    values: Vec<f64>,
    pos: usize,
}

impl SequenceRng {
    /// Values are clamped into `[0, 1)`; an empty list always yields `0.0`.
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        let values = values
            .into()
            .into_iter()
            .map(|v| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0 - f64::EPSILON) })
            .collect();
        Self { values, pos: 0 }
    }

    /// Number of samples drawn so far.
    pub fn draws(&self) -> usize {
        self.pos
    }
}

impl RandomSource for SequenceRng {
    fn next_f64(&mut self) -> f64 {
        if self.values.is_empty() {
            self.pos += 1;
            return 0.0;
        }
        let v = self.values[self.pos % self.values.len()];
        self.pos += 1;
        v
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/rng.rs"]
mod tests;
