//! Uniform random draws for the AI.

/// Source of uniform draws in `[0, 1)`.
pub trait RandomSource {
    /// Next uniform draw in `[0, 1)`.
    fn next_unit(&mut self) -> f32;

    /// Draws once and checks it against `probability`.
    fn chance(&mut self, probability: f32) -> bool {
        self.next_unit() < probability
    }
}

impl RandomSource for fastrand::Rng {
    fn next_unit(&mut self) -> f32 {
        self.f32()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_unit(&mut self) -> f32 {
        (**self).next_unit()
    }
}

/// Replays a fixed list of draws, for tests and replays.
///
/// Once the script runs out every further draw returns `fallback`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    script: Vec<f32>,
    cursor: usize,
    fallback: f32,
}

impl ScriptedRandom {
    /// Replays `script`, then returns 0.99 (every chance below it fails).
    #[must_use]
    pub fn new(script: &[f32]) -> Self {
        Self {
            script: script.to_vec(),
            cursor: 0,
            fallback: 0.99,
        }
    }

    /// Always returns `value`.
    #[must_use]
    pub fn constant(value: f32) -> Self {
        Self {
            script: Vec::new(),
            cursor: 0,
            fallback: value,
        }
    }

    /// Sets the value returned after the script is exhausted.
    #[must_use]
    pub fn then(mut self, fallback: f32) -> Self {
        self.fallback = fallback;
        self
    }

    /// Number of draws taken so far.
    #[must_use]
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f32 {
        let value = self.script.get(self.cursor).copied().unwrap_or(self.fallback);
        self.cursor += 1;
        value
    }
}
