//! Per-row chance draws: whether each row's gate fires on this step and how
//! far its pitch is pushed.

use chanceseq_types::{SequencerConfig, MAX_ROWS};

/// Uniform random source in `[0, 1)`.
///
/// The engine borrows the source for the duration of a tick and never seeds
/// or replaces it.
pub trait UniformSource {
    fn uniform(&mut self) -> f32;
}

impl<F: FnMut() -> f32> UniformSource for F {
    fn uniform(&mut self) -> f32 {
        self()
    }
}

/// 64-bit linear congruential generator (Knuth MMIX constants).
///
/// Cheap and allocation-free, good enough for musical randomness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }
}

impl Default for Lcg {
    fn default() -> Self {
        Self::new(0x2545_f491_4f6c_dd1d)
    }
}

impl UniformSource for Lcg {
    #[inline]
    fn uniform(&mut self) -> f32 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        // Top 24 bits: exactly representable, strictly below 1.0
        (self.state >> 40) as f32 / (1u64 << 24) as f32
    }
}

/// One draw across all rows. Replaced as a whole, never patched per row.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Draw {
    pub coin_flips: [bool; MAX_ROWS],
    pub pitch_offsets: [f32; MAX_ROWS],
}

/// Sample a fresh draw for `step` over the first `rows` rows.
///
/// Per row: the coin lands when `u < gate probability`; the pitch offset is
/// `u * range`, a one-sided variate that takes the sign of the range rather
/// than being centred on zero.
pub fn draw<R: UniformSource + ?Sized>(
    config: &SequencerConfig,
    rows: usize,
    step: usize,
    source: &mut R,
) -> Draw {
    let mut out = Draw::default();
    for row in 0..rows.min(MAX_ROWS) {
        out.coin_flips[row] = source.uniform() < config.gate_probability(row, step);
        out.pitch_offsets[row] = source.uniform() * config.pitch_range(row, step);
    }
    out
}

/// Holds the draw for the current step between triggers.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RandomizationBank {
    held: Draw,
    draws: u64,
}

impl RandomizationBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the held draw with a fresh one for `step`.
    pub fn redraw<R: UniformSource + ?Sized>(
        &mut self,
        config: &SequencerConfig,
        rows: usize,
        step: usize,
        source: &mut R,
    ) {
        self.held = draw(config, rows, step, source);
        self.draws = self.draws.wrapping_add(1);
    }

    pub fn held(&self) -> &Draw {
        &self.held
    }

    #[inline]
    pub fn coin_flip(&self, row: usize) -> bool {
        self.held.coin_flips.get(row).copied().unwrap_or(false)
    }

    #[inline]
    pub fn pitch_offset(&self, row: usize) -> f32 {
        self.held.pitch_offsets.get(row).copied().unwrap_or(0.0)
    }

    /// Number of draws taken since creation.
    pub fn draw_count(&self) -> u64 {
        self.draws
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chanceseq_types::{SequencerLayout, MAX_STEPS};

    fn config_with(probability: f32, range: f32) -> SequencerConfig {
        let mut config = SequencerConfig::new(SequencerLayout::chance());
        config.gate_chance = [[probability; MAX_STEPS]; MAX_ROWS];
        config.pitch_chance = [[range; MAX_STEPS]; MAX_ROWS];
        config
    }

    #[test]
    fn lcg_stays_in_unit_interval() {
        let mut rng = Lcg::new(1);
        let mut max = 0.0f32;
        let mut min = 1.0f32;
        for _ in 0..10_000 {
            let u = rng.uniform();
            assert!((0.0..1.0).contains(&u));
            max = max.max(u);
            min = min.min(u);
        }
        // Covers the whole interval, not just the lower half
        assert!(max > 0.9);
        assert!(min < 0.1);
    }

    #[test]
    fn lcg_is_deterministic_per_seed() {
        let mut a = Lcg::new(42);
        let mut b = Lcg::new(42);
        for _ in 0..16 {
            assert_eq!(a.uniform(), b.uniform());
        }
    }

    #[test]
    fn probability_zero_never_fires() {
        let config = config_with(0.0, 0.0);
        let mut rng = Lcg::new(7);
        for _ in 0..10_000 {
            let d = draw(&config, MAX_ROWS, 0, &mut rng);
            assert!(d.coin_flips.iter().all(|&c| !c));
        }
    }

    #[test]
    fn probability_one_always_fires() {
        let config = config_with(1.0, 0.0);
        let mut rng = Lcg::new(7);
        for _ in 0..10_000 {
            let d = draw(&config, MAX_ROWS, 3, &mut rng);
            assert!(d.coin_flips.iter().all(|&c| c));
        }
    }

    #[test]
    fn pitch_offset_is_one_sided() {
        let mut rng = Lcg::new(99);
        let up = config_with(1.0, 2.0);
        let down = config_with(1.0, -2.0);
        for _ in 0..1_000 {
            let d = draw(&up, MAX_ROWS, 0, &mut rng);
            assert!(d.pitch_offsets.iter().all(|&o| (0.0..2.0).contains(&o)));
            let d = draw(&down, MAX_ROWS, 0, &mut rng);
            assert!(d.pitch_offsets.iter().all(|&o| o <= 0.0 && o > -2.0));
        }
    }

    #[test]
    fn offset_scales_linearly_with_range() {
        let config = config_with(1.0, 4.0);
        let mut half = || 0.5f32;
        let d = draw(&config, 2, 0, &mut half);
        assert_eq!(d.pitch_offsets, [2.0, 2.0, 0.0, 0.0]);
        assert_eq!(d.coin_flips, [true, true, false, false]);
    }

    #[test]
    fn coin_uses_strict_less_than() {
        let config = config_with(0.5, 0.0);
        let mut at = || 0.5f32;
        assert!(!draw(&config, 1, 0, &mut at).coin_flips[0]);
        let mut below = || 0.499f32;
        assert!(draw(&config, 1, 0, &mut below).coin_flips[0]);
    }

    #[test]
    fn draws_are_per_step() {
        let mut config = config_with(1.0, 0.0);
        config.gate_chance[0][5] = 0.0;
        let mut rng = Lcg::default();
        assert!(draw(&config, 1, 4, &mut rng).coin_flips[0]);
        assert!(!draw(&config, 1, 5, &mut rng).coin_flips[0]);
    }

    #[test]
    fn bank_replaces_whole_draw() {
        let config = config_with(1.0, 1.0);
        let mut bank = RandomizationBank::new();
        assert_eq!(bank.draw_count(), 0);
        assert!(!bank.coin_flip(0));

        let mut high = || 0.9f32;
        bank.redraw(&config, 4, 0, &mut high);
        assert_eq!(bank.draw_count(), 1);
        assert!(bank.coin_flip(3));

        // Fewer rows on the next draw clears the rest rather than keeping them
        bank.redraw(&config, 1, 0, &mut high);
        assert!(bank.coin_flip(0));
        assert!(!bank.coin_flip(3));
        assert_eq!(bank.pitch_offset(3), 0.0);
        assert!(!bank.coin_flip(MAX_ROWS));
    }
}
