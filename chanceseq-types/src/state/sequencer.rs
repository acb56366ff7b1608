//! Sequencer configuration: the knob bank the host owns and the engine reads.

use serde::{Deserialize, Serialize};

use super::{SequencerLayout, StepMode};
use crate::{MAX_ROWS, MAX_STEPS};

/// Tempo knob range in octaves above 1 Hz.
pub const MIN_TEMPO: f32 = -2.0;
pub const MAX_TEMPO: f32 = 6.0;
pub const DEFAULT_TEMPO: f32 = 2.0;

/// Range of a step's base value knob, in volts.
pub const MAX_VALUE_VOLTS: f32 = 10.0;

/// Largest pitch-jitter range (either sign), in volts.
pub const MAX_PITCH_RANGE: f32 = 10.0;

/// Limit applied to tempo knob plus CV so the clock rate stays finite.
const TEMPO_CV_LIMIT: f32 = 12.0;

/// Read-only per-tick configuration.
///
/// Arrays are indexed `[row][step]` and always sized for the largest layout;
/// entries beyond the layout's rows or steps are never read. Every accessor
/// clamps, so a host may write any value into the public fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequencerConfig {
    pub layout: SequencerLayout,
    /// Steps knob (1..=max_steps)
    pub steps: f32,
    /// Internal clock tempo in octaves: rate = 2^tempo Hz
    pub tempo: f32,
    /// Per-step base value (volts)
    pub values: [[f32; MAX_STEPS]; MAX_ROWS],
    /// Per-step gate probability (0.0-1.0)
    pub gate_chance: [[f32; MAX_STEPS]; MAX_ROWS],
    /// Per-step pitch-jitter range (signed volts)
    pub pitch_chance: [[f32; MAX_STEPS]; MAX_ROWS],
    /// Per-step mode
    pub modes: [StepMode; MAX_STEPS],
}

impl SequencerConfig {
    pub fn new(layout: SequencerLayout) -> Self {
        Self {
            layout,
            steps: layout.step_capacity() as f32,
            tempo: DEFAULT_TEMPO,
            values: [[0.0; MAX_STEPS]; MAX_ROWS],
            gate_chance: [[1.0; MAX_STEPS]; MAX_ROWS],
            pitch_chance: [[0.0; MAX_STEPS]; MAX_ROWS],
            modes: [StepMode::Advance; MAX_STEPS],
        }
    }

    /// Effective step count: knob plus CV, rounded, clamped to
    /// `1..=layout.max_steps`. Zero or negative counts become one step.
    pub fn step_count(&self, cv: f32) -> usize {
        let raw = (self.steps + cv).round();
        let count = if raw.is_nan() { 0 } else { raw.max(0.0) as usize };
        count.clamp(1, self.layout.step_capacity())
    }

    /// Internal clock frequency in Hz for the given tempo CV.
    pub fn clock_rate(&self, cv: f32) -> f32 {
        let octaves = self.tempo + cv;
        if octaves.is_nan() {
            return 2f32.powf(DEFAULT_TEMPO);
        }
        2f32.powf(octaves.clamp(-TEMPO_CV_LIMIT, TEMPO_CV_LIMIT))
    }

    /// Base value of `row` at `step`, clamped to ±10 V.
    pub fn base_value(&self, row: usize, step: usize) -> f32 {
        read(&self.values, row, step).clamp(-MAX_VALUE_VOLTS, MAX_VALUE_VOLTS)
    }

    /// Probability that `row` fires at `step`. Always 1.0 on panels without
    /// chance knobs.
    pub fn gate_probability(&self, row: usize, step: usize) -> f32 {
        if !self.layout.chance {
            return 1.0;
        }
        read(&self.gate_chance, row, step).clamp(0.0, 1.0)
    }

    /// Pitch-jitter range of `row` at `step`. Always 0.0 on panels without
    /// chance knobs.
    pub fn pitch_range(&self, row: usize, step: usize) -> f32 {
        if !self.layout.chance {
            return 0.0;
        }
        read(&self.pitch_chance, row, step).clamp(-MAX_PITCH_RANGE, MAX_PITCH_RANGE)
    }

    /// Mode of `step`. Always `Advance` on panels without step modes.
    pub fn mode(&self, step: usize) -> StepMode {
        if !self.layout.step_modes {
            return StepMode::Advance;
        }
        self.modes.get(step).copied().unwrap_or_default()
    }

    /// Set a step's base value across one row.
    pub fn set_row_values(&mut self, row: usize, values: &[f32]) {
        if let Some(dst) = self.values.get_mut(row) {
            for (slot, v) in dst.iter_mut().zip(values) {
                *slot = *v;
            }
        }
    }
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self::new(SequencerLayout::default())
    }
}

/// Out-of-range indices and non-finite knob values read as 0.
fn read(table: &[[f32; MAX_STEPS]; MAX_ROWS], row: usize, step: usize) -> f32 {
    let v = table
        .get(row)
        .and_then(|r| r.get(step))
        .copied()
        .unwrap_or(0.0);
    if v.is_finite() {
        v
    } else {
        0.0
    }
}
