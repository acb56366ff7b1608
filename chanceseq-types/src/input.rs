//! Raw input lines sampled by the host once per tick.

use crate::MAX_STEPS;

/// Everything the engine reads from the outside world on a single tick.
///
/// Levels are in volts (or 0/1 for buttons). `None` on a patchable line means
/// no cable is present, which is distinct from a connected line at 0 V.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickInputs {
    /// Seconds per tick (1 / sample rate)
    pub sample_time: f32,
    /// External clock; `None` selects the internal clock
    pub clock: Option<f32>,
    /// Reset button plus reset input, already summed by the host
    pub reset: f32,
    /// Run button
    pub run: f32,
    /// CV added to the step-count knob
    pub steps_cv: f32,
    /// CV added to the tempo knob (octaves)
    pub tempo_cv: f32,
    /// Per-step trigger inputs
    pub trigger_inputs: [Option<f32>; MAX_STEPS],
    /// Per-step trigger buttons (0 or 1)
    pub trigger_buttons: [f32; MAX_STEPS],
}

impl TickInputs {
    /// Idle inputs at the given sample rate: internal clock, nothing pressed.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_time: if sample_rate > 0.0 { 1.0 / sample_rate } else { 0.0 },
            ..Self::default()
        }
    }

    /// Same inputs with the external clock patched at `level`.
    pub fn with_clock(mut self, level: f32) -> Self {
        self.clock = Some(level);
        self
    }
}

impl Default for TickInputs {
    fn default() -> Self {
        Self {
            sample_time: 1.0 / 48_000.0,
            clock: None,
            reset: 0.0,
            run: 0.0,
            steps_cv: 0.0,
            tempo_cv: 0.0,
            trigger_inputs: [None; MAX_STEPS],
            trigger_buttons: [0.0; MAX_STEPS],
        }
    }
}
