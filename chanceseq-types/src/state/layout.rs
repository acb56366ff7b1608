//! Panel layouts: one engine, several front panels.

use serde::{Deserialize, Serialize};

use crate::{MAX_ROWS, MAX_STEPS};

/// Which features a given panel exposes.
///
/// Every revision of the module is a point in this space; the engine reads
/// the flags instead of being duplicated per revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequencerLayout {
    /// Output rows (1..=4)
    pub rows: usize,
    /// Physical step count, the upper bound of the steps knob (1..=16)
    pub max_steps: usize,
    /// Per-step, per-row chance gate and chance pitch knobs
    pub chance: bool,
    /// Per-step ADVANCE / SKIP / PAUSE switches
    pub step_modes: bool,
    /// Per-step trigger inputs and buttons that select the current step.
    /// Without them the step buttons toggle the step's gate instead.
    pub step_triggers: bool,
}

impl SequencerLayout {
    /// The three-row, eight-step panel with per-step gate toggles.
    pub const fn classic() -> Self {
        Self {
            rows: 3,
            max_steps: 8,
            chance: false,
            step_modes: false,
            step_triggers: false,
        }
    }

    /// The four-row, sixteen-step panel with chance knobs, step modes and
    /// step trigger inputs.
    pub const fn chance() -> Self {
        Self {
            rows: 4,
            max_steps: 16,
            chance: true,
            step_modes: true,
            step_triggers: true,
        }
    }

    /// Row count clamped into the supported range.
    pub fn row_count(&self) -> usize {
        self.rows.clamp(1, MAX_ROWS)
    }

    /// Physical step count clamped into the supported range.
    pub fn step_capacity(&self) -> usize {
        self.max_steps.clamp(1, MAX_STEPS)
    }
}

impl Default for SequencerLayout {
    fn default() -> Self {
        Self::chance()
    }
}
