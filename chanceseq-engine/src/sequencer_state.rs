//! Runtime state owned by one sequencer instance.

use chanceseq_types::MAX_STEPS;

use crate::edge_detector::EdgeDetector;
use crate::randomization::RandomizationBank;
use crate::release_timer::ReleaseTimer;
use crate::step_index::StepIndex;

/// Everything that changes from tick to tick.
///
/// Mutated only by the engine's tick and its host hooks; never shared.
#[derive(Debug, Clone)]
pub struct SequencerState {
    pub step: StepIndex,
    pub release: ReleaseTimer,
    /// Held coin flips and pitch offsets for the current step
    pub bank: RandomizationBank,
    pub running: bool,
    /// Per-step gate enable (toggled by the step buttons on panels without
    /// step triggers)
    pub gates: [bool; MAX_STEPS],
    /// Whether the previous tick recognized a trigger
    pub last_trig_in: bool,
    /// Gate level seen on the previous tick
    pub last_gate_in: bool,
    pub(crate) clock_trigger: EdgeDetector,
    pub(crate) run_trigger: EdgeDetector,
    pub(crate) reset_trigger: EdgeDetector,
    pub(crate) input_triggers: [EdgeDetector; MAX_STEPS],
    pub(crate) button_triggers: [EdgeDetector; MAX_STEPS],
}

impl SequencerState {
    pub fn new() -> Self {
        Self {
            step: StepIndex::new(),
            release: ReleaseTimer::new(),
            bank: RandomizationBank::new(),
            running: true,
            gates: [true; MAX_STEPS],
            last_trig_in: false,
            last_gate_in: false,
            clock_trigger: EdgeDetector::new(),
            run_trigger: EdgeDetector::new(),
            reset_trigger: EdgeDetector::new(),
            input_triggers: [EdgeDetector::new(); MAX_STEPS],
            button_triggers: [EdgeDetector::new(); MAX_STEPS],
        }
    }

    /// Current step index.
    pub fn index(&self) -> usize {
        self.step.current()
    }

    /// Whether the reset line is currently held high.
    pub fn reset_high(&self) -> bool {
        self.reset_trigger.is_high()
    }
}

impl Default for SequencerState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state() {
        let state = SequencerState::new();
        assert_eq!(state.index(), 0);
        assert!(state.running);
        assert!(state.gates.iter().all(|&g| g));
        assert_eq!(state.release.elapsed(), 0);
        assert_eq!(state.bank.held().coin_flips, [false; 4]);
        assert_eq!(state.bank.held().pitch_offsets, [0.0; 4]);
    }
}
