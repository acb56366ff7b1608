//! Current step pointer and the advance policy over per-step modes.

use chanceseq_types::StepMode;

/// The step the sequencer is on, plus the internal clock's phase within it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StepIndex {
    current: usize,
    /// Internal clock phase (0.0-1.0)
    phase: f32,
}

impl StepIndex {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn current(&self) -> usize {
        self.current
    }

    #[inline]
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Jump to `index`. Indices past the active step count wrap to 0.
    /// Restarts the internal clock phase.
    pub fn set_index(&mut self, index: usize, step_count: usize) {
        self.current = if index >= step_count.max(1) { 0 } else { index };
        self.phase = 0.0;
    }

    /// Pull the index back to 0 if the step count shrank underneath it.
    pub fn constrain(&mut self, step_count: usize) {
        if self.current >= step_count.max(1) {
            self.current = 0;
        }
    }

    /// Advance the internal clock by one tick. Returns true when the phase
    /// completes a cycle; the phase wraps so the clock keeps time even when
    /// the advance itself is suppressed.
    pub fn advance_phase(&mut self, rate_hz: f32, sample_time: f32) -> bool {
        let delta = rate_hz * sample_time;
        if !delta.is_finite() || delta <= 0.0 {
            return false;
        }
        self.phase += delta;
        if self.phase >= 1.0 {
            self.phase = self.phase.fract();
            true
        } else {
            false
        }
    }
}

/// Step the clock would move to from `current`, given the active steps'
/// modes (`modes.len()` is the step count).
///
/// Scans forward circularly for the first step that is not `Skip`. If every
/// step is skipped the sequencer falls back to step 0.
pub fn next_advance_target(current: usize, modes: &[StepMode]) -> usize {
    let count = modes.len();
    if count == 0 {
        return 0;
    }
    (1..=count)
        .map(|offset| (current + offset) % count)
        .find(|&candidate| modes[candidate] != StepMode::Skip)
        .unwrap_or(0)
}

/// Whether the step that would come next is a `Pause` step, which holds the
/// sequencer where it is.
pub fn is_next_step_paused(current: usize, modes: &[StepMode]) -> bool {
    modes
        .get(next_advance_target(current, modes))
        .map_or(false, |mode| *mode == StepMode::Pause)
}

#[cfg(test)]
mod tests {
    use super::*;

    use chanceseq_types::StepMode::{Advance as A, Pause as P, Skip as S};

    #[test]
    fn set_index_wraps_past_step_count() {
        let mut idx = StepIndex::new();
        idx.set_index(3, 4);
        assert_eq!(idx.current(), 3);
        idx.set_index(4, 4);
        assert_eq!(idx.current(), 0);
        idx.set_index(15, 8);
        assert_eq!(idx.current(), 0);
    }

    #[test]
    fn set_index_with_zero_steps_stays_on_first() {
        let mut idx = StepIndex::new();
        idx.set_index(0, 0);
        assert_eq!(idx.current(), 0);
        idx.set_index(1, 0);
        assert_eq!(idx.current(), 0);
    }

    #[test]
    fn set_index_is_idempotent() {
        let mut once = StepIndex::new();
        once.advance_phase(2.0, 0.1);
        let mut twice = once;
        once.set_index(5, 8);
        twice.set_index(5, 8);
        twice.set_index(5, 8);
        assert_eq!(once, twice);
    }

    #[test]
    fn set_index_restarts_phase() {
        let mut idx = StepIndex::new();
        idx.advance_phase(1.0, 0.3);
        assert!(idx.phase() > 0.0);
        idx.set_index(1, 4);
        assert_eq!(idx.phase(), 0.0);
    }

    #[test]
    fn constrain_follows_shrinking_count() {
        let mut idx = StepIndex::new();
        idx.set_index(6, 8);
        idx.constrain(8);
        assert_eq!(idx.current(), 6);
        idx.constrain(4);
        assert_eq!(idx.current(), 0);
    }

    #[test]
    fn phase_wraps_on_cycle() {
        let mut idx = StepIndex::new();
        assert!(!idx.advance_phase(1.0, 0.6));
        assert!(idx.advance_phase(1.0, 0.6));
        assert!((idx.phase() - 0.2).abs() < 1e-5);
        assert!(!idx.advance_phase(f32::INFINITY, 0.0));
        assert!(!idx.advance_phase(1.0, -1.0));
    }

    #[test]
    fn plain_advance_wraps() {
        assert_eq!(next_advance_target(0, &[A, A, A, A]), 1);
        assert_eq!(next_advance_target(3, &[A, A, A, A]), 0);
        assert_eq!(next_advance_target(0, &[A]), 0);
        assert_eq!(next_advance_target(0, &[]), 0);
    }

    #[test]
    fn skip_steps_are_passed_over() {
        assert_eq!(next_advance_target(1, &[A, A, S, A]), 3);
        assert_eq!(next_advance_target(3, &[S, A, A, A]), 1);
        assert_eq!(next_advance_target(2, &[S, S, A, S]), 2);
    }

    #[test]
    fn all_skipped_falls_back_to_zero() {
        assert_eq!(next_advance_target(2, &[S, S, S, S]), 0);
    }

    #[test]
    fn pause_detection_uses_candidate() {
        assert!(is_next_step_paused(2, &[A, A, A, P]));
        assert!(!is_next_step_paused(3, &[A, A, A, P]));
        // Skip in between does not hide the pause behind it
        assert!(is_next_step_paused(1, &[A, A, S, P]));
        assert!(!is_next_step_paused(0, &[]));
    }
}
