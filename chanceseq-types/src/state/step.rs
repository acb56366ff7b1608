//! Per-step mode switch.

use serde::{Deserialize, Serialize};

/// How a step takes part in clock-driven advancement.
///
/// The mode is only consulted when the step is the candidate next step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum StepMode {
    /// Normal step
    #[default]
    Advance,
    /// Passed over when looking for the next step
    Skip,
    /// Holds the sequencer on the previous step while it is next in line
    Pause,
}

impl StepMode {
    /// Map a three-way switch position (0, 1, 2) onto a mode.
    pub fn from_switch(value: f32) -> StepMode {
        match value.round() as i32 {
            i32::MIN..=0 => StepMode::Advance,
            1 => StepMode::Skip,
            _ => StepMode::Pause,
        }
    }

    /// Short label for display.
    pub fn name(self) -> &'static str {
        match self {
            StepMode::Advance => "Advance",
            StepMode::Skip => "Skip",
            StepMode::Pause => "Pause",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_switch_clamps() {
        assert_eq!(StepMode::from_switch(-3.0), StepMode::Advance);
        assert_eq!(StepMode::from_switch(0.9), StepMode::Skip);
        assert_eq!(StepMode::from_switch(2.0), StepMode::Pause);
        assert_eq!(StepMode::from_switch(7.0), StepMode::Pause);
        assert_eq!(StepMode::from_switch(f32::NAN), StepMode::Advance);
    }

    #[test]
    fn names_are_distinct() {
        assert_eq!(StepMode::Skip.name(), "Skip");
        assert_ne!(StepMode::Advance.name(), StepMode::Pause.name());
    }
}
