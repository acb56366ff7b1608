//! # chanceseq-types
//!
//! Shared type definitions for the ChanceSeq step sequencer.
//! Plain data only: the panel layout, per-step modes, the per-tick
//! configuration the host owns, and the raw input lines it feeds the engine.

pub mod input;
pub mod state;

pub use input::TickInputs;
pub use state::*;

/// Upper bound on output rows across every layout.
pub const MAX_ROWS: usize = 4;

/// Upper bound on steps across every layout (one physical row of the panel).
pub const MAX_STEPS: usize = 16;

/// Output level for a gate or trigger that is high.
pub const GATE_HIGH_VOLTS: f32 = 10.0;

/// Convert a binary gate into its output voltage.
pub fn gate_volts(high: bool) -> f32 {
    if high {
        GATE_HIGH_VOLTS
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_volts_maps_binary_levels() {
        assert_eq!(gate_volts(true), 10.0);
        assert_eq!(gate_volts(false), 0.0);
    }
}
