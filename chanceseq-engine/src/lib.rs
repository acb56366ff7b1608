//! # chanceseq-engine
//!
//! The real-time core of the ChanceSeq step sequencer: edge detection on the
//! clock, reset and trigger lines, the step-advance policy, per-row chance
//! draws, and the per-tick output frame.

pub mod edge_detector;
pub mod frame;
pub mod randomization;
pub mod release_timer;
pub mod sequencer;
pub mod sequencer_state;
pub mod sequencer_tick;
pub mod step_index;
pub mod telemetry;

pub use edge_detector::EdgeDetector;
pub use frame::OutputFrame;
pub use randomization::{Draw, Lcg, RandomizationBank, UniformSource};
pub use release_timer::ReleaseTimer;
pub use sequencer::{PersistedState, SequencerEngine};
pub use sequencer_state::SequencerState;
pub use step_index::{is_next_step_paused, next_advance_target, StepIndex};
pub use telemetry::{TelemetrySummary, TickSample, TickTelemetry};
