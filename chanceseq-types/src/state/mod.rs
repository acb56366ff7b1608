pub mod layout;
pub mod sequencer;
pub mod step;

pub use layout::SequencerLayout;
pub use sequencer::*;
pub use step::StepMode;
