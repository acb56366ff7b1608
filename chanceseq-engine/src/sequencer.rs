//! The sequencer instance the host holds: layout plus owned runtime state.

use chanceseq_types::{SequencerConfig, SequencerLayout, TickInputs, MAX_STEPS};

use crate::frame::OutputFrame;
use crate::randomization::UniformSource;
use crate::sequencer_state::SequencerState;
use crate::sequencer_tick::tick_sequencer;

/// Runtime state the host persists between sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedState {
    pub running: bool,
    /// Per-step gate enables; only on panels whose step buttons toggle gates
    pub gates: Option<Vec<bool>>,
}

/// One sequencer module instance.
#[derive(Debug, Clone)]
pub struct SequencerEngine {
    layout: SequencerLayout,
    state: SequencerState,
}

impl SequencerEngine {
    pub fn new(layout: SequencerLayout) -> Self {
        Self {
            layout,
            state: SequencerState::new(),
        }
    }

    pub fn layout(&self) -> &SequencerLayout {
        &self.layout
    }

    pub fn state(&self) -> &SequencerState {
        &self.state
    }

    /// Current step index.
    pub fn index(&self) -> usize {
        self.state.index()
    }

    pub fn running(&self) -> bool {
        self.state.running
    }

    /// Process one tick. See [`tick_sequencer`]. `config` must belong to
    /// the same panel as this engine.
    pub fn tick<R: UniformSource + ?Sized>(
        &mut self,
        config: &SequencerConfig,
        inputs: &TickInputs,
        rng: &mut R,
    ) -> OutputFrame {
        debug_assert_eq!(
            config.layout, self.layout,
            "knob bank belongs to a different panel"
        );
        tick_sequencer(&mut self.state, config, inputs, rng)
    }

    /// Host "initialize": turn every step gate back on.
    pub fn initialize(&mut self) {
        self.state.gates = [true; MAX_STEPS];
        log::debug!(target: "engine", "initialized step gates");
    }

    /// Host "randomize": flip a fair coin for each step gate. Panels that
    /// select steps with their buttons have no step gates to randomize.
    pub fn randomize<R: UniformSource + ?Sized>(&mut self, rng: &mut R) {
        if self.layout.step_triggers {
            return;
        }
        for gate in self.state.gates.iter_mut().take(self.layout.step_capacity()) {
            *gate = rng.uniform() > 0.5;
        }
        log::debug!(target: "engine", "randomized step gates");
    }

    pub fn persisted_state(&self) -> PersistedState {
        let gates = if self.layout.step_triggers {
            None
        } else {
            Some(self.state.gates[..self.layout.step_capacity()].to_vec())
        };
        PersistedState {
            running: self.state.running,
            gates,
        }
    }

    /// Apply whatever part of a saved state is present. Missing fields and
    /// gates beyond the saved list keep their current values.
    pub fn restore(&mut self, running: Option<bool>, gates: Option<&[bool]>) {
        if let Some(running) = running {
            self.state.running = running;
        }
        if self.layout.step_triggers {
            return;
        }
        if let Some(gates) = gates {
            let capacity = self.layout.step_capacity();
            for (dst, src) in self.state.gates.iter_mut().zip(gates).take(capacity) {
                *dst = *src;
            }
        }
        log::debug!(target: "engine", "restored state (running: {})", self.state.running);
    }
}

impl Default for SequencerEngine {
    fn default() -> Self {
        Self::new(SequencerLayout::default())
    }
}
