//! Output snapshot for a single tick.

use chanceseq_types::{gate_volts, SequencerConfig, MAX_ROWS, MAX_STEPS};

use crate::sequencer_state::SequencerState;

/// Brightness of a step light for the current step while the gate is high.
const LIGHT_ACTIVE: f32 = 1.0;
/// Current step while the gate is high, but the step's gate is off.
const LIGHT_ACTIVE_MUTED: f32 = 0.33;
/// Any other step whose gate is on.
const LIGHT_ENABLED: f32 = 0.66;

/// Everything the engine writes on one tick. Built once, then read-only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputFrame {
    /// Current step index
    pub step: usize,
    /// Active step count this tick
    pub step_count: usize,
    /// Number of rows the panel has
    pub rows: usize,
    /// Per-row value: base value plus held pitch offset (volts)
    pub row_voltages: [f32; MAX_ROWS],
    /// Per-row gate: clock gate level, coin flip and step gate all high
    pub row_gates: [bool; MAX_ROWS],
    /// Per-row single-tick trigger on a recognized trigger
    pub row_triggers: [bool; MAX_ROWS],
    /// Per-step gate outputs (only the current step can be high)
    pub step_gates: [bool; MAX_STEPS],
    /// Per-step single-tick trigger pulse
    pub step_triggers: [bool; MAX_STEPS],
    /// Per-step light brightness (0.0-1.0); smoothing is the host's job
    pub step_lights: [f32; MAX_STEPS],
    /// Combined gate output: clock gate and the current step's gate
    pub gates: bool,
    /// Clock gate level this tick
    pub gate_in: bool,
    /// Whether a trigger was recognized this tick
    pub trig_in: bool,
    pub running: bool,
    /// Reset line held high
    pub reset_high: bool,
}

impl OutputFrame {
    /// Derive the outputs from the engine state after this tick's advance
    /// and draw.
    pub(crate) fn assemble(
        state: &SequencerState,
        config: &SequencerConfig,
        rows: usize,
        step_count: usize,
        step_triggers_panel: bool,
        gate_in: bool,
        trig_in: bool,
    ) -> Self {
        let step = state.index();
        let rows = rows.min(MAX_ROWS);
        let step_on = state.gates.get(step).copied().unwrap_or(false);

        let mut frame = Self {
            step,
            step_count,
            rows,
            row_voltages: [0.0; MAX_ROWS],
            row_gates: [false; MAX_ROWS],
            row_triggers: [false; MAX_ROWS],
            step_gates: [false; MAX_STEPS],
            step_triggers: [false; MAX_STEPS],
            step_lights: [0.0; MAX_STEPS],
            gates: gate_in && step_on,
            gate_in,
            trig_in,
            running: state.running,
            reset_high: state.reset_high(),
        };

        for row in 0..rows {
            let coin = state.bank.coin_flip(row);
            frame.row_voltages[row] = config.base_value(row, step) + state.bank.pitch_offset(row);
            frame.row_gates[row] = gate_in && coin && step_on;
            frame.row_triggers[row] = trig_in && coin && step_on;
        }

        for i in 0..step_count.min(MAX_STEPS) {
            let current = i == step;
            let enabled = state.gates[i];
            frame.step_gates[i] = state.running && gate_in && current && enabled;
            frame.step_triggers[i] = trig_in && current;
            frame.step_lights[i] = if step_triggers_panel {
                if current {
                    LIGHT_ACTIVE
                } else {
                    0.0
                }
            } else if gate_in && current {
                if enabled {
                    LIGHT_ACTIVE
                } else {
                    LIGHT_ACTIVE_MUTED
                }
            } else if enabled {
                LIGHT_ENABLED
            } else {
                0.0
            };
        }

        frame
    }

    pub fn row_gate_volts(&self, row: usize) -> f32 {
        gate_volts(self.row_gates.get(row).copied().unwrap_or(false))
    }

    pub fn row_trigger_volts(&self, row: usize) -> f32 {
        gate_volts(self.row_triggers.get(row).copied().unwrap_or(false))
    }

    pub fn step_gate_volts(&self, step: usize) -> f32 {
        gate_volts(self.step_gates.get(step).copied().unwrap_or(false))
    }

    pub fn gates_volts(&self) -> f32 {
        gate_volts(self.gates)
    }

    /// Row indicator brightness: the row's value scaled from 10 V.
    pub fn row_lights(&self) -> [f32; MAX_ROWS] {
        let mut lights = [0.0; MAX_ROWS];
        for (light, v) in lights.iter_mut().zip(&self.row_voltages).take(self.rows) {
            *light = v / 10.0;
        }
        lights
    }
}
