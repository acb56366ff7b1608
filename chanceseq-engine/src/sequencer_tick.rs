//! Per-tick sequencer logic.
//!
//! Runs on the real-time callback: no allocation, no blocking, no I/O.
//! Ordering within a tick is fixed: edge detection and manual index changes,
//! then the clock advance, then the randomization draw, then the outputs.

use chanceseq_types::{SequencerConfig, StepMode, TickInputs, MAX_STEPS};

use crate::frame::OutputFrame;
use crate::randomization::UniformSource;
use crate::sequencer_state::SequencerState;
use crate::step_index::{is_next_step_paused, next_advance_target};

/// Advance one tick and produce its outputs. The panel features come from
/// `config.layout`.
pub fn tick_sequencer<R: UniformSource + ?Sized>(
    state: &mut SequencerState,
    config: &SequencerConfig,
    inputs: &TickInputs,
    rng: &mut R,
) -> OutputFrame {
    let layout = &config.layout;
    state.release.tick();

    if state.run_trigger.process(inputs.run) {
        state.running = !state.running;
        log::debug!(target: "engine", "running toggled: {}", state.running);
    }

    let step_count = config.step_count(inputs.steps_cv);
    state.step.constrain(step_count);
    let capacity = layout.step_capacity();

    // Manual index-setting sources
    let mut trigger_pressed = false;
    let mut trig_in = false;

    if layout.step_triggers {
        for (k, line) in inputs.trigger_inputs.iter().enumerate().take(capacity) {
            let Some(level) = *line else {
                continue;
            };
            let edge = state.input_triggers[k].process(level);
            if level > 0.0 {
                state.step.set_index(k, step_count);
                trigger_pressed = true;
            }
            if edge {
                trig_in = true;
            }
        }
        for (k, &value) in inputs.trigger_buttons.iter().enumerate().take(capacity) {
            let edge = state.button_triggers[k].process(value);
            if value >= 1.0 {
                state.step.set_index(k, step_count);
                trigger_pressed = true;
            }
            if edge {
                trig_in = true;
            }
        }
    } else {
        for (k, &value) in inputs.trigger_buttons.iter().enumerate().take(capacity) {
            if state.button_triggers[k].process(value) {
                state.gates[k] = !state.gates[k];
            }
        }
    }

    if state.reset_trigger.process(inputs.reset) {
        state.step.set_index(0, step_count);
        trigger_pressed = true;
        trig_in = true;
    }

    if trigger_pressed {
        state.release.reset();
    }

    // Clock
    let mut clock_edge = false;
    let mut gate_in = false;
    if state.running {
        match inputs.clock {
            Some(level) => {
                clock_edge = state.clock_trigger.process(level);
                gate_in = state.clock_trigger.is_high();
            }
            None => {
                let rate = config.clock_rate(inputs.tempo_cv);
                clock_edge = state.step.advance_phase(rate, inputs.sample_time);
                gate_in = state.step.phase() < 0.5;
            }
        }
    }

    if clock_edge && state.release.released() {
        let mut modes = [StepMode::Advance; MAX_STEPS];
        for (i, mode) in modes.iter_mut().enumerate().take(step_count) {
            *mode = config.mode(i);
        }
        let modes = &modes[..step_count];
        let current = state.step.current();
        if !is_next_step_paused(current, modes) {
            let target = next_advance_target(current, modes);
            state.step.set_index(target, step_count);
            trig_in = true;
        }
    }

    if trig_in {
        state
            .bank
            .redraw(config, layout.row_count(), state.step.current(), rng);
    }

    state.last_trig_in = trig_in;
    state.last_gate_in = gate_in;

    OutputFrame::assemble(
        state,
        config,
        layout.row_count(),
        step_count,
        layout.step_triggers,
        gate_in,
        trig_in,
    )
}
