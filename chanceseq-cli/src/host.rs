//! Headless host: drives one module with a simulated clock and reports each
//! step change.

use std::time::Instant;

use chanceseq_core::Module;
use chanceseq_engine::{Lcg, OutputFrame, TelemetrySummary, TickSample, TickTelemetry};
use chanceseq_types::{SequencerConfig, StepMode, TickInputs, MAX_ROWS, MAX_STEPS};

pub struct HeadlessHost {
    module: Module,
    rng: Lcg,
    telemetry: TickTelemetry,
    sample_rate: f32,
    /// External clock period in ticks; `None` uses the internal clock
    ext_clock_period: Option<u64>,
}

impl HeadlessHost {
    pub fn new(
        module: Module,
        rng: Lcg,
        sample_rate: f32,
        budget_us: u32,
        ext_clock_period: Option<u64>,
    ) -> Self {
        Self {
            module,
            rng,
            telemetry: TickTelemetry::new(budget_us),
            sample_rate,
            ext_clock_period: ext_clock_period.filter(|&p| p >= 2),
        }
    }

    pub fn module(&self) -> &Module {
        &self.module
    }

    pub fn module_mut(&mut self) -> &mut Module {
        &mut self.module
    }

    /// Inputs for tick number `tick`: a square-wave clock high for the
    /// first half of each period when the external clock is patched.
    fn inputs_for(&self, tick: u64) -> TickInputs {
        let inputs = TickInputs::new(self.sample_rate);
        match self.ext_clock_period {
            Some(period) => {
                let high = tick % period < period / 2;
                inputs.with_clock(if high { 10.0 } else { 0.0 })
            }
            None => inputs,
        }
    }

    /// Run `ticks` ticks, calling `on_step` whenever a trigger was
    /// recognized. Returns the telemetry for the whole run.
    pub fn run(
        &mut self,
        ticks: u64,
        mut on_step: impl FnMut(u64, &OutputFrame),
    ) -> TelemetrySummary {
        for tick in 0..ticks {
            let inputs = self.inputs_for(tick);
            let previous_step = self.module.engine.index();
            let draws_before = self.module.engine.state().bank.draw_count();
            let started = Instant::now();
            let frame = self.module.tick(&inputs, &mut self.rng);
            let elapsed = started.elapsed();
            let draws = self.module.engine.state().bank.draw_count() - draws_before;
            self.telemetry
                .record(TickSample::observe(elapsed, &frame, previous_step, draws));
            if frame.trig_in {
                on_step(tick, &frame);
            }
        }
        self.telemetry.take_summary()
    }
}

/// Fill the knob bank with a recognizable pattern: rising semitone steps
/// per row, alternating gate chance, and upward pitch jitter on the last row.
pub fn fill_demo_pattern(config: &mut SequencerConfig) {
    for row in 0..MAX_ROWS {
        let values: Vec<f32> = (0..MAX_STEPS)
            .map(|step| ((step * (row + 1)) % 12) as f32 / 12.0)
            .collect();
        config.set_row_values(row, &values);
        for step in 0..MAX_STEPS {
            config.gate_chance[row][step] = if step % 2 == 0 { 1.0 } else { 0.5 };
        }
    }
    config.pitch_chance[MAX_ROWS - 1] = [1.0 / 12.0; MAX_STEPS];
}

/// Set step modes from comma-separated switch positions (`0` advance,
/// `1` skip, `2` pause). Unparseable entries are left unchanged. Returns the
/// number of steps set.
pub fn apply_mode_switches(config: &mut SequencerConfig, switches: &str) -> usize {
    let mut set = 0;
    for (mode, entry) in config.modes.iter_mut().zip(switches.split(',')) {
        if let Ok(position) = entry.trim().parse::<f32>() {
            *mode = StepMode::from_switch(position);
            set += 1;
        }
    }
    set
}

/// Mode names of the first `steps` steps.
pub fn describe_modes(config: &SequencerConfig, steps: usize) -> String {
    (0..steps.min(MAX_STEPS))
        .map(|step| config.mode(step).name())
        .collect::<Vec<_>>()
        .join(" ")
}

/// One-line summary of a frame.
pub fn describe(tick: u64, frame: &OutputFrame) -> String {
    let gates: String = frame.row_gates[..frame.rows]
        .iter()
        .map(|&g| if g { '1' } else { '0' })
        .collect();
    let volts: Vec<String> = frame.row_voltages[..frame.rows]
        .iter()
        .map(|v| format!("{:5.2}", v))
        .collect();
    format!(
        "tick {:>8}  step {:>2}/{:<2}  gates {}  volts {}",
        tick,
        frame.step + 1,
        frame.step_count,
        gates,
        volts.join(" ")
    )
}
