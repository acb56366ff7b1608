//! Per-window tick statistics for the host.
//!
//! Each sample carries what the sequencer did on that tick next to how long
//! the tick took, so a host can report activity per window and confirm that
//! every recognized trigger drew exactly once. Recording never allocates.

use std::time::Duration;

use crate::frame::OutputFrame;

/// What happened on one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickSample {
    pub elapsed_us: u32,
    pub trig_in: bool,
    pub step_changed: bool,
    /// Draws the randomization bank took during the tick
    pub draws: u64,
}

impl TickSample {
    /// Build a sample from a tick's frame. `previous_step` and `draws` are
    /// read by the host around the tick.
    pub fn observe(elapsed: Duration, frame: &OutputFrame, previous_step: usize, draws: u64) -> Self {
        Self {
            elapsed_us: elapsed.as_micros().min(u32::MAX as u128) as u32,
            trig_in: frame.trig_in,
            step_changed: frame.step != previous_step,
            draws,
        }
    }
}

/// Totals for one window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TelemetrySummary {
    pub ticks: u64,
    pub avg_us: u32,
    pub max_us: u32,
    /// Ticks over budget
    pub overruns: u64,
    pub triggers: u64,
    pub step_changes: u64,
    pub draws: u64,
    /// Ticks whose draw count differed from their trigger count
    pub draw_mismatches: u64,
}

/// Accumulates `TickSample`s until the host takes a summary.
#[derive(Debug, Clone)]
pub struct TickTelemetry {
    budget_us: u32,
    window: TelemetrySummary,
    total_us: u64,
}

impl TickTelemetry {
    pub fn new(budget_us: u32) -> Self {
        Self {
            budget_us,
            window: TelemetrySummary::default(),
            total_us: 0,
        }
    }

    #[inline]
    pub fn record(&mut self, sample: TickSample) {
        let w = &mut self.window;
        w.ticks += 1;
        self.total_us += u64::from(sample.elapsed_us);
        w.max_us = w.max_us.max(sample.elapsed_us);
        if sample.elapsed_us > self.budget_us {
            w.overruns += 1;
        }
        if sample.trig_in {
            w.triggers += 1;
        }
        if sample.step_changed {
            w.step_changes += 1;
        }
        w.draws += sample.draws;
        if sample.draws != u64::from(sample.trig_in) {
            w.draw_mismatches += 1;
        }
    }

    /// Close the current window and start a new one.
    pub fn take_summary(&mut self) -> TelemetrySummary {
        let mut summary = std::mem::take(&mut self.window);
        if summary.ticks > 0 {
            summary.avg_us = (self.total_us / summary.ticks) as u32;
        }
        self.total_us = 0;
        summary
    }
}

impl Default for TickTelemetry {
    fn default() -> Self {
        Self::new(500)
    }
}
