#![allow(dead_code)]

use chanceseq_engine::{Lcg, OutputFrame, SequencerEngine};
use chanceseq_types::{SequencerConfig, SequencerLayout, TickInputs};

/// Engine plus the host-side pieces a test needs to drive it.
pub struct Rig {
    pub engine: SequencerEngine,
    pub config: SequencerConfig,
    pub rng: Lcg,
}

impl Rig {
    pub fn new(layout: SequencerLayout, steps: usize) -> Self {
        let mut config = SequencerConfig::new(layout);
        config.steps = steps as f32;
        Self {
            engine: SequencerEngine::new(layout),
            config,
            rng: Lcg::new(0xC0FFEE),
        }
    }

    /// Four rows, chance knobs, step modes and step triggers.
    pub fn chance(steps: usize) -> Self {
        Self::new(SequencerLayout::chance(), steps)
    }

    pub fn classic() -> Self {
        Self::new(SequencerLayout::classic(), 8)
    }

    pub fn tick(&mut self, inputs: &TickInputs) -> OutputFrame {
        self.engine.tick(&self.config, inputs, &mut self.rng)
    }

    /// One tick with only the external clock patched, at `level`.
    pub fn clock(&mut self, level: f32) -> OutputFrame {
        self.tick(&ext(level))
    }

    /// Clock low then high; returns the frame of the rising tick.
    pub fn pulse(&mut self) -> OutputFrame {
        self.clock(0.0);
        self.clock(10.0)
    }

    /// Press step button `k` for one tick with the clock low.
    pub fn press(&mut self, k: usize) -> OutputFrame {
        let mut inputs = ext(0.0);
        inputs.trigger_buttons[k] = 1.0;
        self.tick(&inputs)
    }

    pub fn index(&self) -> usize {
        self.engine.index()
    }

    pub fn draws(&self) -> u64 {
        self.engine.state().bank.draw_count()
    }
}

/// Idle inputs with the external clock patched at `level`.
pub fn ext(level: f32) -> TickInputs {
    TickInputs::default().with_clock(level)
}
