use std::path::{Path, PathBuf};

use serde::Deserialize;

use chanceseq_types::{SequencerConfig, MAX_STEPS, MAX_TEMPO, MIN_TEMPO};

const DEFAULT_CONFIG: &str = include_str!("../config.toml");

const DEFAULT_MODEL: &str = "ChanceSeq16";
const DEFAULT_SEED: u64 = 20200101;
const DEFAULT_SAMPLE_RATE: u32 = 48_000;
const DEFAULT_TICK_BUDGET_US: u32 = 20;

#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    defaults: DefaultsConfig,
    #[serde(default)]
    runtime: RuntimeConfig,
}

#[derive(Deserialize, Default)]
struct DefaultsConfig {
    model: Option<String>,
    steps: Option<u32>,
    tempo: Option<f32>,
    seed: Option<u64>,
}

#[derive(Deserialize, Default)]
struct RuntimeConfig {
    sample_rate: Option<u32>,
    tick_budget_us: Option<u32>,
}

pub struct Config {
    defaults: DefaultsConfig,
    runtime: RuntimeConfig,
}

impl Config {
    /// Embedded defaults merged with the user's config file, if any.
    pub fn load() -> Self {
        Self::load_from(user_config_path().as_deref())
    }

    /// Embedded defaults merged with the file at `path`. A missing,
    /// unreadable or malformed file is logged and ignored.
    pub fn load_from(path: Option<&Path>) -> Self {
        let mut base: ConfigFile =
            toml::from_str(DEFAULT_CONFIG).expect("Failed to parse embedded config.toml");

        if let Some(path) = path {
            if path.exists() {
                match std::fs::read_to_string(path) {
                    Ok(contents) => match toml::from_str::<ConfigFile>(&contents) {
                        Ok(user) => {
                            merge_defaults(&mut base.defaults, user.defaults);
                            merge_runtime(&mut base.runtime, user.runtime);
                        }
                        Err(e) => {
                            log::warn!(target: "config", "ignoring malformed config {}: {}", path.display(), e)
                        }
                    },
                    Err(e) => {
                        log::warn!(target: "config", "could not read config {}: {}", path.display(), e)
                    }
                }
            }
        }

        Config {
            defaults: base.defaults,
            runtime: base.runtime,
        }
    }

    /// Slug of the panel to instantiate.
    pub fn model(&self) -> &str {
        self.defaults.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    /// Steps knob override (1..=16). `None` keeps the panel's full width.
    pub fn steps(&self) -> Option<usize> {
        self.defaults
            .steps
            .map(|s| (s as usize).clamp(1, MAX_STEPS))
    }

    /// Internal clock tempo in octaves, clamped to the knob range.
    pub fn tempo(&self) -> Option<f32> {
        self.defaults
            .tempo
            .filter(|t| t.is_finite())
            .map(|t| t.clamp(MIN_TEMPO, MAX_TEMPO))
    }

    pub fn seed(&self) -> u64 {
        self.defaults.seed.unwrap_or(DEFAULT_SEED)
    }

    /// Host sample rate in Hz (clamped to 1 kHz..=384 kHz).
    pub fn sample_rate(&self) -> u32 {
        self.runtime
            .sample_rate
            .unwrap_or(DEFAULT_SAMPLE_RATE)
            .clamp(1_000, 384_000)
    }

    /// Per-tick budget in microseconds (at least 1).
    pub fn tick_budget_us(&self) -> u32 {
        self.runtime
            .tick_budget_us
            .unwrap_or(DEFAULT_TICK_BUDGET_US)
            .max(1)
    }

    /// Write the configured knob defaults into a sequencer configuration.
    pub fn apply_defaults(&self, config: &mut SequencerConfig) {
        if let Some(steps) = self.steps() {
            config.steps = steps.min(config.layout.step_capacity()) as f32;
        }
        if let Some(tempo) = self.tempo() {
            config.tempo = tempo;
        }
    }
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("chanceseq").join("config.toml"))
}

fn merge_defaults(base: &mut DefaultsConfig, user: DefaultsConfig) {
    if user.model.is_some() {
        base.model = user.model;
    }
    if user.steps.is_some() {
        base.steps = user.steps;
    }
    if user.tempo.is_some() {
        base.tempo = user.tempo;
    }
    if user.seed.is_some() {
        base.seed = user.seed;
    }
}

fn merge_runtime(base: &mut RuntimeConfig, user: RuntimeConfig) {
    if user.sample_rate.is_some() {
        base.sample_rate = user.sample_rate;
    }
    if user.tick_budget_us.is_some() {
        base.tick_budget_us = user.tick_budget_us;
    }
}
