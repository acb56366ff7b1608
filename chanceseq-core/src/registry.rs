//! Model table the host reads once at load time.

use chanceseq_engine::{OutputFrame, SequencerEngine, UniformSource};
use chanceseq_types::{SequencerConfig, SequencerLayout, TickInputs};

/// One registered panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelDescriptor {
    pub slug: &'static str,
    pub name: &'static str,
    pub layout: SequencerLayout,
}

static MODELS: [ModelDescriptor; 2] = [
    ModelDescriptor {
        slug: "ChanceSeq",
        name: "Chance Sequencer",
        layout: SequencerLayout::classic(),
    },
    ModelDescriptor {
        slug: "ChanceSeq16",
        name: "Chance Sequencer 16",
        layout: SequencerLayout::chance(),
    },
];

/// All registered models.
pub fn models() -> &'static [ModelDescriptor] {
    &MODELS
}

pub fn find(slug: &str) -> Option<&'static ModelDescriptor> {
    MODELS.iter().find(|m| m.slug == slug)
}

/// A module instance: the engine plus the knob bank the host owns for it.
#[derive(Debug, Clone)]
pub struct Module {
    pub model: &'static ModelDescriptor,
    pub engine: SequencerEngine,
    pub config: SequencerConfig,
}

impl Module {
    pub fn tick<R: UniformSource + ?Sized>(
        &mut self,
        inputs: &TickInputs,
        rng: &mut R,
    ) -> OutputFrame {
        self.engine.tick(&self.config, inputs, rng)
    }
}

/// Instantiate the model registered under `slug`.
pub fn create(slug: &str) -> Option<Module> {
    let model = find(slug)?;
    log::debug!(target: "registry", "creating {}", model.slug);
    Some(Module {
        model,
        engine: SequencerEngine::new(model.layout),
        config: SequencerConfig::new(model.layout),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chanceseq_engine::Lcg;

    #[test]
    fn slugs_are_unique() {
        let slugs: Vec<_> = models().iter().map(|m| m.slug).collect();
        let mut deduped = slugs.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(slugs.len(), deduped.len());
    }

    #[test]
    fn create_known_models() {
        let classic = create("ChanceSeq").unwrap();
        assert_eq!(classic.engine.layout(), &SequencerLayout::classic());
        assert_eq!(classic.config.layout, SequencerLayout::classic());

        let chance = create("ChanceSeq16").unwrap();
        assert_eq!(chance.config.step_count(0.0), 16);
    }

    #[test]
    fn unknown_slug() {
        assert!(create("Nope").is_none());
        assert!(find("chanceseq").is_none());
    }

    #[test]
    fn module_ticks_its_own_config() {
        let mut module = create("ChanceSeq16").unwrap();
        module.config.steps = 2.0;
        let mut rng = Lcg::new(1);
        let mut frame = module.tick(&TickInputs::default().with_clock(0.0), &mut rng);
        for _ in 0..3 {
            module.tick(&TickInputs::default().with_clock(0.0), &mut rng);
            frame = module.tick(&TickInputs::default().with_clock(10.0), &mut rng);
        }
        assert_eq!(frame.step_count, 2);
        assert_eq!(frame.step, 1);
    }
}
