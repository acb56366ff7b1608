//! # chanceseq-core
//!
//! Host-side collaborators of the ChanceSeq engine: configuration, persisted
//! state, and the model registry.
//!
//! ```rust,ignore
//! use chanceseq_core::{config::Config, registry};
//! use chanceseq_engine::Lcg;
//! use chanceseq_types::TickInputs;
//!
//! let config = Config::load();
//! let mut module = registry::create(config.model()).expect("unknown model");
//! config.apply_defaults(&mut module.config);
//! let mut rng = Lcg::new(config.seed());
//! let frame = module.tick(&TickInputs::new(config.sample_rate() as f32), &mut rng);
//! ```
//!
//! - [`config`]: TOML configuration (embedded defaults + user override)
//! - [`persistence`]: JSON save/load of the running flag and step gates
//! - [`registry`]: model table and instance factory

pub mod config;
pub mod persistence;
pub mod registry;

pub use config::Config;
pub use persistence::PersistError;
pub use registry::{create, models, ModelDescriptor, Module};
