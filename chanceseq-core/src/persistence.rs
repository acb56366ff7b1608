//! Persisted runtime state: the running flag and, on panels whose step
//! buttons toggle gates, the per-step gates.
//!
//! Document shape: `{"running": true, "gates": [1, 0, 1, ...]}`. Loading is
//! lenient: absent keys leave the engine untouched and a short `gates` list
//! only updates the steps it covers.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use chanceseq_engine::SequencerEngine;

/// Error type for state save/load.
#[derive(Debug)]
pub enum PersistError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl From<std::io::Error> for PersistError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl std::fmt::Display for PersistError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for PersistError {}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StateDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    running: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    gates: Option<Vec<Value>>,
}

/// Serialize the engine's persisted state.
pub fn to_json(engine: &SequencerEngine) -> Result<String, PersistError> {
    let saved = engine.persisted_state();
    let doc = StateDocument {
        running: Some(Value::Bool(saved.running)),
        gates: saved
            .gates
            .map(|gates| gates.into_iter().map(|g| Value::from(g as i64)).collect()),
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

/// Apply a saved document to the engine.
pub fn apply_json(engine: &mut SequencerEngine, json: &str) -> Result<(), PersistError> {
    let doc: StateDocument = serde_json::from_str(json)?;
    let running = doc.running.map(|v| v.as_bool() == Some(true));
    let gates: Option<Vec<bool>> = doc
        .gates
        .map(|list| list.iter().map(gate_value).collect());
    engine.restore(running, gates.as_deref());
    Ok(())
}

pub fn save_to_path(engine: &SequencerEngine, path: &Path) -> Result<(), PersistError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, to_json(engine)?)?;
    log::info!(target: "persistence", "saved state to {}", path.display());
    Ok(())
}

pub fn load_from_path(engine: &mut SequencerEngine, path: &Path) -> Result<(), PersistError> {
    let json = fs::read_to_string(path)?;
    apply_json(engine, &json)?;
    log::info!(target: "persistence", "loaded state from {}", path.display());
    Ok(())
}

/// Integers are on when non-zero; booleans are taken as-is; anything else
/// reads as off.
fn gate_value(v: &Value) -> bool {
    v.as_i64()
        .map(|n| n != 0)
        .or_else(|| v.as_bool())
        .unwrap_or(false)
}
