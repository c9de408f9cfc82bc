//! Routes configurations to model drivers.
//!
//! Every function here returns a [`SimulationResult`]; failures are reported
//! through `status: "error"` rather than `Err`.

use crate::config::{ModelKind, OutputSettings, SimulationConfig};
use crate::error::{SimError, SimResult};
use crate::models::{logistic, projectile, sir};
use crate::result::SimulationResult;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

pub fn run_simulation(config: &SimulationConfig) -> SimulationResult {
    run_simulation_with(config, &OutputSettings::default())
}

pub fn run_simulation_with(
    config: &SimulationConfig,
    settings: &OutputSettings,
) -> SimulationResult {
    let span = config.time_span();
    debug!(
        model_type = %config.kind(),
        start = span.start,
        end = span.end,
        steps = span.steps,
        "dispatching simulation"
    );
    match config {
        SimulationConfig::Sir(c) => sir::run(c, settings),
        SimulationConfig::Logistic(c) => logistic::run(c, settings),
        SimulationConfig::Projectile(c) => projectile::run(c, settings),
    }
}

/// Decodes an untyped configuration, distinguishing an unknown `model_type`
/// from a malformed payload for a known one.
pub fn decode_config(value: &Value) -> SimResult<SimulationConfig> {
    let tag = value
        .get("model_type")
        .ok_or_else(|| SimError::Decode("missing `model_type` field.".into()))?;
    let Some(tag) = tag.as_str() else {
        return Err(SimError::UnknownModel(tag.to_string()));
    };
    if ModelKind::from_tag(tag).is_none() {
        return Err(SimError::UnknownModel(tag.to_string()));
    }
    Ok(SimulationConfig::deserialize(value)?)
}

pub fn run_simulation_value(value: &Value) -> SimulationResult {
    match decode_config(value) {
        Ok(config) => run_simulation(&config),
        Err(e) => {
            warn!(error = %e, "rejected simulation config");
            e.into()
        }
    }
}

pub fn run_simulation_json(input: &str) -> SimulationResult {
    match serde_json::from_str::<Value>(input) {
        Ok(value) => run_simulation_value(&value),
        Err(e) => {
            warn!(error = %e, "simulation config is not valid JSON");
            SimError::from(e).into()
        }
    }
}

/// Returns a copy of `original` whose `parameters` object has every key of
/// `overrides` replaced. Keys absent from `overrides` keep their values.
pub fn overlay_parameters(original: &Value, overrides: &Value) -> SimResult<Value> {
    let overrides = overrides
        .as_object()
        .ok_or_else(|| SimError::Decode("parameter overrides must be a JSON object.".into()))?;
    let mut config = original.clone();
    let root = config
        .as_object_mut()
        .ok_or_else(|| SimError::Decode("configuration must be a JSON object.".into()))?;
    let params = root
        .entry("parameters")
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .ok_or_else(|| SimError::Decode("`parameters` must be a JSON object.".into()))?;
    for (key, value) in overrides {
        params.insert(key.clone(), value.clone());
    }
    Ok(config)
}

/// Re-runs a previous configuration with new parameter values. The model type,
/// initial conditions and time span are taken from `original`, so the result
/// has the same columns as the first run.
pub fn rerun_with_parameters(original: &Value, overrides: &Value) -> SimulationResult {
    match overlay_parameters(original, overrides) {
        Ok(config) => run_simulation_value(&config),
        Err(e) => {
            warn!(error = %e, "rejected parameter overrides");
            e.into()
        }
    }
}
