//! Tool-call and re-run entry points.

use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use serde_json::Value;
use serde_wasm_bindgen::Serializer;
use simkit_core::catalog::model_catalog as core_catalog;
use simkit_core::{
    rerun_with_parameters, run_simulation_json, run_simulation_value, SimulationResult,
};
use tracing::warn;
use wasm_bindgen::prelude::*;

/// Plain JS objects rather than `Map`s, so rows index like `row.t`.
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

fn from_js(value: JsValue, what: &str) -> Result<Value> {
    serde_wasm_bindgen::from_value(value).map_err(|e| anyhow!("Failed to read {what}: {e}"))
}

fn encode(result: &SimulationResult) -> Result<String> {
    serde_json::to_string(result).context("Failed to encode simulation result")
}

fn encode_or_error(result: &SimulationResult) -> String {
    encode(result).unwrap_or_else(|e| {
        serde_json::json!({
            "status": "error",
            "message": format!("{e:#}"),
            "columns": [],
            "data": [],
        })
        .to_string()
    })
}

/// Runs one simulation from a configuration object.
#[wasm_bindgen]
pub fn simulate(config: JsValue) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();
    let result = match from_js(config, "simulation config") {
        Ok(value) => run_simulation_value(&value),
        Err(e) => SimulationResult::error(e.to_string()),
    };
    to_js(&result)
}

/// Re-runs `config` with the given parameter overrides.
#[wasm_bindgen]
pub fn rerun(config: JsValue, parameters: JsValue) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();
    let inputs = from_js(config, "simulation config")
        .and_then(|config| Ok((config, from_js(parameters, "parameter overrides")?)));
    let result = match inputs {
        Ok((config, parameters)) => rerun_with_parameters(&config, &parameters),
        Err(e) => SimulationResult::error(e.to_string()),
    };
    to_js(&result)
}

#[wasm_bindgen]
pub fn model_catalog() -> Result<JsValue, JsValue> {
    to_js(&core_catalog())
}

/// JSON-text variant of [`simulate`] for hosts that pass strings.
#[wasm_bindgen]
pub fn simulate_json(input: &str) -> String {
    console_error_panic_hook::set_once();
    encode_or_error(&run_simulation_json(input))
}

#[wasm_bindgen]
pub fn rerun_json(config: &str, parameters: &str) -> String {
    console_error_panic_hook::set_once();
    let parsed = serde_json::from_str::<Value>(config)
        .context("Failed to parse simulation config")
        .and_then(|config| {
            let parameters = serde_json::from_str::<Value>(parameters)
                .context("Failed to parse parameter overrides")?;
            Ok((config, parameters))
        });
    let result = match parsed {
        Ok((config, parameters)) => rerun_with_parameters(&config, &parameters),
        Err(e) => SimulationResult::error(format!("{e:#}")),
    };
    encode_or_error(&result)
}

#[wasm_bindgen]
pub fn model_catalog_json() -> String {
    serde_json::to_string(&core_catalog()).unwrap_or_else(|e| {
        warn!(error = %e, "failed to encode model catalog");
        "[]".to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIR: &str = r#"{
        "model_type": "SIR",
        "parameters": { "beta": 0.3, "gamma": 0.1 },
        "initial_conditions": { "S": 0.99, "I": 0.01, "R": 0.0 },
        "time_span": { "start": 0, "end": 30, "steps": 30 }
    }"#;

    fn parse(text: &str) -> Value {
        serde_json::from_str(text).expect("bridge output should be JSON")
    }

    #[test]
    fn simulate_json_returns_success_payload() {
        let payload = parse(&simulate_json(SIR));
        assert_eq!(payload["status"], "success");
        assert_eq!(payload["data"].as_array().map(Vec::len), Some(31));
        assert_eq!(payload["columns"], serde_json::json!(["t", "S", "I", "R"]));
    }

    #[test]
    fn simulate_json_reports_unknown_model() {
        let payload = parse(&simulate_json(r#"{ "model_type": "SEIR" }"#));
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["data"], serde_json::json!([]));
        assert!(payload["message"].as_str().unwrap_or_default().contains("SEIR"));
    }

    #[test]
    fn rerun_json_keeps_columns() {
        let first = parse(&simulate_json(SIR));
        let second = parse(&rerun_json(SIR, r#"{ "gamma": 0.05 }"#));
        assert_eq!(second["status"], "success");
        assert_eq!(first["columns"], second["columns"]);
        assert_ne!(first["metrics"], second["metrics"]);
    }

    #[test]
    fn rerun_json_rejects_bad_overrides() {
        let payload = parse(&rerun_json(SIR, "not json"));
        assert_eq!(payload["status"], "error");
        assert!(payload["message"]
            .as_str()
            .unwrap_or_default()
            .contains("parameter overrides"));
    }

    #[test]
    fn catalog_json_lists_models() {
        let catalog = parse(&model_catalog_json());
        let names: Vec<&str> = catalog
            .as_array()
            .expect("array")
            .iter()
            .filter_map(|m| m["model_type"].as_str())
            .collect();
        assert_eq!(names, vec!["SIR", "Logistic", "Projectile"]);
    }

    #[test]
    fn catalog_json_matches_core_catalog() {
        let expected = serde_json::to_value(core_catalog()).expect("encode catalog");
        let catalog = parse(&model_catalog_json());
        assert_ne!(catalog, serde_json::json!([]));
        assert_eq!(catalog, expected);
    }

    #[cfg(target_arch = "wasm32")]
    #[wasm_bindgen_test::wasm_bindgen_test]
    fn simulate_accepts_js_object() {
        let config = to_js(&parse(SIR)).expect("to js");
        let result = simulate(config).expect("simulate");
        let payload: Value = serde_wasm_bindgen::from_value(result).expect("from js");
        assert_eq!(payload["status"], "success");
    }

    #[cfg(target_arch = "wasm32")]
    #[wasm_bindgen_test::wasm_bindgen_test]
    fn rerun_rejects_non_object_overrides() {
        let config = to_js(&parse(SIR)).expect("to js");
        let result = rerun(config, JsValue::from_f64(1.0)).expect("rerun");
        let payload: Value = serde_wasm_bindgen::from_value(result).expect("from js");
        assert_eq!(payload["status"], "error");
    }
}
