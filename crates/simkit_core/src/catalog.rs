//! Static description of every model kind, used by re-run UIs to build
//! parameter sliders and to know each model's output columns up front.

use crate::config::{ModelKind, STANDARD_GRAVITY};
use crate::models::{logistic, projectile, sir};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub default: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelInfo {
    pub model_type: ModelKind,
    pub description: &'static str,
    pub parameters: Vec<ParameterSpec>,
    pub initial_conditions: Vec<&'static str>,
    pub columns: Vec<&'static str>,
}

const fn param(name: &'static str, description: &'static str, default: f64) -> ParameterSpec {
    ParameterSpec {
        name,
        description,
        default,
    }
}

pub fn model_info(kind: ModelKind) -> ModelInfo {
    match kind {
        ModelKind::Sir => ModelInfo {
            model_type: kind,
            description: "Susceptible-infected-recovered epidemic",
            parameters: vec![
                param("beta", "Infection rate", 0.3),
                param("gamma", "Recovery rate", 0.1),
            ],
            initial_conditions: vec!["S", "I", "R"],
            columns: sir::COLUMNS.to_vec(),
        },
        ModelKind::Logistic => ModelInfo {
            model_type: kind,
            description: "Logistic population growth with a carrying capacity",
            parameters: vec![
                param("r", "Growth rate", 0.1),
                param("K", "Carrying capacity", 1000.0),
            ],
            initial_conditions: vec!["P"],
            columns: logistic::COLUMNS.to_vec(),
        },
        ModelKind::Projectile => ModelInfo {
            model_type: kind,
            description: "Projectile motion without air resistance",
            parameters: vec![
                param("velocity", "Launch speed", 50.0),
                param("angle", "Launch angle in degrees", 45.0),
                param("g", "Gravitational acceleration", STANDARD_GRAVITY),
            ],
            initial_conditions: vec!["x", "y"],
            columns: projectile::COLUMNS.to_vec(),
        },
    }
}

pub fn model_catalog() -> Vec<ModelInfo> {
    ModelKind::ALL.into_iter().map(model_info).collect()
}
