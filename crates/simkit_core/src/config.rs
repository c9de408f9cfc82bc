//! Simulation configuration: one tagged variant per model kind.

use crate::error::{SimError, SimResult};
use serde::{Deserialize, Serialize};

/// The discriminated configuration union. The `model_type` tag selects both the
/// derivative function and the state vector layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model_type")]
pub enum SimulationConfig {
    #[serde(rename = "SIR")]
    Sir(SirConfig),
    Logistic(LogisticConfig),
    Projectile(ProjectileConfig),
}

impl SimulationConfig {
    pub fn kind(&self) -> ModelKind {
        match self {
            SimulationConfig::Sir(_) => ModelKind::Sir,
            SimulationConfig::Logistic(_) => ModelKind::Logistic,
            SimulationConfig::Projectile(_) => ModelKind::Projectile,
        }
    }

    pub fn time_span(&self) -> &TimeSpan {
        match self {
            SimulationConfig::Sir(c) => &c.time_span,
            SimulationConfig::Logistic(c) => &c.time_span,
            SimulationConfig::Projectile(c) => &c.time_span,
        }
    }
}

/// Model discriminator values, as they appear in `model_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelKind {
    #[serde(rename = "SIR")]
    Sir,
    Logistic,
    Projectile,
}

impl ModelKind {
    pub const ALL: [ModelKind; 3] = [ModelKind::Sir, ModelKind::Logistic, ModelKind::Projectile];

    pub fn as_str(self) -> &'static str {
        match self {
            ModelKind::Sir => "SIR",
            ModelKind::Logistic => "Logistic",
            ModelKind::Projectile => "Projectile",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == tag)
    }
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSpan {
    #[serde(default)]
    pub start: f64,
    pub end: f64,
    pub steps: usize,
}

impl TimeSpan {
    pub fn validate(&self) -> SimResult<()> {
        if self.steps == 0 {
            return Err(SimError::invalid("time_span.steps must be at least 1."));
        }
        if !self.start.is_finite() || !self.end.is_finite() {
            return Err(SimError::invalid("time_span bounds must be finite."));
        }
        if self.end <= self.start {
            return Err(SimError::invalid(format!(
                "time_span.end ({}) must be greater than time_span.start ({}).",
                self.end, self.start
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SirParameters {
    pub beta: f64,
    pub gamma: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[allow(non_snake_case)]
pub struct SirInitialConditions {
    pub S: f64,
    pub I: f64,
    pub R: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SirConfig {
    pub parameters: SirParameters,
    pub initial_conditions: SirInitialConditions,
    pub time_span: TimeSpan,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[allow(non_snake_case)]
pub struct LogisticParameters {
    pub r: f64,
    pub K: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[allow(non_snake_case)]
pub struct LogisticInitialConditions {
    pub P: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticConfig {
    pub parameters: LogisticParameters,
    pub initial_conditions: LogisticInitialConditions,
    pub time_span: TimeSpan,
}

pub const STANDARD_GRAVITY: f64 = 9.81;

fn standard_gravity() -> f64 {
    STANDARD_GRAVITY
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileParameters {
    pub velocity: f64,
    /// Launch angle above the horizontal, in degrees.
    pub angle: f64,
    #[serde(default = "standard_gravity")]
    pub g: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectileInitialConditions {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileConfig {
    pub parameters: ProjectileParameters,
    #[serde(default)]
    pub initial_conditions: ProjectileInitialConditions,
    pub time_span: TimeSpan,
}

/// Display rounding applied when trajectories are turned into rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Decimal places for time and most state fields.
    pub decimals: u32,
    /// Decimal places for fractional compartments (SIR S, I, R).
    pub fraction_decimals: u32,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            decimals: 2,
            fraction_decimals: 4,
        }
    }
}

pub(crate) fn require_finite(name: &str, value: f64) -> SimResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SimError::invalid(format!("{name} must be a finite number.")))
    }
}
