//! Bounded (Verhulst) logistic growth.

use crate::config::{require_finite, LogisticConfig, LogisticParameters, OutputSettings};
use crate::error::{SimError, SimResult};
use crate::result::{build_rows, ColumnSpec, Metrics, SimulationResult};
use crate::solvers::{integrate, ParameterizedSystem};
use tracing::warn;

pub const COLUMNS: [&str; 2] = ["t", "P"];

/// `dP/dt = r P (1 - P/K)`. Populations above `K` decay back toward it.
pub fn logistic_derivative(_t: f64, x: &[f64], p: &LogisticParameters, out: &mut [f64]) {
    out[0] = p.r * x[0] * (1.0 - x[0] / p.K);
}

fn validate(config: &LogisticConfig) -> SimResult<()> {
    config.time_span.validate()?;
    require_finite("r", config.parameters.r)?;
    require_finite("K", config.parameters.K)?;
    if config.parameters.K <= 0.0 {
        return Err(SimError::invalid("carrying capacity K must be positive."));
    }
    require_finite("P", config.initial_conditions.P)?;
    if config.initial_conditions.P < 0.0 {
        return Err(SimError::invalid("initial population P must be non-negative."));
    }
    Ok(())
}

pub fn try_run(
    config: &LogisticConfig,
    settings: &OutputSettings,
) -> SimResult<SimulationResult> {
    validate(config)?;
    let span = config.time_span;
    let system = ParameterizedSystem::new(1, config.parameters, logistic_derivative);
    let trajectory = integrate(
        &system,
        span.start,
        &[config.initial_conditions.P],
        span.end,
        span.steps,
    )?;

    let columns = [
        ColumnSpec {
            name: COLUMNS[0],
            index: None,
            decimals: settings.decimals,
        },
        ColumnSpec {
            name: COLUMNS[1],
            index: Some(0),
            decimals: settings.decimals,
        },
    ];
    let data = build_rows(&trajectory, &columns);

    let (first, last) = match (data.first(), data.last()) {
        (Some(first), Some(last)) => (first["P"], last["P"]),
        _ => return Err(SimError::invalid("trajectory is empty.")),
    };
    let capacity = config.parameters.K;

    let mut metrics = Metrics::new();
    metrics.insert("P_initial".into(), first);
    metrics.insert("P_final".into(), last);
    metrics.insert("K".into(), capacity);

    let summary = format!(
        "Population goes from {first} to {last} against a carrying capacity of {capacity}."
    );

    Ok(SimulationResult::success(
        "Logistic growth simulation completed.",
        summary,
        metrics,
        &COLUMNS,
        data,
    ))
}

pub fn run(config: &LogisticConfig, settings: &OutputSettings) -> SimulationResult {
    try_run(config, settings).unwrap_or_else(|e| {
        warn!(error = %e, "logistic simulation failed");
        e.into()
    })
}
