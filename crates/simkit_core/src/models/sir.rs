//! Kermack–McKendrick SIR epidemic model.

use crate::config::{require_finite, OutputSettings, SirConfig, SirParameters};
use crate::error::{SimError, SimResult};
use crate::result::{argmax_row, build_rows, ColumnSpec, Metrics, SimulationResult};
use crate::solvers::{integrate, ParameterizedSystem};
use tracing::warn;

pub const COLUMNS: [&str; 4] = ["t", "S", "I", "R"];

/// `[S, I, R]` derivative. The total population is recomputed on every call,
/// so compartments may be raw counts or fractions.
pub fn sir_derivative(_t: f64, x: &[f64], p: &SirParameters, out: &mut [f64]) {
    let (s, i, r) = (x[0], x[1], x[2]);
    let n = s + i + r;
    let infection = if n > 0.0 { p.beta * s * i / n } else { 0.0 };
    let recovery = p.gamma * i;
    out[0] = -infection;
    out[1] = infection - recovery;
    out[2] = recovery;
}

fn validate(config: &SirConfig) -> SimResult<()> {
    config.time_span.validate()?;
    let p = &config.parameters;
    require_finite("beta", p.beta)?;
    require_finite("gamma", p.gamma)?;
    if p.beta < 0.0 || p.gamma < 0.0 {
        return Err(SimError::invalid("beta and gamma must be non-negative."));
    }
    let ic = &config.initial_conditions;
    for (name, value) in [("S", ic.S), ("I", ic.I), ("R", ic.R)] {
        require_finite(name, value)?;
        if value < 0.0 {
            return Err(SimError::invalid(format!(
                "initial compartment {name} must be non-negative."
            )));
        }
    }
    Ok(())
}

pub fn try_run(
    config: &SirConfig,
    settings: &OutputSettings,
) -> SimResult<SimulationResult> {
    validate(config)?;
    let ic = config.initial_conditions;
    let span = config.time_span;
    let system = ParameterizedSystem::new(3, config.parameters, sir_derivative);
    let y0 = [ic.S, ic.I, ic.R];
    let trajectory = integrate(&system, span.start, &y0, span.end, span.steps)?;

    let columns = [
        ColumnSpec {
            name: COLUMNS[0],
            index: None,
            decimals: settings.decimals,
        },
        ColumnSpec {
            name: COLUMNS[1],
            index: Some(0),
            decimals: settings.fraction_decimals,
        },
        ColumnSpec {
            name: COLUMNS[2],
            index: Some(1),
            decimals: settings.fraction_decimals,
        },
        ColumnSpec {
            name: COLUMNS[3],
            index: Some(2),
            decimals: settings.fraction_decimals,
        },
    ];
    let data = build_rows(&trajectory, &columns);

    let peak = argmax_row(&data, "I").ok_or_else(|| SimError::invalid("trajectory is empty."))?;
    let i_peak = peak["I"];
    let t_peak = peak["t"];
    let total = ic.S + ic.I + ic.R;
    let peak_fraction = if total > 0.0 { i_peak / total } else { 0.0 };

    let mut metrics = Metrics::new();
    metrics.insert("I_peak".into(), i_peak);
    metrics.insert("t_peak".into(), t_peak);
    metrics.insert("peak_fraction".into(), peak_fraction);

    let summary = format!(
        "Infections peak at {:.1}% of the population on day {}.",
        peak_fraction * 100.0,
        t_peak
    );

    Ok(SimulationResult::success(
        "SIR simulation completed.",
        summary,
        metrics,
        &COLUMNS,
        data,
    ))
}

pub fn run(config: &SirConfig, settings: &OutputSettings) -> SimulationResult {
    try_run(config, settings).unwrap_or_else(|e| {
        warn!(error = %e, "SIR simulation failed");
        e.into()
    })
}
