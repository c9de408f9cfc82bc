//! Drag-free ballistic motion under uniform gravity.

use crate::config::{require_finite, OutputSettings, ProjectileConfig, ProjectileParameters};
use crate::error::{SimError, SimResult};
use crate::result::{argmax_row, build_rows, ColumnSpec, Metrics, Row, SimulationResult};
use crate::solvers::{integrate, ParameterizedSystem, Trajectory};
use tracing::warn;

pub const COLUMNS: [&str; 5] = ["t", "x", "y", "vx", "vy"];

/// `[x, y, vx, vy]` derivative.
pub fn projectile_derivative(_t: f64, x: &[f64], p: &ProjectileParameters, out: &mut [f64]) {
    out[0] = x[2];
    out[1] = x[3];
    out[2] = 0.0;
    out[3] = -p.g;
}

/// Splits the launch speed into `(vx, vy)` for an angle given in degrees.
pub fn launch_velocity(velocity: f64, angle_degrees: f64) -> (f64, f64) {
    let theta = angle_degrees.to_radians();
    (velocity * theta.cos(), velocity * theta.sin())
}

fn validate(config: &ProjectileConfig) -> SimResult<()> {
    config.time_span.validate()?;
    let p = &config.parameters;
    require_finite("velocity", p.velocity)?;
    require_finite("angle", p.angle)?;
    require_finite("g", p.g)?;
    if p.velocity < 0.0 {
        return Err(SimError::invalid("velocity must be non-negative."));
    }
    if p.g < 0.0 {
        return Err(SimError::invalid("g must be non-negative."));
    }
    require_finite("x", config.initial_conditions.x)?;
    require_finite("y", config.initial_conditions.y)?;
    Ok(())
}

/// Summary scan over the rows.
///
/// The range is the largest `x` among rows still at or above the ground, so it
/// is only as precise as the step spacing. Flight time is the time of the last
/// row before the trajectory first drops below `y = 0`, or the final time if
/// it never does. The ground test reads the unrounded `y`, since a height just
/// below zero would otherwise round up to `0.0`.
fn flight_metrics(trajectory: &Trajectory, data: &[Row]) -> SimResult<Metrics> {
    let apex = argmax_row(data, "y").ok_or_else(|| SimError::invalid("trajectory is empty."))?;
    let above_ground = |i: usize| trajectory.states[i][1] >= 0.0;
    let range = data
        .iter()
        .enumerate()
        .filter(|&(i, _)| above_ground(i))
        .map(|(_, row)| row["x"])
        .fold(None, |acc: Option<f64>, x| Some(acc.map_or(x, |a| a.max(x))))
        .unwrap_or(data[0]["x"]);
    let flight_time = data
        .iter()
        .enumerate()
        .take_while(|&(i, _)| above_ground(i))
        .last()
        .map_or(data[0]["t"], |(_, row)| row["t"]);

    let mut metrics = Metrics::new();
    metrics.insert("max_height".into(), apex["y"]);
    metrics.insert("t_apex".into(), apex["t"]);
    metrics.insert("range".into(), range);
    metrics.insert("flight_time".into(), flight_time);
    Ok(metrics)
}

pub fn try_run(
    config: &ProjectileConfig,
    settings: &OutputSettings,
) -> SimResult<SimulationResult> {
    validate(config)?;
    let span = config.time_span;
    let (vx0, vy0) = launch_velocity(config.parameters.velocity, config.parameters.angle);
    let y0 = [config.initial_conditions.x, config.initial_conditions.y, vx0, vy0];
    let system = ParameterizedSystem::new(4, config.parameters, projectile_derivative);
    let trajectory = integrate(&system, span.start, &y0, span.end, span.steps)?;

    let columns: Vec<ColumnSpec> = COLUMNS
        .iter()
        .enumerate()
        .map(|(i, &name)| ColumnSpec {
            name,
            index: i.checked_sub(1),
            decimals: settings.decimals,
        })
        .collect();
    let data = build_rows(&trajectory, &columns);

    let metrics = flight_metrics(&trajectory, &data)?;
    let summary = format!(
        "Maximum height of {:.2} m at t = {:.2} s; range approximately {:.2} m.",
        metrics["max_height"], metrics["t_apex"], metrics["range"]
    );

    Ok(SimulationResult::success(
        "Projectile simulation completed.",
        summary,
        metrics,
        &COLUMNS,
        data,
    ))
}

pub fn run(config: &ProjectileConfig, settings: &OutputSettings) -> SimulationResult {
    try_run(config, settings).unwrap_or_else(|e| {
        warn!(error = %e, "projectile simulation failed");
        e.into()
    })
}
