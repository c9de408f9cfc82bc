//! The uniform result object returned by every simulation entry point.

use crate::error::SimError;
use crate::solvers::Trajectory;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One output row keyed by column name.
pub type Row = BTreeMap<String, f64>;

/// Named scalar summary values.
pub type Metrics = BTreeMap<String, f64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub status: Status,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Metrics>,
    pub columns: Vec<String>,
    pub data: Vec<Row>,
}

impl SimulationResult {
    pub fn success(
        message: impl Into<String>,
        summary: String,
        metrics: Metrics,
        columns: &[&str],
        data: Vec<Row>,
    ) -> Self {
        Self {
            status: Status::Success,
            message: message.into(),
            summary: Some(summary),
            metrics: Some(metrics),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            data,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            message: message.into(),
            summary: None,
            metrics: None,
            columns: Vec::new(),
            data: Vec::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }

    /// Returns the values of one column in row order.
    pub fn column(&self, name: &str) -> Vec<f64> {
        self.data
            .iter()
            .filter_map(|row| row.get(name).copied())
            .collect()
    }

    pub fn metric(&self, name: &str) -> Option<f64> {
        self.metrics.as_ref().and_then(|m| m.get(name).copied())
    }
}

impl From<SimError> for SimulationResult {
    fn from(e: SimError) -> Self {
        SimulationResult::error(e.to_string())
    }
}

/// Rounds `value` to `decimals` places, half away from zero.
///
/// Values too large to carry that many decimals are returned unchanged, and a
/// negative zero result is reported as `0.0`.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals.min(i32::MAX as u32) as i32);
    let scaled = value * factor;
    // Past 2^52 every f64 is already a whole number.
    if !factor.is_finite() || !scaled.is_finite() || scaled.abs() >= 2f64.powi(52) {
        return value;
    }
    let rounded = scaled.round() / factor;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Describes one output column: its name, which state component it reads
/// (`None` for the time column) and its display precision.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ColumnSpec {
    pub name: &'static str,
    pub index: Option<usize>,
    pub decimals: u32,
}

pub(crate) fn build_rows(trajectory: &Trajectory, columns: &[ColumnSpec]) -> Vec<Row> {
    trajectory
        .iter()
        .map(|(t, state)| {
            columns
                .iter()
                .map(|col| {
                    let raw = match col.index {
                        Some(i) => state[i],
                        None => t,
                    };
                    (col.name.to_string(), round_to(raw, col.decimals))
                })
                .collect::<Row>()
        })
        .collect()
}

/// Finds the row with the largest value in `column`; the earliest row wins ties.
pub(crate) fn argmax_row<'a>(rows: &'a [Row], column: &str) -> Option<&'a Row> {
    let mut best: Option<(&Row, f64)> = None;
    for row in rows {
        let Some(&value) = row.get(column) else {
            continue;
        };
        match best {
            Some((_, current)) if value <= current => {}
            _ => best = Some((row, value)),
        }
    }
    best.map(|(row, _)| row)
}
