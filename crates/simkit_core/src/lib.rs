//! The `simkit_core` crate is the numerical engine behind the simulation tool.
//! It turns a declarative model description into a time series plus summary
//! metrics, with no I/O and no shared state.
//!
//! Key components:
//! - **Traits**: `Scalar`, `DynamicalSystem` (ODE right-hand sides), `Steppable` (solvers).
//! - **Solvers**: fixed-step RK4 and the `integrate` loop built on it.
//! - **Config**: the `model_type`-tagged configuration union.
//! - **Models**: SIR, logistic and projectile derivative functions and drivers.
//! - **Dispatch**: JSON and typed entry points returning a uniform `SimulationResult`.

pub mod catalog;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod models;
pub mod result;
pub mod solvers;
pub mod traits;

pub use config::{ModelKind, OutputSettings, SimulationConfig};
pub use dispatch::{
    rerun_with_parameters, run_simulation, run_simulation_json, run_simulation_value,
    run_simulation_with,
};
pub use error::{SimError, SimResult};
pub use result::{SimulationResult, Status};
