//! WASM bridge exposing the simulation engine to the JavaScript host.

mod simulation;

pub use simulation::{
    model_catalog, model_catalog_json, rerun, rerun_json, simulate, simulate_json,
};
