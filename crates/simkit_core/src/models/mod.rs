//! Derivative functions and drivers, one submodule per model kind.

pub mod logistic;
pub mod projectile;
pub mod sir;
