use crate::error::{SimError, SimResult};
use crate::traits::{DynamicalSystem, Scalar, Steppable};
use tracing::debug;

/// Classic Runge-Kutta 4th Order Solver
pub struct RK4<T: Scalar> {
    k1: Vec<T>,
    k2: Vec<T>,
    k3: Vec<T>,
    k4: Vec<T>,
    tmp: Vec<T>,
}

impl<T: Scalar> RK4<T> {
    pub fn new(dim: usize) -> Self {
        Self {
            k1: vec![T::zero(); dim],
            k2: vec![T::zero(); dim],
            k3: vec![T::zero(); dim],
            k4: vec![T::zero(); dim],
            tmp: vec![T::zero(); dim],
        }
    }
}

impl<T: Scalar> Steppable<T> for RK4<T> {
    fn step(&mut self, system: &impl DynamicalSystem<T>, t: &mut T, state: &mut [T], dt: T) {
        let two = T::one() + T::one();
        let half = T::one() / two;
        let sixth = T::one() / (two + two + two);

        let t0 = *t;

        // k1 = f(t, y)
        system.apply(t0, state, &mut self.k1);

        // k2 = f(t + dt/2, y + dt*k1/2)
        for i in 0..state.len() {
            self.tmp[i] = state[i] + dt * self.k1[i] * half;
        }
        system.apply(t0 + dt * half, &self.tmp, &mut self.k2);

        // k3 = f(t + dt/2, y + dt*k2/2)
        for i in 0..state.len() {
            self.tmp[i] = state[i] + dt * self.k2[i] * half;
        }
        system.apply(t0 + dt * half, &self.tmp, &mut self.k3);

        // k4 = f(t + dt, y + dt*k3)
        for i in 0..state.len() {
            self.tmp[i] = state[i] + dt * self.k3[i];
        }
        system.apply(t0 + dt, &self.tmp, &mut self.k4);

        // y_next = y + dt/6 * (k1 + 2k2 + 2k3 + k4)
        for i in 0..state.len() {
            state[i] = state[i]
                + dt * sixth * (self.k1[i] + two * self.k2[i] + two * self.k3[i] + self.k4[i]);
        }

        *t = t0 + dt;
    }
}

/// Adapts a plain derivative function `f(t, x, params, out)` plus its
/// parameter set into a [`DynamicalSystem`].
pub struct ParameterizedSystem<P, F>
where
    F: Fn(f64, &[f64], &P, &mut [f64]),
{
    dim: usize,
    params: P,
    rhs: F,
}

impl<P, F> ParameterizedSystem<P, F>
where
    F: Fn(f64, &[f64], &P, &mut [f64]),
{
    pub fn new(dim: usize, params: P, rhs: F) -> Self {
        Self { dim, params, rhs }
    }
}

impl<P, F> DynamicalSystem<f64> for ParameterizedSystem<P, F>
where
    F: Fn(f64, &[f64], &P, &mut [f64]),
{
    fn dimension(&self) -> usize {
        self.dim
    }

    fn apply(&self, t: f64, x: &[f64], out: &mut [f64]) {
        (self.rhs)(t, x, &self.params, out);
    }
}

/// Aligned time points and state vectors produced by [`integrate`].
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    pub times: Vec<f64>,
    pub states: Vec<Vec<f64>>,
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, &[f64])> + '_ {
        self.times
            .iter()
            .copied()
            .zip(self.states.iter().map(Vec::as_slice))
    }
}

/// Integrates `system` from `(t0, y0)` to `t_end` in `steps` uniform RK4 steps.
///
/// The returned trajectory always holds `steps + 1` entries, the first being
/// the untouched initial condition. Time points are `t0 + i * dt` rather than
/// an accumulated sum so the last one lands on `t_end`.
pub fn integrate<S: DynamicalSystem<f64>>(
    system: &S,
    t0: f64,
    y0: &[f64],
    t_end: f64,
    steps: usize,
) -> SimResult<Trajectory> {
    if steps == 0 {
        return Err(SimError::invalid("steps must be at least 1."));
    }
    if !t0.is_finite() || !t_end.is_finite() {
        return Err(SimError::invalid("time span bounds must be finite."));
    }
    if t_end <= t0 {
        return Err(SimError::invalid(format!(
            "end time ({t_end}) must be greater than start time ({t0})."
        )));
    }
    let dim = system.dimension();
    if y0.len() != dim {
        return Err(SimError::DimensionMismatch {
            expected: dim,
            actual: y0.len(),
        });
    }
    if y0.iter().any(|v| !v.is_finite()) {
        return Err(SimError::invalid("initial state must be finite."));
    }

    let dt = (t_end - t0) / steps as f64;
    debug!(dim, steps, dt, "integrating with RK4");

    let mut solver = RK4::new(dim);
    let mut times = Vec::with_capacity(steps + 1);
    let mut states = Vec::with_capacity(steps + 1);
    let mut state = y0.to_vec();
    let mut t = t0;

    times.push(t0);
    states.push(state.clone());

    for i in 1..=steps {
        solver.step(system, &mut t, &mut state, dt);
        t = t0 + i as f64 * dt;
        if state.iter().any(|v| !v.is_finite()) {
            return Err(SimError::NonFinite { t });
        }
        times.push(t);
        states.push(state.clone());
    }

    Ok(Trajectory { times, states })
}
