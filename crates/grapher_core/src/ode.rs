//! Solution curves of scalar first-order ODEs `dx/dt = f(t, x)`.
//!
//! Integration is an adaptive-step Euler scheme: the step in `t` shrinks as the
//! slope steepens (`dt = min(step, |step / m|)`), which bounds the length of
//! every step along the curve. Each solve runs forward and then backward from
//! the seed and stops at the edge of a bounding interval or after `max_steps`
//! points per direction.

use crate::curve::PointListCurve;
use crate::direction_field::DirectionField;
use crate::interval::Interval;
use crate::traits::ScalarField;
use anyhow::{bail, Result};
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverSettings {
    /// Largest step taken in `t`.
    pub step: f64,
    /// Maximum number of points produced in each direction.
    pub max_steps: usize,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            step: 0.2,
            max_steps: 1000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

impl Direction {
    fn sign(self) -> f64 {
        match self {
            Direction::Forward => 1.0,
            Direction::Backward => -1.0,
        }
    }
}

/// The equation `dx/dt = f(t, x)`; `f` is evaluated at points `[t, x]`.
#[derive(Debug, Clone)]
pub struct DifferentialEquation<F> {
    f: F,
}

impl<F: ScalarField> DifferentialEquation<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }

    pub fn slope(&self, t: f64, x: f64) -> f64 {
        self.f.evaluate(&[t, x])
    }

    /// Integrates through the seed `(t0, x0)` and returns the points ordered by increasing `t`.
    ///
    /// A seed outside `bounds` gives an empty curve, and so does a `bounds` that
    /// is not 2-dimensional, since no `(t, x)` point lies inside it.
    pub fn solution_points(
        &self,
        bounds: &Interval,
        t0: f64,
        x0: f64,
        settings: SolverSettings,
    ) -> Result<Vec<Vec<f64>>> {
        if !(settings.step > 0.0 && settings.step.is_finite()) {
            bail!("Step size must be positive and finite, got {}.", settings.step);
        }

        if bounds.dimension() != 2 {
            debug!(
                "no solution through ({}, {}): bounds {} are not 2-dimensional",
                t0, x0, bounds
            );
            return Ok(Vec::new());
        }

        let forward = self.integrate(bounds, (t0, x0), settings, Direction::Forward);
        let mut points = self.integrate(bounds, (t0, x0), settings, Direction::Backward);
        points.reverse();
        let backward_len = points.len();
        points.extend(forward);

        debug!(
            "solution through ({}, {}): {} backward + {} forward points",
            t0,
            x0,
            backward_len,
            points.len() - backward_len
        );
        Ok(points)
    }

    /// The solution through `(t0, x0)` as a drawable polyline.
    pub fn solution_curve(
        &self,
        bounds: &Interval,
        t0: f64,
        x0: f64,
        settings: SolverSettings,
    ) -> Result<PointListCurve> {
        let points = self.solution_points(bounds, t0, x0, settings)?;
        Ok(PointListCurve::new(points))
    }

    /// One solution curve per seed, in seed order.
    pub fn solution_family<I>(
        &self,
        bounds: &Interval,
        seeds: I,
        settings: SolverSettings,
    ) -> Result<Vec<PointListCurve>>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        seeds
            .into_iter()
            .map(|(t0, x0)| self.solution_curve(bounds, t0, x0, settings))
            .collect()
    }

    /// The direction field of the same slope function, sampled over `domain`.
    pub fn direction_field(&self, domain: &Interval, step: f64) -> Result<DirectionField<F>>
    where
        F: Clone,
    {
        DirectionField::sampled(self.f.clone(), domain, step)
    }

    /// One integration phase. The forward phase starts with the seed itself;
    /// the backward phase starts one step behind it and is returned in
    /// decreasing `t`.
    fn integrate(
        &self,
        bounds: &Interval,
        seed: (f64, f64),
        settings: SolverSettings,
        direction: Direction,
    ) -> Vec<Vec<f64>> {
        let mut points = Vec::new();
        let (mut t, mut x) = seed;
        if !bounds.contains(&[t, x]) {
            return points;
        }
        if direction == Direction::Forward && settings.max_steps > 0 {
            points.push(vec![t, x]);
        }

        while points.len() < settings.max_steps {
            let Some((next_t, next_x)) = self.advance(t, x, settings.step, direction) else {
                debug!("stopping at ({}, {}): slope is not finite", t, x);
                break;
            };
            if !bounds.contains(&[next_t, next_x]) {
                break;
            }
            t = next_t;
            x = next_x;
            points.push(vec![t, x]);
        }

        points
    }

    /// One adaptive Euler step from `(t, x)`; `None` if the slope there is not finite.
    fn advance(&self, t: f64, x: f64, step: f64, direction: Direction) -> Option<(f64, f64)> {
        let m = self.slope(t, x);
        if !m.is_finite() {
            return None;
        }
        let sign = direction.sign();
        if m == 0.0 {
            return Some((t + sign * step, x));
        }
        let dt = sign * step.min((step / m).abs());
        Some((t + dt, x + m * dt))
    }
}
