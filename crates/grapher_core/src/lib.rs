//! The `grapher_core` crate samples mathematical objects over finite domains and
//! produces meshes for a separate rendering layer.
//!
//! Key components:
//! - **Interval**: n-dimensional boxes built by Cartesian product, with point and hypercube lattice iterators.
//! - **Curves**: `ParametricCurve` (a mapping sampled over lattice hypercubes), `DirectionField`, `PointListCurve`.
//! - **ODE**: adaptive-step Euler solution curves for `dx/dt = f(t, x)`.
//! - **Complex**: a minimal complex type with fast integer powers and a truncated-series exponential.
//! - **Equation Engine**: a parser and bytecode VM turning expression strings into sampled functions.
pub mod catalog;
pub mod complex;
pub mod curve;
pub mod direction_field;
pub mod equation_engine;
pub mod interval;
pub mod mesh;
pub mod ode;
pub mod traits;

pub use curve::{Curve, CurveKind, CurveSet, ParametricCurve, PointListCurve, SimpleFunctionCurve};
pub use direction_field::{DirectionField, DirectionFieldSettings};
pub use interval::{Interval, IntervalError};
pub use mesh::{Mesh, MeshSegment};
pub use ode::{DifferentialEquation, SolverSettings};
