//! Sampled objects that a renderer can draw.
//!
//! Every variant exposes the same capability set through [`Curve`]: rebuild the
//! mesh for a new domain and step, and hand out the current mesh. Meshes are
//! always rebuilt from scratch; nothing is patched incrementally.

use crate::interval::Interval;
use crate::mesh::{Mesh, MeshSegment};
use crate::traits::{FunctionGraph, Mapping};
use anyhow::Result;
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurveKind {
    Parametric,
    DirectionField,
    PointList,
}

/// Core interface shared by every drawable sampled object.
pub trait Curve {
    /// Recomputes the mesh over `domain` with lattice spacing `step`.
    /// On error the previous mesh is kept.
    fn update_mesh(&mut self, domain: &Interval, step: f64) -> Result<()>;

    fn mesh(&self) -> &Mesh;

    fn kind(&self) -> CurveKind;
}

/// Samples a mapping `f: R^d -> R^k` over every lattice hypercube of a domain.
pub struct ParametricCurve<F> {
    f: F,
    mesh: Mesh,
}

/// The graph of a single-variable function, sampled over a 1-D domain.
pub type SimpleFunctionCurve<G> = ParametricCurve<FunctionGraph<G>>;

impl<F: Mapping> ParametricCurve<F> {
    /// Creates a curve with an empty mesh.
    pub fn new(f: F) -> Self {
        Self {
            f,
            mesh: Mesh::new(),
        }
    }

    /// Creates a curve and samples it immediately.
    pub fn sampled(f: F, domain: &Interval, step: f64) -> Result<Self> {
        let mut curve = Self::new(f);
        curve.update_mesh(domain, step)?;
        Ok(curve)
    }

    pub fn mapping(&self) -> &F {
        &self.f
    }
}

impl<G: Fn(f64) -> f64> ParametricCurve<FunctionGraph<G>> {
    /// Wraps `g` as `p -> [p[0], g(p[0])]`.
    pub fn from_function(g: G) -> Self {
        Self::new(FunctionGraph(g))
    }
}

/// Maps every vertex of every hypercube of `domain` through `f`.
pub fn sample_mesh<F: Mapping + ?Sized>(f: &F, domain: &Interval, step: f64) -> Result<Mesh> {
    let mut mesh = Mesh::new();
    for cube in domain.hypercubes(step)? {
        let vertices = cube.iter().map(|vertex| f.apply(vertex)).collect();
        mesh.push(MeshSegment::new(vertices));
    }
    debug!(
        "sampled {} mesh segments over {} with step {}",
        mesh.len(),
        domain,
        step
    );
    Ok(mesh)
}

impl<F: Mapping> Curve for ParametricCurve<F> {
    fn update_mesh(&mut self, domain: &Interval, step: f64) -> Result<()> {
        self.mesh = sample_mesh(&self.f, domain, step)?;
        Ok(())
    }

    fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    fn kind(&self) -> CurveKind {
        CurveKind::Parametric
    }
}

/// A precomputed point sequence drawn as a polyline.
/// Its geometry does not depend on the viewing domain, so `update_mesh` is a no-op.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PointListCurve {
    points: Vec<Vec<f64>>,
    mesh: Mesh,
}

impl PointListCurve {
    pub fn new(points: Vec<Vec<f64>>) -> Self {
        let mesh = Mesh::polyline(&points);
        Self { points, mesh }
    }

    pub fn points(&self) -> &[Vec<f64>] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Vec<f64>> {
        self.points
    }
}

impl Curve for PointListCurve {
    fn update_mesh(&mut self, _domain: &Interval, _step: f64) -> Result<()> {
        Ok(())
    }

    fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    fn kind(&self) -> CurveKind {
        CurveKind::PointList
    }
}

/// A collection of curves recomputed together when the view changes.
#[derive(Default)]
pub struct CurveSet {
    curves: Vec<Box<dyn Curve>>,
}

impl CurveSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<C: Curve + 'static>(&mut self, curve: C) {
        self.curves.push(Box::new(curve));
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Rebuilds every mesh for the new domain and step.
    pub fn update_all(&mut self, domain: &Interval, step: f64) -> Result<()> {
        for curve in &mut self.curves {
            curve.update_mesh(domain, step)?;
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &(dyn Curve + 'static)> {
        self.curves.iter().map(|curve| curve.as_ref())
    }

    /// Total number of mesh segments across all curves.
    pub fn segment_count(&self) -> usize {
        self.curves.iter().map(|curve| curve.mesh().len()).sum()
    }
}
