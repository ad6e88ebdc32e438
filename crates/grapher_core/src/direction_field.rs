use crate::curve::{Curve, CurveKind};
use crate::interval::Interval;
use crate::mesh::{Mesh, MeshSegment};
use crate::traits::ScalarField;
use anyhow::Result;
use log::{debug, trace};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionFieldSettings {
    /// Half-length of each segment as a fraction of the lattice step.
    pub radius_fraction: f64,
}

impl Default for DirectionFieldSettings {
    fn default() -> Self {
        Self {
            radius_fraction: 1.0 / 3.0,
        }
    }
}

/// Short slope segments for a field `m(t, x)` over a 2-D point lattice.
pub struct DirectionField<F> {
    f: F,
    settings: DirectionFieldSettings,
    mesh: Mesh,
}

impl<F: ScalarField> DirectionField<F> {
    pub fn new(f: F) -> Self {
        Self::with_settings(f, DirectionFieldSettings::default())
    }

    pub fn with_settings(f: F, settings: DirectionFieldSettings) -> Self {
        Self {
            f,
            settings,
            mesh: Mesh::new(),
        }
    }

    /// Creates a field and samples it immediately.
    pub fn sampled(f: F, domain: &Interval, step: f64) -> Result<Self> {
        let mut field = Self::new(f);
        field.update_mesh(domain, step)?;
        Ok(field)
    }

    pub fn settings(&self) -> DirectionFieldSettings {
        self.settings
    }
}

/// Endpoints of the segment of half-length `r` centered at `center` with slope `m`.
///
/// A zero slope gives a horizontal segment and an infinite slope a vertical one.
/// NaN slopes have no direction and yield `None`.
pub fn slope_segment(center: Vector2<f64>, m: f64, r: f64) -> Option<(Vector2<f64>, Vector2<f64>)> {
    if m.is_nan() {
        return None;
    }
    let offset = if m == 0.0 {
        Vector2::new(-r, 0.0)
    } else if m.is_infinite() {
        Vector2::new(0.0, -r)
    } else {
        let x1 = -(r * r / (m * m + 1.0)).sqrt();
        Vector2::new(x1, m * x1)
    };
    Some((center + offset, center - offset))
}

impl<F: ScalarField> Curve for DirectionField<F> {
    fn update_mesh(&mut self, domain: &Interval, step: f64) -> Result<()> {
        let points = domain.points(step)?;
        let r = step * self.settings.radius_fraction;

        let mut mesh = Mesh::new();
        let mut skipped = 0usize;
        for point in points {
            if point.len() != 2 {
                skipped += 1;
                continue;
            }
            let m = self.f.evaluate(&point);
            match slope_segment(Vector2::new(point[0], point[1]), m, r) {
                Some((a, b)) => mesh.push(MeshSegment::line(vec![a.x, a.y], vec![b.x, b.y])),
                None => {
                    trace!("skipping direction at ({}, {}): slope is NaN", point[0], point[1]);
                    skipped += 1;
                }
            }
        }

        debug!(
            "direction field: {} segments over {} with step {} ({} points skipped)",
            mesh.len(),
            domain,
            step,
            skipped
        );
        self.mesh = mesh;
        Ok(())
    }

    fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    fn kind(&self) -> CurveKind {
        CurveKind::DirectionField
    }
}
