//! Shared conversion helpers for the bridge.

use anyhow::{bail, Result};
use grapher_core::interval::Interval;
use wasm_bindgen::JsValue;

/// Builds an interval from flat `[lo0, hi0, lo1, hi1, ...]` bounds.
pub(crate) fn interval_from_bounds(bounds: &[f64]) -> Result<Interval> {
    if bounds.is_empty() || bounds.len() % 2 != 0 {
        bail!(
            "Bounds must be a non-empty list of (lower, upper) pairs, got {} values.",
            bounds.len()
        );
    }
    if bounds.iter().any(|b| !b.is_finite()) {
        bail!("Bounds must be finite.");
    }
    let pairs: Vec<(f64, f64)> = bounds.chunks_exact(2).map(|c| (c[0], c[1])).collect();
    Ok(Interval::from_bounds(&pairs)?)
}

/// Pairs a flat `[t0, x0, t1, x1, ...]` list into seeds.
pub(crate) fn seeds_from_flat(seeds: &[f64]) -> Result<Vec<(f64, f64)>> {
    if seeds.len() % 2 != 0 {
        bail!("Seeds must be (t, x) pairs, got {} values.", seeds.len());
    }
    Ok(seeds.chunks_exact(2).map(|c| (c[0], c[1])).collect())
}

pub(crate) fn flatten_points(points: &[Vec<f64>]) -> Vec<f64> {
    points.iter().flat_map(|p| p.iter().copied()).collect()
}

pub(crate) fn js_error(context: &str, err: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{context}: {err}"))
}
