//! Parametric curves compiled from one expression per output coordinate.

use crate::shared::{interval_from_bounds, js_error};
use grapher_core::curve::{Curve, ParametricCurve};
use grapher_core::equation_engine::ExpressionMap;
use grapher_core::interval::cube_vertex_count;
use js_sys::Float64Array;
use serde_wasm_bindgen::to_value;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WasmParametricCurve {
    curve: ParametricCurve<ExpressionMap>,
    input_dimension: usize,
    segment_size: usize,
}

#[wasm_bindgen]
impl WasmParametricCurve {
    #[wasm_bindgen(constructor)]
    pub fn new(
        equations: Vec<String>,
        var_names: Vec<String>,
        param_names: Vec<String>,
        params: Vec<f64>,
    ) -> Result<WasmParametricCurve, JsValue> {
        console_error_panic_hook::set_once();

        if var_names.is_empty() {
            return Err(JsValue::from_str("At least one input variable is required."));
        }
        let segment_size = cube_vertex_count(var_names.len())
            .map_err(|e| JsValue::from_str(&format!("Invalid curve domain: {e}")))?;
        let map = ExpressionMap::compile(&equations, &var_names, &param_names, params)
            .map_err(|e| js_error("Invalid curve expressions", e))?;

        Ok(WasmParametricCurve {
            curve: ParametricCurve::new(map),
            input_dimension: var_names.len(),
            segment_size,
        })
    }

    /// Resamples the curve; `bounds` must have one `(lower, upper)` pair per input variable.
    pub fn update_mesh(&mut self, bounds: Vec<f64>, step: f64) -> Result<(), JsValue> {
        let domain =
            interval_from_bounds(&bounds).map_err(|e| js_error("Invalid bounds", e))?;
        if domain.dimension() != self.input_dimension {
            return Err(JsValue::from_str(&format!(
                "Domain dimension mismatch. Expected {}, got {}.",
                self.input_dimension,
                domain.dimension()
            )));
        }
        self.curve
            .update_mesh(&domain, step)
            .map_err(|e| js_error("Mesh update failed", e))
    }

    /// The current mesh as a structured object (`{ segments: [{ vertices }] }`).
    pub fn mesh(&self) -> Result<JsValue, JsValue> {
        to_value(self.curve.mesh())
            .map_err(|e| JsValue::from_str(&format!("Serialization failed: {e}")))
    }

    /// Every vertex of every segment, flattened.
    pub fn flat_vertices(&self) -> Float64Array {
        Float64Array::from(self.curve.mesh().flat_vertices().as_slice())
    }

    pub fn vertex_dimension(&self) -> usize {
        self.curve.mapping().output_dimension()
    }

    /// Vertices per segment: `2^d` for a `d`-dimensional domain.
    pub fn segment_size(&self) -> usize {
        self.segment_size
    }

    pub fn segment_count(&self) -> usize {
        self.curve.mesh().len()
    }
}
