//! Slope fields: direction segments and solution curves of `dx/dt = f(t, x)`.

use crate::shared::{flatten_points, interval_from_bounds, js_error, seeds_from_flat};
use grapher_core::curve::Curve;
use grapher_core::equation_engine::ExpressionField;
use grapher_core::ode::{DifferentialEquation, SolverSettings};
use js_sys::Float64Array;
use serde::Serialize;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WasmSlopeField {
    equation: DifferentialEquation<ExpressionField>,
}

#[derive(Serialize)]
struct FamilyCurve {
    seed: (f64, f64),
    points: Vec<f64>,
}

#[wasm_bindgen]
impl WasmSlopeField {
    /// Compiles `expression` as `f(t, x)`.
    #[wasm_bindgen(constructor)]
    pub fn new(
        expression: &str,
        param_names: Vec<String>,
        params: Vec<f64>,
    ) -> Result<WasmSlopeField, JsValue> {
        console_error_panic_hook::set_once();

        let var_names = vec!["t".to_string(), "x".to_string()];
        let field = ExpressionField::compile(expression, &var_names, &param_names, params)
            .map_err(|e| js_error("Invalid slope expression", e))?;

        Ok(WasmSlopeField {
            equation: DifferentialEquation::new(field),
        })
    }

    pub fn slope(&self, t: f64, x: f64) -> f64 {
        self.equation.slope(t, x)
    }

    /// Direction segments as `[x1, y1, x2, y2, ...]`.
    pub fn direction_field(&self, bounds: Vec<f64>, step: f64) -> Result<Float64Array, JsValue> {
        let domain =
            interval_from_bounds(&bounds).map_err(|e| js_error("Invalid bounds", e))?;
        if domain.dimension() != 2 {
            return Err(JsValue::from_str("Direction fields need 2-dimensional bounds."));
        }
        let field = self
            .equation
            .direction_field(&domain, step)
            .map_err(|e| js_error("Direction field failed", e))?;
        Ok(Float64Array::from(field.mesh().flat_vertices().as_slice()))
    }

    /// The solution through `(t0, x0)` as `[t0, x0, t1, x1, ...]`, ordered by `t`.
    pub fn solution_curve(
        &self,
        bounds: Vec<f64>,
        t0: f64,
        x0: f64,
        step: f64,
        max_steps: u32,
    ) -> Result<Float64Array, JsValue> {
        let domain =
            interval_from_bounds(&bounds).map_err(|e| js_error("Invalid bounds", e))?;
        let settings = SolverSettings {
            step,
            max_steps: max_steps as usize,
        };
        let points = self
            .equation
            .solution_points(&domain, t0, x0, settings)
            .map_err(|e| js_error("Solution curve failed", e))?;
        Ok(Float64Array::from(flatten_points(&points).as_slice()))
    }

    /// One solution per `(t, x)` seed pair; `settings` is a serialized `SolverSettings`.
    pub fn solution_family(
        &self,
        bounds: Vec<f64>,
        seeds: Vec<f64>,
        settings: JsValue,
    ) -> Result<JsValue, JsValue> {
        let domain =
            interval_from_bounds(&bounds).map_err(|e| js_error("Invalid bounds", e))?;
        let seeds = seeds_from_flat(&seeds).map_err(|e| js_error("Invalid seeds", e))?;
        let settings: SolverSettings = if settings.is_undefined() || settings.is_null() {
            SolverSettings::default()
        } else {
            from_value(settings).map_err(|e| JsValue::from_str(&format!("Invalid settings: {e}")))?
        };

        let curves = self
            .equation
            .solution_family(&domain, seeds.iter().copied(), settings)
            .map_err(|e| js_error("Solution family failed", e))?;
        let family: Vec<FamilyCurve> = seeds
            .into_iter()
            .zip(curves)
            .map(|(seed, curve)| FamilyCurve {
                seed,
                points: flatten_points(curve.points()),
            })
            .collect();

        to_value(&family).map_err(|e| JsValue::from_str(&format!("Serialization failed: {e}")))
    }
}
