//! WASM bridge exposing the Grapher sampling engine to a browser renderer.

mod curve;
mod field;
mod shared;

pub use curve::WasmParametricCurve;
pub use field::WasmSlopeField;
