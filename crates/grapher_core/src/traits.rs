/// A real-valued field `R^d -> R`, e.g. the slope function `f(t, x)` of an ODE.
pub trait ScalarField {
    /// Evaluates the field at `point`.
    /// The caller is responsible for passing a point of the dimension the field expects.
    fn evaluate(&self, point: &[f64]) -> f64;
}

impl<F: Fn(&[f64]) -> f64> ScalarField for F {
    fn evaluate(&self, point: &[f64]) -> f64 {
        self(point)
    }
}

/// A mapping `R^d -> R^k` sampled into a mesh.
pub trait Mapping {
    fn apply(&self, point: &[f64]) -> Vec<f64>;
}

impl<F: Fn(&[f64]) -> Vec<f64>> Mapping for F {
    fn apply(&self, point: &[f64]) -> Vec<f64> {
        self(point)
    }
}

/// The graph `x -> (x, g(x))` of a single-variable function.
/// Only the first coordinate of the input point is read.
#[derive(Debug, Clone)]
pub struct FunctionGraph<G>(pub G);

impl<G: Fn(f64) -> f64> Mapping for FunctionGraph<G> {
    fn apply(&self, point: &[f64]) -> Vec<f64> {
        let x = point[0];
        vec![x, (self.0)(x)]
    }
}
