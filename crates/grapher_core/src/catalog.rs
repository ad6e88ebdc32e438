//! A handful of sample functions for demos and smoke tests.

use crate::complex::{exp, Complex};
use std::f64::consts::FRAC_PI_2;

/// The classic slope field `f(t, x) = sin(t) + cos(x)`.
pub fn sine_cosine_slope(p: &[f64]) -> f64 {
    p[0].sin() + p[1].cos()
}

/// Rotates a planar point by `degrees` and reflects it across the new x-axis.
pub fn rotation(p: &[f64], degrees: f64) -> Vec<f64> {
    let (x, y) = (p[0], p[1]);
    let (sin, cos) = degrees.to_radians().sin_cos();
    vec![cos * x + sin * y, sin * x - cos * y]
}

/// `(x, y) -> (x^2, x * y)`.
pub fn function_2d(p: &[f64]) -> Vec<f64> {
    let (x, y) = (p[0], p[1]);
    vec![x * x, x * y]
}

/// `exp(i * pi/2 * c)`.
pub fn expi(c: Complex) -> Complex {
    exp(Complex::I * c.scale(FRAC_PI_2))
}

/// The curve `t -> expi(expi(t))`, drawn as `(re, im)`.
pub fn tetration_cardioid(p: &[f64]) -> Vec<f64> {
    let c = expi(expi(Complex::real(p[0])));
    vec![c.re, c.im]
}

/// A sawtooth-like function with fractal detail near zero.
pub fn fraction_fractal(x: f64) -> f64 {
    const ITERATIONS: u32 = 1000;
    let n = ITERATIONS as f64;
    (1..=ITERATIONS).fold((n * x).abs(), |acc, i| (acc - n / i as f64).abs())
}
