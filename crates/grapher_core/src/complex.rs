use num_complex::Complex64;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Order of the truncated Taylor series used by [`exp`].
/// The series sums the terms `c^k / k!` for `k = 0..=EXP_SERIES_ORDER`.
pub const EXP_SERIES_ORDER: u32 = 31;

/// Minimal complex number.
/// re: real part
/// im: imaginary part
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub const ZERO: Complex = Complex { re: 0.0, im: 0.0 };
    pub const ONE: Complex = Complex { re: 1.0, im: 0.0 };
    pub const I: Complex = Complex { re: 0.0, im: 1.0 };

    pub fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    pub fn real(re: f64) -> Self {
        Self::new(re, 0.0)
    }

    pub fn imaginary(im: f64) -> Self {
        Self::new(0.0, im)
    }

    /// Angle from the positive real axis, in `(-pi, pi]`.
    pub fn arg(self) -> f64 {
        self.im.atan2(self.re)
    }

    pub fn magnitude(self) -> f64 {
        self.squared_magnitude().sqrt()
    }

    pub fn squared_magnitude(self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    pub fn add(self, other: Complex) -> Complex {
        Complex::new(self.re + other.re, self.im + other.im)
    }

    pub fn multiply(self, other: Complex) -> Complex {
        Complex::new(
            self.re * other.re - self.im * other.im,
            self.re * other.im + self.im * other.re,
        )
    }

    pub fn scale(self, factor: f64) -> Complex {
        Complex::new(factor * self.re, factor * self.im)
    }

    /// Multiplicative inverse `conj(c) / |c|^2`.
    /// Inverting zero produces non-finite components.
    pub fn invert(self) -> Complex {
        let denom = self.squared_magnitude();
        Complex::new(self.re / denom, -self.im / denom)
    }

    pub fn negate(self) -> Complex {
        Complex::new(-self.re, -self.im)
    }

    pub fn conjugate(self) -> Complex {
        Complex::new(self.re, -self.im)
    }

    pub fn is_finite(self) -> bool {
        self.re.is_finite() && self.im.is_finite()
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}i)", self.re, self.im)
    }
}

impl Add for Complex {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Complex::add(self, rhs)
    }
}

impl Sub for Complex {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Complex::add(self, rhs.negate())
    }
}

impl Mul for Complex {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        self.multiply(rhs)
    }
}

impl Mul<f64> for Complex {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        self.scale(rhs)
    }
}

impl Neg for Complex {
    type Output = Self;
    fn neg(self) -> Self {
        self.negate()
    }
}

impl Zero for Complex {
    fn zero() -> Self {
        Self::ZERO
    }
    fn is_zero(&self) -> bool {
        self.re == 0.0 && self.im == 0.0
    }
}

impl One for Complex {
    fn one() -> Self {
        Self::ONE
    }
}

impl From<Complex64> for Complex {
    fn from(value: Complex64) -> Self {
        Self::new(value.re, value.im)
    }
}

impl From<Complex> for Complex64 {
    fn from(value: Complex) -> Self {
        Complex64::new(value.re, value.im)
    }
}

/// Integer power by repeated squaring.
///
/// The highest set bit of `n` is reached by squaring, the remaining bits are
/// folded in recursively. Negative exponents invert the positive power.
pub fn pow(c: Complex, n: i32) -> Complex {
    if n < 0 {
        // i64 so that i32::MIN negates cleanly.
        return pow_unsigned(c, (n as i64).unsigned_abs() as u32).invert();
    }
    pow_unsigned(c, n as u32)
}

fn pow_unsigned(c: Complex, n: u32) -> Complex {
    if n == 0 {
        return Complex::ONE;
    }
    if n == 1 {
        return c;
    }

    let high_bit = 1u32 << (31 - n.leading_zeros());
    let remainder = n - high_bit;

    let mut result = c;
    let mut k = high_bit;
    while k > 1 {
        result = result * result;
        k >>= 1;
    }

    result * pow_unsigned(c, remainder)
}

/// Complex exponential from a Taylor series truncated at [`EXP_SERIES_ORDER`].
///
/// There is no convergence check. Accuracy is good for the small arguments the
/// samplers pass in and degrades as `|c|` approaches the series order.
pub fn exp(c: Complex) -> Complex {
    let mut result = Complex::ONE;
    let mut term = Complex::ONE;

    for k in 1..=EXP_SERIES_ORDER {
        term = term * c * (1.0 / k as f64);
        result = result + term;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::{exp, pow, Complex};
    use num_complex::Complex64;
    use std::f64::consts::PI;

    fn assert_close(actual: Complex, expected: Complex, tol: f64) {
        assert!(
            (actual.re - expected.re).abs() <= tol && (actual.im - expected.im).abs() <= tol,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn multiply_follows_complex_algebra() {
        let a = Complex::new(1.0, 2.0);
        let b = Complex::new(3.0, -1.0);
        assert_eq!(a * b, Complex::new(5.0, 5.0));
        assert_eq!(Complex::I * Complex::I, Complex::real(-1.0));
        assert_eq!(a * 2.0, Complex::new(2.0, 4.0));
    }

    #[test]
    fn invert_uses_squared_magnitude() {
        let c = Complex::new(3.0, 4.0);
        let inv = c.invert();
        assert_close(inv, Complex::new(3.0 / 25.0, -4.0 / 25.0), 1e-15);
        assert_close(c * inv, Complex::ONE, 1e-15);

        // re^2 == im^2 would divide by zero with a difference of squares.
        let diagonal = Complex::new(1.0, 1.0);
        assert_close(diagonal.invert(), Complex::new(0.5, -0.5), 1e-15);
    }

    #[test]
    fn invert_of_zero_is_not_finite() {
        assert!(!Complex::ZERO.invert().is_finite());
    }

    #[test]
    fn arg_and_magnitude() {
        let c = Complex::new(0.0, 2.0);
        assert!((c.arg() - PI / 2.0).abs() < 1e-15);
        assert_eq!(c.magnitude(), 2.0);
        assert_eq!(Complex::new(3.0, 4.0).squared_magnitude(), 25.0);
        assert_eq!(Complex::new(1.0, -2.0).conjugate(), Complex::new(1.0, 2.0));
        assert_eq!(-Complex::new(1.0, -2.0), Complex::new(-1.0, 2.0));
    }

    #[test]
    fn pow_zero_and_one() {
        let c = Complex::new(0.3, -1.7);
        assert_eq!(pow(c, 0), Complex::ONE);
        assert_eq!(pow(c, 1), c);
    }

    #[test]
    fn pow_negative_inverts_positive_power() {
        let c = Complex::new(1.1, 0.4);
        for n in 1..9 {
            assert_eq!(pow(c, -n), pow(c, n).invert());
        }
    }

    #[test]
    fn pow_matches_num_complex() {
        let c = Complex::new(0.9, 0.35);
        for n in [2, 3, 5, 7, 12, 13] {
            let expected: Complex = Complex64::from(c).powi(n).into();
            assert_close(pow(c, n), expected, 1e-12);
        }
    }

    #[test]
    fn exp_of_zero_is_one() {
        assert_close(exp(Complex::ZERO), Complex::ONE, 1e-15);
    }

    #[test]
    fn exp_matches_num_complex_for_small_arguments() {
        assert_close(exp(Complex::imaginary(PI)), Complex::real(-1.0), 1e-12);
        for c in [
            Complex::new(0.5, 0.5),
            Complex::new(-1.0, 2.0),
            Complex::new(2.0, -3.0),
        ] {
            let expected: Complex = Complex64::from(c).exp().into();
            assert_close(exp(c), expected, 1e-10);
        }
    }

    #[test]
    fn display_shows_both_parts() {
        assert_eq!(Complex::new(1.5, -2.0).to_string(), "(1.5, -2i)");
    }
}
