//! Multi-dimensional intervals and the lattices they contain.
//!
//! An [`Interval`] is the Cartesian product of an ordered list of 1-dimensional
//! factors `[lower_i, upper_i]`. The number of factors is the dimension. The
//! first factor is the leading (outermost) axis: `lower`, `upper` and `length`
//! report on it alone.
//!
//! Two lattice traversals are provided:
//! - [`Interval::points`] walks the regular point lattice of spacing `step`
//!   anchored at the lower corner, first axis fastest.
//! - [`Interval::hypercubes`] walks every axis-aligned hypercube of side `step`
//!   whose vertices lie on that lattice, yielding `2^d` vertices per cube in
//!   bit-index order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Mul;
use thiserror::Error;

/// Relative slack (in units of `step`) allowed when deciding whether one more
/// lattice step still fits inside a factor.
const LATTICE_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntervalError {
    #[error("Cannot raise an interval to power {0}. Must be a positive integer.")]
    InvalidPower(i32),
    #[error("Invalid lattice step size {0}. Step size must be positive and finite.")]
    InvalidStepSize(f64),
    #[error("Cannot take the product of an empty list of intervals.")]
    EmptyProduct,
    #[error("Cannot enumerate hypercubes of dimension {0}: too many vertices per cube.")]
    CubeDimensionTooLarge(usize),
}

/// One 1-dimensional factor of an interval.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Factor {
    lower: f64,
    upper: f64,
}

impl Factor {
    fn new(a: f64, b: f64) -> Self {
        Self {
            lower: a.min(b),
            upper: a.max(b),
        }
    }

    fn length(&self) -> f64 {
        self.upper - self.lower
    }

    fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }
}

/// Serialized as its list of `(lower, upper)` pairs. Deserializing goes through
/// [`Interval::from_bounds`], so an empty list is rejected and each pair is
/// put in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<(f64, f64)>", into = "Vec<(f64, f64)>")]
pub struct Interval {
    factors: Vec<Factor>,
}

impl Interval {
    /// Creates the 1-dimensional interval between `a` and `b`, in either order.
    pub fn new(a: f64, b: f64) -> Self {
        Self {
            factors: vec![Factor::new(a, b)],
        }
    }

    /// Builds an interval directly from `(a, b)` pairs, one per axis.
    pub fn from_bounds(bounds: &[(f64, f64)]) -> Result<Self, IntervalError> {
        if bounds.is_empty() {
            return Err(IntervalError::EmptyProduct);
        }
        Ok(Self {
            factors: bounds.iter().map(|&(a, b)| Factor::new(a, b)).collect(),
        })
    }

    pub fn dimension(&self) -> usize {
        self.factors.len()
    }

    /// Lower bound of the leading factor.
    pub fn lower(&self) -> f64 {
        self.factors[0].lower
    }

    /// Upper bound of the leading factor.
    pub fn upper(&self) -> f64 {
        self.factors[0].upper
    }

    /// Length of the leading factor.
    pub fn length(&self) -> f64 {
        self.factors[0].length()
    }

    /// Lebesgue measure on R^n: length, area, volume, ...
    pub fn measure(&self) -> f64 {
        self.factors.iter().map(Factor::length).product()
    }

    /// The point with every coordinate at its lower bound.
    pub fn lower_corner(&self) -> Vec<f64> {
        self.factors.iter().map(|f| f.lower).collect()
    }

    /// The point with every coordinate at its upper bound.
    pub fn upper_corner(&self) -> Vec<f64> {
        self.factors.iter().map(|f| f.upper).collect()
    }

    /// Returns `false` for points of the wrong dimension.
    pub fn contains(&self, point: &[f64]) -> bool {
        point.len() == self.dimension()
            && self
                .factors
                .iter()
                .zip(point)
                .all(|(factor, &value)| factor.contains(value))
    }

    /// Containment for a single real value; only a 1-dimensional interval can contain one.
    pub fn contains_value(&self, value: f64) -> bool {
        self.contains(&[value])
    }

    /// The `index`-th factor as a 1-dimensional interval.
    pub fn factor(&self, index: usize) -> Option<Interval> {
        self.factors.get(index).map(|f| Interval {
            factors: vec![*f],
        })
    }

    /// Every factor, in order, as a 1-dimensional interval.
    pub fn factors(&self) -> impl Iterator<Item = Interval> + '_ {
        self.factors.iter().map(|f| Interval { factors: vec![*f] })
    }

    /// Post-multiplies `other` into this interval via the Cartesian product.
    pub fn multiply(&mut self, other: &Interval) {
        self.factors.extend_from_slice(&other.factors);
    }

    /// Post-multiplies each interval of `others`, in order.
    pub fn multiply_all(&mut self, others: &[Interval]) {
        for other in others {
            self.multiply(other);
        }
    }

    /// Raises this interval to the `n`-th Cartesian power in place.
    pub fn pow(&mut self, n: i32) -> Result<(), IntervalError> {
        if n <= 0 {
            return Err(IntervalError::InvalidPower(n));
        }
        let base = self.factors.clone();
        for _ in 1..n {
            self.factors.extend_from_slice(&base);
        }
        Ok(())
    }

    /// Returns this interval raised to the `n`-th Cartesian power.
    pub fn powered(&self, n: i32) -> Result<Interval, IntervalError> {
        let mut result = self.clone();
        result.pow(n)?;
        Ok(result)
    }

    /// Moves every upper bound by `amount`, keeping the lower corner fixed.
    /// A factor never inverts: shrinking past its lower bound collapses it there.
    pub fn grow(&mut self, amount: f64) {
        for factor in &mut self.factors {
            factor.upper = (factor.upper + amount).max(factor.lower);
        }
    }

    pub fn shrink(&mut self, amount: f64) {
        self.grow(-amount);
    }

    /// Moves both bounds of every factor outward by `amount`.
    /// Contracting past the midpoint collapses a factor to its midpoint.
    pub fn expand(&mut self, amount: f64) {
        for factor in &mut self.factors {
            let lower = factor.lower - amount;
            let upper = factor.upper + amount;
            if lower <= upper {
                factor.lower = lower;
                factor.upper = upper;
            } else {
                let mid = 0.5 * (factor.lower + factor.upper);
                factor.lower = mid;
                factor.upper = mid;
            }
        }
    }

    pub fn contract(&mut self, amount: f64) {
        self.expand(-amount);
    }

    /// Cartesian product `i1 x i2`; neither input is modified.
    pub fn product(i1: &Interval, i2: &Interval) -> Interval {
        let mut result = i1.clone();
        result.multiply(i2);
        result
    }

    /// Cartesian product of all `intervals`, in order.
    pub fn product_all(intervals: &[Interval]) -> Result<Interval, IntervalError> {
        let (first, rest) = intervals
            .split_first()
            .ok_or(IntervalError::EmptyProduct)?;
        let mut result = first.clone();
        result.multiply_all(rest);
        Ok(result)
    }

    /// Iterates the point lattice of spacing `step` anchored at the lower corner.
    pub fn points(&self, step: f64) -> Result<PointIter, IntervalError> {
        validate_step(step)?;
        Ok(PointIter::new(self.factors.clone(), step))
    }

    /// Iterates every hypercube of side `step` on the point lattice.
    ///
    /// Each cube has `2^d` vertices, so `d` must be below the bit width of `usize`.
    pub fn hypercubes(&self, step: f64) -> Result<HypercubeIter, IntervalError> {
        validate_step(step)?;
        let vertex_count = cube_vertex_count(self.dimension())?;
        Ok(HypercubeIter::new(&self.factors, step, vertex_count))
    }
}

impl TryFrom<Vec<(f64, f64)>> for Interval {
    type Error = IntervalError;

    fn try_from(bounds: Vec<(f64, f64)>) -> Result<Self, Self::Error> {
        Interval::from_bounds(&bounds)
    }
}

impl From<Interval> for Vec<(f64, f64)> {
    fn from(interval: Interval) -> Self {
        interval
            .factors
            .iter()
            .map(|f| (f.lower, f.upper))
            .collect()
    }
}

/// Number of vertices of a `dimension`-cube.
pub fn cube_vertex_count(dimension: usize) -> Result<usize, IntervalError> {
    u32::try_from(dimension)
        .ok()
        .and_then(|shift| 1usize.checked_shl(shift))
        .ok_or(IntervalError::CubeDimensionTooLarge(dimension))
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, factor) in self.factors.iter().enumerate() {
            if i > 0 {
                write!(f, " x ")?;
            }
            write!(f, "[{}, {}]", factor.lower, factor.upper)?;
        }
        Ok(())
    }
}

impl Mul for &Interval {
    type Output = Interval;
    fn mul(self, rhs: Self) -> Interval {
        Interval::product(self, rhs)
    }
}

fn validate_step(step: f64) -> Result<(), IntervalError> {
    if step > 0.0 && step.is_finite() {
        Ok(())
    } else {
        Err(IntervalError::InvalidStepSize(step))
    }
}

/// Odometer over the point lattice of an interval.
///
/// Each axis keeps an integer counter `k`; its coordinate is `lower + k * step`.
/// Advancing increments the first axis that still has room and resets every
/// faster axis before it to its lower bound.
#[derive(Debug, Clone)]
pub struct PointIter {
    factors: Vec<Factor>,
    step: f64,
    counters: Vec<u64>,
    started: bool,
    exhausted: bool,
}

impl PointIter {
    fn new(factors: Vec<Factor>, step: f64) -> Self {
        let dim = factors.len();
        Self {
            factors,
            step,
            counters: vec![0; dim],
            started: false,
            exhausted: dim == 0,
        }
    }

    /// An iterator over bounds that may be inverted; inverted bounds hold no lattice points.
    fn over_raw_bounds(factors: Vec<Factor>, step: f64) -> Self {
        let empty = factors.iter().any(|f| f.upper < f.lower);
        let mut iter = Self::new(factors, step);
        iter.exhausted |= empty;
        iter
    }

    fn coordinate(&self, axis: usize, counter: u64) -> f64 {
        let factor = &self.factors[axis];
        (factor.lower + counter as f64 * self.step).min(factor.upper)
    }

    fn can_advance(&self, axis: usize) -> bool {
        let factor = &self.factors[axis];
        let next = factor.lower + (self.counters[axis] + 1) as f64 * self.step;
        next <= factor.upper + LATTICE_TOLERANCE * self.step
    }

    fn current_point(&self) -> Vec<f64> {
        self.counters
            .iter()
            .enumerate()
            .map(|(axis, &counter)| self.coordinate(axis, counter))
            .collect()
    }

    fn advance(&mut self) -> bool {
        for axis in 0..self.counters.len() {
            if self.can_advance(axis) {
                self.counters[axis] += 1;
                for faster in &mut self.counters[..axis] {
                    *faster = 0;
                }
                return true;
            }
        }
        false
    }
}

impl Iterator for PointIter {
    type Item = Vec<f64>;

    fn next(&mut self) -> Option<Vec<f64>> {
        if self.exhausted {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(self.current_point());
        }
        if self.advance() {
            Some(self.current_point())
        } else {
            self.exhausted = true;
            None
        }
    }
}

/// Hypercubes of side `step` on the lattice of an interval.
///
/// Anchors come from the point lattice of the interval shrunk by `step`, so the
/// opposite vertex of every cube still lies inside the full interval.
/// Vertex `i` of a cube anchored at `p` has coordinate `p[j] + step` where bit
/// `j` of `i` is set, and `p[j]` otherwise, clamped to the upper bound of axis `j`.
#[derive(Debug, Clone)]
pub struct HypercubeIter {
    anchors: PointIter,
    uppers: Vec<f64>,
    step: f64,
    vertex_count: usize,
}

impl HypercubeIter {
    fn new(factors: &[Factor], step: f64, vertex_count: usize) -> Self {
        let shrunk = factors
            .iter()
            .map(|f| Factor {
                lower: f.lower,
                upper: f.upper - step,
            })
            .collect();
        Self {
            anchors: PointIter::over_raw_bounds(shrunk, step),
            uppers: factors.iter().map(|f| f.upper).collect(),
            step,
            vertex_count,
        }
    }
}

impl Iterator for HypercubeIter {
    type Item = Vec<Vec<f64>>;

    fn next(&mut self) -> Option<Vec<Vec<f64>>> {
        let anchor = self.anchors.next()?;
        let cube = (0..self.vertex_count)
            .map(|vertex| {
                anchor
                    .iter()
                    .zip(&self.uppers)
                    .enumerate()
                    .map(|(j, (&coord, &upper))| {
                        if (vertex >> j) & 1 == 1 {
                            (coord + self.step).min(upper)
                        } else {
                            coord
                        }
                    })
                    .collect()
            })
            .collect();
        Some(cube)
    }
}

#[cfg(test)]
mod tests {
    use super::{cube_vertex_count, Interval, IntervalError};

    fn sample_product() -> (Interval, Interval, Interval) {
        let i1 = Interval::new(1.0, 3.0);
        let i2 = Interval::new(2.0, 5.0);
        let prod = Interval::product(&i1, &i2);
        (i1, i2, prod)
    }

    #[test]
    fn new_normalizes_bound_order() {
        let interval = Interval::new(4.0, -2.0);
        assert_eq!(interval.lower(), -2.0);
        assert_eq!(interval.upper(), 4.0);
        assert_eq!(interval.length(), 6.0);
        assert_eq!(interval.dimension(), 1);
    }

    #[test]
    fn contains_checks_every_factor() {
        let (i1, _, prod) = sample_product();
        assert!(i1.contains_value(1.0));
        assert!(i1.contains_value(2.0));
        assert!(i1.contains_value(1.9));
        assert!(!i1.contains_value(4.0));
        assert!(prod.contains(&[1.5, 2.5]));
        assert!(prod.contains(&[1.5, 3.0]));
        assert!(prod.contains(&[1.0, 2.5]));
        assert!(prod.contains(&[1.0, 3.0]));
        assert!(!prod.contains(&[3.0, 1.0]));
    }

    #[test]
    fn contains_rejects_dimension_mismatch() {
        let (_, _, prod) = sample_product();
        assert!(!prod.contains_value(1.0));
        assert!(!prod.contains(&[1.5, 2.5, 2.0]));
        assert!(!prod.contains(&[]));
    }

    #[test]
    fn contains_is_closed_at_corners() {
        let (_, _, prod) = sample_product();
        assert!(prod.contains(&prod.lower_corner()));
        assert!(prod.contains(&prod.upper_corner()));
        assert!(!prod.contains(&[1.0 - 1e-9, 2.0]));
    }

    #[test]
    fn measure_is_product_of_lengths() {
        let (i1, i2, prod) = sample_product();
        assert_eq!(i1.measure(), 2.0);
        assert_eq!(i2.measure(), 3.0);
        assert_eq!(prod.measure(), 6.0);
    }

    #[test]
    fn product_keeps_leading_factor_and_inputs() {
        let (i1, i2, prod) = sample_product();
        assert_eq!(prod.dimension(), 2);
        assert_eq!(prod.lower(), 1.0);
        assert_eq!(prod.upper(), 3.0);
        assert_eq!(i1, Interval::new(1.0, 3.0));
        assert_eq!(i2, Interval::new(2.0, 5.0));
        assert_eq!(&i1 * &i2, prod);
    }

    #[test]
    fn product_is_order_significant_and_associative() {
        let a = Interval::new(0.0, 1.0);
        let b = Interval::new(2.0, 4.0);
        let c = Interval::new(-1.0, 1.0);
        assert_ne!(&a * &b, &b * &a);
        assert_eq!(&(&a * &b) * &c, &a * &(&b * &c));
        assert_eq!(
            Interval::product_all(&[a.clone(), b.clone(), c.clone()]).expect("non-empty"),
            &(&a * &b) * &c
        );
    }

    #[test]
    fn product_all_rejects_empty_list() {
        assert_eq!(
            Interval::product_all(&[]).expect_err("empty product should fail"),
            IntervalError::EmptyProduct
        );
    }

    #[test]
    fn multiply_copies_the_other_interval() {
        let mut base = Interval::new(0.0, 1.0);
        let mut other = Interval::new(5.0, 6.0);
        base.multiply(&other);
        other.grow(10.0);
        assert_eq!(base.factor(1), Some(Interval::new(5.0, 6.0)));
    }

    #[test]
    fn equality_compares_every_factor_and_dimension() {
        let (i1, i2, prod) = sample_product();
        assert_eq!(
            prod,
            Interval::product(
                &Interval::new(i1.lower(), i1.upper()),
                &Interval::new(i2.lower(), i2.upper())
            )
        );
        assert_ne!(prod, i1);
        assert_ne!(prod, Interval::product(&i1, &Interval::new(2.0, 5.5)));
    }

    #[test]
    fn pow_repeats_the_interval() {
        let (i1, _, _) = sample_product();
        let fifth = i1.powered(5).expect("positive power");
        assert_eq!(fifth.dimension(), 5);
        assert_eq!(fifth.measure(), 32.0);
        assert!(fifth.contains(&[1.0, 1.1, 1.5, 2.0, 1.0]));

        let (_, _, prod) = sample_product();
        let squared = prod.powered(2).expect("positive power");
        assert_eq!(squared.dimension(), 4);
        assert_eq!(squared.measure(), 36.0);
    }

    #[test]
    fn pow_rejects_non_positive_exponent_without_mutating() {
        let (_, _, mut prod) = sample_product();
        let before = prod.clone();
        assert_eq!(prod.pow(0), Err(IntervalError::InvalidPower(0)));
        assert_eq!(prod.pow(-3), Err(IntervalError::InvalidPower(-3)));
        assert_eq!(prod, before);
        let err = before.powered(0).expect_err("zero power should fail");
        assert!(err.to_string().contains("positive integer"));
    }

    #[test]
    fn grow_moves_only_upper_bounds() {
        let (_, _, mut prod) = sample_product();
        prod.grow(1.5);
        assert_eq!(
            prod,
            Interval::product(&Interval::new(1.0, 4.5), &Interval::new(2.0, 6.5))
        );
        prod.shrink(1.5);
        assert_eq!(prod, sample_product().2);
    }

    #[test]
    fn shrink_past_lower_bound_collapses_factor() {
        let mut interval = Interval::new(0.0, 1.0);
        interval.shrink(3.0);
        assert_eq!(interval.lower(), 0.0);
        assert_eq!(interval.upper(), 0.0);
    }

    #[test]
    fn expand_and_contract_move_both_bounds() {
        let (_, _, mut prod) = sample_product();
        prod.expand(1.0);
        assert_eq!(
            prod,
            Interval::product(&Interval::new(0.0, 4.0), &Interval::new(1.0, 6.0))
        );
        prod.contract(1.0);
        assert_eq!(prod, sample_product().2);

        let mut thin = Interval::new(0.0, 2.0);
        thin.contract(5.0);
        assert_eq!(thin, Interval::new(1.0, 1.0));
    }

    #[test]
    fn factors_iterate_in_order() {
        let (_, _, prod) = sample_product();
        let triple = Interval::product(&prod, &Interval::new(9.0, 11.0));
        let factors: Vec<Interval> = triple.factors().collect();
        assert_eq!(
            factors,
            vec![
                Interval::new(1.0, 3.0),
                Interval::new(2.0, 5.0),
                Interval::new(9.0, 11.0)
            ]
        );
        assert_eq!(triple.factor(3), None);
    }

    #[test]
    fn display_joins_factors() {
        let (_, _, prod) = sample_product();
        assert_eq!(prod.to_string(), "[1, 3] x [2, 5]");
    }

    #[test]
    fn points_rejects_non_positive_step() {
        let interval = Interval::new(0.0, 1.0);
        assert!(matches!(
            interval.points(0.0),
            Err(IntervalError::InvalidStepSize(_))
        ));
        assert!(matches!(
            interval.points(-0.5),
            Err(IntervalError::InvalidStepSize(_))
        ));
        assert!(matches!(
            interval.hypercubes(0.0),
            Err(IntervalError::InvalidStepSize(_))
        ));
        assert!(interval.points(f64::NAN).is_err());
    }

    #[test]
    fn points_1d_includes_both_ends() {
        let points: Vec<Vec<f64>> = Interval::new(0.0, 1.0)
            .points(0.5)
            .expect("valid step")
            .collect();
        assert_eq!(points, vec![vec![0.0], vec![0.5], vec![1.0]]);
    }

    #[test]
    fn points_2d_follow_carry_order() {
        let square = Interval::new(0.0, 1.0).powered(2).expect("positive power");
        let points: Vec<Vec<f64>> = square.points(1.0).expect("valid step").collect();
        assert_eq!(
            points,
            vec![
                vec![0.0, 0.0],
                vec![1.0, 0.0],
                vec![0.0, 1.0],
                vec![1.0, 1.0]
            ]
        );
    }

    #[test]
    fn points_stop_before_exceeding_upper_bound() {
        let points: Vec<Vec<f64>> = Interval::new(0.0, 1.0)
            .points(0.4)
            .expect("valid step")
            .collect();
        assert_eq!(points.len(), 3);
        assert!((points[2][0] - 0.8).abs() < 1e-12);
    }

    #[test]
    fn points_tolerate_rounding_at_upper_bound() {
        let points: Vec<Vec<f64>> = Interval::new(0.0, 0.3)
            .points(0.1)
            .expect("valid step")
            .collect();
        assert_eq!(points.len(), 4);
        assert_eq!(points[3], vec![0.3]);
    }

    #[test]
    fn points_cover_full_lattice_in_3d() {
        let (_, _, prod) = sample_product();
        let triple = Interval::product(&prod, &Interval::new(9.0, 11.0));
        let points: Vec<Vec<f64>> = triple.points(1.0).expect("valid step").collect();
        assert_eq!(points.len(), 3 * 4 * 3);
        assert_eq!(points.first(), Some(&vec![1.0, 2.0, 9.0]));
        assert_eq!(points[1], vec![2.0, 2.0, 9.0]);
        assert_eq!(points[3], vec![1.0, 3.0, 9.0]);
        assert_eq!(points.last(), Some(&vec![3.0, 5.0, 11.0]));
        assert!(points.iter().all(|p| triple.contains(p)));
    }

    #[test]
    fn degenerate_interval_yields_its_single_point() {
        let points: Vec<Vec<f64>> = Interval::new(2.0, 2.0)
            .points(0.5)
            .expect("valid step")
            .collect();
        assert_eq!(points, vec![vec![2.0]]);
    }

    #[test]
    fn hypercubes_1d_are_segments() {
        let cubes: Vec<Vec<Vec<f64>>> = Interval::new(0.0, 1.0)
            .hypercubes(1.0)
            .expect("valid step")
            .collect();
        assert_eq!(cubes, vec![vec![vec![0.0], vec![1.0]]]);
    }

    #[test]
    fn hypercubes_2d_use_bit_index_order() {
        let square = Interval::new(0.0, 1.0).powered(2).expect("positive power");
        let cubes: Vec<Vec<Vec<f64>>> = square.hypercubes(1.0).expect("valid step").collect();
        assert_eq!(
            cubes,
            vec![vec![
                vec![0.0, 0.0],
                vec![1.0, 0.0],
                vec![0.0, 1.0],
                vec![1.0, 1.0]
            ]]
        );
    }

    #[test]
    fn hypercubes_stay_inside_interval() {
        let (_, _, prod) = sample_product();
        let triple = Interval::product(&prod, &Interval::new(9.0, 11.0));
        let cubes: Vec<Vec<Vec<f64>>> = triple.hypercubes(1.0).expect("valid step").collect();
        assert_eq!(cubes.len(), 2 * 3 * 2);
        for cube in &cubes {
            assert_eq!(cube.len(), 8);
            assert!(cube.iter().all(|vertex| triple.contains(vertex)));
        }
    }

    #[test]
    fn hypercubes_empty_when_interval_thinner_than_step() {
        let cubes = Interval::new(0.0, 0.5)
            .hypercubes(1.0)
            .expect("valid step")
            .count();
        assert_eq!(cubes, 0);
    }

    #[test]
    fn hypercubes_with_fractional_step_stay_inside_interval() {
        for n in 1..=40u32 {
            let upper = f64::from(n) * 0.1;
            let interval = Interval::new(0.0, upper).powered(2).expect("positive power");
            let cubes: Vec<Vec<Vec<f64>>> =
                interval.hypercubes(0.1).expect("valid step").collect();
            assert_eq!(cubes.len(), (n * n) as usize, "upper = {upper}");
            for cube in &cubes {
                assert!(
                    cube.iter().all(|vertex| interval.contains(vertex)),
                    "vertex escapes {interval}: {cube:?}"
                );
            }
        }
    }

    #[test]
    fn cube_vertex_count_rejects_oversized_dimensions() {
        assert_eq!(cube_vertex_count(0), Ok(1));
        assert_eq!(cube_vertex_count(3), Ok(8));
        assert_eq!(
            cube_vertex_count(usize::BITS as usize),
            Err(IntervalError::CubeDimensionTooLarge(usize::BITS as usize))
        );

        let huge = Interval::new(0.0, 1.0)
            .powered(usize::BITS as i32)
            .expect("positive power");
        assert_eq!(
            huge.hypercubes(1.0).err(),
            Some(IntervalError::CubeDimensionTooLarge(usize::BITS as usize))
        );
    }

    #[test]
    fn serde_round_trip_preserves_factors() {
        let (_, _, prod) = sample_product();
        let json = serde_json::to_string(&prod).expect("serialize");
        assert_eq!(json, "[[1.0,3.0],[2.0,5.0]]");
        let back: Interval = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, prod);
    }

    #[test]
    fn deserialize_enforces_interval_invariants() {
        let err = serde_json::from_str::<Interval>("[]").expect_err("empty list is not an interval");
        assert!(err.to_string().contains("empty list"), "unexpected: {err}");

        let inverted: Interval = serde_json::from_str("[[5.0, 1.0]]").expect("deserialize");
        assert_eq!(inverted.lower(), 1.0);
        assert_eq!(inverted.upper(), 5.0);
        assert_eq!(inverted.length(), 4.0);
    }
}
