use std::ops::{Add, Sub};

use crate::{
    error::CurveError,
    knot::{Knot, KnotSet},
    spline::SplineCoefficients,
};

/// Natural cubic spline through a set of knots.
///
/// A [Curve] never changes once built. Operations that look like mutations
/// ([Curve::add_knot], [Curve::remove_knot], `+`, `-`) return a new curve.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    knots: KnotSet,
    coefficients: SplineCoefficients,
}

impl Curve {
    /// Builds a curve from raw `(x, y)` pairs or [Knot]s. Pairs sharing `x` are merged into one
    /// knot with the mean `y`.
    /// # Example
    /// ```
    /// use natural_spline::Curve;
    ///
    /// let curve = Curve::new(vec![(0.0, 1.0), (1.0, 2.0), (2.0, 3.0), (2.0, 4.0)]).unwrap();
    ///
    /// assert_eq!(curve.get_number_of_knots(), 3);
    /// assert_eq!(curve.get_knots(), vec![(0.0, 1.0), (1.0, 2.0), (2.0, 3.5)]);
    /// ```
    /// # Errors
    /// [CurveError::TooFewKnots] when fewer than three distinct `x` values are given.
    /// ```
    /// use natural_spline::{Curve, CurveError};
    ///
    /// let curve = Curve::new(vec![(0.0, 1.0), (1.0, 2.0)]);
    /// assert_eq!(curve, Err(CurveError::TooFewKnots { distinct: 2 }));
    /// ```
    pub fn new<I, K>(knots: I) -> Result<Self, CurveError>
    where
        I: IntoIterator<Item = K>,
        K: Into<Knot>,
    {
        let knots = KnotSet::normalize(knots.into_iter().map(Into::into))?;
        Ok(Curve::from_knot_set(knots))
    }

    pub fn from_knot_set(knots: KnotSet) -> Self {
        let coefficients = SplineCoefficients::fit(&knots);
        Curve { knots, coefficients }
    }

    pub fn get_number_of_knots(&self) -> usize {
        self.knots.len()
    }

    /// Copy of the knots as `(x, y)` pairs sorted by `x`.
    pub fn get_knots(&self) -> Vec<(f64, f64)> {
        self.knots.iter().map(|k| (k.get_x(), k.get_y())).collect()
    }

    pub fn knot_set(&self) -> &KnotSet {
        &self.knots
    }

    pub fn coefficients(&self) -> &SplineCoefficients {
        &self.coefficients
    }

    /// `x` of the first and the last knot.
    pub fn domain(&self) -> (f64, f64) {
        let knots = self.knots.as_slice();
        (knots[0].get_x(), knots[knots.len() - 1].get_x())
    }

    /// Value of the spline at `x`. Outside of [Curve::domain] the first or the last segment
    /// polynomial is extrapolated.
    /// # Example
    /// ```
    /// use natural_spline::Curve;
    /// use assert_approx_eq::assert_approx_eq;
    ///
    /// let curve = Curve::new(vec![(0.0, 1.0), (1.0, 2.0), (2.0, 3.0), (3.0, 4.0)]).unwrap();
    ///
    /// assert_approx_eq!(curve.value(0.5), 1.5, 1e-9);
    /// assert_approx_eq!(curve.value(4.0), 5.0, 1e-9);
    /// ```
    pub fn value(&self, x: f64) -> f64 {
        let index = self.coefficients.find_segment_index(x);
        self.coefficients.evaluate_segment(index, x)
    }

    /// [Curve::value] for every element of `x_values`. Segment lookup starts from the segment
    /// found for the previous element, so sorted input is evaluated in a single pass.
    pub fn values(&self, x_values: &[f64]) -> Vec<f64> {
        let mut results = Vec::with_capacity(x_values.len());
        let mut index = 0;

        for x in x_values {
            index = self.coefficients.find_segment_index_with_hint(index, *x);
            results.push(self.coefficients.evaluate_segment(index, *x));
        }
        results
    }

    /// First derivative at `x`, segments are selected the same way as in [Curve::value].
    pub fn derivative(&self, x: f64) -> f64 {
        let index = self.coefficients.find_segment_index(x);
        let dx = x - self.coefficients.x()[index];
        self.coefficients.segment_polynomial(index).derivative().evaluate(dx)
    }

    /// Global minimum and maximum of the curve over its knots, as `(min_point, max_point)`.
    ///
    /// Candidates are all knots plus the critical points of each segment inside the segment.
    /// Among candidates with equal `y` the one with the smallest `x` is returned.
    /// # Example
    /// ```
    /// use natural_spline::Curve;
    /// use assert_approx_eq::assert_approx_eq;
    ///
    /// let curve = Curve::new(vec![(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]).unwrap();
    /// let ((min_x, min_y), (max_x, max_y)) = curve.min_max();
    ///
    /// assert_eq!((min_x, min_y), (0.0, 0.0));
    /// assert_approx_eq!(max_x, 1.0, 1e-12);
    /// assert_approx_eq!(max_y, 1.0, 1e-12);
    /// ```
    pub fn min_max(&self) -> ((f64, f64), (f64, f64)) {
        let mut candidates = self.get_knots();
        for index in 0..self.coefficients.number_of_segments() {
            for x in self.coefficients.critical_points(index) {
                candidates.push((x, self.value(x)));
            }
        }
        candidates.sort_by(|a, b| a.0.total_cmp(&b.0));

        let first = candidates[0];
        candidates
            .into_iter()
            .fold((first, first), |(min, max), point| {
                let min = if point.1 < min.1 { point } else { min };
                let max = if point.1 > max.1 { point } else { max };
                (min, max)
            })
    }

    /// New curve with `knot` added. A knot sharing `x` with an existing knot is averaged with it.
    /// # Example
    /// ```
    /// use natural_spline::{Curve, Knot};
    ///
    /// let curve = Curve::new(vec![(0.0, 1.0), (1.0, 2.0), (2.0, 3.0)]).unwrap();
    ///
    /// assert_eq!(curve.add_knot(Knot::new(3.0, 0.0)).get_number_of_knots(), 4);
    /// assert_eq!(curve.add_knot(Knot::new(2.0, 5.0)).get_knots()[2], (2.0, 4.0));
    /// ```
    pub fn add_knot(&self, knot: Knot) -> Curve {
        Curve::from_knot_set(self.knots.with_knot(knot))
    }

    /// New curve without `knot`. Both coordinates must match exactly.
    ///
    /// Returns an unchanged copy when `knot` is not part of the curve or when the curve
    /// has only three knots.
    pub fn remove_knot(&self, knot: Knot) -> Curve {
        match self.knots.without_knot(&knot) {
            Some(knots) => Curve::from_knot_set(knots),
            None => {
                log::trace!(
                    "knot ({}, {}) not removed from curve with {} knots",
                    knot.get_x(),
                    knot.get_y(),
                    self.knots.len()
                );
                self.clone()
            }
        }
    }

    /// Curve through the knots of both curves, knots sharing `x` are averaged. Same as `&a + &b`.
    /// # Errors
    /// [CurveError::TooFewKnots] when the union has fewer than three distinct `x` values.
    pub fn combine(&self, other: &Curve) -> Result<Curve, CurveError> {
        let knots = self
            .knots
            .union(&other.knots)
            .inspect_err(|err| log::debug!("combine failed: {err}"))?;
        Ok(Curve::from_knot_set(knots))
    }

    /// Curve through the knots of `self` that have no exact `(x, y)` match in `other`.
    /// Same as `&a - &b`.
    /// # Example
    /// ```
    /// use natural_spline::{Curve, CurveError};
    ///
    /// let curve = Curve::new(vec![(0.0, 1.0), (1.0, 2.0), (2.0, 3.0), (3.0, 1.0)]).unwrap();
    /// let other = Curve::new(vec![(3.0, 1.0), (4.0, 0.0), (5.0, 2.0)]).unwrap();
    ///
    /// assert_eq!((&curve - &other).unwrap().get_number_of_knots(), 3);
    /// assert_eq!(&other - &curve, Err(CurveError::TooFewKnotsAfterDifference { remaining: 2 }));
    /// ```
    /// # Errors
    /// [CurveError::TooFewKnotsAfterDifference] when fewer than three knots remain.
    pub fn difference(&self, other: &Curve) -> Result<Curve, CurveError> {
        let knots = self
            .knots
            .difference(&other.knots)
            .inspect_err(|err| log::debug!("difference failed: {err}"))?;
        Ok(Curve::from_knot_set(knots))
    }
}

impl Add for &Curve {
    type Output = Result<Curve, CurveError>;

    fn add(self, other: &Curve) -> Self::Output {
        self.combine(other)
    }
}

impl Sub for &Curve {
    type Output = Result<Curve, CurveError>;

    fn sub(self, other: &Curve) -> Self::Output {
        self.difference(other)
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;

    fn random_curve(rng: &mut StdRng, number_of_knots: usize) -> Curve {
        let mut x = rng.gen_range(-5.0..5.0);
        let mut pairs = Vec::with_capacity(number_of_knots);
        for _ in 0..number_of_knots {
            pairs.push((x, rng.gen_range(-10.0..10.0)));
            x += rng.gen_range(0.1..2.0);
        }
        Curve::new(pairs).unwrap()
    }

    #[test]
    fn constructor_averages_duplicates() {
        let curve = Curve::new(vec![(0.0, 1.0), (1.0, 2.0), (2.0, 3.0), (2.0, 4.0)]).unwrap();

        assert_eq!(curve.get_number_of_knots(), 3);
        assert_eq!(curve.get_knots(), vec![(0.0, 1.0), (1.0, 2.0), (2.0, 3.5)]);
    }

    #[test]
    fn constructor_accepts_knots() {
        let from_knots = Curve::new(vec![Knot::new(2.0, 0.0), Knot::new(0.0, 1.0), Knot::new(1.0, 5.0)]).unwrap();
        let from_pairs = Curve::new(vec![(0.0, 1.0), (1.0, 5.0), (2.0, 0.0)]).unwrap();

        assert_eq!(from_knots, from_pairs);
    }

    #[test]
    fn too_few_knots() {
        assert_eq!(Curve::new(Vec::<(f64, f64)>::new()), Err(CurveError::TooFewKnots { distinct: 0 }));
        assert_eq!(Curve::new(vec![(3.0, 4.0)]), Err(CurveError::TooFewKnots { distinct: 1 }));
        assert_eq!(
            Curve::new(vec![(0.0, 1.0), (1.0, 2.0), (1.0, 3.0), (0.0, 4.0)]),
            Err(CurveError::TooFewKnots { distinct: 2 })
        );
    }

    #[test]
    fn interpolates_knots() {
        let eps = 1e-9;
        let mut rng = StdRng::seed_from_u64(7);

        for number_of_knots in 3..12 {
            let curve = random_curve(&mut rng, number_of_knots);
            for (x, y) in curve.get_knots() {
                assert_approx_eq!(curve.value(x), y, eps);
            }
        }
    }

    #[test]
    fn over_linear_function() {
        let eps = 1e-9;
        let curve = Curve::new(vec![(0.0, 1.0), (1.0, 2.0), (2.0, 3.0), (3.0, 4.0)]).unwrap();

        assert_approx_eq!(curve.value(0.5), 1.5, eps);
        assert_approx_eq!(curve.value(1.5), 2.5, eps);
        assert_approx_eq!(curve.value(-1.0), 0.0, eps);
        assert_approx_eq!(curve.value(4.0), 5.0, eps);
        assert_approx_eq!(curve.derivative(2.2), 1.0, eps);
        assert_eq!(curve.domain(), (0.0, 3.0));
    }

    #[test]
    fn extrapolates_last_segment() {
        let eps = 1e-12;
        let curve = Curve::new(vec![(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]).unwrap();

        // last segment is 1 - 1.5 dx^2 + 0.5 dx^3 starting at x = 1
        assert_approx_eq!(curve.value(3.0), 1.0 - 6.0 + 4.0, eps);
        // first segment is 1.5 dx - 0.5 dx^3 starting at x = 0
        assert_approx_eq!(curve.value(-1.0), -1.5 + 0.5, eps);
    }

    #[test]
    fn batch_values_match_single_values() {
        let mut rng = StdRng::seed_from_u64(11);
        let curve = random_curve(&mut rng, 8);
        let (x_min, x_max) = curve.domain();

        let mut x_values: Vec<f64> = (0..200).map(|_| rng.gen_range(x_min - 1.0..x_max + 1.0)).collect();
        let unsorted = curve.values(&x_values);
        x_values.sort_by(f64::total_cmp);
        let sorted = curve.values(&x_values);

        assert_eq!(sorted, x_values.iter().map(|x| curve.value(*x)).collect::<Vec<f64>>());
        assert_eq!(unsorted.len(), x_values.len());
    }

    #[test]
    fn derivative_matches_finite_difference() {
        let eps = 1e-5;
        let step = 1e-6;
        let mut rng = StdRng::seed_from_u64(3);
        let curve = random_curve(&mut rng, 6);
        let (x_min, x_max) = curve.domain();

        for _ in 0..50 {
            let x = rng.gen_range(x_min..x_max);
            let finite_difference = (curve.value(x + step) - curve.value(x - step)) / (2.0 * step);
            assert_approx_eq!(curve.derivative(x), finite_difference, eps);
        }
    }

    #[test]
    fn min_max_with_interior_extremum() {
        let eps = 1e-12;
        let curve = Curve::new(vec![(0.0, 0.0), (1.0, 1.0), (2.0, 0.0), (3.0, 2.0)]).unwrap();
        let ((min_x, min_y), (max_x, max_y)) = curve.min_max();

        // dense sampling never leaves the reported range
        let steps = 3000;
        for i in 0..=steps {
            let x = 3.0 * i as f64 / steps as f64;
            let y = curve.value(x);
            assert!(y >= min_y - 1e-9, "{y} below minimum {min_y} at {x}");
            assert!(y <= max_y + 1e-9, "{y} above maximum {max_y} at {x}");
        }
        assert_approx_eq!(curve.value(min_x), min_y, eps);
        assert_approx_eq!(curve.value(max_x), max_y, eps);
        assert!(min_y < 0.0);
        assert_eq!((max_x, max_y), (3.0, 2.0));
    }

    #[test]
    fn min_max_bounds_dense_samples() {
        let mut rng = StdRng::seed_from_u64(42);

        for number_of_knots in 3..10 {
            let curve = random_curve(&mut rng, number_of_knots);
            let ((_, min_y), (_, max_y)) = curve.min_max();
            let (x_min, x_max) = curve.domain();
            let tolerance = 1e-6 * (1.0 + max_y.abs().max(min_y.abs()));

            let steps = 5000;
            let mut sampled_min = f64::INFINITY;
            let mut sampled_max = f64::NEG_INFINITY;
            for i in 0..=steps {
                let x = x_min + (x_max - x_min) * i as f64 / steps as f64;
                let y = curve.value(x);
                sampled_min = sampled_min.min(y);
                sampled_max = sampled_max.max(y);
            }

            assert!(sampled_min >= min_y - tolerance);
            assert!(sampled_max <= max_y + tolerance);
            // the reported extrema are attained, so sampling gets close to them
            assert!(sampled_min - min_y < 1e-2 * (1.0 + min_y.abs()));
            assert!(max_y - sampled_max < 1e-2 * (1.0 + max_y.abs()));
        }
    }

    #[test]
    fn min_max_on_symmetric_knots() {
        let eps = 1e-12;
        let curve = Curve::new(vec![(0.0, 0.0), (1.0, 1.0), (2.0, 1.0), (3.0, 0.0)]).unwrap();
        let ((min_x, min_y), (max_x, max_y)) = curve.min_max();

        assert_eq!((min_x, min_y), (0.0, 0.0));
        assert_approx_eq!(max_x, 1.5, eps);
        assert_approx_eq!(max_y, 1.15, eps);

        let steps = 3000;
        for i in 0..=steps {
            let x = 3.0 * i as f64 / steps as f64;
            assert!(curve.value(x) <= max_y + 1e-12);
        }
    }

    #[test]
    fn min_max_ties_take_smallest_x() {
        let curve = Curve::new(vec![(0.0, 1.0), (1.0, 1.0), (2.0, 1.0), (3.0, 1.0)]).unwrap();

        assert_eq!(curve.min_max(), ((0.0, 1.0), (0.0, 1.0)));
    }

    #[test]
    fn add_then_remove_knot() {
        let curve = Curve::new(vec![(0.0, 1.0), (1.0, 2.0), (2.0, 0.0), (3.0, 4.0)]).unwrap();
        let knot = Knot::new(1.5, -2.0);

        let extended = curve.add_knot(knot);
        assert_eq!(extended.get_number_of_knots(), 5);
        assert_ne!(extended.value(1.5), curve.value(1.5));

        let restored = extended.remove_knot(knot);
        assert_eq!(restored.get_knots(), curve.get_knots());
        assert_eq!(restored, curve);
    }

    #[test]
    fn remove_knot_is_noop() {
        let three = Curve::new(vec![(0.0, 1.0), (1.0, 2.0), (2.0, 0.0)]).unwrap();
        assert_eq!(three.remove_knot(Knot::new(1.0, 2.0)), three);

        let four = three.add_knot(Knot::new(3.0, 3.0));
        assert_eq!(four.remove_knot(Knot::new(3.0, 2.9)), four);
        assert_eq!(four.remove_knot(Knot::new(7.0, 3.0)), four);
        assert_eq!(four.remove_knot(Knot::new(3.0, 3.0)), three);
    }

    #[test]
    fn combine_curves() {
        let left = Curve::new(vec![(0.0, 1.0), (1.0, 2.0), (2.0, 3.0)]).unwrap();
        let right = Curve::new(vec![(2.0, 5.0), (3.0, 4.0), (4.0, 1.0)]).unwrap();

        let combined = (&left + &right).unwrap();
        assert_eq!(
            combined.get_knots(),
            vec![(0.0, 1.0), (1.0, 2.0), (2.0, 4.0), (3.0, 4.0), (4.0, 1.0)]
        );
        assert_eq!(left.combine(&right).unwrap(), combined);
        assert_eq!((&left + &left).unwrap(), left);
    }

    #[test]
    fn difference_of_curves() {
        let left = Curve::new(vec![(0.0, 1.0), (1.0, 2.0), (2.0, 3.0), (3.0, 0.0), (4.0, 1.0)]).unwrap();
        let right = Curve::new(vec![(1.0, 2.0), (3.0, 0.5), (4.0, 1.0)]).unwrap();

        let difference = (&left - &right).unwrap();
        assert_eq!(difference.get_knots(), vec![(0.0, 1.0), (2.0, 3.0), (3.0, 0.0)]);
        assert_eq!(left.difference(&right).unwrap(), difference);
    }

    #[test]
    fn difference_error_differs_from_construction_error() {
        let curve = Curve::new(vec![(0.0, 1.0), (1.0, 2.0), (2.0, 3.0)]).unwrap();

        let err = (&curve - &curve).unwrap_err();
        assert_eq!(err, CurveError::TooFewKnotsAfterDifference { remaining: 0 });
        assert!(!matches!(err, CurveError::TooFewKnots { .. }));
    }
}
