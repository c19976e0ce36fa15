use nalgebra::DVector;

use crate::{knot::KnotSet, polynomial::Polynomial};

/// Coefficients of a natural cubic spline.
///
/// Segment `j` spans `x[j] <= x < x[j + 1]` and is
/// `a[j] + b[j]*dx + c[j]*dx^2 + d[j]*dx^3` with `dx = x - x[j]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SplineCoefficients {
    x: DVector<f64>,
    a: DVector<f64>,
    b: DVector<f64>,
    c: DVector<f64>,
    d: DVector<f64>,
}

impl SplineCoefficients {
    /// Solves the tridiagonal system of a natural cubic spline (second derivative is zero
    /// at both ends) with Thomas elimination.
    pub fn fit(knots: &KnotSet) -> Self {
        let number_of_segments = knots.len() - 1;
        let n = number_of_segments;

        let x = DVector::from_iterator(n + 1, knots.iter().map(|k| k.get_x()));
        let y = DVector::from_iterator(n + 1, knots.iter().map(|k| k.get_y()));

        let h = DVector::from_fn(n, |i, _| x[i + 1] - x[i]);

        let mut alpha = DVector::<f64>::zeros(n);
        for i in 1..n {
            alpha[i] = 3.0 * ((y[i + 1] - y[i]) / h[i] - (y[i] - y[i - 1]) / h[i - 1]);
        }

        // forward elimination, l[0] = 1, mu[0] = 0, z[0] = 0
        let mut l = DVector::<f64>::from_element(n + 1, 1.0);
        let mut mu = DVector::<f64>::zeros(n + 1);
        let mut z = DVector::<f64>::zeros(n + 1);
        for i in 1..n {
            l[i] = 2.0 * (x[i + 1] - x[i - 1]) - h[i - 1] * mu[i - 1];
            mu[i] = h[i] / l[i];
            z[i] = (alpha[i] - h[i - 1] * z[i - 1]) / l[i];
        }

        // back substitution, c[n] = 0
        let mut c = DVector::<f64>::zeros(n + 1);
        let mut b = DVector::<f64>::zeros(n);
        let mut d = DVector::<f64>::zeros(n);
        for j in (0..n).rev() {
            c[j] = z[j] - mu[j] * c[j + 1];
            b[j] = (y[j + 1] - y[j]) / h[j] - h[j] * (c[j + 1] + 2.0 * c[j]) / 3.0;
            d[j] = (c[j + 1] - c[j]) / (3.0 * h[j]);
        }

        log::debug!("fitted natural cubic spline: {} knots, {} segments", n + 1, n);

        SplineCoefficients {
            x,
            a: y.rows(0, n).into_owned(),
            b,
            c: c.rows(0, n).into_owned(),
            d,
        }
    }

    pub fn number_of_segments(&self) -> usize {
        self.a.len()
    }

    /// Segment boundaries, one more than the number of segments.
    pub fn x(&self) -> &DVector<f64> {
        &self.x
    }

    pub fn a(&self) -> &DVector<f64> {
        &self.a
    }

    pub fn b(&self) -> &DVector<f64> {
        &self.b
    }

    pub fn c(&self) -> &DVector<f64> {
        &self.c
    }

    pub fn d(&self) -> &DVector<f64> {
        &self.d
    }

    /// Smallest `j` with `x < x[j + 1]`, the last segment when there is none.
    pub fn find_segment_index(&self, x: f64) -> usize {
        self.find_segment_index_from(0, x)
    }

    /// Same result as [SplineCoefficients::find_segment_index], the scan starts at `index_hint`
    /// whenever `x` does not lie left of that segment.
    pub fn find_segment_index_with_hint(&self, index_hint: usize, x: f64) -> usize {
        let last = self.number_of_segments() - 1;
        let index_hint = index_hint.min(last);

        if x >= self.x[index_hint] {
            self.find_segment_index_from(index_hint, x)
        } else {
            self.find_segment_index_from(0, x)
        }
    }

    fn find_segment_index_from(&self, start: usize, x: f64) -> usize {
        let last = self.number_of_segments() - 1;
        (start..=last)
            .find(|&j| x < self.x[j + 1])
            .unwrap_or(last)
    }

    /// Evaluates segment `index` at `x`, also outside of its span.
    pub fn evaluate_segment(&self, index: usize, x: f64) -> f64 {
        let dx = x - self.x[index];
        self.a[index] + dx * (self.b[index] + dx * (self.c[index] + dx * self.d[index]))
    }

    /// Polynomial of segment `index` in its local coordinate `dx = x - x[index]`.
    pub fn segment_polynomial(&self, index: usize) -> Polynomial {
        Polynomial::new(vec![self.a[index], self.b[index], self.c[index], self.d[index]])
    }

    /// Critical points of segment `index` lying in `[x[index], x[index + 1])`.
    ///
    /// The derivative `b + 2c*dx + 3d*dx^2` is solved in the local coordinate and the roots
    /// are shifted back by `x[index]`. A segment with `d == 0` is a parabola with a single
    /// root `-b / 2c`. Segments with `c == d == 0` or a negative discriminant have none.
    pub fn critical_points(&self, index: usize) -> Vec<f64> {
        let start = self.x[index];
        let end = self.x[index + 1];

        self.segment_polynomial(index)
            .derivative()
            .real_roots()
            .into_iter()
            .map(|dx| start + dx)
            .filter(|x| start <= *x && *x < end)
            .collect()
    }
}
