//! Natural cubic spline curves over one-dimensional knots, with value algebra on top of them:
//! adding and removing knots, combining and subtracting curves and finding extrema.
//!
//! Every [Curve] is immutable. Its knots are deduplicated (knots sharing `x` are averaged)
//! and sorted, then the spline coefficients are computed once with natural boundary conditions.
//!
//! # Example
//! ```
//! use natural_spline::{Curve, Knot};
//! use assert_approx_eq::assert_approx_eq;
//!
//! let curve = Curve::new(vec![(0.0, 1.0), (1.0, 2.0), (2.0, 3.0), (3.0, 4.0)]).unwrap();
//!
//! assert_approx_eq!(curve.value(0.5), 1.5, 1e-9);
//! assert_approx_eq!(curve.value(1.5), 2.5, 1e-9);
//!
//! let bent = curve.add_knot(Knot::new(1.5, 0.0));
//! let ((min_x, min_y), _) = bent.min_max();
//! assert!(min_y <= 0.0);
//! assert_approx_eq!(bent.value(min_x), min_y, 1e-9);
//!
//! let combined = (&curve + &bent).unwrap();
//! assert_eq!(combined.get_number_of_knots(), 5);
//! ```

mod curve;
mod error;
mod knot;
mod polynomial;
mod spline;

pub use curve::Curve;
pub use error::CurveError;
pub use knot::{Knot, KnotSet, MIN_KNOTS};
pub use polynomial::Polynomial;
pub use spline::SplineCoefficients;
