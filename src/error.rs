use thiserror::Error;

use crate::knot::MIN_KNOTS;

/// Errors returned when a [Curve](crate::Curve) cannot be built.
///
/// Both variants report fewer than [MIN_KNOTS] knots. A failed subtraction has its own variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurveError {
    /// Knots normalized to fewer than [MIN_KNOTS] distinct x values.
    #[error("curve needs at least {min} distinct knots, got {distinct}", min = MIN_KNOTS)]
    TooFewKnots { distinct: usize },

    /// Subtracting one curve from another left fewer than [MIN_KNOTS] knots.
    #[error("difference leaves {remaining} knots, curve needs at least {min}", min = MIN_KNOTS)]
    TooFewKnotsAfterDifference { remaining: usize },
}
