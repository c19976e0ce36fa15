use crate::error::CurveError;

/// Minimal number of distinct knots a natural cubic spline is built from.
pub const MIN_KNOTS: usize = 3;

/// Knot represents point through which spline function passes.
/// - `x` - coordinate,
/// - `y` - coordinate.
///
/// Two knots are equal only when both coordinates are equal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Knot {
    x: f64,
    y: f64,
}

impl Knot {
    pub fn new(x: f64, y: f64) -> Self {
        Knot { x, y }
    }

    pub fn get_x(&self) -> f64 {
        self.x
    }

    pub fn get_y(&self) -> f64 {
        self.y
    }
}

impl From<(f64, f64)> for Knot {
    fn from((x, y): (f64, f64)) -> Self {
        Knot { x, y }
    }
}

impl From<Knot> for (f64, f64) {
    fn from(knot: Knot) -> Self {
        (knot.x, knot.y)
    }
}

/// Knots sorted by strictly increasing `x`, at least [MIN_KNOTS] of them.
///
/// The only way to obtain a [KnotSet] is [KnotSet::normalize] (or an operation built on it),
/// so every instance upholds both invariants.
#[derive(Debug, Clone, PartialEq)]
pub struct KnotSet {
    knots: Vec<Knot>,
}

impl KnotSet {
    /// Groups raw knots by exactly equal `x`, replaces each group with a single knot whose `y`
    /// is the mean of the group and sorts the result by `x`.
    /// # Example
    /// ```
    /// use natural_spline::{Knot, KnotSet};
    ///
    /// let raw = vec![Knot::new(2.0, 3.0), Knot::new(0.0, 1.0), Knot::new(1.0, 2.0), Knot::new(2.0, 4.0)];
    /// let knots = KnotSet::normalize(raw).unwrap();
    ///
    /// assert_eq!(knots.len(), 3);
    /// assert_eq!(knots.as_slice()[2], Knot::new(2.0, 3.5));
    /// ```
    /// # Errors
    /// [CurveError::TooFewKnots] when fewer than [MIN_KNOTS] distinct `x` values remain.
    /// ```
    /// use natural_spline::{CurveError, Knot, KnotSet};
    ///
    /// let raw = vec![Knot::new(0.0, 1.0), Knot::new(1.0, 2.0), Knot::new(1.0, 4.0)];
    /// assert_eq!(KnotSet::normalize(raw), Err(CurveError::TooFewKnots { distinct: 2 }));
    /// ```
    pub fn normalize<I>(raw: I) -> Result<Self, CurveError>
    where
        I: IntoIterator<Item = Knot>,
    {
        let knots = average_by_x(raw);
        if knots.len() < MIN_KNOTS {
            return Err(CurveError::TooFewKnots { distinct: knots.len() });
        }
        Ok(KnotSet { knots })
    }

    pub fn len(&self) -> usize {
        self.knots.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Knot> {
        self.knots.iter()
    }

    pub fn as_slice(&self) -> &[Knot] {
        &self.knots
    }

    /// Exact match on both coordinates.
    pub fn contains(&self, knot: &Knot) -> bool {
        self.knots.contains(knot)
    }

    /// Appends `knot` and normalizes again. A knot sharing `x` with an existing one is averaged with it.
    pub(crate) fn with_knot(&self, knot: Knot) -> KnotSet {
        let knots = average_by_x(self.knots.iter().copied().chain(std::iter::once(knot)));
        KnotSet { knots }
    }

    /// Drops `knot` when it is present and more than [MIN_KNOTS] knots are left behind.
    pub(crate) fn without_knot(&self, knot: &Knot) -> Option<KnotSet> {
        if self.knots.len() <= MIN_KNOTS || !self.contains(knot) {
            return None;
        }
        let knots = self.knots.iter().copied().filter(|k| k != knot).collect();
        Some(KnotSet { knots })
    }

    /// Concatenation of both sets, knots sharing `x` across the sets are averaged.
    pub(crate) fn union(&self, other: &KnotSet) -> Result<KnotSet, CurveError> {
        KnotSet::normalize(self.knots.iter().chain(other.knots.iter()).copied())
    }

    /// Knots of `self` without an exact counterpart in `other`.
    pub(crate) fn difference(&self, other: &KnotSet) -> Result<KnotSet, CurveError> {
        let knots: Vec<Knot> = self
            .knots
            .iter()
            .copied()
            .filter(|k| !other.contains(k))
            .collect();

        if knots.len() < MIN_KNOTS {
            return Err(CurveError::TooFewKnotsAfterDifference { remaining: knots.len() });
        }
        Ok(KnotSet { knots })
    }
}

impl<'a> IntoIterator for &'a KnotSet {
    type Item = &'a Knot;
    type IntoIter = std::slice::Iter<'a, Knot>;

    fn into_iter(self) -> Self::IntoIter {
        self.knots.iter()
    }
}

fn average_by_x<I>(raw: I) -> Vec<Knot>
where
    I: IntoIterator<Item = Knot>,
{
    let mut sorted: Vec<Knot> = raw.into_iter().collect();
    // stable, so every group is summed in input order
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x));

    let mut groups: Vec<(f64, f64, usize)> = Vec::with_capacity(sorted.len());
    for knot in sorted {
        match groups.last_mut() {
            Some((x, sum, count)) if *x == knot.x => {
                *sum += knot.y;
                *count += 1;
            }
            _ => groups.push((knot.x, knot.y, 1)),
        }
    }

    groups
        .into_iter()
        .map(|(x, sum, count)| Knot::new(x, sum / count as f64))
        .collect()
}
