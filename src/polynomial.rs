/// Polynomial with coefficients in ascending power order, `coefficients[i]` multiplies `t^i`.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    coefficients: Vec<f64>,
}

impl Polynomial {

    pub fn new(coefficients: Vec<f64>) -> Self {
        Polynomial { coefficients }
    }

    pub fn evaluate(&self, t: f64) -> f64 {
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |result, coefficient| result * t + coefficient)
    }

    pub fn derivative(&self) -> Polynomial {
        let coefficients = self.coefficients
            .iter()
            .enumerate()
            .skip(1)
            .map(|(power, coefficient)| power as f64 * coefficient)
            .collect();
        Polynomial { coefficients }
    }

    /// Real roots of a quadratic `c + b*t + a*t^2`, smaller root first.
    ///
    /// Returns `None` when the polynomial is not of degree two (`a == 0` or a different
    /// number of coefficients) or when the discriminant is negative.
    pub fn quadratic_roots(&self) -> Option<[f64; 2]> {
        let [c, b, a] = self.coefficients[..] else {
            return None;
        };
        if a == 0.0 {
            return None;
        }

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let q = -0.5 * (b + b.signum() * discriminant.sqrt());
        if q == 0.0 {
            return Some([0.0, 0.0]);
        }

        let first = q / a;
        let second = c / q;
        Some([first.min(second), first.max(second)])
    }

    /// Real roots of a polynomial of degree at most two, smaller root first.
    ///
    /// A quadratic with `a == 0` is solved as the line `c + b*t`. Constants have no roots.
    pub fn real_roots(&self) -> Vec<f64> {
        if let Some(roots) = self.quadratic_roots() {
            return roots.to_vec();
        }

        let (c, b, a) = match self.coefficients[..] {
            [c, b] => (c, b, 0.0),
            [c, b, a] => (c, b, a),
            _ => return Vec::new(),
        };
        if a == 0.0 && b != 0.0 {
            vec![-c / b]
        } else {
            Vec::new()
        }
    }
}
