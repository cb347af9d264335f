//! Kubische Koeffizienten in Hermite-Form für eine einzelne Segment-Achse.

/// Koeffizienten eines kubischen Polynoms `a·u³ + b·u² + c·u + d` über dem
/// lokalen Segment-Parameter u ∈ [0, 1].
///
/// Aufgebaut aus der Hermite-Form: Endwerte `p1`/`p4` und Tangenten `r1`
/// (auslaufend bei u = 0) und `r4` (einlaufend bei u = 1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicCoefficients1D {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
}

impl CubicCoefficients1D {
    /// Baut die Polynom-Koeffizienten aus Hermite-Randbedingungen auf.
    pub fn from_hermite(p1: f64, p4: f64, r1: f64, r4: f64) -> Self {
        Self {
            a: 2.0 * p1 - 2.0 * p4 + r1 + r4,
            b: -3.0 * p1 + 3.0 * p4 - 2.0 * r1 - r4,
            c: r1,
            d: p1,
        }
    }

    /// Wert des Polynoms an u (Horner-Schema).
    pub fn evaluate(&self, u: f64) -> f64 {
        ((self.a * u + self.b) * u + self.c) * u + self.d
    }

    /// Ableitung des Polynoms nach u.
    pub fn derivative(&self, u: f64) -> f64 {
        (3.0 * self.a * u + 2.0 * self.b) * u + self.c
    }

    /// Invertiert das Polynom: sucht u ∈ [0, 1] mit `evaluate(u) ≈ target`.
    ///
    /// Newton-Iteration ab `guess`, Bisektion als Fallback. Setzt ein auf
    /// [0, 1] monoton steigendes Polynom voraus; die Tangenten-Begrenzung
    /// beim Koeffizienten-Aufbau stellt das für Zeit-Kubiken sicher.
    pub fn find_u(&self, target: f64, guess: f64) -> f64 {
        const TOLERANCE: f64 = 1e-10;
        const MAX_NEWTON_STEPS: usize = 16;

        let mut u = guess.clamp(0.0, 1.0);
        for _ in 0..MAX_NEWTON_STEPS {
            let error = self.evaluate(u) - target;
            if error.abs() <= TOLERANCE {
                return u;
            }
            let slope = self.derivative(u);
            if slope.abs() < f64::EPSILON {
                break;
            }
            u = (u - error / slope).clamp(0.0, 1.0);
        }

        let (mut lo, mut hi) = (0.0f64, 1.0f64);
        for _ in 0..64 {
            let mid = 0.5 * (lo + hi);
            if self.evaluate(mid) < target {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        0.5 * (lo + hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_hermite_endpoints_exact() {
        let cubic = CubicCoefficients1D::from_hermite(2.0, 7.0, 1.5, -0.5);
        assert_relative_eq!(cubic.evaluate(0.0), 2.0);
        assert_relative_eq!(cubic.evaluate(1.0), 7.0);
    }

    #[test]
    fn test_hermite_tangents_at_endpoints() {
        let cubic = CubicCoefficients1D::from_hermite(0.0, 1.0, 3.0, 0.25);
        assert_relative_eq!(cubic.derivative(0.0), 3.0);
        assert_relative_eq!(cubic.derivative(1.0), 0.25);
    }

    #[test]
    fn test_linear_case_is_straight() {
        // p1=0, p4=1 mit Sekanten-Tangenten 1 ergibt exakt u
        let cubic = CubicCoefficients1D::from_hermite(0.0, 1.0, 1.0, 1.0);
        for i in 0..=10 {
            let u = i as f64 / 10.0;
            assert_relative_eq!(cubic.evaluate(u), u, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_find_u_roundtrip() {
        let cubic = CubicCoefficients1D::from_hermite(1.0, 3.0, 0.5, 4.0);
        for i in 0..=20 {
            let u = i as f64 / 20.0;
            let target = cubic.evaluate(u);
            let found = cubic.find_u(target, 0.5);
            assert_relative_eq!(cubic.evaluate(found), target, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_find_u_clamps_guess() {
        let cubic = CubicCoefficients1D::from_hermite(0.0, 10.0, 10.0, 10.0);
        let u = cubic.find_u(5.0, 17.0);
        assert!((0.0..=1.0).contains(&u));
        assert_relative_eq!(cubic.evaluate(u), 5.0, epsilon = 1e-8);
    }
}
