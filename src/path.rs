//! 2D-Trajektorie aus zwei gekoppelten MotionCurves mit Links/Rechts-Spuren.

use glam::DVec2;

use crate::curve::MotionCurve;

/// Standard-Spurbreite in Längeneinheiten (28 Zoll in Fuß).
pub const DEFAULT_TRACK_WIDTH: f64 = 28.0 / 12.0;

/// Abbildung der Abfragezeit auf den Parameter der Positionskurven.
#[derive(Debug, Clone, Default)]
pub enum Traversal {
    /// Abfragezeit wird direkt als Kurvenparameter verwendet
    #[default]
    Direct,
    /// Ease-Kurve bildet die Zeit auf einen Pfad-Anteil in [0, 1] ab,
    /// skaliert mit [`Path2D::duration`]
    Eased(MotionCurve),
}

/// 2D-Pfad für ein Differentialantriebs-Fahrzeug.
///
/// Zwei MotionCurves über derselben Zeitachse liefern die x/y-Position;
/// daraus werden Mittellinie, linke und rechte Spur sowie inkrementelle
/// Spur-Distanzen abgeleitet.
///
/// Die Delta-Methoden halten Zustand über Aufrufe hinweg und setzen monoton
/// nicht-fallende Abfragezeiten eines einzelnen Aufrufers voraus; Abfragen
/// außer der Reihe liefern bedeutungslose Vorzeichen (kein Absturz).
#[derive(Debug, Clone)]
pub struct Path2D {
    x_curve: MotionCurve,
    y_curve: MotionCurve,
    traversal: Traversal,
    track_width: f64,
    last_center: Option<DVec2>,
    last_left: Option<DVec2>,
    last_right: Option<DVec2>,
}

impl Path2D {
    /// Erstellt einen leeren Pfad mit Standard-Spurbreite.
    pub fn new() -> Self {
        Self {
            x_curve: MotionCurve::new(),
            y_curve: MotionCurve::new(),
            traversal: Traversal::default(),
            track_width: DEFAULT_TRACK_WIDTH,
            last_center: None,
            last_left: None,
            last_right: None,
        }
    }

    /// Fügt einen Stützpunkt (x, y) an `time` in beide Kurven ein.
    pub fn add_point(&mut self, time: f64, x: f64, y: f64) {
        self.x_curve.store(time, x);
        self.y_curve.store(time, y);
    }

    /// Fügt einen Stützpunkt als Vektor an `time` ein.
    pub fn add_vector2(&mut self, time: f64, point: DVec2) {
        self.add_point(time, point.x, point.y);
    }

    /// Spurbreite (Abstand linke zu rechter Spur).
    pub fn track_width(&self) -> f64 {
        self.track_width
    }

    /// Setzt die Spurbreite.
    pub fn set_track_width(&mut self, track_width: f64) {
        debug_assert!(track_width >= 0.0, "Spurbreite muss >= 0 sein");
        self.track_width = track_width;
    }

    /// Aktueller Traversal-Modus.
    pub fn traversal(&self) -> &Traversal {
        &self.traversal
    }

    /// Setzt den Traversal-Modus.
    pub fn set_traversal(&mut self, traversal: Traversal) {
        self.traversal = traversal;
    }

    /// Read-only Zugriff auf die x-Kurve.
    pub fn x_curve(&self) -> &MotionCurve {
        &self.x_curve
    }

    /// Mutabler Zugriff auf die x-Kurve (Slope-Konfiguration pro Key).
    pub fn x_curve_mut(&mut self) -> &mut MotionCurve {
        &mut self.x_curve
    }

    /// Read-only Zugriff auf die y-Kurve.
    pub fn y_curve(&self) -> &MotionCurve {
        &self.y_curve
    }

    /// Mutabler Zugriff auf die y-Kurve.
    pub fn y_curve_mut(&mut self) -> &mut MotionCurve {
        &mut self.y_curve
    }

    /// Domänen-Ende: Maximum der beiden Kurvenlängen.
    pub fn duration(&self) -> f64 {
        self.x_curve.length().max(self.y_curve.length())
    }

    /// Position der Pfad-Mittellinie an `time`.
    pub fn position(&mut self, time: f64) -> DVec2 {
        let s = self.parameter(time);
        DVec2::new(self.x_curve.evaluate(s), self.y_curve.evaluate(s))
    }

    /// Tangente (Ableitungspaar) an `time`, nicht normalisiert.
    pub fn tangent(&mut self, time: f64) -> DVec2 {
        let s = self.parameter(time);
        DVec2::new(self.x_curve.derivative(s), self.y_curve.derivative(s))
    }

    /// Position seitlich der Mittellinie, `offset` senkrecht zur Tangente.
    ///
    /// Negative Offsets liegen links, positive rechts der Fahrtrichtung.
    /// Bei degenerierter Tangente (Stillstand) fällt der Offset weg.
    pub fn side_position(&mut self, time: f64, offset: f64) -> DVec2 {
        let center = self.position(time);
        let direction = self.tangent(time).normalize_or_zero();
        let perpendicular = DVec2::new(direction.y, -direction.x);
        center + perpendicular * offset
    }

    /// Position der linken Spur an `time`.
    pub fn left_position(&mut self, time: f64) -> DVec2 {
        let offset = -self.track_width / 2.0;
        self.side_position(time, offset)
    }

    /// Position der rechten Spur an `time`.
    pub fn right_position(&mut self, time: f64) -> DVec2 {
        let offset = self.track_width / 2.0;
        self.side_position(time, offset)
    }

    /// Vorzeichenbehaftete Distanz der linken Spur seit der letzten Abfrage.
    ///
    /// Der erste Aufruf merkt sich nur die Positionen und liefert 0. Danach:
    /// Betrag des Spur-Deltas, negativ wenn die Spur gegen die Bewegung der
    /// Mittellinie läuft (Modell eines vorzeichenbehafteten Encoders).
    pub fn left_delta(&mut self, time: f64) -> f64 {
        let center = self.position(time);
        let left = self.left_position(time);
        let delta = match (self.last_center, self.last_left) {
            (Some(last_center), Some(last_left)) => {
                signed_delta(center - last_center, left - last_left)
            }
            _ => 0.0,
        };
        self.last_center = Some(center);
        self.last_left = Some(left);
        delta
    }

    /// Vorzeichenbehaftete Distanz der rechten Spur seit der letzten Abfrage.
    pub fn right_delta(&mut self, time: f64) -> f64 {
        let center = self.position(time);
        let right = self.right_position(time);
        let delta = match (self.last_center, self.last_right) {
            (Some(last_center), Some(last_right)) => {
                signed_delta(center - last_center, right - last_right)
            }
            _ => 0.0,
        };
        self.last_center = Some(center);
        self.last_right = Some(right);
        delta
    }

    /// Vergisst die gemerkten Delta-Positionen (Neustart einer Fahrt).
    pub fn reset_deltas(&mut self) {
        self.last_center = None;
        self.last_left = None;
        self.last_right = None;
    }

    /// Kurvenparameter zur Abfragezeit gemäß Traversal-Modus.
    fn parameter(&mut self, time: f64) -> f64 {
        let duration = self.duration();
        match &mut self.traversal {
            Traversal::Direct => time,
            Traversal::Eased(ease) => ease.evaluate(time) * duration,
        }
    }
}

impl Default for Path2D {
    fn default() -> Self {
        Self::new()
    }
}

/// Betrag des Spur-Deltas, Vorzeichen aus der Richtung relativ zum
/// Mittellinien-Delta.
fn signed_delta(delta_center: DVec2, delta_side: DVec2) -> f64 {
    if delta_center.dot(delta_side) >= 0.0 {
        delta_side.length()
    } else {
        -delta_side.length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn straight_path() -> Path2D {
        let mut path = Path2D::new();
        path.set_track_width(2.0);
        path.add_point(0.0, 0.0, 0.0);
        path.add_point(1.0, 5.0, 0.0);
        path.add_point(2.0, 10.0, 0.0);
        path
    }

    #[test]
    fn test_position_pairs_both_curves() {
        let mut path = straight_path();
        let p = path.position(1.0);
        assert_relative_eq!(p.x, 5.0);
        assert_relative_eq!(p.y, 0.0);
    }

    #[test]
    fn test_side_positions_straddle_center() {
        let mut path = straight_path();
        // Fahrt in +x: links liegt bei +y, rechts bei -y
        let left = path.left_position(1.0);
        let right = path.right_position(1.0);
        assert_relative_eq!(left.y, 1.0, epsilon = 1e-9);
        assert_relative_eq!(right.y, -1.0, epsilon = 1e-9);
        assert_relative_eq!(left.x, 5.0, epsilon = 1e-9);
        assert_relative_eq!(right.x, 5.0, epsilon = 1e-9);
    }

    #[test]
    fn test_first_delta_is_zero() {
        let mut path = straight_path();
        assert_relative_eq!(path.left_delta(0.0), 0.0);
        let mut other = straight_path();
        assert_relative_eq!(other.right_delta(0.0), 0.0);
    }

    #[test]
    fn test_reset_deltas_forgets_state() {
        let mut path = straight_path();
        let _ = path.left_delta(0.0);
        let _ = path.left_delta(0.5);
        path.reset_deltas();
        assert_relative_eq!(path.left_delta(1.0), 0.0);
    }

    #[test]
    fn test_degenerate_tangent_collapses_offset() {
        let mut path = Path2D::new();
        path.add_point(0.0, 3.0, 4.0);
        // Ein einzelner Stützpunkt: Tangente 0, Spurposition = Mittellinie
        let left = path.left_position(0.0);
        assert_relative_eq!(left.x, 3.0);
        assert_relative_eq!(left.y, 4.0);
    }

    #[test]
    fn test_eased_traversal_maps_fraction_onto_domain() {
        let mut path = straight_path();
        let mut ease = MotionCurve::new();
        // Lineare Ease-Kurve: halbe Zeit entspricht halbem Pfad
        ease.store(0.0, 0.0);
        ease.store(4.0, 1.0);
        path.set_traversal(Traversal::Eased(ease));

        // t=2 → Anteil 0.5 → Parameter 1.0 → x=5
        let p = path.position(2.0);
        assert_relative_eq!(p.x, 5.0, epsilon = 1e-9);

        // Ende der Ease-Zeit → Pfad-Ende
        let end = path.position(4.0);
        assert_relative_eq!(end.x, 10.0, epsilon = 1e-9);
    }
}
