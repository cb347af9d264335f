//! Tangenten-Auflösung: die acht Slope-Methoden inklusive Plateau-Indirektion.

use glam::DVec2;

use crate::curve::MotionCurve;
use crate::key::MotionKey;
use crate::slope::{NextSlope, PrevSlope};

/// Toleranz-Anteil am Wertebereich der Kurve für die Clamped-Methode.
pub const CLAMP_TOLERANCE: f64 = 0.005;

/// Key-Seite, auf die sich eine Tangente bezieht.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Prev,
    Next,
}

impl MotionCurve {
    /// Berechnet beide Tangenten eines Keys neu, falls sie dirty sind.
    pub(crate) fn resolve_tangents(&mut self, index: usize) {
        if !self.key(index).tangents_dirty() {
            return;
        }

        let prev_tangent = self.side_tangent(index, Side::Prev);
        let next_tangent = self.side_tangent(index, Side::Next);
        self.write_tangents(index, prev_tangent, next_tangent);
    }

    /// Endgültige (gewichtete) Tangente einer Key-Seite.
    ///
    /// Reine Berechnung ohne Cache-Zugriff auf den Key selbst; liest nur
    /// Positionen der Nachbarn sowie, im Plateau-Fall, genau eine bereits
    /// auflösbare Nachbar-Tangente (Indirektionstiefe 1).
    fn side_tangent(&self, index: usize, side: Side) -> DVec2 {
        let key = self.key(index);
        let raw = match side {
            Side::Prev => match key.prev_slope() {
                PrevSlope::Manual => self.manual_tangent(index, side),
                PrevSlope::Linear => self.linear_tangent(index, side),
                PrevSlope::Flat => self.flat_tangent(index, side),
                PrevSlope::Smooth => self.smooth_tangent(index, side),
                PrevSlope::Clamped => self.clamped_tangent(index, side),
                PrevSlope::Plateau => self.plateau_tangent(index, side),
            },
            Side::Next => match key.next_slope() {
                NextSlope::Manual => self.manual_tangent(index, side),
                NextSlope::Linear => self.linear_tangent(index, side),
                NextSlope::Flat => self.flat_tangent(index, side),
                NextSlope::Smooth => self.smooth_tangent(index, side),
                NextSlope::Clamped => self.clamped_tangent(index, side),
                NextSlope::Plateau => self.plateau_tangent(index, side),
                // Treppenstufen interpolieren nicht, es gibt keine Tangente
                NextSlope::Stepped | NextSlope::SteppedNext => DVec2::ZERO,
            },
        };

        let weight = match side {
            Side::Prev => key.prev_weight(),
            Side::Next => key.next_weight(),
        };
        raw * weight
    }

    /// Einheitsvektor aus dem gespeicherten Winkel, skaliert mit der
    /// Zeitspanne zum Nachbarn dieser Seite (falls vorhanden).
    fn manual_tangent(&self, index: usize, side: Side) -> DVec2 {
        let key = self.key(index);
        let (angle, neighbor) = match side {
            Side::Prev => (key.prev_angle_and_weight().x, self.neighbor(index, Side::Prev)),
            Side::Next => (key.next_angle_and_weight().x, self.neighbor(index, Side::Next)),
        };
        let unit = DVec2::from_angle(angle);
        match neighbor {
            Some(n) => unit * (key.time() - n.time()).abs(),
            None => unit,
        }
    }

    /// Rohe Sekante zum Nachbarn dieser Seite.
    fn linear_tangent(&self, index: usize, side: Side) -> DVec2 {
        let key = self.key(index);
        match (side, self.neighbor(index, side)) {
            (Side::Prev, Some(prev)) => key.time_and_value() - prev.time_and_value(),
            (Side::Next, Some(next)) => next.time_and_value() - key.time_and_value(),
            (_, None) => DVec2::ZERO,
        }
    }

    /// Zeitspanne zum Nachbarn dieser Seite, Wertkomponente 0.
    fn flat_tangent(&self, index: usize, side: Side) -> DVec2 {
        let key = self.key(index);
        match (side, self.neighbor(index, side)) {
            (Side::Prev, Some(prev)) => DVec2::new(key.time() - prev.time(), 0.0),
            (Side::Next, Some(next)) => DVec2::new(next.time() - key.time(), 0.0),
            (_, None) => DVec2::ZERO,
        }
    }

    /// Geglättete Sekante über beide Nachbarn, pro Seite mit der lokalen
    /// Zeitspanne skaliert. Deckungsgleiche Nachbarn (Zeitspanne 0) ergeben
    /// eine Nulltangente; mit nur einem Nachbarn bleibt dessen Sekante.
    fn smooth_tangent(&self, index: usize, side: Side) -> DVec2 {
        let key = self.key(index);
        let prev = self.neighbor(index, Side::Prev);
        let next = self.neighbor(index, Side::Next);
        match (prev, next) {
            (Some(prev), Some(next)) => {
                let delta = next.time_and_value() - prev.time_and_value();
                let span = delta.x.abs();
                if span == 0.0 {
                    DVec2::ZERO
                } else {
                    let direction = delta / span;
                    match side {
                        Side::Prev => direction * (key.time() - prev.time()),
                        Side::Next => direction * (next.time() - key.time()),
                    }
                }
            }
            (None, Some(next)) => next.time_and_value() - key.time_and_value(),
            (Some(prev), None) => key.time_and_value() - prev.time_and_value(),
            (None, None) => DVec2::ZERO,
        }
    }

    /// Flach, sobald einer der beiden Nachbarwerte innerhalb der Toleranz
    /// am eigenen Wert liegt, sonst Smooth.
    fn clamped_tangent(&self, index: usize, side: Side) -> DVec2 {
        let key = self.key(index);
        let tolerance = (self.max_value() - self.min_value()) * CLAMP_TOLERANCE;
        let near = |neighbor: Option<&MotionKey>| {
            neighbor.is_some_and(|n| (n.value() - key.value()).abs() <= tolerance)
        };
        if near(self.neighbor(index, Side::Prev)) || near(self.neighbor(index, Side::Next)) {
            self.flat_tangent(index, side)
        } else {
            self.smooth_tangent(index, side)
        }
    }

    /// Flach an lokalen Extrema (gemessen an den effektiven Nachbarwerten),
    /// sonst Smooth. Randkeys fallen auf Flat bzw. Nulltangente zurück.
    fn plateau_tangent(&self, index: usize, side: Side) -> DVec2 {
        if index == 0 || index + 1 >= self.key_count() {
            return self.flat_tangent(index, side);
        }

        let value = self.key(index).value();
        let prev_effective = self.effective_value_from_prev(index);
        let next_effective = self.effective_value_from_next(index);
        let is_extremum = (prev_effective > value && next_effective > value)
            || (prev_effective < value && next_effective < value);
        if is_extremum {
            self.flat_tangent(index, side)
        } else {
            self.smooth_tangent(index, side)
        }
    }

    /// Effektiver Wert knapp hinter dem Vorgänger, in Richtung dieses Keys.
    ///
    /// Ist die Next-Seite des Vorgängers selbst Plateau, wird dessen roher
    /// Wert verwendet; damit endet jede Plateau-Kette nach genau einer
    /// Indirektion. Andernfalls wird entlang seiner auslaufenden Tangente
    /// projiziert.
    fn effective_value_from_prev(&self, index: usize) -> f64 {
        let prev = self.key(index - 1);
        if prev.next_slope() == NextSlope::Plateau {
            prev.value()
        } else {
            prev.value() + self.resolved_side_tangent(index - 1, Side::Next).y / 3.0
        }
    }

    /// Effektiver Wert knapp vor dem Nachfolger, in Richtung dieses Keys.
    fn effective_value_from_next(&self, index: usize) -> f64 {
        let next = self.key(index + 1);
        if next.prev_slope() == PrevSlope::Plateau {
            next.value()
        } else {
            next.value() - self.resolved_side_tangent(index + 1, Side::Prev).y / 3.0
        }
    }

    /// Tangente einer Nachbar-Seite: aus dem Cache wenn gültig, sonst frisch
    /// berechnet. Die Aufrufer stellen sicher, dass die betroffene Seite
    /// nicht Plateau ist; die Berechnung liest dann nur Positionen.
    fn resolved_side_tangent(&self, index: usize, side: Side) -> DVec2 {
        let key = self.key(index);
        if !key.tangents_dirty() {
            return match side {
                Side::Prev => key.prev_tangent,
                Side::Next => key.next_tangent,
            };
        }
        self.side_tangent(index, side)
    }

    fn neighbor(&self, index: usize, side: Side) -> Option<&MotionKey> {
        match side {
            Side::Prev => index.checked_sub(1).map(|i| self.key(i)),
            Side::Next => self.keys().get(index + 1),
        }
    }

    fn write_tangents(&mut self, index: usize, prev_tangent: DVec2, next_tangent: DVec2) {
        let key = self.key_mut(index);
        key.prev_tangent = prev_tangent;
        key.next_tangent = next_tangent;
        key.tangents_dirty = false;
    }
}
