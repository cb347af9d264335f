//! Geordnete Keyframe-Sammlung mit Hermite-Segment-Auswertung.

use glam::DVec2;

use crate::cubic::CubicCoefficients1D;
use crate::key::{MotionKey, SegmentCoefficients};
use crate::slope::{NextSlope, PrevSlope, SlopeError, SlopeMethod};

/// Eindimensionale Motion-Kurve: Keyframes, streng aufsteigend nach Zeit.
///
/// Tangenten und Segment-Koeffizienten werden lazy beim ersten Lesen nach
/// einer Änderung neu berechnet. Das Dirty-Flag und der zugehörige Cache
/// werden nicht atomar aktualisiert; gleichzeitiges Mutieren und Lesen aus
/// mehreren Threads braucht externe Synchronisation.
#[derive(Debug, Clone, Default)]
pub struct MotionCurve {
    /// Keys, streng aufsteigend nach Zeit, keine Duplikate
    keys: Vec<MotionKey>,
    min_value: f64,
    max_value: f64,
}

impl MotionCurve {
    /// Erstellt eine leere Kurve.
    pub fn new() -> Self {
        Self::default()
    }

    /// Anzahl der Keyframes.
    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    /// `true` wenn die Kurve keine Keyframes enthält.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Read-only Zugriff auf alle Keyframes (sortiert nach Zeit).
    pub fn keys(&self) -> &[MotionKey] {
        &self.keys
    }

    /// Read-only Zugriff auf einen Keyframe.
    pub fn key(&self, index: usize) -> &MotionKey {
        &self.keys[index]
    }

    pub(crate) fn key_mut(&mut self, index: usize) -> &mut MotionKey {
        &mut self.keys[index]
    }

    /// Zeit des letzten Keyframes (Domänen-Ende); 0 für leere Kurven.
    pub fn length(&self) -> f64 {
        self.keys.last().map_or(0.0, MotionKey::time)
    }

    /// Kleinster Keyframe-Wert der Kurve.
    pub fn min_value(&self) -> f64 {
        self.min_value
    }

    /// Größter Keyframe-Wert der Kurve.
    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    /// Index des Keyframes mit exakt dieser Zeit.
    pub fn find_key(&self, time: f64) -> Option<usize> {
        let index = self.keys.partition_point(|k| k.time() < time);
        (index < self.keys.len() && self.keys[index].time() == time).then_some(index)
    }

    /// Speichert einen Wert an `time` und gibt den Key-Index zurück.
    ///
    /// Existiert bereits ein Keyframe mit exakt dieser Zeit, wird dessen
    /// Wert aktualisiert statt ein Duplikat einzufügen.
    pub fn store(&mut self, time: f64, value: f64) -> usize {
        debug_assert!(
            time.is_finite() && value.is_finite(),
            "Keyframe-Position muss endlich sein"
        );

        let index = self.keys.partition_point(|k| k.time() < time);
        if index < self.keys.len() && self.keys[index].time() == time {
            self.keys[index].time_and_value.y = value;
        } else {
            log::debug!("Keyframe eingefügt: t={time} v={value} (Index {index})");
            self.keys.insert(index, MotionKey::new(time, value));
        }
        self.on_position_changed(index);
        self.refresh_value_range();
        index
    }

    /// Entfernt einen Keyframe und gibt ihn zurück.
    ///
    /// Die Lücken-Nachbarn werden neu verknüpft (implizit über den Index)
    /// und ihre Tangenten-Caches invalidiert.
    pub fn remove(&mut self, index: usize) -> MotionKey {
        let removed = self.keys.remove(index);
        log::debug!("Keyframe entfernt: t={} (Index {index})", removed.time());
        if index > 0 {
            self.on_position_changed(index - 1);
        }
        if index < self.keys.len() {
            self.on_position_changed(index);
        }
        self.refresh_value_range();
        removed
    }

    /// Setzt den Wert eines bestehenden Keyframes.
    pub fn set_value(&mut self, index: usize, value: f64) {
        debug_assert!(value.is_finite(), "Keyframe-Wert muss endlich sein");
        self.keys[index].time_and_value.y = value;
        self.on_position_changed(index);
        self.refresh_value_range();
    }

    /// Setzt die Prev-Slope-Methode eines Keyframes.
    pub fn set_prev_slope(&mut self, index: usize, slope: PrevSlope) {
        self.keys[index].prev_slope = slope;
        self.on_position_changed(index);
    }

    /// Setzt die Next-Slope-Methode eines Keyframes.
    pub fn set_next_slope(&mut self, index: usize, slope: NextSlope) {
        self.keys[index].next_slope = slope;
        self.on_position_changed(index);
    }

    /// Setzt beide Slope-Methoden über die gemeinsame Konfigurations-Enum.
    ///
    /// Schlägt fehl (und lässt den Key unverändert), wenn `prev` eine der
    /// Treppen-Methoden ist.
    pub fn set_slope_methods(
        &mut self,
        index: usize,
        prev: SlopeMethod,
        next: SlopeMethod,
    ) -> Result<(), SlopeError> {
        let prev = PrevSlope::try_from(prev)?;
        self.keys[index].prev_slope = prev;
        self.keys[index].next_slope = NextSlope::from(next);
        self.on_position_changed(index);
        Ok(())
    }

    /// Setzt Winkel (Radiant) und Gewicht der Prev-Seite.
    pub fn set_prev_dir_and_weight(&mut self, index: usize, angle: f64, weight: f64) {
        debug_assert!(weight >= 0.0, "Tangenten-Gewicht muss >= 0 sein");
        self.keys[index].prev_angle_and_weight = DVec2::new(angle, weight);
        self.on_position_changed(index);
    }

    /// Setzt Winkel (Radiant) und Gewicht der Next-Seite.
    pub fn set_next_dir_and_weight(&mut self, index: usize, angle: f64, weight: f64) {
        debug_assert!(weight >= 0.0, "Tangenten-Gewicht muss >= 0 sein");
        self.keys[index].next_angle_and_weight = DVec2::new(angle, weight);
        self.on_position_changed(index);
    }

    /// Einlaufende Tangente eines Keyframes (berechnet sie bei Bedarf neu).
    pub fn prev_tangent(&mut self, index: usize) -> DVec2 {
        self.resolve_tangents(index);
        self.keys[index].prev_tangent
    }

    /// Auslaufende Tangente eines Keyframes (berechnet sie bei Bedarf neu).
    pub fn next_tangent(&mut self, index: usize) -> DVec2 {
        self.resolve_tangents(index);
        self.keys[index].next_tangent
    }

    /// Wert der Kurve an `time`.
    ///
    /// Außerhalb der Domäne wird auf den Randwert geklemmt (keine
    /// Extrapolation). Eine Kurve mit genau einem Key liefert dessen Wert;
    /// die Abfrage einer leeren Kurve ist eine Vertragsverletzung des
    /// Aufrufers und liefert 0.
    pub fn evaluate(&mut self, time: f64) -> f64 {
        let Some(last) = self.keys.last() else {
            log::warn!("evaluate() auf leerer MotionCurve");
            return 0.0;
        };
        if self.keys.len() == 1 || time >= last.time() {
            return last.value();
        }
        if time <= self.keys[0].time() {
            return self.keys[0].value();
        }

        let index = self.segment_index(time);
        if self.keys[index].time() == time {
            return self.keys[index].value();
        }
        match self.keys[index].next_slope {
            NextSlope::Stepped => self.keys[index].value(),
            NextSlope::SteppedNext => self.keys[index + 1].value(),
            _ => {
                let segment = self.segment_coefficients(index);
                let u = self.parameter(index, &segment, time);
                segment.value.evaluate(u)
            }
        }
    }

    /// Ableitung des Werts nach der Zeit an `time`.
    ///
    /// Außerhalb der Domäne und auf Treppen-Segmenten 0.
    pub fn derivative(&mut self, time: f64) -> f64 {
        if self.keys.len() < 2 {
            return 0.0;
        }
        let first_time = self.keys[0].time();
        let last_time = self.keys[self.keys.len() - 1].time();
        if time < first_time || time > last_time {
            return 0.0;
        }

        let index = self.segment_index(time);
        match self.keys[index].next_slope {
            NextSlope::Stepped | NextSlope::SteppedNext => 0.0,
            _ => {
                let segment = self.segment_coefficients(index);
                let u = self.parameter(index, &segment, time);
                let span = self.keys[index + 1].time() - self.keys[index].time();
                match segment.time {
                    None => segment.value.derivative(u) / span,
                    Some(time_cubic) => {
                        let du = time_cubic.derivative(u);
                        if du.abs() < f64::EPSILON {
                            0.0
                        } else {
                            segment.value.derivative(u) / du
                        }
                    }
                }
            }
        }
    }

    /// Index des Segments, das `time` überdeckt (Start-Key des Segments).
    fn segment_index(&self, time: f64) -> usize {
        let upper = self.keys.partition_point(|k| k.time() <= time);
        upper.saturating_sub(1).min(self.keys.len().saturating_sub(2))
    }

    /// Lokaler Segment-Parameter u ∈ [0, 1] für `time`.
    fn parameter(&self, index: usize, segment: &SegmentCoefficients, time: f64) -> f64 {
        let start = self.keys[index].time();
        let span = self.keys[index + 1].time() - start;
        let guess = (time - start) / span;
        match segment.time {
            None => guess,
            Some(time_cubic) => time_cubic.find_u(time, guess),
        }
    }

    /// Liefert die Segment-Koeffizienten ab Key `index`, berechnet sie bei
    /// Bedarf neu (inklusive der Tangenten beider Endpunkte).
    fn segment_coefficients(&mut self, index: usize) -> SegmentCoefficients {
        self.resolve_tangents(index);
        self.resolve_tangents(index + 1);
        match self.keys[index].segment {
            Some(segment) => segment,
            None => {
                let segment = self.build_coefficients(index);
                self.keys[index].segment = Some(segment);
                segment
            }
        }
    }

    /// Baut die Kubik-Koeffizienten für das Segment `[index, index + 1]`.
    ///
    /// Setzt voraus, dass die Tangenten beider Endpunkte aufgelöst sind.
    fn build_coefficients(&self, index: usize) -> SegmentCoefficients {
        let key = &self.keys[index];
        let next = &self.keys[index + 1];

        let value = CubicCoefficients1D::from_hermite(
            key.value(),
            next.value(),
            key.next_tangent.y,
            next.prev_tangent.y,
        );

        // Standard-Gewichte: Zeitachse bleibt linear im Parameter, die
        // Zeit-Kubik entfällt
        let time = if key.next_weight() == 1.0 && next.prev_weight() == 1.0 {
            None
        } else {
            let span3 = (next.time() - key.time()) * 3.0;
            let mut out_time = key.next_tangent.x;
            let mut in_time = next.prev_tangent.x;
            // Begrenzung auf 3·Span hält die Zeit-Parametrisierung monoton;
            // die Wert-Komponenten bleiben dabei unverändert
            if out_time > span3 {
                out_time = span3;
            }
            if in_time > span3 {
                in_time = span3;
            }
            Some(CubicCoefficients1D::from_hermite(
                key.time(),
                next.time(),
                out_time,
                in_time,
            ))
        };

        SegmentCoefficients { value, time }
    }

    /// Invalidiert die Caches rund um einen geänderten Keyframe.
    ///
    /// Reichweite: der Key selbst, beide direkten Nachbarn, und zweitgradige
    /// Nachbarn deren zugewandte Seite Plateau ist (deren Tangente liest die
    /// Tangente des direkten Nachbarn).
    pub(crate) fn on_position_changed(&mut self, index: usize) {
        self.mark_tangents_dirty(index);
        if index > 0 {
            self.mark_tangents_dirty(index - 1);
            if index > 1 && self.keys[index - 2].next_slope == NextSlope::Plateau {
                self.mark_tangents_dirty(index - 2);
            }
        }
        if index + 1 < self.keys.len() {
            self.mark_tangents_dirty(index + 1);
            if index + 2 < self.keys.len()
                && self.keys[index + 2].prev_slope == PrevSlope::Plateau
            {
                self.mark_tangents_dirty(index + 2);
            }
        }
    }

    /// Invalidiert Tangenten eines Keys sowie die Segmente, die seine
    /// Tangenten als Randbedingung verwenden.
    fn mark_tangents_dirty(&mut self, index: usize) {
        self.keys[index].mark_dirty();
        if index > 0 {
            self.keys[index - 1].segment = None;
        }
    }

    /// Berechnet min/max über alle Keyframe-Werte neu.
    fn refresh_value_range(&mut self) {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for key in &self.keys {
            min = min.min(key.value());
            max = max.max(key.value());
        }
        if self.keys.is_empty() {
            min = 0.0;
            max = 0.0;
        }
        self.min_value = min;
        self.max_value = max;
    }
}
