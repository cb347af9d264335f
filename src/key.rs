//! Ein einzelner Keyframe einer MotionCurve.

use glam::DVec2;

use crate::cubic::CubicCoefficients1D;
use crate::slope::{NextSlope, PrevSlope};

/// Gecachte Kubik-Koeffizienten für das Segment zwischen einem Key und
/// seinem Nachfolger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentCoefficients {
    /// Wert-Kubik über dem Segment-Parameter u
    pub value: CubicCoefficients1D,
    /// Parametrische Zeit-Kubik; `None` wenn beide angrenzenden Gewichte
    /// 1.0 sind und die Zeit damit linear im Parameter bleibt
    pub time: Option<CubicCoefficients1D>,
}

/// Keyframe: Stützpunkt (Zeit, Wert) plus Tangenten-Verhalten je Seite.
///
/// Die Nachbarschaft ergibt sich aus der nach Zeit sortierten Key-Liste der
/// [`MotionCurve`](crate::MotionCurve); der Key selbst hält keine Verweise.
/// Tangenten und Segment-Koeffizienten sind Caches und nur gültig solange
/// `tangents_dirty` nicht gesetzt ist.
#[derive(Debug, Clone)]
pub struct MotionKey {
    pub(crate) time_and_value: DVec2,
    pub(crate) prev_angle_and_weight: DVec2,
    pub(crate) next_angle_and_weight: DVec2,
    pub(crate) prev_slope: PrevSlope,
    pub(crate) next_slope: NextSlope,
    pub(crate) tangents_dirty: bool,
    pub(crate) prev_tangent: DVec2,
    pub(crate) next_tangent: DVec2,
    pub(crate) segment: Option<SegmentCoefficients>,
}

impl MotionKey {
    pub(crate) fn new(time: f64, value: f64) -> Self {
        Self {
            time_and_value: DVec2::new(time, value),
            prev_angle_and_weight: DVec2::new(0.0, 1.0),
            next_angle_and_weight: DVec2::new(0.0, 1.0),
            prev_slope: PrevSlope::default(),
            next_slope: NextSlope::default(),
            tangents_dirty: true,
            prev_tangent: DVec2::ZERO,
            next_tangent: DVec2::ZERO,
            segment: None,
        }
    }

    /// Zeit-Koordinate (Sortierschlüssel innerhalb der Kurve).
    pub fn time(&self) -> f64 {
        self.time_and_value.x
    }

    /// Gespeicherter Wert.
    pub fn value(&self) -> f64 {
        self.time_and_value.y
    }

    /// (Zeit, Wert) als Vektor.
    pub fn time_and_value(&self) -> DVec2 {
        self.time_and_value
    }

    /// (Winkel in Radiant, Gewicht) der Prev-Seite.
    pub fn prev_angle_and_weight(&self) -> DVec2 {
        self.prev_angle_and_weight
    }

    /// (Winkel in Radiant, Gewicht) der Next-Seite.
    pub fn next_angle_and_weight(&self) -> DVec2 {
        self.next_angle_and_weight
    }

    /// Gewicht der Prev-Seite (skaliert die Tangenten-Länge).
    pub fn prev_weight(&self) -> f64 {
        self.prev_angle_and_weight.y
    }

    /// Gewicht der Next-Seite (skaliert die Tangenten-Länge).
    pub fn next_weight(&self) -> f64 {
        self.next_angle_and_weight.y
    }

    /// Slope-Methode der Prev-Seite.
    pub fn prev_slope(&self) -> PrevSlope {
        self.prev_slope
    }

    /// Slope-Methode der Next-Seite.
    pub fn next_slope(&self) -> NextSlope {
        self.next_slope
    }

    /// `true` solange die Tangenten-Caches ungültig sind.
    pub fn tangents_dirty(&self) -> bool {
        self.tangents_dirty
    }

    /// Invalidiert Tangenten- und Segment-Cache dieses Keys.
    pub(crate) fn mark_dirty(&mut self) {
        self.tangents_dirty = true;
        self.segment = None;
    }
}
