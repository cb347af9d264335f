//! Slope-Methoden: Tangenten-Konstruktionsregeln pro Key-Seite.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Gemeinsame Konfigurations-Aufzählung aller Slope-Methoden.
///
/// `Stepped` und `SteppedNext` sind nur für die Next-Seite eines Keys
/// definiert; die Zuweisung an eine Prev-Seite schlägt fehl (kein stilles
/// Umbiegen). Die typisierten Seiten-Enums [`PrevSlope`] und [`NextSlope`]
/// machen den Fehlerfall auf der API-Ebene gar nicht erst darstellbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SlopeMethod {
    /// Tangente aus gespeichertem Winkel
    Manual,
    /// Rohe Sekante zum Nachbarn
    Linear,
    /// Keine Wertänderung (Steigung 0)
    Flat,
    /// Geglättete Sekante über beide Nachbarn
    #[default]
    Smooth,
    /// Smooth, aber flach sobald ein Nachbarwert innerhalb der Toleranz liegt
    Clamped,
    /// Flach an lokalen Extrema (Überschwing-Vermeidung), sonst Smooth
    Plateau,
    /// Treppenstufe: Wert wird bis zum nächsten Key gehalten
    Stepped,
    /// Treppenstufe: Wert springt sofort auf den nächsten Key
    SteppedNext,
}

/// Slope-Methode für die Prev-Seite (einlaufende Tangente) eines Keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PrevSlope {
    /// Tangente aus gespeichertem Winkel
    Manual,
    /// Rohe Sekante zum Vorgänger
    Linear,
    /// Keine Wertänderung (Steigung 0)
    Flat,
    /// Geglättete Sekante über beide Nachbarn
    #[default]
    Smooth,
    /// Smooth, aber flach sobald ein Nachbarwert innerhalb der Toleranz liegt
    Clamped,
    /// Flach an lokalen Extrema, sonst Smooth
    Plateau,
}

/// Slope-Methode für die Next-Seite (auslaufende Tangente) eines Keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NextSlope {
    /// Tangente aus gespeichertem Winkel
    Manual,
    /// Rohe Sekante zum Nachfolger
    Linear,
    /// Keine Wertänderung (Steigung 0)
    Flat,
    /// Geglättete Sekante über beide Nachbarn
    #[default]
    Smooth,
    /// Smooth, aber flach sobald ein Nachbarwert innerhalb der Toleranz liegt
    Clamped,
    /// Flach an lokalen Extrema, sonst Smooth
    Plateau,
    /// Treppenstufe: Wert wird bis zum nächsten Key gehalten
    Stepped,
    /// Treppenstufe: Wert springt sofort auf den nächsten Key
    SteppedNext,
}

/// Fehler bei der Zuweisung einer Slope-Methode.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SlopeError {
    /// Treppen-Methoden beschreiben das Segment hinter einem Key und sind
    /// deshalb nur für die Next-Seite definiert.
    #[error("{0:?} ist als Prev-Slope ungültig (nur für die Next-Seite definiert)")]
    InvalidPrevAssignment(SlopeMethod),
}

impl TryFrom<SlopeMethod> for PrevSlope {
    type Error = SlopeError;

    fn try_from(method: SlopeMethod) -> Result<Self, SlopeError> {
        match method {
            SlopeMethod::Manual => Ok(Self::Manual),
            SlopeMethod::Linear => Ok(Self::Linear),
            SlopeMethod::Flat => Ok(Self::Flat),
            SlopeMethod::Smooth => Ok(Self::Smooth),
            SlopeMethod::Clamped => Ok(Self::Clamped),
            SlopeMethod::Plateau => Ok(Self::Plateau),
            SlopeMethod::Stepped | SlopeMethod::SteppedNext => {
                Err(SlopeError::InvalidPrevAssignment(method))
            }
        }
    }
}

impl From<SlopeMethod> for NextSlope {
    fn from(method: SlopeMethod) -> Self {
        match method {
            SlopeMethod::Manual => Self::Manual,
            SlopeMethod::Linear => Self::Linear,
            SlopeMethod::Flat => Self::Flat,
            SlopeMethod::Smooth => Self::Smooth,
            SlopeMethod::Clamped => Self::Clamped,
            SlopeMethod::Plateau => Self::Plateau,
            SlopeMethod::Stepped => Self::Stepped,
            SlopeMethod::SteppedNext => Self::SteppedNext,
        }
    }
}

impl From<PrevSlope> for SlopeMethod {
    fn from(slope: PrevSlope) -> Self {
        match slope {
            PrevSlope::Manual => Self::Manual,
            PrevSlope::Linear => Self::Linear,
            PrevSlope::Flat => Self::Flat,
            PrevSlope::Smooth => Self::Smooth,
            PrevSlope::Clamped => Self::Clamped,
            PrevSlope::Plateau => Self::Plateau,
        }
    }
}

impl From<NextSlope> for SlopeMethod {
    fn from(slope: NextSlope) -> Self {
        match slope {
            NextSlope::Manual => Self::Manual,
            NextSlope::Linear => Self::Linear,
            NextSlope::Flat => Self::Flat,
            NextSlope::Smooth => Self::Smooth,
            NextSlope::Clamped => Self::Clamped,
            NextSlope::Plateau => Self::Plateau,
            NextSlope::Stepped => Self::Stepped,
            NextSlope::SteppedNext => Self::SteppedNext,
        }
    }
}
