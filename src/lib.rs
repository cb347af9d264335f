//! `motion_profile_engine`: Keyframe-basierte Motion-Profile für
//! Differentialantrieb-Fahrzeuge.
//!
//! Aus wenigen von Hand gesetzten Keyframes entstehen stetig
//! differenzierbare Bewegungskurven:
//! - Tangenten-Auflösung pro Key-Seite (acht Slope-Methoden inklusive
//!   Plateau mit Extremum-Erkennung)
//! - Stückweise kubische Hermite-Auswertung mit Lazy-Caching, bei
//!   gewichteten Tangenten mit parametrischer Zeit-Kubik
//! - Pfad-Komposition zweier Kurven zu einer 2D-Trajektorie mit linker und
//!   rechter Spur und vorzeichenbehafteten Distanz-Inkrementen pro Tick
//!
//! # Beispiel
//! ```
//! use motion_profile_engine::Path2D;
//!
//! let mut path = Path2D::new();
//! path.add_point(0.0, 0.0, 0.0);
//! path.add_point(1.0, 4.0, 2.0);
//! path.add_point(2.0, 8.0, 0.0);
//!
//! let center = path.position(0.5);
//! let left = path.left_delta(0.5);
//! assert!(center.x > 0.0 && left == 0.0);
//! ```

pub mod cubic;
pub mod curve;
pub mod key;
pub mod path;
pub mod slope;
pub mod tangent;

pub use cubic::CubicCoefficients1D;
pub use curve::MotionCurve;
pub use key::{MotionKey, SegmentCoefficients};
pub use path::{DEFAULT_TRACK_WIDTH, Path2D, Traversal};
pub use slope::{NextSlope, PrevSlope, SlopeError, SlopeMethod};
pub use tangent::CLAMP_TOLERANCE;
