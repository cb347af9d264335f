//! Integrationstests für Path2D:
//! - Spur-Geometrie (Mittellinie, links/rechts)
//! - Vorzeichenbehaftete Delta-Distanzen beim Abfahren
//! - Traversal-Modi (Direct und Eased)

use approx::assert_relative_eq;
use motion_profile_engine::{MotionCurve, Path2D, Traversal, DEFAULT_TRACK_WIDTH};

/// Gerade Fahrt entlang +x mit Spurbreite 2.
fn straight_path() -> Path2D {
    let mut path = Path2D::new();
    path.set_track_width(2.0);
    for i in 0..=4 {
        let t = i as f64;
        path.add_point(t, 5.0 * t, 0.0);
    }
    path
}

/// Haarnadel: x läuft 0 → 2 → 0 bei langsam steigendem y.
/// Der Wenderadius am Scheitel ist viel kleiner als die halbe Spurbreite.
fn hairpin_path() -> Path2D {
    let mut path = Path2D::new();
    path.set_track_width(2.0);
    path.add_point(0.0, 0.0, 0.0);
    path.add_point(1.0, 2.0, 0.3);
    path.add_point(2.0, 0.0, 0.6);
    path
}

// ── Geometrie ────────────────────────────────────────────────────────────────

#[test]
fn test_default_track_width() {
    let path = Path2D::new();
    assert_relative_eq!(path.track_width(), DEFAULT_TRACK_WIDTH);
    assert_relative_eq!(DEFAULT_TRACK_WIDTH, 28.0 / 12.0);
}

#[test]
fn test_duration_covers_both_curves() {
    let mut path = Path2D::new();
    path.add_point(0.0, 0.0, 0.0);
    path.add_point(3.0, 1.0, 1.0);
    assert_relative_eq!(path.duration(), 3.0);
}

#[test]
fn test_tracks_straddle_center_at_track_width() {
    let mut path = straight_path();
    let center = path.position(2.0);
    let left = path.left_position(2.0);
    let right = path.right_position(2.0);

    // Fahrt in +x: links bei +y, rechts bei -y, Abstand = Spurbreite
    assert_relative_eq!(left.y, 1.0, epsilon = 1e-9);
    assert_relative_eq!(right.y, -1.0, epsilon = 1e-9);
    assert_relative_eq!(left.distance(right), 2.0, epsilon = 1e-9);
    assert_relative_eq!(center.y, 0.0, epsilon = 1e-9);
}

#[test]
fn test_tangent_is_unnormalized_derivative_pair() {
    let mut path = straight_path();
    let tangent = path.tangent(2.0);
    // dx/dt = 5, dy/dt = 0
    assert_relative_eq!(tangent.x, 5.0, epsilon = 1e-9);
    assert_relative_eq!(tangent.y, 0.0, epsilon = 1e-9);
}

// ── Delta-Distanzen ──────────────────────────────────────────────────────────

#[test]
fn test_forward_straight_deltas_positive_and_equal() {
    let mut left_path = straight_path();
    let mut right_path = straight_path();

    assert_relative_eq!(left_path.left_delta(0.0), 0.0);
    assert_relative_eq!(right_path.right_delta(0.0), 0.0);

    for i in 1..=10 {
        let t = i as f64 * 0.25;
        let left = left_path.left_delta(t);
        let right = right_path.right_delta(t);
        assert!(left > 0.0, "linkes Delta bei t={t}: {left}");
        assert!(right > 0.0, "rechtes Delta bei t={t}: {right}");
        assert_relative_eq!(left, right, epsilon = 1e-9);
        // 0.25 Zeiteinheiten bei 5 Einheiten/s
        assert_relative_eq!(left, 1.25, epsilon = 1e-6);
    }
}

#[test]
fn test_hairpin_inner_track_runs_backward() {
    let mut left_path = hairpin_path();
    let mut right_path = hairpin_path();

    let mut left_deltas = Vec::new();
    let mut right_deltas = Vec::new();
    let steps = 40;
    for i in 0..=steps {
        let t = 0.6 + 0.8 * i as f64 / steps as f64;
        left_deltas.push(left_path.left_delta(t));
        right_deltas.push(right_path.right_delta(t));
    }

    // Die Kurve dreht links (gegen den Uhrzeigersinn): die linke Spur ist
    // innen und muss am Scheitel rückwärts laufen
    let min_left = left_deltas.iter().cloned().fold(f64::INFINITY, f64::min);
    assert!(min_left < 0.0, "inneres Spur-Delta am Scheitel: {min_left}");

    // Die äußere Spur läuft durchgehend vorwärts
    for (i, &delta) in right_deltas.iter().enumerate().skip(1) {
        assert!(delta > 0.0, "äußeres Spur-Delta #{i}: {delta}");
    }

    // Insgesamt legt die äußere Spur mehr Weg zurück
    let left_total: f64 = left_deltas.iter().sum();
    let right_total: f64 = right_deltas.iter().sum();
    assert!(right_total > left_total);
}

#[test]
fn test_deltas_restart_after_reset() {
    let mut path = straight_path();
    let _ = path.left_delta(0.0);
    assert!(path.left_delta(1.0) > 0.0);

    path.reset_deltas();
    assert_relative_eq!(path.left_delta(2.0), 0.0);
    assert!(path.left_delta(3.0) > 0.0);
}

// ── Traversal ────────────────────────────────────────────────────────────────

#[test]
fn test_eased_traversal_tracks_fraction_curve() {
    let mut path = straight_path();

    // Lineare Ease-Kurve über 10 Zeiteinheiten
    let mut ease = MotionCurve::new();
    ease.store(0.0, 0.0);
    ease.store(10.0, 1.0);
    path.set_traversal(Traversal::Eased(ease));

    // Halbe Ease-Zeit entspricht halbem Pfad (lineare Ease-Kurve)
    let mid = path.position(5.0);
    assert_relative_eq!(mid.x, 10.0, epsilon = 1e-9);

    // Ease-Ende erreicht das Pfad-Ende
    let end = path.position(10.0);
    assert_relative_eq!(end.x, 20.0, epsilon = 1e-9);
}

#[test]
fn test_direct_traversal_is_default() {
    let path = Path2D::new();
    assert!(matches!(path.traversal(), Traversal::Direct));
}
