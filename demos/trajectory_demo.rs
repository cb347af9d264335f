//! Fährt einen Slalom-Pfad ab und druckt pro Tick die Spur-Distanzen,
//! wie sie ein Encoder-Paar eines Differentialantriebs sehen würde.
//!
//! Start: `cargo run --example trajectory_demo`

use anyhow::Result;
use motion_profile_engine::{NextSlope, Path2D, PrevSlope};

fn main() -> Result<()> {
    env_logger::init();

    let mut path = Path2D::new();
    path.set_track_width(2.0);

    // Slalom: 16 Einheiten geradeaus mit zwei Ausweichbögen
    path.add_point(0.0, 0.0, 0.0);
    path.add_point(1.0, 4.0, 2.0);
    path.add_point(2.0, 8.0, -2.0);
    path.add_point(3.0, 12.0, 1.0);
    path.add_point(4.0, 16.0, 0.0);

    // Plateau auf der y-Kurve verhindert Überschwingen an den Umkehrpunkten
    for i in 0..path.y_curve().key_count() {
        path.y_curve_mut().set_prev_slope(i, PrevSlope::Plateau);
        path.y_curve_mut().set_next_slope(i, NextSlope::Plateau);
    }

    println!("{:>6} {:>18} {:>10} {:>10}", "t", "Position", "links", "rechts");

    let ticks = 40;
    let mut left_total = 0.0f64;
    let mut right_total = 0.0f64;
    for i in 0..=ticks {
        let t = path.duration() * i as f64 / ticks as f64;
        let position = path.position(t);
        let left = path.left_delta(t);
        let right = path.right_delta(t);
        left_total += left;
        right_total += right;
        println!(
            "{t:>6.2} ({:>7.3}, {:>7.3}) {left:>10.4} {right:>10.4}",
            position.x, position.y
        );
    }

    println!();
    println!("Gesamtweg links:  {left_total:.3}");
    println!("Gesamtweg rechts: {right_total:.3}");

    Ok(())
}
