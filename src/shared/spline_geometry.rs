//! Reine Geometrie-Funktionen: Hermite-Kurven und 2D-Rotation.
//!
//! Layer-neutral: wird von Straßen- und Prefab-Renderer gleichermaßen genutzt.
//! Alle Positionen sind Welt-X/Z, abgelegt als `Vec2 { x, y = z }`.

use glam::Vec2;
use std::f32::consts::FRAC_PI_2;

/// Anzahl der Stützpunkte einer rekonstruierten Straßenkurve
pub const ROAD_CURVE_SAMPLES: usize = 8;

/// Berechnet einen Punkt auf einem kubischen Hermite-Segment (s ∈ [0, 1]).
///
/// `p0`/`p1`: Endpunkte, `t0`/`t1`: Tangenten an den Endpunkten.
/// Beide Achsen werden unabhängig interpoliert.
pub fn hermite(s: f32, p0: Vec2, p1: Vec2, t0: Vec2, t1: Vec2) -> Vec2 {
    let s2 = s * s;
    let s3 = s2 * s;
    let h00 = 2.0 * s3 - 3.0 * s2 + 1.0;
    let h10 = s3 - 2.0 * s2 + s;
    let h01 = -2.0 * s3 + 3.0 * s2;
    let h11 = s3 - s2;
    h00 * p0 + h10 * t0 + h01 * p1 + h11 * t1
}

/// Tangente entlang der Fahrtrichtung eines Nodes, Länge `length`.
///
/// Die Richtung ist `rotation - 90°`, passend zur Heading-Konvention der Map.
pub fn heading_tangent(rotation: f32, length: f32) -> Vec2 {
    Vec2::from_angle(rotation - FRAC_PI_2) * length
}

/// Rekonstruiert die Polyline einer Straße ohne explizite Punkte.
///
/// Tangentenlänge = Sehnenlänge zwischen Start und Ende.
pub fn synthesize_road_curve(
    start: Vec2,
    start_rotation: f32,
    end: Vec2,
    end_rotation: f32,
) -> Vec<Vec2> {
    let radius = start.distance(end);
    let start_tangent = heading_tangent(start_rotation, radius);
    let end_tangent = heading_tangent(end_rotation, radius);

    let last = (ROAD_CURVE_SAMPLES - 1) as f32;
    (0..ROAD_CURVE_SAMPLES)
        .map(|i| {
            let s = i as f32 / last;
            hermite(s, start, end, start_tangent, end_tangent)
        })
        .collect()
}

/// Dreht `point` um `center` (gegen den Uhrzeigersinn für positive `angle`).
pub fn rotate_point(point: Vec2, angle: f32, center: Vec2) -> Vec2 {
    center + Vec2::from_angle(angle).rotate(point - center)
}

/// Approximierte Länge einer Polyline.
pub fn polyline_length(points: &[Vec2]) -> f32 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}
