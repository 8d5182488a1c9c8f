//! Elliptical arcs as cubic Bezier segments, at most a quarter turn each.

use crate::geometry::ArcParams;
use std::f32::consts::{FRAC_PI_2, TAU};
use tiny_skia::PathBuilder;

/// Append `arc` to `path` in user space, starting with a `move_to` to its
/// first point. Degenerate radii or non-finite angles add nothing.
pub(crate) fn append_arc(path: &mut PathBuilder, arc: &ArcParams) {
    if arc.radius_x <= 0.0 || arc.radius_y <= 0.0 {
        return;
    }
    if !(arc.start_angle.is_finite() && arc.end_angle.is_finite()) {
        return;
    }

    let sweep = sweep(arc.start_angle, arc.end_angle, arc.anticlockwise);
    let segments = ((sweep.abs() / FRAC_PI_2).ceil() as usize).max(1);
    let step = sweep / segments as f32;
    let k = 4.0 / 3.0 * (step / 4.0).tan();

    let (sin_rot, cos_rot) = arc.rotation.sin_cos();
    let on_ellipse = |ux: f32, uy: f32| {
        let (ex, ey) = (ux * arc.radius_x, uy * arc.radius_y);
        (
            arc.center.0 + ex * cos_rot - ey * sin_rot,
            arc.center.1 + ex * sin_rot + ey * cos_rot,
        )
    };

    let (sin_a, cos_a) = arc.start_angle.sin_cos();
    let (x, y) = on_ellipse(cos_a, sin_a);
    path.move_to(x, y);

    let mut angle = arc.start_angle;
    for _ in 0..segments {
        let (s0, c0) = angle.sin_cos();
        angle += step;
        let (s1, c1) = angle.sin_cos();
        let p1 = on_ellipse(c0 - k * s0, s0 + k * c0);
        let p2 = on_ellipse(c1 + k * s1, s1 - k * c1);
        let end = on_ellipse(c1, s1);
        path.cubic_to(p1.0, p1.1, p2.0, p2.1, end.0, end.1);
    }
}

/// Signed sweep from `start` to `end`. Spans of a full turn or more in the
/// drawing direction draw exactly one turn.
fn sweep(start: f32, end: f32, anticlockwise: bool) -> f32 {
    let span = if anticlockwise {
        start - end
    } else {
        end - start
    };
    let sweep = if span >= TAU {
        TAU
    } else {
        span.rem_euclid(TAU)
    };
    if anticlockwise {
        -sweep
    } else {
        sweep
    }
}
