//! Geometry builder: decoded commands to backend-ready primitives
//!
//! Walks a [`PathData`] against one [`Cursor`] and emits [`Primitive`]
//! values in command order. Everything a rendering backend needs to know
//! about the path language ends here: coordinates come out absolute,
//! shorthand control points come out materialized, and elliptical arcs come
//! out as runs of cubic Bezier segments.

use std::f64::consts::PI;

use glam::{DVec2, dvec2};

use crate::ast::{Command, PathData};
use crate::cursor::Cursor;
use crate::errors::GeometryError;
use crate::log::debug;

/// A backend-agnostic drawing instruction. All coordinates are absolute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    /// Begin a subpath at `to` without drawing.
    MoveTo { to: DVec2 },
    /// Straight segment from the previous point to `to`.
    LineTo { to: DVec2 },
    /// Cubic Bezier from the previous point.
    CubicTo {
        control1: DVec2,
        control2: DVec2,
        to: DVec2,
    },
    /// Quadratic Bezier from the previous point.
    QuadTo { control: DVec2, to: DVec2 },
    /// Close the subpath with a line back to its starting point.
    Close,
}

/// Build the primitive sequence for a decoded path.
///
/// The cursor starts at the origin with no subpath begun; a drawing or
/// closing command before the first move-to is a [`GeometryError`].
pub fn build(path: &PathData) -> Result<Vec<Primitive>, GeometryError> {
    let mut cursor = Cursor::new();
    let mut out = Vec::with_capacity(path.commands.len());
    for (index, command) in path.commands.iter().enumerate() {
        apply(*command, index, &mut cursor, &mut out)?;
    }
    debug!(
        commands = path.commands.len(),
        primitives = out.len(),
        "built path geometry"
    );
    Ok(out)
}

/// Apply one command against the cursor, appending its primitives.
fn apply(
    command: Command,
    index: usize,
    cursor: &mut Cursor,
    out: &mut Vec<Primitive>,
) -> Result<(), GeometryError> {
    if !cursor.has_started() && !matches!(command, Command::MoveTo { .. }) {
        return Err(GeometryError::NotStarted { index });
    }

    match command {
        Command::MoveTo { pos, point } => {
            let to = cursor.resolve(pos, point);
            out.push(Primitive::MoveTo { to });
            cursor.begin_subpath(to);
        }
        Command::LineTo { pos, point } => {
            let to = cursor.resolve(pos, point);
            out.push(Primitive::LineTo { to });
            cursor.advance_line(to);
        }
        Command::HorizontalTo { pos, x } => {
            let to = cursor.resolve_x(pos, x);
            out.push(Primitive::LineTo { to });
            cursor.advance_line(to);
        }
        Command::VerticalTo { pos, y } => {
            let to = cursor.resolve_y(pos, y);
            out.push(Primitive::LineTo { to });
            cursor.advance_line(to);
        }
        Command::CubicTo {
            pos,
            control1,
            control2,
            end,
        } => {
            let c1 = cursor.resolve(pos, control1);
            let c2 = cursor.resolve(pos, control2);
            let to = cursor.resolve(pos, end);
            out.push(Primitive::CubicTo {
                control1: c1,
                control2: c2,
                to,
            });
            cursor.advance_cubic(c2, to);
        }
        Command::SmoothCubicTo { pos, control2, end } => {
            let c1 = cursor.reflect_cubic();
            let c2 = cursor.resolve(pos, control2);
            let to = cursor.resolve(pos, end);
            out.push(Primitive::CubicTo {
                control1: c1,
                control2: c2,
                to,
            });
            cursor.advance_cubic(c2, to);
        }
        Command::QuadTo { pos, control, end } => {
            let c = cursor.resolve(pos, control);
            let to = cursor.resolve(pos, end);
            out.push(Primitive::QuadTo { control: c, to });
            cursor.advance_quad(c, to);
        }
        Command::SmoothQuadTo { pos, end } => {
            let c = cursor.reflect_quad();
            let to = cursor.resolve(pos, end);
            out.push(Primitive::QuadTo { control: c, to });
            cursor.advance_quad(c, to);
        }
        Command::ArcTo {
            pos,
            radii,
            rotation,
            large_arc,
            sweep,
            end,
        } => {
            let from = cursor.point();
            let to = cursor.resolve(pos, end);
            emit_arc(out, from, to, radii, rotation, large_arc, sweep);
            // The arc ends at its endpoint and clears shorthand state.
            cursor.advance_line(to);
        }
        Command::Close => {
            out.push(Primitive::Close);
            cursor.close_subpath();
        }
    }
    Ok(())
}

/// Flatten an endpoint-parameterized elliptical arc into cubic segments.
///
/// Follows the standard endpoint-to-center conversion: radii too small to
/// reach the chord are scaled up by √λ, the minimal factor that makes the
/// arc solvable. Degenerate radii turn the arc into a line segment between
/// the endpoints; coincident endpoints produce nothing.
fn emit_arc(
    out: &mut Vec<Primitive>,
    from: DVec2,
    to: DVec2,
    radii: DVec2,
    rotation: f64,
    large_arc: bool,
    sweep: bool,
) {
    let mut rx = radii.x.abs();
    let mut ry = radii.y.abs();
    if rx * rx < f64::EPSILON || ry * ry < f64::EPSILON {
        out.push(Primitive::LineTo { to });
        return;
    }

    let phi = rotation.to_radians();
    let (sin_phi, cos_phi) = phi.sin_cos();

    // Translate the origin to the chord midpoint and rotate the axes onto
    // the ellipse axes; primed coordinates live in that frame.
    let mid = (from - to) / 2.0;
    let x1p = cos_phi * mid.x + sin_phi * mid.y;
    let y1p = -sin_phi * mid.x + cos_phi * mid.y;

    let lambda = (x1p / rx).powi(2) + (y1p / ry).powi(2);
    if lambda > 1.0 {
        let scale = lambda.sqrt();
        rx *= scale;
        ry *= scale;
    }

    let d = (rx * y1p).powi(2) + (ry * x1p).powi(2);
    if d == 0.0 {
        return;
    }
    let mut k = ((rx * ry).powi(2) / d - 1.0).abs().sqrt();
    if sweep == large_arc {
        k = -k;
    }
    let cxp = k * rx * y1p / ry;
    let cyp = -k * ry * x1p / rx;
    let center = dvec2(
        cos_phi * cxp - sin_phi * cyp + (from.x + to.x) / 2.0,
        sin_phi * cxp + cos_phi * cyp + (from.y + to.y) / 2.0,
    );

    // Start angle on the unit circle.
    let ux = (x1p - cxp) / rx;
    let uy = (y1p - cyp) / ry;
    let u_len = (ux * ux + uy * uy).sqrt();
    if u_len == 0.0 {
        return;
    }
    let mut theta1 = (ux / u_len).clamp(-1.0, 1.0).acos();
    if uy < 0.0 {
        theta1 = -theta1;
    }

    // Swept angle, sign fixed up to the sweep flag's direction.
    let vx = (-x1p - cxp) / rx;
    let vy = (-y1p - cyp) / ry;
    let v_len = (vx * vx + vy * vy).sqrt();
    if v_len == 0.0 {
        return;
    }
    let mut delta = ((ux * vx + uy * vy) / (u_len * v_len)).clamp(-1.0, 1.0).acos();
    if ux * vy - uy * vx < 0.0 {
        delta = -delta;
    }
    if sweep && delta < 0.0 {
        delta += 2.0 * PI;
    } else if !sweep && delta > 0.0 {
        delta -= 2.0 * PI;
    }
    if delta == 0.0 {
        return;
    }

    // One cubic per quarter turn keeps the radial error negligible.
    let segments = (delta.abs() / (PI / 2.0)).ceil().max(1.0) as usize;
    let step = delta / segments as f64;
    debug!(segments, "flattening arc");
    for i in 0..segments {
        let th0 = theta1 + step * i as f64;
        out.push(arc_segment(center, rx, ry, sin_phi, cos_phi, th0, th0 + step));
    }
}

/// One elliptical slice of at most a quarter turn, as a cubic Bezier.
fn arc_segment(
    center: DVec2,
    rx: f64,
    ry: f64,
    sin_phi: f64,
    cos_phi: f64,
    th0: f64,
    th1: f64,
) -> Primitive {
    let (sin_th0, cos_th0) = th0.sin_cos();
    let (sin_th1, cos_th1) = th1.sin_cos();

    let th_half = 0.5 * (th1 - th0);
    let t = (8.0 / 3.0) * (th_half * 0.5).sin().powi(2) / th_half.sin();
    let x1 = rx * (cos_th0 - t * sin_th0);
    let y1 = ry * (sin_th0 + t * cos_th0);
    let x3 = rx * cos_th1;
    let y3 = ry * sin_th1;
    let x2 = x3 + rx * (t * sin_th1);
    let y2 = y3 - ry * (t * cos_th1);

    let place = |x: f64, y: f64| {
        dvec2(
            center.x + cos_phi * x - sin_phi * y,
            center.y + sin_phi * x + cos_phi * y,
        )
    };
    Primitive::CubicTo {
        control1: place(x1, y1),
        control2: place(x2, y2),
        to: place(x3, y3),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;

    const EPSILON: f64 = 1e-9;

    fn primitives(source: &str) -> Vec<Primitive> {
        build(&parse(source).unwrap()).unwrap()
    }

    fn assert_close(actual: DVec2, expected: DVec2) {
        assert!(
            (actual - expected).length() < EPSILON,
            "{actual} != {expected}"
        );
    }

    #[test]
    fn move_line_absolute() {
        let prims = primitives("M1,2 L3,4");
        assert_eq!(
            prims,
            vec![
                Primitive::MoveTo { to: dvec2(1.0, 2.0) },
                Primitive::LineTo { to: dvec2(3.0, 4.0) },
            ]
        );
    }

    #[test]
    fn relative_line_offsets_from_current_point() {
        let prims = primitives("M10,20 l3,4");
        assert_eq!(prims[1], Primitive::LineTo { to: dvec2(13.0, 24.0) });
    }

    #[test]
    fn horizontal_vertical_keep_the_other_axis() {
        let prims = primitives("M5,5 H20 V20");
        assert_eq!(prims[1], Primitive::LineTo { to: dvec2(20.0, 5.0) });
        assert_eq!(prims[2], Primitive::LineTo { to: dvec2(20.0, 20.0) });
    }

    #[test]
    fn smooth_cubic_reflects_previous_control() {
        let prims = primitives("M0,0 C10,0 10,10 0,10 S-10,20 0,20");
        match prims[2] {
            Primitive::CubicTo { control1, .. } => {
                assert_close(control1, dvec2(-10.0, 10.0));
            }
            other => panic!("expected cubic, got {other:?}"),
        }
    }

    #[test]
    fn smooth_cubic_after_line_uses_current_point() {
        let prims = primitives("M0,0 C10,0 10,10 0,10 L0,20 S-10,30 0,30");
        match prims[3] {
            Primitive::CubicTo { control1, .. } => {
                assert_close(control1, dvec2(0.0, 20.0));
            }
            other => panic!("expected cubic, got {other:?}"),
        }
    }

    #[test]
    fn smooth_quad_chain_carries_reflection() {
        // T after Q reflects the quadratic control through each endpoint.
        let prims = primitives("M0,0 Q5,10 10,0 T20,0");
        match prims[2] {
            Primitive::QuadTo { control, to } => {
                assert_close(control, dvec2(15.0, -10.0));
                assert_close(to, dvec2(20.0, 0.0));
            }
            other => panic!("expected quad, got {other:?}"),
        }
    }

    #[test]
    fn smooth_quad_ignores_trailing_cubic() {
        let prims = primitives("M0,0 C10,0 10,10 0,10 T0,30");
        match prims[2] {
            Primitive::QuadTo { control, .. } => {
                // No quadratic precedes, so the control collapses onto the
                // current point.
                assert_close(control, dvec2(0.0, 10.0));
            }
            other => panic!("expected quad, got {other:?}"),
        }
    }

    #[test]
    fn multi_pair_move_run() {
        let prims = primitives("M0,0 10,10 20,20");
        assert_eq!(
            prims,
            vec![
                Primitive::MoveTo { to: dvec2(0.0, 0.0) },
                Primitive::LineTo { to: dvec2(10.0, 10.0) },
                Primitive::LineTo { to: dvec2(20.0, 20.0) },
            ]
        );
    }

    #[test]
    fn close_resets_to_subpath_start() {
        let prims = primitives("M0,0 L10,0 L10,10 Z l5,5");
        assert_eq!(prims[3], Primitive::Close);
        // The relative line after the close starts over from (0,0).
        assert_eq!(prims[4], Primitive::LineTo { to: dvec2(5.0, 5.0) });
    }

    #[test]
    fn reflection_carries_across_grouped_repetitions() {
        // Two smooth cubics behind one S letter: the second reflects the
        // first's control point, not the original C's.
        let prims = primitives("M0,0 C10,0 10,10 0,10 S-10,20 0,20 10,30 0,30");
        match prims[3] {
            Primitive::CubicTo { control1, .. } => {
                // Reflection of (-10,20) about (0,20).
                assert_close(control1, dvec2(10.0, 20.0));
            }
            other => panic!("expected cubic, got {other:?}"),
        }
    }

    #[test]
    fn drawing_before_move_to_is_an_error() {
        let path = parse("L1,2").unwrap();
        assert!(matches!(
            build(&path),
            Err(GeometryError::NotStarted { index: 0 })
        ));
    }

    #[test]
    fn close_before_move_to_is_an_error() {
        let path = parse("Z").unwrap();
        assert!(matches!(build(&path), Err(GeometryError::NotStarted { .. })));
    }

    #[test]
    fn arc_flattens_to_cubics_ending_at_endpoint() {
        let prims = primitives("M0,0 A10,10 0 0 1 20,0");
        assert!(prims.len() >= 2);
        let mut last = DVec2::ZERO;
        for prim in &prims[1..] {
            match *prim {
                Primitive::CubicTo { to, .. } => last = to,
                other => panic!("expected cubic, got {other:?}"),
            }
        }
        assert_close(last, dvec2(20.0, 0.0));
    }

    #[test]
    fn arc_half_circle_splits_into_two_segments() {
        // A semicircle sweeps 180 degrees: two quarter-turn cubics.
        let prims = primitives("M0,0 A10,10 0 0 1 20,0");
        assert_eq!(prims.len(), 3);
    }

    #[test]
    fn arc_with_zero_radius_degenerates_to_line() {
        let prims = primitives("M0,0 A0,10 0 0 1 20,0");
        assert_eq!(prims[1], Primitive::LineTo { to: dvec2(20.0, 0.0) });
    }

    #[test]
    fn arc_with_small_radii_is_clamped_to_reach_the_chord() {
        // rx=ry=1 cannot span a chord of length 20; the radii scale up and
        // the flattened endpoint still lands on the chord end.
        let prims = primitives("M0,0 A1,1 0 0 1 20,0");
        let last = prims.last().unwrap();
        match *last {
            Primitive::CubicTo { to, .. } => assert_close(to, dvec2(20.0, 0.0)),
            other => panic!("expected cubic, got {other:?}"),
        }
    }

    #[test]
    fn arc_to_coincident_endpoint_emits_nothing() {
        let prims = primitives("M5,5 A10,10 0 0 1 5,5");
        assert_eq!(prims.len(), 1);
    }

    #[test]
    fn arc_clears_reflection_state() {
        let prims = primitives("M0,0 C10,0 10,10 0,10 A5,5 0 0 1 10,10 S20,30 10,30");
        match *prims.last().unwrap() {
            Primitive::CubicTo { control1, .. } => {
                // The arc broke the cubic chain; the shorthand control is
                // the current point (10,10).
                assert_close(control1, dvec2(10.0, 10.0));
            }
            other => panic!("expected cubic, got {other:?}"),
        }
    }

    #[test]
    fn relative_arc_endpoint_resolves_against_current_point() {
        let prims = primitives("M10,10 a10,10 0 0 1 10,0");
        let last = prims.last().unwrap();
        match *last {
            Primitive::CubicTo { to, .. } => assert_close(to, dvec2(20.0, 10.0)),
            other => panic!("expected cubic, got {other:?}"),
        }
    }

    #[test]
    fn build_is_idempotent() {
        let source = "M0,0 C10,0 10,10 0,10 S-10,20 0,20 Q5,25 10,20 T20,20 A5,5 30 1 0 25,25 Z";
        assert_eq!(primitives(source), primitives(source));
    }
}
