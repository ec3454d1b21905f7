//! The rendering-backend seam
//!
//! A backend implements [`Surface`]; [`replay`] feeds it one path's
//! primitive sequence followed by a single paint call. Nothing here knows
//! about the path language: the primitives are already absolute geometry.

use glam::DVec2;

use crate::geometry::Primitive;
use crate::style::PathStyle;

/// Minimal contract a rendering surface exposes for one path.
pub trait Surface {
    /// Begin a subpath at `point` without drawing.
    fn begin_at(&mut self, point: DVec2);
    /// Straight segment to `point`.
    fn line_to(&mut self, point: DVec2);
    /// Cubic Bezier to `end`.
    fn cubic_to(&mut self, control1: DVec2, control2: DVec2, end: DVec2);
    /// Quadratic Bezier to `end`.
    fn quadratic_to(&mut self, control: DVec2, end: DVec2);
    /// Close the current subpath.
    fn close(&mut self);
    /// Paint the accumulated outline. Called once per path, last.
    fn paint(&mut self, style: &PathStyle);
}

/// Replay a primitive sequence onto a surface, then paint it.
pub fn replay<S: Surface>(primitives: &[Primitive], style: &PathStyle, surface: &mut S) {
    for primitive in primitives {
        match *primitive {
            Primitive::MoveTo { to } => surface.begin_at(to),
            Primitive::LineTo { to } => surface.line_to(to),
            Primitive::CubicTo {
                control1,
                control2,
                to,
            } => surface.cubic_to(control1, control2, to),
            Primitive::QuadTo { control, to } => surface.quadratic_to(control, to),
            Primitive::Close => surface.close(),
        }
    }
    surface.paint(style);
}
