//! Decoded path commands
//!
//! These types represent the parsed structure of one path-data string. A
//! command letter followed by several coordinate groups decodes to one
//! `Command` per group, so downstream consumers never deal with repetition.

use glam::DVec2;

/// Whether coordinates are offsets from the current point or final values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Absolute,
    Relative,
}

impl Position {
    /// Lowercase command letters mean relative coordinates.
    pub fn from_letter(letter: char) -> Self {
        if letter.is_ascii_lowercase() {
            Position::Relative
        } else {
            Position::Absolute
        }
    }
}

/// One decoded path command
///
/// Coordinate payloads are raw pairs as written in the source; they are
/// resolved to absolute points by the cursor when geometry is built.
/// `HorizontalTo`/`VerticalTo` carry only the varying axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Start a new subpath: M/m
    MoveTo { pos: Position, point: DVec2 },
    /// Straight segment: L/l (also trailing pairs of an M/m run)
    LineTo { pos: Position, point: DVec2 },
    /// Horizontal segment, y is carried over: H/h
    HorizontalTo { pos: Position, x: f64 },
    /// Vertical segment, x is carried over: V/v
    VerticalTo { pos: Position, y: f64 },
    /// Cubic Bezier with both control points spelled out: C/c
    CubicTo {
        pos: Position,
        control1: DVec2,
        control2: DVec2,
        end: DVec2,
    },
    /// Cubic Bezier whose first control point is reflected: S/s
    SmoothCubicTo {
        pos: Position,
        control2: DVec2,
        end: DVec2,
    },
    /// Quadratic Bezier: Q/q
    QuadTo {
        pos: Position,
        control: DVec2,
        end: DVec2,
    },
    /// Quadratic Bezier whose control point is reflected: T/t
    SmoothQuadTo { pos: Position, end: DVec2 },
    /// Elliptical arc: A/a. Rotation is a real-valued angle in degrees.
    ArcTo {
        pos: Position,
        radii: DVec2,
        rotation: f64,
        large_arc: bool,
        sweep: bool,
        end: DVec2,
    },
    /// Close the current subpath: Z/z
    Close,
}

/// A fully decoded path: the ordered command sequence of one `d` attribute.
/// Created once at parse time, immutable after.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathData {
    pub commands: Vec<Command>,
}

impl PathData {
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
