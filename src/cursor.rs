//! Cursor state for one path walk.
//!
//! This module implements the small state machine that resolves
//! relative-vs-absolute coordinates and reconstructs the implied control
//! points of shorthand curve commands.
//!
//! # Key Concepts
//!
//! - **Current point**: the absolute position after the last command. All
//!   relative coordinates are offsets from it; horizontal and vertical lines
//!   replace one of its axes and carry the other over.
//!
//! - **Subpath start**: where the current subpath's move-to landed. Closing
//!   a subpath snaps the current point back there.
//!
//! - **Trailing curve**: the family (cubic or quadratic) and trailing
//!   control point of the immediately preceding command. A shorthand curve
//!   reflects that control point through the current point; any intervening
//!   non-curve command clears the record, after which the "reflection"
//!   degenerates to the current point itself.
//!
//! One `Cursor` belongs to exactly one path walk and is threaded through the
//! geometry builder by exclusive mutable reference.

use glam::DVec2;

use crate::ast::Position;

/// Curve family of the immediately preceding command, holding the control
/// point a following shorthand command reflects.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Trailing {
    #[default]
    None,
    /// Previous command was C/c or S/s; holds its second control point.
    Cubic { control2: DVec2 },
    /// Previous command was Q/q or T/t; holds its control point.
    Quad { control: DVec2 },
}

/// Tracks the evolving current point of one path's command walk.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Cursor {
    point: DVec2,
    subpath_start: DVec2,
    started: bool,
    trailing: Trailing,
}

impl Cursor {
    /// A fresh cursor at the path's default origin (0,0), with no subpath
    /// begun yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current absolute point.
    pub fn point(&self) -> DVec2 {
        self.point
    }

    /// Where the current subpath began.
    pub fn subpath_start(&self) -> DVec2 {
        self.subpath_start
    }

    /// True once a move-to has established a current point.
    pub fn has_started(&self) -> bool {
        self.started
    }

    /// Resolve a coordinate pair to an absolute point.
    pub fn resolve(&self, pos: Position, raw: DVec2) -> DVec2 {
        match pos {
            Position::Absolute => raw,
            Position::Relative => self.point + raw,
        }
    }

    /// Resolve a horizontal-line target: only x varies, y is carried over.
    pub fn resolve_x(&self, pos: Position, x: f64) -> DVec2 {
        let x = match pos {
            Position::Absolute => x,
            Position::Relative => self.point.x + x,
        };
        DVec2::new(x, self.point.y)
    }

    /// Resolve a vertical-line target: only y varies, x is carried over.
    pub fn resolve_y(&self, pos: Position, y: f64) -> DVec2 {
        let y = match pos {
            Position::Absolute => y,
            Position::Relative => self.point.y + y,
        };
        DVec2::new(self.point.x, y)
    }

    /// First control point of a shorthand cubic: the previous cubic's second
    /// control point reflected through the current point, or the current
    /// point itself when the preceding command was not a cubic.
    pub fn reflect_cubic(&self) -> DVec2 {
        match self.trailing {
            Trailing::Cubic { control2 } => 2.0 * self.point - control2,
            _ => self.point,
        }
    }

    /// Control point of a shorthand quadratic, by the same reflection rule
    /// over the previous quadratic's control point.
    pub fn reflect_quad(&self) -> DVec2 {
        match self.trailing {
            Trailing::Quad { control } => 2.0 * self.point - control,
            _ => self.point,
        }
    }

    /// Start a new subpath at `to`.
    pub fn begin_subpath(&mut self, to: DVec2) {
        self.point = to;
        self.subpath_start = to;
        self.started = true;
        self.trailing = Trailing::None;
    }

    /// Advance along a straight segment (lines and flattened arcs).
    pub fn advance_line(&mut self, to: DVec2) {
        self.point = to;
        self.trailing = Trailing::None;
    }

    /// Advance past a cubic curve, recording its second control point for a
    /// following shorthand.
    pub fn advance_cubic(&mut self, control2: DVec2, to: DVec2) {
        self.point = to;
        self.trailing = Trailing::Cubic { control2 };
    }

    /// Advance past a quadratic curve, recording its control point.
    pub fn advance_quad(&mut self, control: DVec2, to: DVec2) {
        self.point = to;
        self.trailing = Trailing::Quad { control };
    }

    /// Close the current subpath: the current point snaps back to the
    /// subpath start.
    pub fn close_subpath(&mut self) {
        self.point = self.subpath_start;
        self.trailing = Trailing::None;
    }
}
