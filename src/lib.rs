//! Decode the SVG path mini-language into backend-ready geometry.
//!
//! The `d` attribute of an SVG `path` element packs move, line, curve, arc
//! and close commands into one compact string. This crate takes that string
//! apart and hands any rendering backend a flat sequence of absolute
//! geometric primitives, with no path-language knowledge required
//! downstream.
//!
//! The pipeline runs strictly forward:
//!
//! ```text
//! raw string -> segments -> typed commands -> (command, cursor) -> primitives
//! ```
//!
//! - [`parse::tokenize`] splits the string into one segment per command
//!   letter (purely lexical, never fails);
//! - [`parse::parse`] decodes segments into [`ast::Command`] values, one per
//!   coordinate group;
//! - [`geometry::build`] walks the commands against a [`cursor::Cursor`],
//!   resolving relative coordinates and shorthand control-point reflections,
//!   and emits [`geometry::Primitive`] values;
//! - [`surface::replay`] feeds primitives plus a resolved [`style::PathStyle`]
//!   to any [`surface::Surface`] implementation.
//!
//! # Example
//!
//! ```
//! let primitives = pathdata::decode("M0,0 C10,0 10,10 0,10 S-10,20 0,20 Z")?;
//! assert_eq!(primitives.len(), 4);
//! # Ok::<(), pathdata::PathError>(())
//! ```
//!
//! Parsing is pure and deterministic: decoding the same string twice yields
//! structurally identical primitives, and independent paths can be decoded
//! from any number of threads.

use pest_derive::Parser;

pub mod ast;
pub mod cursor;
pub mod document;
pub mod errors;
pub mod geometry;
pub mod log;
pub mod parse;
pub mod style;
pub mod surface;

/// Pest parser for the path-data mini-language (lexical segmentation only).
#[derive(Parser)]
#[grammar = "pathdata.pest"]
pub struct PathParser;

pub use ast::{Command, PathData, Position};
pub use cursor::Cursor;
pub use document::{PathElement, SvgDocument};
pub use errors::{DecodeError, DocumentError, GeometryError, LexError, PathError};
pub use geometry::{Primitive, build};
pub use parse::{Segment, tokenize};
pub use style::{Color, PathStyle};
pub use surface::{Surface, replay};

/// Decode one path-data string all the way to primitives.
pub fn decode(path_data: &str) -> Result<Vec<Primitive>, PathError> {
    let path = parse::parse(path_data)?;
    Ok(geometry::build(&path)?)
}

/// Decode every path of an SVG document and replay each onto a surface.
///
/// Any malformed path aborts the whole render; no partial geometry reaches
/// the surface for the failing path.
pub fn render<S: Surface>(xml: &str, surface: &mut S) -> Result<(), PathError> {
    let doc = SvgDocument::parse(xml)?;
    for element in &doc.paths {
        let primitives = decode(&element.data)?;
        let style = PathStyle::from_styles(&element.styles);
        surface::replay(&primitives, &style, surface);
    }
    Ok(())
}
