//! Resolve a path element's style strings into paint parameters
//!
//! A thin mapping: `fill`, `stroke` and `stroke-width` come in as attribute
//! strings and go out as [`PathStyle`]. Hex colors are decoded; every other
//! color string passes through untouched for the backend to interpret, since
//! color-name tables live outside this crate.

use std::collections::HashMap;
use std::fmt;

use crate::log::debug;

/// A paint color: decoded hex, or a raw string passed through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Color {
    Rgb(u8, u8, u8),
    Named(String),
}

impl Color {
    /// Decode `#rgb` / `#rrggbb`; anything else is kept as a named color.
    pub fn parse(value: &str) -> Color {
        let value = value.trim();
        if let Some(hex) = value.strip_prefix('#') {
            match hex.len() {
                6 => {
                    if let Ok(v) = u32::from_str_radix(hex, 16) {
                        return Color::Rgb(
                            ((v >> 16) & 0xff) as u8,
                            ((v >> 8) & 0xff) as u8,
                            (v & 0xff) as u8,
                        );
                    }
                }
                3 => {
                    if let Ok(v) = u32::from_str_radix(hex, 16) {
                        let (r, g, b) = (
                            ((v >> 8) & 0xf) as u8,
                            ((v >> 4) & 0xf) as u8,
                            (v & 0xf) as u8,
                        );
                        // #abc is shorthand for #aabbcc
                        return Color::Rgb(r * 0x11, g * 0x11, b * 0x11);
                    }
                }
                _ => {}
            }
        }
        Color::Named(value.to_string())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
            Color::Named(name) => write!(f, "{name}"),
        }
    }
}

/// Fill, stroke and stroke width for one path.
///
/// `None` means "do not paint that layer". Defaults match the common SVG
/// producer output this decoder targets: no fill, black stroke, width 1.
#[derive(Debug, Clone, PartialEq)]
pub struct PathStyle {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: f64,
}

impl Default for PathStyle {
    fn default() -> Self {
        Self {
            fill: None,
            stroke: Some(Color::Named("black".into())),
            stroke_width: 1.0,
        }
    }
}

impl PathStyle {
    /// Resolve the style map extracted by the document layer.
    ///
    /// Unknown keys are ignored. A malformed `stroke-width` falls back to
    /// the default rather than failing the path: only path-data errors
    /// abort a parse.
    pub fn from_styles(styles: &HashMap<String, String>) -> PathStyle {
        let mut style = PathStyle::default();
        if let Some(fill) = styles.get("fill") {
            style.fill = paint(fill);
        }
        if let Some(stroke) = styles.get("stroke") {
            style.stroke = paint(stroke);
        }
        if let Some(width) = styles.get("stroke-width") {
            match width.trim().parse::<f64>() {
                Ok(w) if w.is_finite() && w >= 0.0 => style.stroke_width = w,
                _ => {
                    debug!(value = %width, "ignoring malformed stroke-width");
                }
            }
        }
        style
    }
}

/// `none` and empty values switch a paint layer off.
fn paint(value: &str) -> Option<Color> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("none") {
        None
    } else {
        Some(Color::parse(value))
    }
}
