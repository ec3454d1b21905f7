//! Error types with rich diagnostics using miette
//!
//! Decode-side errors carry source spans so a bad segment is pointed at in
//! the original path-data string. Geometry errors are plain: by the time the
//! builder runs, the command stream is already well formed.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Source context for error reporting
#[derive(Debug, Clone)]
pub struct SourceContext {
    /// Name of the source (attribute origin or "<path-data>")
    pub name: String,
    /// The full source text
    pub source: String,
}

impl SourceContext {
    /// Create a new source context
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Create a NamedSource for miette
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.name, self.source.clone())
    }
}

// ============================================================================
// Lex Errors
// ============================================================================

/// Failure of the lexical segmentation grammar.
///
/// The grammar accepts every string, so this cannot occur for any input; it
/// exists so the tokenizer propagates its parse result instead of unwrapping.
#[derive(Error, Diagnostic, Debug)]
#[error("path data failed lexical segmentation")]
#[diagnostic(code(pathdata::lex))]
pub struct LexError {
    #[source_code]
    pub src: NamedSource<String>,
    #[label("tokenizer stopped here")]
    pub span: SourceSpan,
}

// ============================================================================
// Decode Errors
// ============================================================================

/// Errors that occur while decoding a tokenized segment into commands.
///
/// Any of these aborts the parse of the whole path; no partial command
/// sequence is returned.
#[derive(Error, Diagnostic, Debug)]
pub enum DecodeError {
    #[error("invalid number: {text:?}")]
    #[diagnostic(code(pathdata::decode::invalid_number))]
    InvalidNumber {
        text: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("not a numeric field")]
        span: SourceSpan,
    },

    #[error("command '{letter}' expects coordinate groups of {group}, found {count} fields")]
    #[diagnostic(code(pathdata::decode::wrong_arity))]
    WrongArity {
        letter: char,
        group: usize,
        count: usize,
        #[source_code]
        src: NamedSource<String>,
        #[label("in this segment")]
        span: SourceSpan,
    },

    #[error("unknown path command '{letter}'")]
    #[diagnostic(code(pathdata::decode::unknown_command))]
    UnknownCommand {
        letter: char,
        #[source_code]
        src: NamedSource<String>,
        #[label("not a path command")]
        span: SourceSpan,
    },

    #[error("arc flag must be \"0\" or \"1\", found {text:?}")]
    #[diagnostic(code(pathdata::decode::malformed_arc_flag))]
    MalformedArcFlag {
        text: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("expected 0 or 1")]
        span: SourceSpan,
    },
}

// ============================================================================
// Geometry Errors
// ============================================================================

/// Errors that occur while building primitives from decoded commands
#[derive(Error, Diagnostic, Debug)]
pub enum GeometryError {
    #[error("command #{index} draws before any move-to establishes a current point")]
    #[diagnostic(code(pathdata::geometry::not_started))]
    NotStarted { index: usize },
}

// ============================================================================
// Document Errors
// ============================================================================

/// Errors from the document lookup layer
#[derive(Error, Diagnostic, Debug)]
pub enum DocumentError {
    #[error("failed to read SVG file")]
    #[diagnostic(code(pathdata::document::io))]
    Io(#[from] std::io::Error),

    #[error("malformed XML: {0}")]
    #[diagnostic(code(pathdata::document::xml))]
    Xml(#[from] roxmltree::Error),
}

// ============================================================================
// Umbrella
// ============================================================================

/// Any failure of the whole-document pipeline
#[derive(Error, Diagnostic, Debug)]
pub enum PathError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Document(#[from] DocumentError),
}
