//! Tokenize path-data strings and decode the segments into commands
//!
//! Two stages, matching the language's own structure:
//!
//! 1. [`tokenize`] runs the pest grammar and yields one [`Segment`] per
//!    command letter. Purely lexical: a segment is a letter plus everything
//!    up to the next letter, with no numeric validation.
//! 2. [`parse`] decodes each segment by its leading letter, splitting the
//!    tail into numeric fields on commas and whitespace and consuming them
//!    in the fixed group size of the command kind. Each group becomes one
//!    [`Command`], so an `L` run with three pairs decodes to three `LineTo`
//!    commands that all inherit the run's relative/absolute flag.

use glam::dvec2;
use pest::Parser;
use pest::error::InputLocation;

use crate::ast::{Command, PathData, Position};
use crate::errors::{DecodeError, LexError, PathError, SourceContext};
use crate::log::{debug, trace};
use crate::{PathParser, Rule};

/// One lexical segment: a command letter plus its raw argument text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    /// The command letter, case preserved.
    pub letter: char,
    /// Everything between this command letter and the next one.
    pub tail: &'a str,
    /// Byte offset of the command letter in the source string.
    pub offset: usize,
}

impl Segment<'_> {
    /// Byte length of the whole segment, letter included.
    fn len(&self) -> usize {
        self.letter.len_utf8() + self.tail.len()
    }
}

/// Split a path-data string into its command segments.
///
/// Characters before the first command letter are skipped; empty or
/// whitespace-only input yields no segments. The grammar accepts every
/// string, so the `Err` arm is unreachable; it is still propagated so a
/// grammar regression surfaces as an error, not a panic.
pub fn tokenize(source: &str) -> Result<Vec<Segment<'_>>, LexError> {
    let ctx = SourceContext::new("<path-data>", source);
    let pairs = PathParser::parse(Rule::path, source).map_err(|e| {
        let offset = match e.location {
            InputLocation::Pos(p) => p,
            InputLocation::Span((start, _)) => start,
        };
        LexError {
            src: ctx.named_source(),
            span: (offset, 0).into(),
        }
    })?;

    let mut segments = Vec::new();
    for pair in pairs {
        if pair.as_rule() != Rule::path {
            continue;
        }
        for seg in pair.into_inner() {
            if seg.as_rule() != Rule::segment {
                continue;
            }
            let offset = seg.as_span().start();
            let mut inner = seg.into_inner();
            let command = inner.next().unwrap();
            let tail = inner.next().unwrap();
            segments.push(Segment {
                letter: command.as_str().chars().next().unwrap(),
                tail: tail.as_str(),
                offset,
            });
        }
    }
    trace!(count = segments.len(), "tokenized path data");
    Ok(segments)
}

/// Parse a whole path-data string into its decoded command sequence.
///
/// Any malformed segment aborts the parse; no partial `PathData` is built.
pub fn parse(source: &str) -> Result<PathData, PathError> {
    let ctx = SourceContext::new("<path-data>", source);
    let mut commands = Vec::new();
    for segment in tokenize(source)? {
        decode_segment(&ctx, segment, &mut commands)?;
    }
    debug!(commands = commands.len(), "decoded path data");
    Ok(PathData { commands })
}

/// One numeric field of a segment tail, with its position for diagnostics.
#[derive(Debug, Clone, Copy)]
struct Field<'a> {
    text: &'a str,
    /// Absolute byte offset in the source string.
    offset: usize,
}

impl Field<'_> {
    fn span(&self) -> miette::SourceSpan {
        (self.offset, self.text.len()).into()
    }
}

/// Split a segment tail into fields on commas and whitespace, empty fields
/// discarded.
fn split_fields(tail: &str, base: usize) -> Vec<Field<'_>> {
    let mut fields = Vec::new();
    let mut start = None;
    for (i, c) in tail.char_indices() {
        if c == ',' || c.is_whitespace() {
            if let Some(s) = start.take() {
                fields.push(Field {
                    text: &tail[s..i],
                    offset: base + s,
                });
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        fields.push(Field {
            text: &tail[s..],
            offset: base + s,
        });
    }
    fields
}

fn number(ctx: &SourceContext, field: Field<'_>) -> Result<f64, DecodeError> {
    field.text.parse::<f64>().map_err(|_| DecodeError::InvalidNumber {
        text: field.text.to_string(),
        src: ctx.named_source(),
        span: field.span(),
    })
}

/// Arc flags accept exactly "0" or "1".
fn arc_flag(ctx: &SourceContext, field: Field<'_>) -> Result<bool, DecodeError> {
    match field.text {
        "0" => Ok(false),
        "1" => Ok(true),
        _ => Err(DecodeError::MalformedArcFlag {
            text: field.text.to_string(),
            src: ctx.named_source(),
            span: field.span(),
        }),
    }
}

/// Check that a segment's field count divides evenly into `group`-sized
/// repetitions. Zero fields is zero repetitions, not an error.
fn check_arity(
    ctx: &SourceContext,
    segment: &Segment<'_>,
    fields: &[Field<'_>],
    group: usize,
) -> Result<(), DecodeError> {
    if fields.len() % group != 0 {
        return Err(DecodeError::WrongArity {
            letter: segment.letter,
            group,
            count: fields.len(),
            src: ctx.named_source(),
            span: (segment.offset, segment.len()).into(),
        });
    }
    Ok(())
}

/// Decode one segment, appending one command per coordinate group.
fn decode_segment(
    ctx: &SourceContext,
    segment: Segment<'_>,
    out: &mut Vec<Command>,
) -> Result<(), DecodeError> {
    let pos = Position::from_letter(segment.letter);
    let fields = split_fields(segment.tail, segment.offset + segment.letter.len_utf8());
    trace!(letter = %segment.letter, fields = fields.len(), "decoding segment");

    match segment.letter.to_ascii_uppercase() {
        'M' => {
            check_arity(ctx, &segment, &fields, 2)?;
            for (i, group) in fields.chunks(2).enumerate() {
                let point = dvec2(number(ctx, group[0])?, number(ctx, group[1])?);
                // First pair starts the subpath; trailing pairs of the same
                // run are implicit line-to commands.
                if i == 0 {
                    out.push(Command::MoveTo { pos, point });
                } else {
                    out.push(Command::LineTo { pos, point });
                }
            }
        }
        'L' => {
            check_arity(ctx, &segment, &fields, 2)?;
            for group in fields.chunks(2) {
                let point = dvec2(number(ctx, group[0])?, number(ctx, group[1])?);
                out.push(Command::LineTo { pos, point });
            }
        }
        'H' => {
            for field in &fields {
                out.push(Command::HorizontalTo {
                    pos,
                    x: number(ctx, *field)?,
                });
            }
        }
        'V' => {
            for field in &fields {
                out.push(Command::VerticalTo {
                    pos,
                    y: number(ctx, *field)?,
                });
            }
        }
        'C' => {
            check_arity(ctx, &segment, &fields, 6)?;
            for group in fields.chunks(6) {
                out.push(Command::CubicTo {
                    pos,
                    control1: dvec2(number(ctx, group[0])?, number(ctx, group[1])?),
                    control2: dvec2(number(ctx, group[2])?, number(ctx, group[3])?),
                    end: dvec2(number(ctx, group[4])?, number(ctx, group[5])?),
                });
            }
        }
        'S' => {
            check_arity(ctx, &segment, &fields, 4)?;
            for group in fields.chunks(4) {
                out.push(Command::SmoothCubicTo {
                    pos,
                    control2: dvec2(number(ctx, group[0])?, number(ctx, group[1])?),
                    end: dvec2(number(ctx, group[2])?, number(ctx, group[3])?),
                });
            }
        }
        'Q' => {
            check_arity(ctx, &segment, &fields, 4)?;
            for group in fields.chunks(4) {
                out.push(Command::QuadTo {
                    pos,
                    control: dvec2(number(ctx, group[0])?, number(ctx, group[1])?),
                    end: dvec2(number(ctx, group[2])?, number(ctx, group[3])?),
                });
            }
        }
        'T' => {
            check_arity(ctx, &segment, &fields, 2)?;
            for group in fields.chunks(2) {
                out.push(Command::SmoothQuadTo {
                    pos,
                    end: dvec2(number(ctx, group[0])?, number(ctx, group[1])?),
                });
            }
        }
        'A' => {
            check_arity(ctx, &segment, &fields, 7)?;
            for group in fields.chunks(7) {
                out.push(Command::ArcTo {
                    pos,
                    radii: dvec2(number(ctx, group[0])?, number(ctx, group[1])?),
                    rotation: number(ctx, group[2])?,
                    large_arc: arc_flag(ctx, group[3])?,
                    sweep: arc_flag(ctx, group[4])?,
                    end: dvec2(number(ctx, group[5])?, number(ctx, group[6])?),
                });
            }
        }
        'Z' => {
            // Close takes no arguments regardless of case.
            if !fields.is_empty() {
                return Err(DecodeError::WrongArity {
                    letter: segment.letter,
                    group: 0,
                    count: fields.len(),
                    src: ctx.named_source(),
                    span: (segment.offset, segment.len()).into(),
                });
            }
            out.push(Command::Close);
        }
        _ => {
            return Err(DecodeError::UnknownCommand {
                letter: segment.letter,
                src: ctx.named_source(),
                span: (segment.offset, segment.letter.len_utf8()).into(),
            });
        }
    }
    Ok(())
}
