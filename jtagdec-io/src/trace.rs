//! Line-oriented text traces of upstream events.
//!
//! ```text
//! # comment
//! 0-40      NEW STATE SHIFT-IR
//! 40-80     IR TDI 0011
//! 100-420   DR TDO 00001001011001000010000000111111
//! 500-590   DR TDI 100000000 @ 500-510 510-520 520-530 530-540 540-550 550-560 560-570 570-580 580-590
//! ```
//!
//! Bit strings are most-significant first. The optional `@` list gives one
//! sample range per bit in shift order (first bit shifted first). Without it,
//! the event span is divided evenly over the bits.

use std::path::Path;

use eyre::{Result, WrapErr};
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{char, space1, u64 as dec},
    combinator::{all_consuming, map, map_res, opt, value},
    multi::many1,
    sequence::{preceded, separated_pair},
};
use tracing::instrument;

use crate::{
    event::{Chain, Direction, Event},
    jtag::State,
    shift::{Shift, ShiftError, Span},
};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TraceError {
    #[error("line {line}: malformed event `{text}`")]
    Syntax { line: usize, text: String },
    #[error("line {line}: invalid shift")]
    Shift {
        line: usize,
        #[source]
        source: ShiftError,
    },
}

enum Body<'a> {
    NewState(State),
    Shift {
        chain: Chain,
        direction: Direction,
        bits: &'a str,
        spans: Option<Vec<Span>>,
    },
}

fn span(i: &str) -> IResult<&str, Span> {
    map(separated_pair(dec, char('-'), dec), |(start, end)| {
        Span::new(start, end)
    })
    .parse(i)
}

fn state(i: &str) -> IResult<&str, State> {
    let name = take_while1(|c: char| c.is_ascii_alphanumeric() || c == '-' || c == '/');
    map_res(name, |s: &str| s.parse::<State>()).parse(i)
}

fn chain(i: &str) -> IResult<&str, Chain> {
    alt((value(Chain::Ir, tag("IR")), value(Chain::Dr, tag("DR")))).parse(i)
}

fn direction(i: &str) -> IResult<&str, Direction> {
    alt((
        value(Direction::ToDevice, tag("TDI")),
        value(Direction::ToHost, tag("TDO")),
    ))
    .parse(i)
}

fn new_state(i: &str) -> IResult<&str, Body<'_>> {
    map(preceded((tag("NEW STATE"), space1), state), Body::NewState).parse(i)
}

fn shift(i: &str) -> IResult<&str, Body<'_>> {
    let bits = take_while1(|c: char| c == '0' || c == '1');
    let spans = opt(preceded((space1, char('@')), many1(preceded(space1, span))));
    map(
        (chain, space1, direction, space1, bits, spans),
        |(chain, _, direction, _, bits, spans)| Body::Shift {
            chain,
            direction,
            bits,
            spans,
        },
    )
    .parse(i)
}

fn line(i: &str) -> IResult<&str, (Span, Body<'_>)> {
    all_consuming(separated_pair(span, space1, alt((new_state, shift)))).parse(i)
}

/// Parse a whole trace. Stops at the first bad line.
pub fn parse(text: &str) -> Result<Vec<Event>, TraceError> {
    let mut events = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let content = raw.split_once('#').map_or(raw, |(before, _)| before).trim();
        if content.is_empty() {
            continue;
        }

        let Ok((_, (span, body))) = line(content) else {
            return Err(TraceError::Syntax {
                line: line_no,
                text: content.to_owned(),
            });
        };
        let event = match body {
            Body::NewState(state) => Event::new_state(span, state),
            Body::Shift {
                chain,
                direction,
                bits,
                spans,
            } => {
                let shift = match spans {
                    Some(spans) => Shift::from_msb_str(bits, &spans),
                    None => Shift::from_msb_str_in(bits, span),
                }
                .map_err(|source| TraceError::Shift {
                    line: line_no,
                    source,
                })?;
                Event::shift(span, chain, direction, shift)
            }
        };
        events.push(event);
    }
    Ok(events)
}

#[instrument(skip_all, fields(path = %path.display()))]
pub fn read(path: &Path) -> Result<Vec<Event>> {
    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read trace {}", path.display()))?;
    let events = parse(&text).wrap_err_with(|| format!("in trace {}", path.display()))?;
    tracing::debug!(events = events.len(), "parsed trace");
    Ok(events)
}
