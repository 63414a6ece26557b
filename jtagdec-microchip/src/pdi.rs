//! PDI byte framing, as carried through the PDICOM data register.
//!
//! Each DR shift is one PDI character: eight data bits, least significant
//! first, followed by an even parity bit. A character sent with bad parity is
//! one of the special characters (BREAK, DELAY, EMPTY) rather than data.

use jtagdec_io::{Annotation, Bit, Class, Direction, Hex, Shift, Sink, Span};
use tracing::{debug, trace};

use crate::ir::Register;

pub mod instr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    pub data: u8,
    pub parity_ok: bool,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FrameError {
    #[error("PDI frame is {width} bits wide, got {0}", width = Register::PdiCom.width().0)]
    Length(usize),
}

pub const BREAK: u8 = 0xbb;
pub const DELAY: u8 = 0xdb;
pub const EMPTY: u8 = 0xeb;

pub const fn special_character(data: u8) -> &'static str {
    match data {
        BREAK => "BREAK",
        DELAY => "DELAY",
        EMPTY => "EMPTY",
        _ => "INVALID",
    }
}

const fn data_class(direction: Direction) -> Class {
    match direction {
        Direction::ToDevice => Class::DataIn,
        Direction::ToHost => Class::DataOut,
    }
}

const fn parity_class(direction: Direction, ok: bool) -> Class {
    match (direction, ok) {
        (Direction::ToDevice, true) => Class::ParityInOk,
        (Direction::ToDevice, false) => Class::ParityInErr,
        (Direction::ToHost, true) => Class::ParityOutOk,
        (Direction::ToHost, false) => Class::ParityOutErr,
    }
}

const fn special_class(direction: Direction) -> Class {
    match direction {
        Direction::ToDevice => Class::DataProg,
        Direction::ToHost => Class::DataDev,
    }
}

/// Check one frame and annotate it. Frames of the wrong width are rejected
/// before anything is emitted.
pub fn validate_and_annotate(
    frame: &Shift,
    span: Span,
    direction: Direction,
    sink: &mut impl Sink,
) -> Result<Frame, FrameError> {
    let bits: &[Bit; 9] = frame
        .bits()
        .try_into()
        .map_err(|_| FrameError::Length(frame.len()))?;
    let [data_bits @ .., parity] = bits;

    let data = data_bits
        .iter()
        .rev()
        .fold(0u8, |acc, b| acc << 1 | u8::from(b.level));
    let parity_ok = (data.count_ones() + u32::from(parity.level)) % 2 == 0;

    let data_span = Span::new(data_bits[0].span.start, data_bits[7].span.end);
    let text = Hex(data).to_string();
    sink.put(Annotation::new(
        data_span,
        data_class(direction),
        [format!("Data: {text}"), format!("D: {text}"), text],
    ));

    let labels = if parity_ok {
        ["Parity OK", "Par OK", "P"]
    } else {
        ["Parity error", "Par ERR", "PE"]
    };
    sink.put(Annotation::new(
        parity.span,
        parity_class(direction, parity_ok),
        labels,
    ));

    if !parity_ok {
        sink.put(Annotation::new(
            span,
            special_class(direction),
            [special_character(data)],
        ));
    }

    Ok(Frame { data, parity_ok })
}

fn handle(frame: &Shift, span: Span, direction: Direction, sink: &mut impl Sink) {
    match validate_and_annotate(frame, span, direction, sink) {
        Ok(frame) => trace!(data = %Hex(frame.data), parity_ok = frame.parity_ok, %direction, "pdi frame"),
        Err(e) => debug!(%e, bits = %frame, "dropping pdi frame"),
    }
}

/// Programmer to device.
pub fn handle_input(frame: &Shift, span: Span, sink: &mut impl Sink) {
    handle(frame, span, Direction::ToDevice, sink)
}

/// Device to programmer.
pub fn handle_output(frame: &Shift, span: Span, sink: &mut impl Sink) {
    handle(frame, span, Direction::ToHost, sink)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPAN: Span = Span::new(0, 90);

    fn frame(text: &str) -> Shift {
        Shift::from_msb_str_in(text, SPAN).unwrap()
    }

    fn check(text: &str, direction: Direction) -> (Result<Frame, FrameError>, Vec<Annotation>) {
        let mut out = Vec::new();
        let r = validate_and_annotate(&frame(text), SPAN, direction, &mut out);
        (r, out)
    }

    /// MSB-first frame text: parity, then data.
    fn text(data: u8, parity: bool) -> String {
        format!("{}{data:08b}", u8::from(parity))
    }

    #[test]
    fn test_bad_parity_zero() {
        let (r, out) = check("100000000", Direction::ToDevice);
        assert_eq!(
            r,
            Ok(Frame {
                data: 0,
                parity_ok: false
            })
        );
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].class, Class::DataIn);
        assert_eq!(out[0].labels, ["Data: 0x00", "D: 0x00", "0x00"]);
        assert_eq!(out[0].span, Span::new(0, 80));
        assert_eq!(out[1].class, Class::ParityInErr);
        assert_eq!(out[1].label(), "Parity error");
        assert_eq!(out[1].span, Span::new(80, 90));
        assert_eq!(out[2].class, Class::DataProg);
        assert_eq!(out[2].label(), "INVALID");
        assert_eq!(out[2].span, SPAN);
    }

    #[test]
    fn test_good_parity_ff() {
        let (r, out) = check("011111111", Direction::ToHost);
        assert_eq!(
            r,
            Ok(Frame {
                data: 0xff,
                parity_ok: true
            })
        );
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].class, Class::DataOut);
        assert_eq!(out[0].label(), "Data: 0xff");
        assert_eq!(out[1].class, Class::ParityOutOk);
        assert_eq!(out[1].labels, ["Parity OK", "Par OK", "P"]);
    }

    #[test]
    fn test_parity() {
        for data in [0x00, 0x01, 0x5a, 0x80, 0xa7, 0xfe, 0xff] {
            for parity in [false, true] {
                let (r, _) = check(&text(data, parity), Direction::ToDevice);
                let expected = (data.count_ones() + u32::from(parity)) % 2 == 0;
                assert_eq!(r.map(|f| (f.data, f.parity_ok)), Ok((data, expected)));

                // flipping any single bit flips the parity result
                for flip in 0..9 {
                    let mut chars = text(data, parity).into_bytes();
                    chars[flip] ^= b'0' ^ b'1';
                    let flipped = String::from_utf8(chars).unwrap();
                    let (r, _) = check(&flipped, Direction::ToDevice);
                    assert_eq!(r.map(|f| f.parity_ok), Ok(!expected), "{flipped}");
                }
            }
        }
    }

    #[test]
    fn test_special_characters() {
        for (data, label) in [
            (BREAK, "BREAK"),
            (DELAY, "DELAY"),
            (EMPTY, "EMPTY"),
            (0x42, "INVALID"),
        ] {
            let bad_parity = data.count_ones() % 2 == 0;
            let (r, out) = check(&text(data, bad_parity), Direction::ToHost);
            assert_eq!(r.map(|f| f.parity_ok), Ok(false));
            assert_eq!(out[2].class, Class::DataDev);
            assert_eq!(out[2].label(), label);
        }
    }

    #[test]
    fn test_malformed() {
        for text in ["", "1", "10000000", "1000000000"] {
            let (r, out) = check(text, Direction::ToDevice);
            assert_eq!(r, Err(FrameError::Length(text.len())));
            assert!(out.is_empty(), "{text}");
        }
    }

    #[test]
    fn test_handlers_drop_malformed() {
        let mut out = Vec::new();
        handle_input(&frame("10"), SPAN, &mut out);
        handle_output(&frame("10"), SPAN, &mut out);
        assert!(out.is_empty());

        handle_output(&frame("011111111"), SPAN, &mut out);
        assert_eq!(out.len(), 2);
    }
}
