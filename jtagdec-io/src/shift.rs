use std::{fmt::Display, ops::RangeInclusive};

use crate::units::{Bits, Bytes};

/// An inclusive range of sample numbers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    pub start: u64,
    pub end: u64,
}

impl Span {
    pub const fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    pub const fn overlaps(self, other: Span) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Split into `n` consecutive ranges of (nearly) equal width. Neighbouring
    /// ranges share their boundary sample.
    pub fn divide(self, n: usize) -> impl Iterator<Item = Span> {
        let width = u128::from(self.end.saturating_sub(self.start));
        let n128 = n.max(1) as u128;
        let at = move |i: usize| self.start + (width * i as u128 / n128) as u64;
        (0..n).map(move |i| Span::new(at(i), at(i + 1)))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bit {
    pub level: bool,
    pub span: Span,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ShiftError {
    #[error("{bits} bits but {spans} sample ranges")]
    SpanCount { bits: usize, spans: usize },
    #[error("invalid bit {0:?}, expected '0' or '1'")]
    BadBit(char),
}

/// The bits of one completed shift, each paired with the samples it was
/// clocked on.
///
/// Stored in shift order: index 0 is the first bit through the register,
/// which is the least significant bit of the value. Text renderings are
/// most-significant first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Shift(Vec<Bit>);

impl Shift {
    pub fn new(bits: Vec<Bit>) -> Self {
        Self(bits)
    }

    /// Parse an MSB-first bit string. `spans` are in shift order, one per bit.
    pub fn from_msb_str(text: &str, spans: &[Span]) -> Result<Self, ShiftError> {
        let count = text.chars().count();
        if count != spans.len() {
            return Err(ShiftError::SpanCount {
                bits: count,
                spans: spans.len(),
            });
        }
        text.chars()
            .rev()
            .zip(spans)
            .map(|(c, &span)| match c {
                '0' => Ok(Bit { level: false, span }),
                '1' => Ok(Bit { level: true, span }),
                c => Err(ShiftError::BadBit(c)),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    /// Like [`Shift::from_msb_str`], with `span` divided evenly over the bits.
    pub fn from_msb_str_in(text: &str, span: Span) -> Result<Self, ShiftError> {
        let spans = span.divide(text.chars().count()).collect::<Vec<_>>();
        Self::from_msb_str(text, &spans)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len_bits(&self) -> Bits<usize> {
        Bits(self.0.len())
    }

    /// Bits in shift order.
    pub fn bits(&self) -> &[Bit] {
        &self.0
    }

    pub fn msb_first(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.iter().rev().map(|b| b.level)
    }

    /// Samples covered by the bits at `range` (shift order indices).
    pub fn span(&self, range: RangeInclusive<usize>) -> Option<Span> {
        let first = self.0.get(*range.start())?;
        let last = self.0.get(*range.end())?;
        Some(Span::new(first.span.start, last.span.end))
    }

    /// Value of the bits at `range`, with the lowest index as the least
    /// significant bit. `None` if out of bounds or wider than 64 bits.
    pub fn value(&self, range: RangeInclusive<usize>) -> Option<u64> {
        let bits = self.0.get(range)?;
        if bits.len() > 64 {
            return None;
        }
        Some(
            bits.iter()
                .rev()
                .fold(0, |acc, b| acc << 1 | u64::from(b.level)),
        )
    }

    /// Pack MSB-first into bytes. A trailing partial byte is left-aligned.
    pub fn to_msb_bytes(&self) -> Vec<u8> {
        let (Bytes(full), Bits(rest)) = self.len_bits().as_pair();
        let mut out = vec![0; full + usize::from(rest != 0)];
        for (idx, level) in self.msb_first().enumerate() {
            if level {
                out[idx / 8] |= 0x80 >> (idx % 8);
            }
        }
        out
    }
}

impl Display for Shift {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use std::fmt::Write as _;
        for bit in self.msb_first() {
            f.write_char(if bit { '1' } else { '0' })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_divide() {
        let spans = Span::new(0, 90).divide(9).collect::<Vec<_>>();
        assert_eq!(spans.len(), 9);
        assert_eq!(spans[0], Span::new(0, 10));
        assert_eq!(spans[8], Span::new(80, 90));

        let spans = Span::new(5, 6).divide(3).collect::<Vec<_>>();
        assert_eq!(spans, [Span::new(5, 5), Span::new(5, 5), Span::new(5, 6)]);
        assert_eq!(Span::new(0, 10).divide(0).count(), 0);
    }

    #[test]
    fn test_shift_order() {
        let shift = Shift::from_msb_str_in("100000001", Span::new(0, 90)).unwrap();
        assert_eq!(shift.len(), 9);
        // the last character is the first bit shifted
        assert!(shift.bits()[0].level);
        assert_eq!(shift.bits()[0].span, Span::new(0, 10));
        assert!(shift.bits()[8].level);
        assert_eq!(shift.value(0..=7), Some(1));
        assert_eq!(shift.value(0..=8), Some(0x101));
        assert_eq!(shift.span(0..=7), Some(Span::new(0, 80)));
        assert_eq!(shift.span(8..=8), Some(Span::new(80, 90)));
        assert_eq!(shift.span(8..=9), None);
        assert_eq!(shift.value(9..=9), None);
        assert_eq!(shift.to_string(), "100000001");
    }

    #[test]
    fn test_explicit_spans() {
        let spans = [Span::new(1, 2), Span::new(3, 4)];
        let shift = Shift::from_msb_str("10", &spans).unwrap();
        assert!(!shift.bits()[0].level);
        assert_eq!(shift.bits()[0].span, Span::new(1, 2));
        assert_eq!(shift.bits()[1].span, Span::new(3, 4));
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            Shift::from_msb_str("101", &[Span::default()]),
            Err(ShiftError::SpanCount { bits: 3, spans: 1 })
        );
        assert_eq!(
            Shift::from_msb_str_in("10x", Span::new(0, 3)),
            Err(ShiftError::BadBit('x'))
        );
    }

    #[test]
    fn test_msb_bytes() {
        let shift = Shift::from_msb_str_in("1010000011", Span::new(0, 10)).unwrap();
        assert_eq!(shift.to_msb_bytes(), [0xa0, 0xc0]);
        assert!(Shift::default().to_msb_bytes().is_empty());
    }
}
