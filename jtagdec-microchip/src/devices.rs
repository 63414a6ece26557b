use std::fmt::Display;

use jtagdec_io::{Hex, devices::IdCode};

/// JEDEC manufacturer ids, without the parity bit.
#[rustfmt::skip]
static MANUFACTURERS: &[(u16, &str)] = &[
    (0x1f, "Atmel"),
];

#[rustfmt::skip]
static PARTS: &[(u16, &str)] = &[
    (0x9642, "ATXMega64A3U"),
    (0x9742, "ATXMega128A3U"),
    (0x9744, "ATXMega192A3U"),
    (0x9842, "ATXMega256A3U"),
];

pub fn manufacturer(id: u16) -> &'static str {
    MANUFACTURERS
        .iter()
        .find(|(code, _)| *code == id)
        .map_or("INVALID", |&(_, name)| name)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Part {
    Known(&'static str),
    Unknown(u16),
}

impl Part {
    pub fn new(id: u16) -> Self {
        match PARTS.iter().find(|(code, _)| *code == id) {
            Some(&(_, name)) => Part::Known(name),
            None => Part::Unknown(id),
        }
    }
}

impl Display for Part {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Part::Known(name) => f.write_str(name),
            Part::Unknown(id) => Hex(*id).fmt(f),
        }
    }
}

/// An IDCODE with its table lookups resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeviceId {
    pub idcode: IdCode,
    pub manufacturer: &'static str,
    pub part: Part,
}

impl From<IdCode> for DeviceId {
    fn from(idcode: IdCode) -> Self {
        Self {
            idcode,
            manufacturer: manufacturer(idcode.manufacturer),
            part: Part::new(idcode.part),
        }
    }
}

impl Display for DeviceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Self {
            idcode,
            manufacturer,
            part,
        } = self;
        write!(f, "{idcode} ({manufacturer}: {part}@r{})", idcode.version)
    }
}
