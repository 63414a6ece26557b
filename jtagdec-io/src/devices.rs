use std::fmt::Display;

use bitreader::{BitReader, BitReaderError};

use crate::{Hex, shift::Shift, units::Bits};

/// A decoded device identification register.
///
/// IEEE 1149.1-2013, Figure 12-1, "Structure of the device identification
/// code":
///
/// ```text
/// [31:28] version
/// [27:12] part number
/// [11: 1] manufacturer identity (JEDEC)
/// [    0] 1
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IdCode {
    pub raw: u32,
    pub version: u8,
    pub part: u16,
    pub manufacturer: u16,
    pub reserved: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum IdCodeError {
    #[error("IDCODE is {width} bits wide, got {0}", width = IdCode::WIDTH.0)]
    Width(usize),
    #[error("failed to read IDCODE fields")]
    Read(#[from] BitReaderError),
}

impl IdCode {
    pub const WIDTH: Bits<u8> = Bits(32);

    pub fn from_shift(bits: &Shift) -> Result<Self, IdCodeError> {
        if bits.len_bits() != Bits::<usize>::from(Self::WIDTH) {
            return Err(IdCodeError::Width(bits.len()));
        }
        let bytes = bits.to_msb_bytes();

        let raw = BitReader::new(&bytes).read_u32(32)?;
        let mut reader = BitReader::new(&bytes);
        let version = reader.read_u8(4)?;
        let part = reader.read_u16(16)?;
        let manufacturer = reader.read_u16(11)?;
        let reserved = reader.read_bool()?;
        Ok(Self {
            raw,
            version,
            part,
            manufacturer,
            reserved,
        })
    }
}

impl Display for IdCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Hex(self.raw).fmt(f)
    }
}
