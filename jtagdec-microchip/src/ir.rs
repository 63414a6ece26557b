use jtagdec_io::{Shift, units::Bits};

/// XMEGA JTAG instruction opcodes (4-bit IR).
pub mod instructions {
    pub const IDCODE: u8 = 0b0011;
    pub const PDICOM: u8 = 0b0111;
    pub const BYPASS: u8 = 0b1111;
}

/// The data register selected by the last IR shift.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::IntoStaticStr)]
pub enum Register {
    #[default]
    #[strum(serialize = "IDLE")]
    Idle,
    #[strum(serialize = "BYPASS")]
    Bypass,
    #[strum(serialize = "IDCODE")]
    IdCode,
    #[strum(serialize = "PDICOM")]
    PdiCom,
    #[strum(serialize = "UNKNOWN")]
    Unknown,
}

impl Register {
    pub const IR_LEN: Bits<u8> = Bits(4);

    pub const fn from_opcode(opcode: u8) -> Self {
        match opcode & 0xf {
            instructions::IDCODE => Register::IdCode,
            instructions::PDICOM => Register::PdiCom,
            instructions::BYPASS => Register::Bypass,
            _ => Register::Unknown,
        }
    }

    /// Look up the register from the four most significant bits of an IR
    /// shift. Shorter shifts select nothing.
    pub fn from_ir(bits: &Shift) -> Self {
        let len = usize::from(Self::IR_LEN.0);
        let Some(first) = bits.len().checked_sub(len) else {
            return Register::Unknown;
        };
        match bits.value(first..=first + len - 1) {
            Some(opcode) => Self::from_opcode(opcode as u8),
            None => Register::Unknown,
        }
    }

    pub const fn width(self) -> Bits<u8> {
        match self {
            Register::IdCode => Bits(32),
            Register::PdiCom => Bits(9),
            Register::Bypass => Bits(1),
            Register::Idle | Register::Unknown => Bits(0),
        }
    }
}
