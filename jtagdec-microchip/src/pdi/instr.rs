//! PDI instruction set tables.
//!
//! Instruction byte layout:
//!
//! ```text
//! [7:5] opcode
//! [3:2] pointer mode (LD/ST), or [3:0] register index (LDCS/STCS)
//! [1:0] operand size
//! ```
//!
//! Nothing in the frame decoder consumes these yet.

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::VariantArray)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Opcode {
    Lds = 0,
    Ld = 1,
    Sts = 2,
    St = 3,
    Ldcs = 4,
    Repeat = 5,
    Stcs = 6,
    Key = 7,
}

impl Opcode {
    pub const fn from_instruction(byte: u8) -> Self {
        match byte >> 5 {
            0 => Opcode::Lds,
            1 => Opcode::Ld,
            2 => Opcode::Sts,
            3 => Opcode::St,
            4 => Opcode::Ldcs,
            5 => Opcode::Repeat,
            6 => Opcode::Stcs,
            _ => Opcode::Key,
        }
    }
}

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerMode {
    Deref = 0,
    DerefPostIncrement = 1,
    Pointer = 2,
    /// Reserved encoding.
    PointerPostIncrement = 3,
}

impl PointerMode {
    pub const fn from_instruction(byte: u8) -> Self {
        match (byte >> 2) & 0b11 {
            0 => PointerMode::Deref,
            1 => PointerMode::DerefPostIncrement,
            2 => PointerMode::Pointer,
            _ => PointerMode::PointerPostIncrement,
        }
    }

    pub const fn nice(self) -> &'static str {
        match self {
            PointerMode::Deref => "*(ptr)",
            PointerMode::DerefPostIncrement => "*(ptr++)",
            PointerMode::Pointer => "ptr",
            PointerMode::PointerPostIncrement => "ptr++ (rsv)",
        }
    }

    pub const fn terse(self) -> &'static str {
        match self {
            PointerMode::Deref => "*p",
            PointerMode::DerefPostIncrement => "*p++",
            PointerMode::Pointer => "p",
            PointerMode::PointerPostIncrement => "(rsv)",
        }
    }
}

/// PDI control/status registers, addressed by LDCS/STCS.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ControlRegister {
    Status = 0,
    Reset = 1,
    Ctrl = 2,
}

impl ControlRegister {
    pub const fn from_instruction(byte: u8) -> Option<Self> {
        match byte & 0x0f {
            0 => Some(ControlRegister::Status),
            1 => Some(ControlRegister::Reset),
            2 => Some(ControlRegister::Ctrl),
            _ => None,
        }
    }
}
