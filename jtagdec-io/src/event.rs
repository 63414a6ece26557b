use crate::{
    jtag::State,
    shift::{Shift, Span},
};

/// Which TAP register a shift went through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumString)]
pub enum Chain {
    #[strum(serialize = "IR")]
    Ir,
    #[strum(serialize = "DR")]
    Dr,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumString)]
pub enum Direction {
    /// Host to device, sampled on TDI.
    #[strum(serialize = "TDI")]
    ToDevice,
    /// Device to host, sampled on TDO.
    #[strum(serialize = "TDO")]
    ToHost,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EventKind {
    /// The TAP controller entered a new state. Carries no bits.
    NewState(State),
    /// A register shift completed.
    Shift {
        chain: Chain,
        direction: Direction,
        bits: Shift,
    },
}

/// One notification from the upstream TAP decoder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    pub span: Span,
    pub kind: EventKind,
}

impl Event {
    pub fn new_state(span: Span, state: State) -> Self {
        let kind = EventKind::NewState(state);
        Self { span, kind }
    }

    pub fn shift(span: Span, chain: Chain, direction: Direction, bits: Shift) -> Self {
        let kind = EventKind::Shift {
            chain,
            direction,
            bits,
        };
        Self { span, kind }
    }

    pub fn ir_tdi(span: Span, bits: Shift) -> Self {
        Self::shift(span, Chain::Ir, Direction::ToDevice, bits)
    }

    pub fn dr_tdi(span: Span, bits: Shift) -> Self {
        Self::shift(span, Chain::Dr, Direction::ToDevice, bits)
    }

    pub fn dr_tdo(span: Span, bits: Shift) -> Self {
        Self::shift(span, Chain::Dr, Direction::ToHost, bits)
    }
}
