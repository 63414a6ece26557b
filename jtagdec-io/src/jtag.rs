/// TAP controller states, as reported by the upstream state notifications.
///
/// Names follow the IEEE 1149.1 state diagram, hyphenated and upper-case.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum::VariantArray,
    strum::EnumString,
    strum::Display,
    strum::IntoStaticStr,
)]
#[repr(u8)]
pub enum State {
    #[strum(serialize = "TEST-LOGIC-RESET")]
    TestLogicReset,
    #[strum(serialize = "RUN-TEST/IDLE")]
    RunTestIdle,
    #[strum(serialize = "SELECT-DR-SCAN")]
    SelectDR,
    #[strum(serialize = "CAPTURE-DR")]
    CaptureDR,
    #[strum(serialize = "SHIFT-DR")]
    ShiftDR,
    #[strum(serialize = "EXIT1-DR")]
    Exit1DR,
    #[strum(serialize = "PAUSE-DR")]
    PauseDR,
    #[strum(serialize = "EXIT2-DR")]
    Exit2DR,
    #[strum(serialize = "UPDATE-DR")]
    UpdateDR,
    #[strum(serialize = "SELECT-IR-SCAN")]
    SelectIR,
    #[strum(serialize = "CAPTURE-IR")]
    CaptureIR,
    #[strum(serialize = "SHIFT-IR")]
    ShiftIR,
    #[strum(serialize = "EXIT1-IR")]
    Exit1IR,
    #[strum(serialize = "PAUSE-IR")]
    PauseIR,
    #[strum(serialize = "EXIT2-IR")]
    Exit2IR,
    #[strum(serialize = "UPDATE-IR")]
    UpdateIR,
}

impl State {
    pub const fn is_shift(self) -> bool {
        matches!(self, State::ShiftDR | State::ShiftIR)
    }
}

#[cfg(test)]
mod tests {
    use strum::VariantArray;

    use super::*;

    #[test]
    fn test_names() {
        for state in State::VARIANTS {
            let name = state.to_string();
            assert_eq!(name.parse::<State>(), Ok(*state), "{name}");
        }
        assert_eq!("RUN-TEST/IDLE".parse::<State>(), Ok(State::RunTestIdle));
        assert!("SHIFT_DR".parse::<State>().is_err());
    }

    #[test]
    fn test_is_shift() {
        let shifts = State::VARIANTS.iter().filter(|s| s.is_shift()).count();
        assert_eq!(shifts, 2);
    }
}
