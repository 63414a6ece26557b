use std::ops::RangeInclusive;

use jtagdec_io::{
    Annotation, Chain, Class, Direction, Event, EventKind, Shift, Sink, Span, devices::IdCode,
};
use tracing::{debug, instrument, trace, warn};

use crate::{devices::DeviceId, ir::Register, pdi};

/// Routes upstream TAP events to the handler for the currently selected data
/// register.
///
/// BYPASS and IDCODE go back to [`Register::Idle`] once their shift has been
/// decoded. PDICOM stays selected until the next IR shift, since every PDI
/// character is its own DR shift.
pub struct Decoder<S> {
    sink: S,
    register: Register,
}

impl<S: Sink> Decoder<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            register: Register::Idle,
        }
    }

    pub fn reset(&mut self) {
        self.register = Register::Idle;
    }

    pub fn register(&self) -> Register {
        self.register
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn decode_all<'e>(&mut self, events: impl IntoIterator<Item = &'e Event>) {
        for event in events {
            self.decode(event);
        }
    }

    #[instrument(skip_all, fields(start = event.span.start))]
    pub fn decode(&mut self, event: &Event) {
        let Event { span, kind } = event;
        match kind {
            EventKind::NewState(state) => {
                trace!(%state, shift = state.is_shift(), "tap state");
            }
            EventKind::Shift {
                chain: Chain::Ir,
                direction: Direction::ToDevice,
                bits,
            } => self.select(*span, bits),
            EventKind::Shift {
                chain: Chain::Ir,
                direction: Direction::ToHost,
                ..
            } => {}
            EventKind::Shift {
                chain: Chain::Dr,
                direction,
                bits,
            } => self.data(*span, *direction, bits),
        }
    }

    fn select(&mut self, span: Span, bits: &Shift) {
        self.register = Register::from_ir(bits);
        debug!(ir = %bits, register = %self.register, "selected register");
        self.put(span, Class::Command, [format!("IR: {}", self.register)]);
    }

    fn data(&mut self, span: Span, direction: Direction, bits: &Shift) {
        match (self.register, direction) {
            (Register::Bypass, Direction::ToDevice) => {
                self.bypass(span, bits);
                self.register = Register::Idle;
            }
            (Register::IdCode, Direction::ToHost) => {
                self.idcode(span, bits);
                self.register = Register::Idle;
            }
            (Register::PdiCom, Direction::ToDevice) => {
                pdi::handle_input(bits, span, &mut self.sink);
            }
            (Register::PdiCom, Direction::ToHost) => {
                self.put(span, Class::Command, ["PDICOM"]);
                pdi::handle_output(bits, span, &mut self.sink);
            }
            // IDCODE is only ever driven by the device, BYPASS is only
            // watched on TDI
            (Register::IdCode, Direction::ToDevice)
            | (Register::Bypass, Direction::ToHost)
            | (Register::Idle | Register::Unknown, _) => {}
        }
    }

    fn bypass(&mut self, span: Span, bits: &Shift) {
        self.put(span, Class::Item, [format!("BYPASS: {bits}")]);
    }

    fn idcode(&mut self, span: Span, bits: &Shift) {
        let idcode = match IdCode::from_shift(bits) {
            Ok(idcode) => idcode,
            Err(e) => {
                warn!(%e, bits = %bits, "malformed IDCODE shift");
                let text = format!("IDCODE: malformed register shift ({} bits)", bits.len());
                self.put(span, Class::Warning, [text]);
                return;
            }
        };
        let device = DeviceId::from(idcode);
        debug!(%device, "idcode");

        let DeviceId {
            manufacturer, part, ..
        } = device;
        self.field(bits, 0..=0, ["Reserved".into(), "Res".into(), "R".into()]);
        self.field(
            bits,
            1..=11,
            [format!("Manufacturer: {manufacturer}"), "Manuf".into(), "M".into()],
        );
        self.field(
            bits,
            12..=27,
            [format!("Part: {part}"), "Part".into(), "P".into()],
        );
        self.field(
            bits,
            28..=31,
            [format!("Version: {}", idcode.version), "Version".into(), "V".into()],
        );

        self.put(span, Class::Item, [format!("IDCODE: {idcode}")]);
        self.put(span, Class::Command, [format!("IDCODE: {device}")]);
    }

    fn field(&mut self, bits: &Shift, range: RangeInclusive<usize>, labels: [String; 3]) {
        if let Some(span) = bits.span(range) {
            self.put(span, Class::Field, labels);
        }
    }

    fn put(&mut self, span: Span, class: Class, labels: impl IntoIterator<Item = impl Into<String>>) {
        self.sink.put(Annotation::new(span, class, labels));
    }
}
