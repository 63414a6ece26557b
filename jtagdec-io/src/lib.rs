pub mod annotation;
pub mod devices;
pub mod event;
pub mod jtag;
pub mod shift;
pub mod trace;
pub mod units;
mod utils;

pub use crate::{
    annotation::{Annotation, Class, Row, Sink},
    event::{Chain, Direction, Event, EventKind},
    shift::{Bit, Shift, Span},
    utils::Hex,
};
