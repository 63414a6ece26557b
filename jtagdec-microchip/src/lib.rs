//! Atmel/Microchip AVR support: the XMEGA JTAG instruction set, IDCODE
//! tables, and PDI framing carried over the PDICOM register.

pub mod decoder;
pub mod devices;
pub mod ir;
pub mod pdi;

pub use crate::{decoder::Decoder, ir::Register};
