//! UM7 inertial sensor protocol
//!
//! This crate provides the wire-level protocol for the UM7 orientation
//! sensor: decoding of the NMEA-style ASCII telemetry sentences the sensor
//! emits, and construction of the binary `s n p` command packets used to
//! configure it. It contains no I/O; transports live in the driver crate.

mod checksum;
mod command;
mod decode;
mod reading;
pub mod registers;
mod sentence;

pub use checksum::{command_checksum, verify_command_checksum};
pub use command::{
    build_register_read, build_register_write, disable_output, enable_nmea, CommandPacket,
    FLAGS_READ, FLAGS_WRITE, PACKET_SIZE, SYNC,
};
pub use decode::{decode_attitude, decode_rate_vector, DecodeError};
pub use reading::SensorReading;
pub use sentence::SentenceTag;
