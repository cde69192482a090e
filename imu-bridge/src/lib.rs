//! Serial driver bridging a UM7 inertial sensor onto the telemetry bus.
//!
//! The driver configures the sensor over its binary command protocol, then
//! runs a cooperative read → decode → publish cycle: raw serial bytes are
//! framed into NMEA-style sentences, dispatched to the matching decoder,
//! accumulated into a [`um7::SensorReading`], and published once per full
//! sentence cycle.

pub mod bus;
pub mod config;
pub mod dispatch;
pub mod frame;
pub mod publish;
pub mod setup;
pub mod transport;
