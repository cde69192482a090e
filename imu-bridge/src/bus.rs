//! Telemetry bus edge
//!
//! The bus itself is an external collaborator; the driver only needs a
//! `publish(topic, bytes)` seam. Payload serialization happens at the
//! publish loop's edge, so the bus sees opaque bytes.

use std::io::Write;

use thiserror::Error;

/// Errors surfaced by a bus implementation.
#[derive(Debug, Error)]
pub enum BusError {
    #[error("bus write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Accepts serialized readings on a named logical channel.
pub trait TelemetryBus {
    fn publish(&mut self, topic: &str, payload: &[u8]) -> Result<(), BusError>;
}

/// Bus writing one `<topic>\t<payload>` line per message to a byte sink.
///
/// The binary points this at stdout; tests point it at a buffer.
pub struct JsonlBus<W> {
    sink: W,
}

impl<W: Write> JsonlBus<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }
}

impl<W: Write> TelemetryBus for JsonlBus<W> {
    fn publish(&mut self, topic: &str, payload: &[u8]) -> Result<(), BusError> {
        self.sink.write_all(topic.as_bytes())?;
        self.sink.write_all(b"\t")?;
        self.sink.write_all(payload)?;
        self.sink.write_all(b"\n")?;
        self.sink.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jsonl_framing() {
        let mut bus = JsonlBus::new(Vec::new());
        bus.publish("/imu_data", br#"{"gyro_x_dps":1.0}"#).unwrap();
        bus.publish("/imu_data", br#"{"gyro_x_dps":2.0}"#).unwrap();

        let out = String::from_utf8(bus.sink).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "/imu_data\t{\"gyro_x_dps\":1.0}");
    }
}
