//! Byte transport over the sensor's serial link
//!
//! The driver owns the serial handle exclusively for its whole lifetime;
//! the port is released when the transport drops.

use std::io::{self, Read, Write};
use std::time::Duration;

use thiserror::Error;
use tracing::info;

/// Serial line rate the sensor is configured for.
pub const BAUD_RATE: u32 = 115_200;

/// Read timeout. A timeout is reported as an empty read, which makes the
/// blocking serial API behave as a non-blocking poll.
const READ_TIMEOUT: Duration = Duration::from_millis(10);

/// Errors from the byte transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Low-level I/O failure on an open port.
    #[error("serial I/O error: {0}")]
    Io(#[from] io::Error),

    /// The port could not be opened at startup.
    #[error("failed to open {port}: {source}")]
    Open {
        port: String,
        source: serialport::Error,
    },
}

/// Non-blocking byte stream to and from the sensor.
///
/// Abstracted behind a trait so the frame reader and publish loop can be
/// exercised against scripted transports in tests.
pub trait Transport {
    /// Read whatever bytes are available. `Ok(0)` means no data yet — not
    /// an error and not end-of-stream.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, TransportError>;

    /// Write a complete buffer to the sensor.
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), TransportError>;
}

/// Transport over a real serial port, opened 115200 8N1.
pub struct SerialTransport {
    port: Box<dyn serialport::SerialPort>,
}

impl SerialTransport {
    /// Open the serial device with the sensor's fixed line parameters.
    pub fn open(path: &str) -> Result<Self, TransportError> {
        let port = serialport::new(path, BAUD_RATE)
            .data_bits(serialport::DataBits::Eight)
            .parity(serialport::Parity::None)
            .stop_bits(serialport::StopBits::One)
            .timeout(READ_TIMEOUT)
            .open()
            .map_err(|source| TransportError::Open {
                port: path.to_string(),
                source,
            })?;

        info!("Opened {path} at {BAUD_RATE} baud, 8N1");
        Ok(Self { port })
    }
}

impl Transport for SerialTransport {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, TransportError> {
        match self.port.read(buf) {
            Ok(n) => Ok(n),
            // No data arrived within the poll window.
            Err(e) if e.kind() == io::ErrorKind::TimedOut => Ok(0),
            Err(e) => Err(e.into()),
        }
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        self.port.write_all(bytes)?;
        Ok(())
    }
}
