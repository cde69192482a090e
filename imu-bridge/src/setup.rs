//! One-shot sensor configuration
//!
//! Runs strictly before the publish loop starts and never overlaps with
//! it: disables the raw-output registers so only NMEA sentences remain on
//! the line, then enables periodic NMEA output at the requested rate.

use tracing::{debug, info};

use um7::{disable_output, enable_nmea, registers};

use crate::transport::{Transport, TransportError};

/// Configure the sensor for NMEA-only output at `rate_hz`.
///
/// Command failures are not retried here; the caller decides whether a
/// partially configured sensor is worth proceeding with (it usually is —
/// the sensor may already hold the right configuration from a previous
/// run).
pub fn configure_sensor<T: Transport>(
    transport: &mut T,
    rate_hz: u8,
) -> Result<(), TransportError> {
    for register in registers::raw_output_registers() {
        let packet = disable_output(register);
        debug!("disabling raw output register {register:#04x}");
        transport.write_all(packet.as_bytes())?;
    }

    let packet = enable_nmea(rate_hz);
    transport.write_all(packet.as_bytes())?;

    info!("Sensor configured: raw output disabled, NMEA sentences at {rate_hz} Hz");
    Ok(())
}
