//! Field decoding for UM7 telemetry sentences
//!
//! Decoders never escalate a parse failure: the affected field group is
//! zero-filled, the reading is left fully defined, and the failure is
//! reported to the caller as a typed value for diagnostics only.

use std::f64::consts::PI;

use thiserror::Error;
use tracing::debug;

use crate::reading::SensorReading;

/// Wire field positions, counted from the tag field at index 0.
///
/// ```text
/// $PCHRA,<time>,<roll>,<pitch>,<yaw>,<heading>*CS
/// $PCHRS,<type>,<time>,<x>,<y>,<z>*CS
/// ```
const ATTITUDE_ROLL: usize = 2;
const RATE_TYPE: usize = 1;
const RATE_X: usize = 3;

/// Why a sentence failed to decode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("sentence is missing field {index}")]
    MissingField { index: usize },

    #[error("field {index} is not numeric: {token:?}")]
    BadNumber { index: usize, token: String },
}

/// Split a sentence into comma-delimited fields, dropping the trailing
/// NMEA `*checksum` suffix so the final field parses cleanly.
fn fields(sentence: &str) -> Vec<&str> {
    let body = sentence
        .split_once('*')
        .map_or(sentence, |(body, _checksum)| body);
    body.split(',').collect()
}

fn numeric_field(fields: &[&str], index: usize) -> Result<f64, DecodeError> {
    let token = fields
        .get(index)
        .ok_or(DecodeError::MissingField { index })?;
    token.trim().parse().map_err(|_| DecodeError::BadNumber {
        index,
        token: (*token).to_string(),
    })
}

fn integer_field(fields: &[&str], index: usize) -> Result<i64, DecodeError> {
    let token = fields
        .get(index)
        .ok_or(DecodeError::MissingField { index })?;
    token.trim().parse().map_err(|_| DecodeError::BadNumber {
        index,
        token: (*token).to_string(),
    })
}

/// Decode a `PCHRA` attitude sentence into the reading.
///
/// Roll, pitch and yaw arrive in degrees and are stored in radians. On any
/// parse failure all three attitude fields are zero-filled and the error is
/// returned for logging.
pub fn decode_attitude(sentence: &str, reading: &mut SensorReading) -> Result<(), DecodeError> {
    match parse_attitude(sentence) {
        Ok((roll_deg, pitch_deg, yaw_deg)) => {
            reading.roll_rad = roll_deg * PI / 180.0;
            reading.pitch_rad = pitch_deg * PI / 180.0;
            reading.yaw_rad = yaw_deg * PI / 180.0;
            Ok(())
        }
        Err(err) => {
            reading.clear_attitude();
            Err(err)
        }
    }
}

fn parse_attitude(sentence: &str) -> Result<(f64, f64, f64), DecodeError> {
    let fields = fields(sentence);
    let roll = numeric_field(&fields, ATTITUDE_ROLL)?;
    let pitch = numeric_field(&fields, ATTITUDE_ROLL + 1)?;
    let yaw = numeric_field(&fields, ATTITUDE_ROLL + 2)?;
    Ok((roll, pitch, yaw))
}

/// Decode a `PCHRS` rate/vector sentence into the reading.
///
/// The packet-type discriminator selects the target group: 0 = gyro rates,
/// 1 = accelerations, 2 = magnetometer vector. A type-2 sentence also
/// derives the magnetic bearing from the X/Y components, superseding any
/// bearing from other sources. Unknown discriminators are a logged no-op.
/// On any parse failure all nine vector fields are zero-filled and the
/// error is returned for logging.
pub fn decode_rate_vector(sentence: &str, reading: &mut SensorReading) -> Result<(), DecodeError> {
    match parse_rate_vector(sentence) {
        Ok(Some((packet_type, x, y, z))) => {
            apply_rate_vector(reading, packet_type, x, y, z);
            Ok(())
        }
        Ok(None) => Ok(()),
        Err(err) => {
            reading.clear_vectors();
            Err(err)
        }
    }
}

/// Packet types carried by the rate/vector discriminator field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RatePacket {
    Gyro,
    Accel,
    Mag,
}

fn parse_rate_vector(sentence: &str) -> Result<Option<(RatePacket, f64, f64, f64)>, DecodeError> {
    let fields = fields(sentence);

    let packet_type = match integer_field(&fields, RATE_TYPE)? {
        0 => RatePacket::Gyro,
        1 => RatePacket::Accel,
        2 => RatePacket::Mag,
        other => {
            debug!("unexpected rate sentence packet type {other}, ignoring");
            return Ok(None);
        }
    };

    let x = numeric_field(&fields, RATE_X)?;
    let y = numeric_field(&fields, RATE_X + 1)?;
    let z = numeric_field(&fields, RATE_X + 2)?;
    Ok(Some((packet_type, x, y, z)))
}

fn apply_rate_vector(reading: &mut SensorReading, packet_type: RatePacket, x: f64, y: f64, z: f64) {
    match packet_type {
        RatePacket::Gyro => {
            reading.gyro_x_dps = x;
            reading.gyro_y_dps = y;
            reading.gyro_z_dps = z;
        }
        RatePacket::Accel => {
            reading.accel_x_g = x;
            reading.accel_y_g = y;
            reading.accel_z_g = z;
        }
        RatePacket::Mag => {
            reading.mag_x_ut = x;
            reading.mag_y_ut = y;
            reading.mag_z_ut = z;
            reading.bearing_deg = bearing_from_mag(x, y);
        }
    }
}

/// Magnetic bearing from the horizontal magnetometer components,
/// normalized into `[0, 360)` degrees.
fn bearing_from_mag(mag_x: f64, mag_y: f64) -> f64 {
    let bearing = -mag_y.atan2(mag_x) * 180.0 / PI;
    if bearing < 0.0 {
        bearing + 360.0
    } else {
        bearing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_attitude_degrees_to_radians() {
        let mut reading = SensorReading::default();
        let result = decode_attitude("$PCHRA,504.96,90.0,0.0,180.0,27.5*3E", &mut reading);

        assert!(result.is_ok());
        assert_relative_eq!(reading.roll_rad, PI / 2.0, epsilon = 1e-12);
        assert_relative_eq!(reading.pitch_rad, 0.0, epsilon = 1e-12);
        assert_relative_eq!(reading.yaw_rad, PI, epsilon = 1e-12);
    }

    #[test]
    fn test_attitude_ignores_heading_field() {
        let mut reading = SensorReading {
            bearing_deg: 315.0,
            ..Default::default()
        };
        decode_attitude("$PCHRA,1.0,10.0,20.0,30.0,99.0*11", &mut reading).unwrap();

        // Bearing comes from the magnetometer, never from the attitude
        // sentence's heading column.
        assert_eq!(reading.bearing_deg, 315.0);
    }

    #[test]
    fn test_attitude_malformed_zero_fills() {
        let mut reading = SensorReading {
            roll_rad: 1.0,
            pitch_rad: 1.0,
            yaw_rad: 1.0,
            gyro_x_dps: 5.0,
            ..Default::default()
        };

        let result = decode_attitude("$PCHRA,504.96,90.0,oops,180.0*4A", &mut reading);
        assert_eq!(
            result,
            Err(DecodeError::BadNumber {
                index: 3,
                token: "oops".to_string()
            })
        );
        assert_eq!(reading.roll_rad, 0.0);
        assert_eq!(reading.pitch_rad, 0.0);
        assert_eq!(reading.yaw_rad, 0.0);
        // Other groups untouched
        assert_eq!(reading.gyro_x_dps, 5.0);
    }

    #[test]
    fn test_attitude_missing_fields() {
        let mut reading = SensorReading::default();
        let result = decode_attitude("$PCHRA,504.96,90.0", &mut reading);
        assert_eq!(result, Err(DecodeError::MissingField { index: 3 }));
    }

    #[test]
    fn test_gyro_packet_sets_only_gyro_group() {
        let mut reading = SensorReading {
            accel_x_g: 9.8,
            mag_x_ut: 40.0,
            ..Default::default()
        };
        decode_rate_vector("$PCHRS,0,504.96,1.0,2.0,3.0*32", &mut reading).unwrap();

        assert_eq!(reading.gyro_x_dps, 1.0);
        assert_eq!(reading.gyro_y_dps, 2.0);
        assert_eq!(reading.gyro_z_dps, 3.0);
        assert_eq!(reading.accel_x_g, 9.8);
        assert_eq!(reading.mag_x_ut, 40.0);
    }

    #[test]
    fn test_accel_packet() {
        let mut reading = SensorReading::default();
        decode_rate_vector("$PCHRS,1,504.96,0.01,-0.02,1.0*55", &mut reading).unwrap();

        assert_relative_eq!(reading.accel_x_g, 0.01);
        assert_relative_eq!(reading.accel_y_g, -0.02);
        assert_relative_eq!(reading.accel_z_g, 1.0);
    }

    #[test]
    fn test_mag_packet_derives_bearing() {
        let mut reading = SensorReading::default();
        decode_rate_vector("$PCHRS,2,504.96,1.0,1.0,0.0*2F", &mut reading).unwrap();

        assert_eq!(reading.mag_x_ut, 1.0);
        assert_eq!(reading.mag_y_ut, 1.0);
        assert_eq!(reading.mag_z_ut, 0.0);
        assert_relative_eq!(reading.bearing_deg, 315.0, epsilon = 1e-12);
    }

    #[test]
    fn test_bearing_normalization() {
        // East-pointing field: atan2(0, 1) = 0, no wrap needed
        assert_relative_eq!(bearing_from_mag(1.0, 0.0), 0.0);
        // atan2(-1, 1) = -45 deg, negated to 45
        assert_relative_eq!(bearing_from_mag(1.0, -1.0), 45.0, epsilon = 1e-12);
        // atan2(1, 0) = 90 deg, negated to -90, wrapped to 270
        assert_relative_eq!(bearing_from_mag(0.0, 1.0), 270.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rate_malformed_zero_fills_all_nine() {
        let mut reading = SensorReading {
            gyro_x_dps: 1.0,
            gyro_y_dps: 1.0,
            gyro_z_dps: 1.0,
            accel_x_g: 1.0,
            accel_y_g: 1.0,
            accel_z_g: 1.0,
            mag_x_ut: 1.0,
            mag_y_ut: 1.0,
            mag_z_ut: 1.0,
            roll_rad: 0.7,
            ..Default::default()
        };

        let result = decode_rate_vector("$PCHRS,0,504.96", &mut reading);
        assert_eq!(result, Err(DecodeError::MissingField { index: 3 }));

        assert_eq!(reading.gyro_x_dps, 0.0);
        assert_eq!(reading.gyro_y_dps, 0.0);
        assert_eq!(reading.gyro_z_dps, 0.0);
        assert_eq!(reading.accel_x_g, 0.0);
        assert_eq!(reading.accel_y_g, 0.0);
        assert_eq!(reading.accel_z_g, 0.0);
        assert_eq!(reading.mag_x_ut, 0.0);
        assert_eq!(reading.mag_y_ut, 0.0);
        assert_eq!(reading.mag_z_ut, 0.0);
        // Attitude group untouched
        assert_eq!(reading.roll_rad, 0.7);
    }

    #[test]
    fn test_unknown_discriminator_is_noop() {
        let mut reading = SensorReading {
            gyro_x_dps: 4.0,
            ..Default::default()
        };
        let result = decode_rate_vector("$PCHRS,7,504.96,1.0,2.0,3.0*35", &mut reading);

        assert!(result.is_ok());
        assert_eq!(reading.gyro_x_dps, 4.0);
    }

    #[test]
    fn test_non_numeric_discriminator_is_decode_failure() {
        let mut reading = SensorReading {
            accel_z_g: 1.0,
            ..Default::default()
        };
        let result = decode_rate_vector("$PCHRS,x,504.96,1.0,2.0,3.0*6D", &mut reading);

        assert!(result.is_err());
        assert_eq!(reading.accel_z_g, 0.0);
    }

    #[test]
    fn test_checksum_suffix_stripped_from_last_field() {
        let mut reading = SensorReading::default();
        // Without suffix stripping the z field would read "3.0*32"
        decode_rate_vector("$PCHRS,0,504.96,1.0,2.0,3.0*32", &mut reading).unwrap();
        assert_eq!(reading.gyro_z_dps, 3.0);
    }
}
