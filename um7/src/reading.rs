//! Decoded sensor state aggregate

use serde::{Deserialize, Serialize};

/// The most recent decoded values from the sensor's telemetry stream.
///
/// Field groups are updated together by whichever decoder parses a matching
/// sentence; a group holds either the last successfully decoded values or
/// the zero-fill fallback from a failed decode of that group's sentence.
/// The serialized field names match the bus message schema exactly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub gyro_x_dps: f64,
    pub gyro_y_dps: f64,
    pub gyro_z_dps: f64,
    pub accel_x_g: f64,
    pub accel_y_g: f64,
    pub accel_z_g: f64,
    #[serde(rename = "mag_x_uT")]
    pub mag_x_ut: f64,
    #[serde(rename = "mag_y_uT")]
    pub mag_y_ut: f64,
    #[serde(rename = "mag_z_uT")]
    pub mag_z_ut: f64,
    pub roll_rad: f64,
    pub pitch_rad: f64,
    pub yaw_rad: f64,
    pub bearing_deg: f64,
}

impl SensorReading {
    /// Zero-fill fallback for the attitude group.
    pub fn clear_attitude(&mut self) {
        self.roll_rad = 0.0;
        self.pitch_rad = 0.0;
        self.yaw_rad = 0.0;
    }

    /// Zero-fill fallback for all nine vector fields (gyro, accel, mag).
    pub fn clear_vectors(&mut self) {
        self.gyro_x_dps = 0.0;
        self.gyro_y_dps = 0.0;
        self.gyro_z_dps = 0.0;
        self.accel_x_g = 0.0;
        self.accel_y_g = 0.0;
        self.accel_z_g = 0.0;
        self.mag_x_ut = 0.0;
        self.mag_y_ut = 0.0;
        self.mag_z_ut = 0.0;
    }
}
