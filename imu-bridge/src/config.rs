//! Driver tuning knobs

use std::time::Duration;

/// Runtime configuration for the publish loop.
///
/// The binary fills this from CLI arguments; tests construct it directly.
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Logical bus channel readings are published on.
    pub topic: String,
    /// Consecutive transport read failures tolerated before the loop gives
    /// up. The failure that reaches this bound is fatal.
    pub max_read_errors: u32,
    /// Cooperative yield after an empty read.
    pub poll_interval: Duration,
    /// Cooperative backoff after a transport read failure.
    pub retry_delay: Duration,
    /// Cooperative yield after each publish, leaving the bus room for its
    /// own I/O.
    pub publish_interval: Duration,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            topic: "/imu_data".to_string(),
            max_read_errors: 10,
            poll_interval: Duration::from_millis(10),
            retry_delay: Duration::from_millis(100),
            publish_interval: Duration::from_millis(50),
        }
    }
}
