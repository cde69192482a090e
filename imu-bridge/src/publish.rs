//! The read → decode → publish cycle
//!
//! A single cooperative task alternates between two states: Reading
//! (consuming sentences, accumulating decoded fields) and Publishing (the
//! cycle boundary, entered once every recognized tag has been seen). All
//! waiting is a short `tokio::time::sleep`; nothing blocks the thread for
//! longer than one bounded serial poll.

use thiserror::Error;
use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use um7::SensorReading;

use crate::bus::{BusError, TelemetryBus};
use crate::config::DriverConfig;
use crate::dispatch::{DispatchOutcome, TagDispatcher};
use crate::frame::FrameReader;
use crate::transport::{Transport, TransportError};

/// Fatal conditions that stop the driver.
#[derive(Debug, Error)]
pub enum DriverError {
    /// The transport failed `count` consecutive reads; the sensor link is
    /// considered gone.
    #[error("transport failed {count} consecutive reads: {source}")]
    TransportExhausted {
        count: u32,
        source: TransportError,
    },

    /// The bus rejected a publish; there is no consumer left to feed.
    #[error("telemetry bus rejected publish: {0}")]
    Bus(#[from] BusError),

    #[error("failed to serialize reading: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Owns the reading aggregate and drives the full bridge cycle.
///
/// The reading is lent to decoders one dispatch call at a time and is never
/// retained by them. It is not reset between publishes: every gated cycle
/// re-decodes (or zero-fills) both sentence families before the next
/// publish, and vector subgroups absent from a cycle's traffic deliberately
/// carry their last decoded value.
pub struct PublishLoop<T, B> {
    reader: FrameReader<T>,
    dispatcher: TagDispatcher,
    reading: SensorReading,
    bus: B,
    config: DriverConfig,
}

impl<T: Transport, B: TelemetryBus> PublishLoop<T, B> {
    pub fn new(reader: FrameReader<T>, bus: B, config: DriverConfig) -> Self {
        Self {
            reader,
            dispatcher: TagDispatcher::new(),
            reading: SensorReading::default(),
            bus,
            config,
        }
    }

    /// Run until the shutdown signal flips or a fatal error occurs.
    ///
    /// Transport read failures are tolerated up to
    /// `config.max_read_errors` consecutive occurrences with a cooperative
    /// backoff between attempts; the failure that reaches the bound is
    /// returned. Decode failures never count towards the bound — they are
    /// local and self-healing through the zero-fill fallback.
    pub async fn run(mut self, shutdown: watch::Receiver<bool>) -> Result<(), DriverError> {
        let mut consecutive_errors = 0u32;
        info!(
            "Publishing on {} once per full sentence cycle",
            self.config.topic
        );

        loop {
            if *shutdown.borrow() {
                info!("Shutdown requested, stopping publish loop");
                return Ok(());
            }

            let sentence = match self.reader.next_sentence() {
                Ok(Some(sentence)) => {
                    consecutive_errors = 0;
                    sentence
                }
                Ok(None) => {
                    // The transport is healthy, just quiet.
                    consecutive_errors = 0;
                    sleep(self.config.poll_interval).await;
                    continue;
                }
                Err(err) => {
                    consecutive_errors += 1;
                    if consecutive_errors >= self.config.max_read_errors {
                        return Err(DriverError::TransportExhausted {
                            count: consecutive_errors,
                            source: err,
                        });
                    }
                    warn!(
                        "transport read failed ({consecutive_errors}/{}): {err}",
                        self.config.max_read_errors
                    );
                    sleep(self.config.retry_delay).await;
                    continue;
                }
            };

            match self.dispatcher.dispatch(&sentence, &mut self.reading) {
                DispatchOutcome::Decoded(tag) => debug!("decoded {} sentence", tag.marker()),
                // Malformed already warned and zero-filled in the dispatcher;
                // unrecognized and empty are not errors.
                DispatchOutcome::Malformed(_)
                | DispatchOutcome::Unrecognized
                | DispatchOutcome::Empty => {}
            }

            if self.dispatcher.all_tags_seen() {
                self.publish_cycle()?;
                sleep(self.config.publish_interval).await;
            }
        }
    }

    /// Cycle boundary: emit the reading and start a fresh tag cycle.
    fn publish_cycle(&mut self) -> Result<(), DriverError> {
        let payload = serde_json::to_vec(&self.reading)?;
        self.bus.publish(&self.config.topic, &payload)?;
        self.dispatcher.reset_cycle();
        debug!("published reading");
        Ok(())
    }
}
