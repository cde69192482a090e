//! UM7 telemetry bridge binary.

use anyhow::Result;
use clap::Parser;
use tokio::signal;
use tokio::sync::watch;
use tracing::{info, warn};

use imu_bridge::bus::JsonlBus;
use imu_bridge::config::DriverConfig;
use imu_bridge::frame::FrameReader;
use imu_bridge::publish::PublishLoop;
use imu_bridge::setup::configure_sensor;
use imu_bridge::transport::SerialTransport;

#[derive(Parser, Debug)]
#[command(author, version, about = "Bridge a UM7 inertial sensor onto the telemetry bus")]
struct Args {
    /// Serial device the sensor is attached to
    #[arg(long, default_value = "/dev/ttyS4")]
    port: String,

    /// Bus topic readings are published on
    #[arg(long, default_value = "/imu_data")]
    topic: String,

    /// NMEA output rate requested from the sensor, in Hz
    #[arg(long, default_value_t = 1)]
    rate: u8,

    /// Consecutive transport read failures tolerated before giving up
    #[arg(long, default_value_t = 10)]
    max_read_errors: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let mut transport = SerialTransport::open(&args.port)?;

    // Best-effort: a partially configured sensor still produces sentences
    // if a previous run left the right registers set.
    if let Err(err) = configure_sensor(&mut transport, args.rate) {
        warn!("sensor configuration incomplete, continuing anyway: {err}");
    }

    let config = DriverConfig {
        topic: args.topic,
        max_read_errors: args.max_read_errors,
        ..Default::default()
    };

    let reader = FrameReader::new(transport);
    let bus = JsonlBus::new(std::io::stdout());
    let publish_loop = PublishLoop::new(reader, bus, config);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            info!("Interrupt received, shutting down");
            let _ = shutdown_tx.send(true);
        }
    });

    publish_loop.run(shutdown_rx).await?;
    Ok(())
}
