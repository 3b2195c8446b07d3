mod common;

use std::time::Duration;

use blinkstick_matrix::{tokio::AsyncBlinkStick, Config, Rgb};
use eyre::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::common::LogTransport;

async fn do_other_stuff(delay: Duration, repeats: u32) {
	for i in 1..=repeats {
		info!("doing stuff {i}");
		tokio::time::sleep(delay).await;
	}
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;
	tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

	let device = AsyncBlinkStick::new(LogTransport::default(), Config::default());

	// the animations interleave with each other and with unrelated work
	let (pulse, blink, ()) = tokio::join!(
		device.pulse(0, 1, Rgb::new(0, 0, 50), 3, Duration::from_millis(1000), 50),
		device.blink(0, 0, Rgb::new(0, 100, 0), 5, Duration::from_millis(100)),
		do_other_stuff(Duration::from_millis(500), 10),
	);
	pulse?;
	blink?;

	Ok(())
}
