mod common;

use std::time::Duration;

use blinkstick_matrix::{BlinkStick, BlinkStickProMatrix, Channel, ColorRequest, Config, MatrixLayout, Rgb};
use eyre::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::common::LogTransport;

fn main() -> Result<()> {
	color_eyre::install()?;
	tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

	let config = Config::default();

	let mut device = BlinkStick::new(LogTransport::default(), config.clone());
	device.blink(0, 0, ColorRequest::named("orange"), 2, Duration::from_millis(100))?;
	device.pulse(0, 0, ColorRequest::hex("#09c"), 1, Duration::from_millis(500), 10)?;

	let layout = MatrixLayout::new().with_channel(Channel::R, 8, 8).with_channel(Channel::G, 8, 8);
	let mut matrix = BlinkStickProMatrix::new(LogTransport::default(), config, layout);

	let green = Rgb::new(0, 255, 0);
	for n in 0..10u8 {
		matrix.clear();
		matrix.digit(6, 1, n, green)?;
		matrix.rectangle(0, 0, 15, 7, Rgb::new(0, 0, 64))?;

		let timing = matrix.send_data(Channel::R)?;
		let timing = timing + matrix.send_data(Channel::G)?;
		info!(digit = n, ?timing, "frame sent");
	}

	for _ in 0..16 {
		matrix.shift_left(false);
		matrix.send_data_all()?;
	}

	matrix.off()?;

	Ok(())
}
