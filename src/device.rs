use std::{thread, time::Duration};
#[cfg(feature = "timings")]
use std::time::Instant;

use tracing::{debug, info, trace, warn};

use crate::{
	animation::{Animation, Step},
	remap::{remap_rgb, remap_rgb_reverse},
	Channel,
	ColorFormat,
	ColorRequest,
	Config,
	DeviceTransport,
	FormattedColor,
	Frame,
	Result,
	Rgb,
	TransportError,
	WriteResult,
};

/// Controller for a BlinkStick, setting LEDs one at a time.
///
/// All animations here block the calling thread until they are done, see
/// `tokio::AsyncBlinkStick` for a version that doesn't.
pub struct BlinkStick<T> {
	transport: T,
	config:    Config,
}

impl<T: DeviceTransport> BlinkStick<T> {
	pub fn new(transport: T, config: Config) -> Self {
		Self { transport, config }
	}

	pub fn config(&self) -> &Config {
		&self.config
	}

	/// Sets the configuration for the instance.
	pub fn set_config(&mut self, config: Config) {
		self.config = config;
	}

	pub fn set_inverse(&mut self, inverse: bool) {
		self.config.inverse = inverse;
	}

	pub fn set_max_rgb(&mut self, max_rgb: u8) {
		self.config.max_rgb = max_rgb;
	}

	pub fn set_error_reporting(&mut self, error_reporting: bool) {
		self.config.error_reporting = error_reporting;
	}

	pub fn transport(&self) -> &T {
		&self.transport
	}

	pub fn transport_mut(&mut self) -> &mut T {
		&mut self.transport
	}

	pub fn into_transport(self) -> T {
		self.transport
	}

	/// Passes transport errors on, or logs and drops them when error reporting is off.
	fn report<R: Default>(&self, result: Result<R, TransportError>) -> Result<R> {
		match result {
			Ok(value) => Ok(value),
			Err(err) if !self.config.error_reporting => {
				warn!("ignoring transport error: {err}");
				Ok(R::default())
			}
			Err(err) => Err(err.into()),
		}
	}

	/// Sets LED `index` on `channel` to `color` right away.
	///
	/// Colors that can't be resolved turn the LED off, a channel above 2 is an error.
	pub fn set_color<'a>(&mut self, channel: u8, index: u8, color: impl Into<ColorRequest<'a>>) -> Result<()> {
		let rgb = color.into().resolve_lenient();
		self.send_color(channel, index, rgb)
	}

	pub fn set_random_color(&mut self) -> Result<()> {
		self.set_color(0, 0, ColorRequest::random())
	}

	pub fn turn_off(&mut self) -> Result<()> {
		self.send_color(0, 0, Rgb::BLACK)
	}

	fn send_color(&mut self, channel: u8, index: u8, rgb: Rgb) -> Result<()> {
		let channel = Channel::try_from(channel)?.id();
		let mut device_rgb = remap_rgb(rgb, self.config.max_rgb);
		if self.config.inverse {
			device_rgb = device_rgb.inverted();
		}

		debug!(channel, index, %rgb, %device_rgb, "set color");
		let result = self.transport.send_immediate(channel, index, device_rgb);
		self.report(result)
	}

	/// The color LED `index` shows, as the device reports it.
	pub fn current_color(&mut self, index: u8) -> Result<Rgb> {
		let result = self.transport.read_color(index);
		let rgb = self.report(result)?;
		Ok(if self.config.inverse { rgb.inverted() } else { rgb })
	}

	pub fn get_color(&mut self, index: u8, format: ColorFormat) -> Result<FormattedColor> {
		Ok(format.format(self.current_color(index)?))
	}

	/// Sends one frame, then waits for the configured transmission delay.
	pub fn send_frame(&mut self, frame: &Frame) -> Result<WriteResult> {
		trace!(
			channel = ?frame.channel(),
			report = frame.report_id(),
			leds = frame.led_count(),
			"sending frame"
		);

		#[cfg(feature = "timings")]
		let start = Instant::now();

		let result = self.transport.send_frame(frame);
		self.report(result)?;

		#[cfg(feature = "timings")]
		let elapsed = start.elapsed();

		if !self.config.transmission_delay.is_zero() {
			thread::sleep(self.config.transmission_delay);
		}

		#[cfg(feature = "timings")]
		return Ok(elapsed);

		#[cfg(not(feature = "timings"))]
		Ok(())
	}

	/// Blinks LED `index` on `channel`, see [`Animation::blink`].
	pub fn blink<'a>(
		&mut self,
		channel: u8,
		index: u8,
		color: impl Into<ColorRequest<'a>>,
		repeats: u32,
		delay: Duration,
	) -> Result<()> {
		let color = color.into().resolve_lenient();
		info!(channel, index, %color, repeats, ?delay, "blink");
		self.run(channel, index, Animation::blink(color, repeats, delay))
	}

	/// Fades LED `index` on `channel` from its current color, see [`Animation::morph`].
	pub fn morph<'a>(
		&mut self,
		channel: u8,
		index: u8,
		color: impl Into<ColorRequest<'a>>,
		duration: Duration,
		steps: u32,
	) -> Result<()> {
		let color = color.into().resolve_lenient();
		info!(channel, index, %color, ?duration, steps, "morph");
		self.run(channel, index, Animation::morph(color, duration, steps))
	}

	/// Pulses LED `index` on `channel`, see [`Animation::pulse`].
	pub fn pulse<'a>(
		&mut self,
		channel: u8,
		index: u8,
		color: impl Into<ColorRequest<'a>>,
		repeats: u32,
		duration: Duration,
		steps: u32,
	) -> Result<()> {
		let color = color.into().resolve_lenient();
		info!(channel, index, %color, repeats, ?duration, steps, "pulse");
		self.run(channel, index, Animation::pulse(color, repeats, duration, steps))
	}

	/// Plays `animation` on LED `index` of `channel`, sleeping on this thread between steps.
	///
	/// Stops at the first transport error.
	pub fn run(&mut self, channel: u8, index: u8, mut animation: Animation) -> Result<()> {
		while let Some(step) = animation.next_step() {
			if let Some(delay) = self.apply_step(channel, index, step, &mut animation)? {
				thread::sleep(delay);
			}
		}
		Ok(())
	}

	/// Carries out everything in `step` except waiting, returns how long to wait if the
	/// step is a suspension.
	pub(crate) fn apply_step(
		&mut self,
		channel: u8,
		index: u8,
		step: Step,
		animation: &mut Animation,
	) -> Result<Option<Duration>> {
		trace!(channel, index, ?step, "animation step");
		match step {
			Step::Set(rgb) => {
				self.send_color(channel, index, rgb)?;
				Ok(None)
			}
			Step::Sample => {
				let current = self.current_color(index)?;
				animation.sampled(remap_rgb_reverse(current, self.config.max_rgb));
				Ok(None)
			}
			Step::Suspend(delay) => Ok(Some(delay)),
		}
	}
}
