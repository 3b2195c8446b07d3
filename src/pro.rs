use tracing::{debug, info};

use crate::{
	protocol::CHANNEL_COUNT,
	remap::remap_rgb,
	BlinkStick,
	Channel,
	ChannelFramebuffer,
	Config,
	DeviceTransport,
	Frame,
	MatrixFramebuffer,
	MatrixLayout,
	Result,
	Rgb,
	WriteResult,
};

/// Controller for LED strips wired to the R, G and B channels of a BlinkStick Pro.
///
/// Colors are collected in a framebuffer per channel and only reach the device with
/// [`send_data`](Self::send_data) or [`send_data_all`](Self::send_data_all).
pub struct BlinkStickPro<T> {
	device:   BlinkStick<T>,
	channels: [ChannelFramebuffer; CHANNEL_COUNT],
}

impl<T: DeviceTransport> BlinkStickPro<T> {
	/// Create a new instance with `led_counts[c]` LEDs on channel `c`.
	pub fn new(transport: T, config: Config, led_counts: [usize; CHANNEL_COUNT]) -> Self {
		info!(?led_counts, "creating strip controller");

		Self {
			device:   BlinkStick::new(transport, config),
			channels: led_counts.map(ChannelFramebuffer::new),
		}
	}

	/// The single LED controller, for immediate colors and animations.
	///
	/// Its configuration applies to the framebuffers too.
	pub fn device(&mut self) -> &mut BlinkStick<T> {
		&mut self.device
	}

	pub fn channel(&self, channel: Channel) -> &ChannelFramebuffer {
		&self.channels[channel.idx()]
	}

	/// Stores `rgb` for LED `index`, rescaled into the configured maximum when `remap` is set.
	pub fn set_color(&mut self, channel: Channel, index: usize, rgb: Rgb, remap: bool) -> Result<()> {
		let max = remap.then_some(self.device.config().max_rgb);
		self.channels[channel.idx()].set(index, rgb, max)
	}

	pub fn get_color(&self, channel: Channel, index: usize) -> Result<Rgb> {
		self.channels[channel.idx()].get(index)
	}

	/// Turns every pixel in the framebuffer off, without touching the device.
	pub fn clear(&mut self) {
		for buffer in &mut self.channels {
			buffer.clear();
		}
	}

	/// Turns every LED off on the device.
	pub fn off(&mut self) -> Result<()> {
		self.clear();
		self.send_data_all()
	}

	/// Sends the framebuffer of `channel` to the device.
	pub fn send_data(&mut self, channel: Channel) -> Result<WriteResult> {
		let frame = Frame::new(channel, self.channels[channel.idx()].as_bytes())?;
		self.device.send_frame(&frame)
	}

	/// Sends every channel that has LEDs attached.
	pub fn send_data_all(&mut self) -> Result<()> {
		for channel in Channel::ALL {
			if !self.channels[channel.idx()].is_empty() {
				self.send_data(channel)?;
			}
		}
		Ok(())
	}
}

/// Controller for LED matrices wired to a BlinkStick Pro, addressed by `x`, `y`.
///
/// ```no_run
/// # use blinkstick_matrix::{BlinkStickProMatrix, Channel, Config, DeviceTransport, MatrixLayout, Rgb};
/// # fn demo(transport: impl DeviceTransport) -> blinkstick_matrix::Result<()> {
/// // two 8x8 panels on the R and G pins form one 16x8 matrix
/// let layout = MatrixLayout::new().with_channel(Channel::R, 8, 8).with_channel(Channel::G, 8, 8);
/// let mut matrix = BlinkStickProMatrix::new(transport, Config::default(), layout);
///
/// matrix.set_color(10, 5, Rgb::new(255, 0, 0), true)?;
/// matrix.digit(0, 0, 4, Rgb::new(0, 255, 0))?;
/// matrix.send_data_all()?;
/// # Ok(())
/// # }
/// ```
pub struct BlinkStickProMatrix<T> {
	device: BlinkStick<T>,
	matrix: MatrixFramebuffer,
}

impl<T: DeviceTransport> BlinkStickProMatrix<T> {
	pub fn new(transport: T, config: Config, layout: MatrixLayout) -> Self {
		let matrix = MatrixFramebuffer::new(layout);
		info!(cols = matrix.cols(), rows = matrix.rows(), "creating matrix controller");

		Self {
			device: BlinkStick::new(transport, config),
			matrix,
		}
	}

	pub fn device(&mut self) -> &mut BlinkStick<T> {
		&mut self.device
	}

	/// `rgb` rescaled into the configured maximum, drawing always rescales.
	fn device_rgb(&self, rgb: Rgb) -> Rgb {
		remap_rgb(rgb, self.device.config().max_rgb)
	}

	pub fn matrix(&self) -> &MatrixFramebuffer {
		&self.matrix
	}

	pub fn matrix_mut(&mut self) -> &mut MatrixFramebuffer {
		&mut self.matrix
	}

	pub fn cols(&self) -> usize {
		self.matrix.cols()
	}

	pub fn rows(&self) -> usize {
		self.matrix.rows()
	}

	pub fn set_color(&mut self, x: usize, y: usize, rgb: Rgb, remap: bool) -> Result<()> {
		let max = remap.then_some(self.device.config().max_rgb);
		self.matrix.set(x, y, rgb, max)
	}

	pub fn get_color(&self, x: usize, y: usize) -> Result<Rgb> {
		self.matrix.get(x, y)
	}

	pub fn clear(&mut self) {
		self.matrix.clear();
	}

	pub fn shift_left(&mut self, remove: bool) {
		self.matrix.shift_left(remove);
	}

	pub fn shift_right(&mut self, remove: bool) {
		self.matrix.shift_right(remove);
	}

	pub fn shift_up(&mut self, remove: bool) {
		self.matrix.shift_up(remove);
	}

	pub fn shift_down(&mut self, remove: bool) {
		self.matrix.shift_down(remove);
	}

	pub fn line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, rgb: Rgb) -> Result<Vec<(i32, i32)>> {
		let rgb = self.device_rgb(rgb);
		self.matrix.line(x1, y1, x2, y2, rgb)
	}

	pub fn rectangle(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, rgb: Rgb) -> Result<()> {
		let rgb = self.device_rgb(rgb);
		self.matrix.rectangle(x1, y1, x2, y2, rgb)
	}

	pub fn digit(&mut self, x: i32, y: i32, n: u8, rgb: Rgb) -> Result<()> {
		let rgb = self.device_rgb(rgb);
		self.matrix.digit(x, y, n, rgb)
	}

	/// Sends the part of the matrix wired to `channel`.
	pub fn send_data(&mut self, channel: Channel) -> Result<WriteResult> {
		let frame = Frame::new(channel, self.matrix.channel_frame(channel).as_bytes())?;
		debug!(?channel, leds = frame.led_count(), "sending matrix slice");
		self.device.send_frame(&frame)
	}

	pub fn send_data_all(&mut self) -> Result<()> {
		for channel in Channel::ALL {
			if self.matrix.layout().led_count(channel) > 0 {
				self.send_data(channel)?;
			}
		}
		Ok(())
	}

	pub fn off(&mut self) -> Result<()> {
		self.clear();
		self.send_data_all()
	}
}
