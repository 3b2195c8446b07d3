use crate::{
	protocol::{BYTES_PER_LED, CHANNEL_COUNT},
	remap::remap_rgb,
	Error,
	Result,
	Rgb,
};

/// One of the three output pins of a BlinkStick Pro.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Channel {
	R = 0,
	G = 1,
	B = 2,
}

impl Channel {
	pub const ALL: [Channel; CHANNEL_COUNT] = [Channel::R, Channel::G, Channel::B];

	pub const fn id(self) -> u8 {
		self as u8
	}

	pub(crate) const fn idx(self) -> usize {
		self as usize
	}
}

impl TryFrom<u8> for Channel {
	type Error = Error;

	fn try_from(value: u8) -> Result<Self> {
		match value {
			0 => Ok(Channel::R),
			1 => Ok(Channel::G),
			2 => Ok(Channel::B),
			other => Err(Error::InvalidChannel(other)),
		}
	}
}

/// Fixed size pixel store for the LEDs on one channel.
///
/// Pixels are kept in wire order (green, red, blue) so a frame is a plain copy of the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelFramebuffer {
	pixels: Vec<[u8; BYTES_PER_LED]>,
}

impl ChannelFramebuffer {
	pub fn new(len: usize) -> Self {
		Self {
			pixels: vec![[0; BYTES_PER_LED]; len],
		}
	}

	pub fn len(&self) -> usize {
		self.pixels.len()
	}

	pub fn is_empty(&self) -> bool {
		self.pixels.is_empty()
	}

	/// Stores `rgb` at `index`, rescaled into `0..=max` when `remap` is `Some(max)`.
	pub fn set(&mut self, index: usize, rgb: Rgb, remap: Option<u8>) -> Result<()> {
		let len = self.len();
		let rgb = remap.map_or(rgb, |max| remap_rgb(rgb, max));
		let pixel = self.pixels.get_mut(index).ok_or(Error::IndexOutOfRange { index, len })?;
		*pixel = rgb.to_grb();
		Ok(())
	}

	pub fn get(&self, index: usize) -> Result<Rgb> {
		self.pixels
			.get(index)
			.map(|grb| Rgb::from_grb(*grb))
			.ok_or(Error::IndexOutOfRange { index, len: self.len() })
	}

	pub fn clear(&mut self) {
		self.pixels.fill([0; BYTES_PER_LED]);
	}

	/// Replaces the whole buffer with pixels that are already in wire order.
	pub(crate) fn load_grb(&mut self, pixels: impl IntoIterator<Item = [u8; BYTES_PER_LED]>) {
		for (slot, pixel) in self.pixels.iter_mut().zip(pixels) {
			*slot = pixel;
		}
	}

	/// The buffer flattened into the byte sequence sent to the device.
	pub fn as_bytes(&self) -> Vec<u8> {
		self.pixels.iter().flatten().copied().collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn stores_wire_order_and_returns_rgb() {
		let mut buffer = ChannelFramebuffer::new(3);
		buffer.set(1, Rgb::new(10, 20, 30), Some(255)).unwrap();

		assert_eq!(buffer.get(1).unwrap(), Rgb::new(10, 20, 30));
		assert_eq!(buffer.as_bytes(), vec![0, 0, 0, 20, 10, 30, 0, 0, 0]);
	}

	#[test]
	fn remaps_only_when_asked() {
		let mut buffer = ChannelFramebuffer::new(2);
		buffer.set(0, Rgb::new(255, 128, 0), Some(100)).unwrap();
		buffer.set(1, Rgb::new(255, 128, 0), None).unwrap();

		assert_eq!(buffer.get(0).unwrap(), Rgb::new(100, 50, 0));
		assert_eq!(buffer.get(1).unwrap(), Rgb::new(255, 128, 0));
	}

	#[test]
	fn out_of_range_index_is_an_error() {
		let mut buffer = ChannelFramebuffer::new(4);
		assert!(matches!(
			buffer.set(4, Rgb::BLACK, None),
			Err(Error::IndexOutOfRange { index: 4, len: 4 })
		));
		assert!(matches!(buffer.get(10), Err(Error::IndexOutOfRange { index: 10, len: 4 })));
	}

	#[test]
	fn clear_blanks_every_pixel() {
		let mut buffer = ChannelFramebuffer::new(2);
		buffer.set(0, Rgb::new(1, 2, 3), None).unwrap();
		buffer.clear();
		assert_eq!(buffer.as_bytes(), vec![0; 6]);
	}

	#[test]
	fn channel_ids() {
		assert_eq!(Channel::try_from(1).unwrap(), Channel::G);
		assert!(matches!(Channel::try_from(3), Err(Error::InvalidChannel(3))));
		assert_eq!(Channel::B.id(), 2);
	}
}
