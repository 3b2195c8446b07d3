use crate::{
	protocol::{report_for_len, BYTES_PER_LED, FRAME_HEADER_LEN, SET_COLOR_REPORT, SET_COLOR_REPORT_LEN},
	Channel,
	Error,
	Result,
	Rgb,
};

/// LED data for one channel, built fresh for every flush.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
	channel:   Channel,
	data:      Vec<u8>,
	report_id: u8,
	capacity:  usize,
}

impl Frame {
	/// Wraps pixel bytes (green, red, blue per LED) for `channel`.
	pub fn new(channel: Channel, data: Vec<u8>) -> Result<Self> {
		let leds = data.len().div_ceil(BYTES_PER_LED);
		let (report_id, capacity) = report_for_len(leds).ok_or(Error::FrameTooLarge { leds })?;

		Ok(Self {
			channel,
			data,
			report_id,
			capacity,
		})
	}

	pub fn channel(&self) -> Channel {
		self.channel
	}

	pub fn data(&self) -> &[u8] {
		&self.data
	}

	pub fn led_count(&self) -> usize {
		self.data.len() / BYTES_PER_LED
	}

	/// Report id of the smallest size tier that fits the frame.
	pub fn report_id(&self) -> u8 {
		self.report_id
	}

	/// LEDs the selected report has room for.
	pub fn capacity(&self) -> usize {
		self.capacity
	}

	/// The report payload: `[0, channel, data..]`, zero padded to the report capacity.
	pub fn to_report(&self) -> Vec<u8> {
		let mut report = Vec::with_capacity(FRAME_HEADER_LEN + self.capacity * BYTES_PER_LED);
		report.extend_from_slice(&[0, self.channel.id()]);
		report.extend_from_slice(&self.data);
		report.resize(FRAME_HEADER_LEN + self.capacity * BYTES_PER_LED, 0);
		report
	}

	/// Payload for setting a single LED right away: `[5, channel, index, r, g, b]`.
	pub fn immediate_report(channel: u8, index: u8, rgb: Rgb) -> [u8; SET_COLOR_REPORT_LEN] {
		[SET_COLOR_REPORT, channel, index, rgb.r, rgb.g, rgb.b]
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn small_frames_are_padded_to_the_first_tier() {
		let frame = Frame::new(Channel::G, vec![1, 2, 3, 4, 5, 6]).unwrap();

		assert_eq!(frame.report_id(), 6);
		assert_eq!(frame.led_count(), 2);

		let report = frame.to_report();
		assert_eq!(report.len(), 2 + 8 * 3);
		assert_eq!(&report[..8], &[0, 1, 1, 2, 3, 4, 5, 6]);
		assert!(report[8..].iter().all(|&b| b == 0));
	}

	#[test]
	fn tier_follows_led_count() {
		for (leds, id, capacity) in [(8, 6, 8), (9, 7, 16), (16, 7, 16), (17, 8, 32), (33, 9, 64), (64, 9, 64)] {
			let frame = Frame::new(Channel::R, vec![0; leds * 3]).unwrap();
			assert_eq!((frame.report_id(), frame.capacity()), (id, capacity), "{leds} leds");
			assert_eq!(frame.to_report().len(), 2 + capacity * 3);
		}
	}

	#[test]
	fn oversized_frames_are_rejected() {
		assert!(matches!(
			Frame::new(Channel::B, vec![0; 65 * 3]),
			Err(Error::FrameTooLarge { leds: 65 })
		));
	}

	#[test]
	fn immediate_report_layout() {
		assert_eq!(Frame::immediate_report(2, 7, Rgb::new(10, 20, 30)), [5, 2, 7, 10, 20, 30]);
	}
}
