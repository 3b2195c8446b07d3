#![no_std]

/// Number of physical output channels (R, G and B pins).
pub const CHANNEL_COUNT: usize = 3;
/// The largest frame report carries 64 LEDs per channel.
pub const MAX_LEDS_PER_CHANNEL: usize = 64;
pub const BYTES_PER_LED: usize = 3;

/// Frame reports start with a reserved zero byte followed by the channel id.
pub const FRAME_HEADER_LEN: usize = 2;

/// Single pixel "set color" report, payload `[5, channel, index, r, g, b]`.
pub const SET_COLOR_REPORT: u8 = 0x05;
pub const SET_COLOR_REPORT_LEN: usize = 6;

/// Report ids for LED frames, indexed by size tier.
pub const FRAME_REPORTS: [(u8, usize); 4] = [(6, 8), (7, 16), (8, 32), (9, 64)];

/// Picks the smallest frame report that fits `led_count` LEDs.
///
/// Returns the report id and the LED capacity of that report, or `None` if the
/// frame does not fit in the largest report.
pub const fn report_for_len(led_count: usize) -> Option<(u8, usize)> {
	let mut i = 0;
	while i < FRAME_REPORTS.len() {
		let (id, capacity) = FRAME_REPORTS[i];
		if led_count <= capacity {
			return Some((id, capacity));
		}
		i += 1;
	}
	None
}
