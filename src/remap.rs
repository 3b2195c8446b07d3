//! Linear rescaling between the 8 bit color range and a device's configured maximum.
//!
//! Both directions truncate toward zero, so a round trip is lossy by up to one device step.

use crate::Rgb;

fn rescale(value: u32, from_max: u32, to_max: u32) -> u32 {
	if from_max == 0 {
		return 0;
	}
	value * to_max / from_max
}

/// Scales `value` from `0..=255` into `0..=max`.
pub fn to_device(value: u8, max: u8) -> u8 {
	// value <= 255 keeps the result <= max
	rescale(u32::from(value), 255, u32::from(max)) as u8
}

/// Scales `value` from `0..=max` back into `0..=255`.
///
/// A value read from the device that is larger than `max` maps above 255, callers use that
/// to detect readings that don't belong to the configured range.
pub fn from_device(value: u8, max: u8) -> u16 {
	rescale(u32::from(value), u32::from(max), 255) as u16
}

pub fn remap_rgb(rgb: Rgb, max: u8) -> Rgb {
	Rgb::new(to_device(rgb.r, max), to_device(rgb.g, max), to_device(rgb.b, max))
}

/// Reverse of [`remap_rgb`], channels stay wide so out of range readings survive.
pub fn remap_rgb_reverse(rgb: Rgb, max: u8) -> [u16; 3] {
	[from_device(rgb.r, max), from_device(rgb.g, max), from_device(rgb.b, max)]
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn full_range_is_identity() {
		for v in 0..=255u8 {
			assert_eq!(to_device(v, 255), v);
			assert_eq!(from_device(v, 255), u16::from(v));
		}
	}

	#[test]
	fn truncates_toward_zero() {
		assert_eq!(to_device(255, 100), 100);
		assert_eq!(to_device(128, 100), 50);
		assert_eq!(to_device(1, 100), 0);
		assert_eq!(from_device(50, 100), 127);
	}

	#[test]
	fn round_trip_stays_within_one_step() {
		for max in 1..=255u8 {
			let step = 255 / u16::from(max) + 1;
			for v in 0..=255u8 {
				let back = from_device(to_device(v, max), max);
				assert!(
					u16::from(v).abs_diff(back) <= step,
					"v={v} max={max} back={back}"
				);
			}
			for v in 0..=max {
				let wide = from_device(v, max);
				let back = rescale(u32::from(wide), 255, u32::from(max));
				assert!(u32::from(v).abs_diff(back) <= 1, "v={v} max={max} back={back}");
			}
		}
	}

	#[test]
	fn readings_above_max_leave_the_color_range() {
		assert!(from_device(200, 100) > 255);
		assert_eq!(from_device(10, 0), 0);
	}
}
