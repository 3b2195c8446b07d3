//! Color requests and how they resolve to concrete RGB values.

mod names;

use std::fmt;

use rand::Rng;
use tracing::warn;

use crate::{Error, Result};

/// A color in red, green, blue order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
	pub r: u8,
	pub g: u8,
	pub b: u8,
}

impl Rgb {
	pub const BLACK: Self = Self::new(0, 0, 0);

	pub const fn new(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b }
	}

	/// Bytes in the order the LEDs expect them on the wire.
	pub const fn to_grb(self) -> [u8; 3] {
		[self.g, self.r, self.b]
	}

	pub const fn from_grb([g, r, b]: [u8; 3]) -> Self {
		Self { r, g, b }
	}

	pub const fn inverted(self) -> Self {
		Self::new(255 - self.r, 255 - self.g, 255 - self.b)
	}

	pub fn to_hex(self) -> String {
		format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
	}
}

impl From<(u8, u8, u8)> for Rgb {
	fn from((r, g, b): (u8, u8, u8)) -> Self {
		Self::new(r, g, b)
	}
}

impl From<Rgb> for (u8, u8, u8) {
	fn from(rgb: Rgb) -> Self {
		(rgb.r, rgb.g, rgb.b)
	}
}

impl fmt::Display for Rgb {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "({}, {}, {})", self.r, self.g, self.b)
	}
}

/// Format for reading a color back from the device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorFormat {
	#[default]
	Rgb,
	Hex,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormattedColor {
	Rgb(Rgb),
	Hex(String),
}

impl ColorFormat {
	pub fn format(self, rgb: Rgb) -> FormattedColor {
		match self {
			ColorFormat::Rgb => FormattedColor::Rgb(rgb),
			ColorFormat::Hex => FormattedColor::Hex(rgb.to_hex()),
		}
	}
}

/// A color as a caller asks for it.
///
/// `name` wins over `hex`, which wins over the explicit channel values. The name `"random"`
/// picks a new random color on every resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColorRequest<'a> {
	pub red:   u8,
	pub green: u8,
	pub blue:  u8,
	pub name:  Option<&'a str>,
	pub hex:   Option<&'a str>,
}

impl<'a> ColorRequest<'a> {
	pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
		Self {
			red,
			green,
			blue,
			name: None,
			hex: None,
		}
	}

	pub const fn named(name: &'a str) -> Self {
		Self {
			name: Some(name),
			..Self::rgb(0, 0, 0)
		}
	}

	pub const fn hex(hex: &'a str) -> Self {
		Self {
			hex: Some(hex),
			..Self::rgb(0, 0, 0)
		}
	}

	pub const fn random() -> Self {
		Self::named("random")
	}

	pub fn resolve(&self) -> Result<Rgb> {
		match (self.name, self.hex) {
			(Some("random"), _) => {
				let mut rng = rand::thread_rng();
				Ok(Rgb::new(rng.gen(), rng.gen(), rng.gen()))
			}
			(Some(name), _) if !name.is_empty() => name_to_rgb(name),
			(_, Some(hex)) if !hex.is_empty() => hex_to_rgb(hex),
			_ => Ok(Rgb::new(self.red, self.green, self.blue)),
		}
	}

	/// Resolves the request, turning unknown names and malformed hex values into black.
	///
	/// This is what every controller uses. Only the two color parsing errors are swallowed.
	pub fn resolve_lenient(&self) -> Rgb {
		// resolve only fails with InvalidColorName or InvalidHexColor
		self.resolve().unwrap_or_else(|err| {
			warn!("{err}, using black");
			Rgb::BLACK
		})
	}
}

impl From<Rgb> for ColorRequest<'_> {
	fn from(rgb: Rgb) -> Self {
		Self::rgb(rgb.r, rgb.g, rgb.b)
	}
}

/// Looks up a CSS color keyword, ignoring case.
pub fn name_to_hex(name: &str) -> Result<&'static str> {
	let normalized = name.to_ascii_lowercase();
	names::NAMES_TO_HEX
		.binary_search_by(|(candidate, _)| (*candidate).cmp(normalized.as_str()))
		.map(|i| names::NAMES_TO_HEX[i].1)
		.map_err(|_| Error::InvalidColorName(name.to_string()))
}

pub fn name_to_rgb(name: &str) -> Result<Rgb> {
	hex_to_rgb(name_to_hex(name)?)
}

/// Normalizes `#abc` / `#AABBCC` style values to lower case `#aabbcc`.
pub fn normalize_hex(hex: &str) -> Result<String> {
	let invalid = || Error::InvalidHexColor(hex.to_string());

	let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
	if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
		return Err(invalid());
	}

	let digits = digits.to_ascii_lowercase();
	match digits.len() {
		6 => Ok(format!("#{digits}")),
		3 => Ok(digits.chars().fold(String::from("#"), |mut out, c| {
			out.push(c);
			out.push(c);
			out
		})),
		_ => Err(invalid()),
	}
}

pub fn hex_to_rgb(hex: &str) -> Result<Rgb> {
	let normalized = normalize_hex(hex)?;
	let channel = |range: std::ops::Range<usize>| {
		u8::from_str_radix(&normalized[range], 16).map_err(|_| Error::InvalidHexColor(hex.to_string()))
	};

	Ok(Rgb::new(channel(1..3)?, channel(3..5)?, channel(5..7)?))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn names_are_sorted_for_lookup() {
		assert!(names::NAMES_TO_HEX.windows(2).all(|w| w[0].0 < w[1].0));
		assert_eq!(names::NAMES_TO_HEX.len(), 147);
	}

	#[test]
	fn resolves_names_case_insensitively() {
		assert_eq!(ColorRequest::named("navy").resolve().unwrap(), Rgb::new(0, 0, 128));
		assert_eq!(ColorRequest::named("GoldenRod").resolve().unwrap(), Rgb::new(218, 165, 32));
		assert_eq!(name_to_hex("White").unwrap(), "#ffffff");
	}

	#[test]
	fn unknown_name_is_an_error_but_lenient_resolution_is_black() {
		let request = ColorRequest::named("UNKNOWN");
		assert!(matches!(request.resolve(), Err(Error::InvalidColorName(name)) if name == "UNKNOWN"));
		assert_eq!(request.resolve_lenient(), Rgb::BLACK);
	}

	#[test]
	fn hex_shorthand_doubles_each_digit() {
		assert_eq!(normalize_hex("#09c").unwrap(), "#0099cc");
		assert_eq!(normalize_hex("#09C").unwrap(), "#0099cc");
		assert_eq!(normalize_hex("#0099CC").unwrap(), "#0099cc");
		assert_eq!(hex_to_rgb("#09c").unwrap(), hex_to_rgb("#0099cc").unwrap());
		assert_eq!(hex_to_rgb("#000080").unwrap(), Rgb::new(0, 0, 128));
	}

	#[test]
	fn hex_decodes_every_byte_literally() {
		for v in [0u8, 1, 15, 16, 127, 128, 200, 255] {
			let hex = format!("#{v:02x}{:02x}{v:02X}", 255 - v);
			assert_eq!(hex_to_rgb(&hex).unwrap(), Rgb::new(v, 255 - v, v));
		}
	}

	#[test]
	fn malformed_hex_is_rejected() {
		for bad in ["0099cc", "#0099c", "#0099ccc", "#ggg", "#", "#+1a2b3"] {
			assert!(matches!(hex_to_rgb(bad), Err(Error::InvalidHexColor(_))), "{bad}");
			assert_eq!(ColorRequest::hex(bad).resolve_lenient(), Rgb::BLACK);
		}
	}

	#[test]
	fn name_takes_priority_over_hex_and_values() {
		let request = ColorRequest {
			red:   1,
			green: 2,
			blue:  3,
			name:  Some("red"),
			hex:   Some("#00ff00"),
		};
		assert_eq!(request.resolve().unwrap(), Rgb::new(255, 0, 0));

		let request = ColorRequest { name: None, ..request };
		assert_eq!(request.resolve().unwrap(), Rgb::new(0, 255, 0));

		let request = ColorRequest { hex: Some(""), ..request };
		assert_eq!(request.resolve().unwrap(), Rgb::new(1, 2, 3));
	}

	#[test]
	fn random_is_not_a_table_lookup() {
		// "random" never fails, whatever it draws
		for _ in 0..16 {
			assert!(ColorRequest::random().resolve().is_ok());
		}
		assert!(ColorRequest::named("Random").resolve().is_err());
	}

	#[test]
	fn formats_colors() {
		assert_eq!(ColorFormat::Hex.format(Rgb::new(255, 0, 16)), FormattedColor::Hex("#ff0010".into()));
		assert_eq!(ColorFormat::Rgb.format(Rgb::new(1, 2, 3)), FormattedColor::Rgb(Rgb::new(1, 2, 3)));
	}
}
