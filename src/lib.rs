//! Host side driver core for BlinkStick LED controllers.
//!
//! The crate keeps framebuffers for LED strips ([`BlinkStickPro`]) and LED matrices
//! ([`BlinkStickProMatrix`]), draws into them and flushes them to the device as frames.
//! Single LEDs can be animated with blink, morph and pulse, either blocking the current
//! thread ([`BlinkStick`]) or cooperatively on tokio (`tokio::AsyncBlinkStick`, behind the
//! `tokio` feature).
//!
//! USB access is not part of this crate, controllers talk to the hardware through a
//! [`DeviceTransport`] implementation.

use std::time::Duration;

pub use blinkstick_matrix_shared as protocol;

pub mod animation;
pub mod channel;
pub mod color;
mod device;
pub mod frame;
pub mod matrix;
mod pro;
pub mod remap;
#[cfg(feature = "tokio")]
pub mod tokio;
pub mod transport;

pub use channel::{Channel, ChannelFramebuffer};
pub use color::{ColorFormat, ColorRequest, FormattedColor, Rgb};
pub use device::BlinkStick;
pub use frame::Frame;
pub use matrix::{MatrixFramebuffer, MatrixLayout};
pub use pro::{BlinkStickPro, BlinkStickProMatrix};
pub use transport::{DeviceTransport, TransportError};

#[derive(thiserror::Error, Debug)]
pub enum Error {
	#[error("'{0}' is not defined as a named color")]
	InvalidColorName(String),
	#[error("'{0}' is not a valid hexadecimal color value")]
	InvalidHexColor(String),
	#[error("index {index} is out of range for a buffer of {len} leds")]
	IndexOutOfRange { index: usize, len: usize },
	#[error("there is no glyph for digit {0}")]
	InvalidDigit(u8),
	#[error("channel {0} does not exist")]
	InvalidChannel(u8),
	#[error("a frame holds at most {} leds, got {leds}", protocol::MAX_LEDS_PER_CHANNEL)]
	FrameTooLarge { leds: usize },
	#[error("device transport failed")]
	Transport(#[from] TransportError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// What `send_data` reports back: the time spent in the transport with the `timings`
/// feature, nothing without it.
#[cfg(feature = "timings")]
pub type WriteResult = Duration;
#[cfg(not(feature = "timings"))]
pub type WriteResult = ();

/// Per controller settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
	/// Send `255 - v` for every color value, for devices wired in inverse mode.
	pub inverse:            bool,
	/// Brightest value a channel is allowed to reach, colors are rescaled into `0..=max_rgb`.
	pub max_rgb:            u8,
	/// When `false` transport failures are logged and ignored instead of returned.
	pub error_reporting:    bool,
	/// Pause after every frame sent by the strip and matrix controllers.
	pub transmission_delay: Duration,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			inverse:            false,
			max_rgb:            255,
			error_reporting:    true,
			transmission_delay: Duration::from_millis(2),
		}
	}
}
