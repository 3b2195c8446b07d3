use std::io;

use crate::{Frame, Rgb};

#[derive(thiserror::Error, Debug)]
pub enum TransportError {
	#[error("device disconnected")]
	Disconnected,
	#[error(transparent)]
	Io(#[from] io::Error),
	#[error("{0}")]
	Other(String),
}

/// Access to the USB device.
///
/// Every call is one control transfer which either completes or fails, controllers never
/// retry.
pub trait DeviceTransport {
	/// Sends a frame of LED data for one channel, see [`Frame::to_report`].
	fn send_frame(&mut self, frame: &Frame) -> Result<(), TransportError>;

	/// Sets one LED immediately, see [`Frame::immediate_report`].
	fn send_immediate(&mut self, channel: u8, index: u8, rgb: Rgb) -> Result<(), TransportError>;

	/// Reads the color the device currently shows on LED `index` of the first channel.
	fn read_color(&mut self, index: u8) -> Result<Rgb, TransportError>;
}

impl<T: DeviceTransport + ?Sized> DeviceTransport for &mut T {
	fn send_frame(&mut self, frame: &Frame) -> Result<(), TransportError> {
		(**self).send_frame(frame)
	}

	fn send_immediate(&mut self, channel: u8, index: u8, rgb: Rgb) -> Result<(), TransportError> {
		(**self).send_immediate(channel, index, rgb)
	}

	fn read_color(&mut self, index: u8) -> Result<Rgb, TransportError> {
		(**self).read_color(index)
	}
}

impl<T: DeviceTransport + ?Sized> DeviceTransport for Box<T> {
	fn send_frame(&mut self, frame: &Frame) -> Result<(), TransportError> {
		(**self).send_frame(frame)
	}

	fn send_immediate(&mut self, channel: u8, index: u8, rgb: Rgb) -> Result<(), TransportError> {
		(**self).send_immediate(channel, index, rgb)
	}

	fn read_color(&mut self, index: u8) -> Result<Rgb, TransportError> {
		(**self).read_color(index)
	}
}
