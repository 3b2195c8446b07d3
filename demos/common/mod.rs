use std::collections::HashMap;

use blinkstick_matrix::{DeviceTransport, Frame, Rgb, TransportError};
use tracing::info;

/// Stands in for a USB connection, logs every report instead of sending it.
#[derive(Default)]
pub struct LogTransport {
	shown: HashMap<u8, Rgb>,
}

impl DeviceTransport for LogTransport {
	fn send_frame(&mut self, frame: &Frame) -> Result<(), TransportError> {
		let report = frame.to_report();
		info!(
			channel = ?frame.channel(),
			report_id = frame.report_id(),
			bytes = report.len(),
			"frame"
		);
		Ok(())
	}

	fn send_immediate(&mut self, channel: u8, index: u8, rgb: Rgb) -> Result<(), TransportError> {
		info!(channel, index, color = %rgb.to_hex(), "set color");
		self.shown.insert(index, rgb);
		Ok(())
	}

	fn read_color(&mut self, index: u8) -> Result<Rgb, TransportError> {
		Ok(self.shown.get(&index).copied().unwrap_or_default())
	}
}
