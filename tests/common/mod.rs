#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use blinkstick_matrix::{DeviceTransport, Frame, Rgb, TransportError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
	Frame { report_id: u8, report: Vec<u8> },
	Immediate { channel: u8, index: u8, rgb: Rgb },
}

/// Records everything sent and reads back the last color set per LED.
///
/// Clones share the same log, so a test can keep one while a controller owns another.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
	log:        Arc<Mutex<Vec<Sent>>>,
	fail_after: Option<usize>,
}

impl Recorder {
	/// A recorder that fails every call once `limit` calls went through.
	pub fn failing_after(limit: usize) -> Self {
		Self {
			fail_after: Some(limit),
			..Self::default()
		}
	}

	pub fn sent(&self) -> Vec<Sent> {
		self.log.lock().unwrap().clone()
	}

	pub fn immediate(&self, index: u8) -> Vec<Rgb> {
		self.sent()
			.into_iter()
			.filter_map(|sent| match sent {
				Sent::Immediate { index: i, rgb, .. } if i == index => Some(rgb),
				_ => None,
			})
			.collect()
	}

	fn push(&self, sent: Sent) -> Result<(), TransportError> {
		let mut log = self.log.lock().unwrap();
		if self.fail_after.is_some_and(|limit| log.len() >= limit) {
			return Err(TransportError::Disconnected);
		}
		log.push(sent);
		Ok(())
	}
}

impl DeviceTransport for Recorder {
	fn send_frame(&mut self, frame: &Frame) -> Result<(), TransportError> {
		self.push(Sent::Frame {
			report_id: frame.report_id(),
			report:    frame.to_report(),
		})
	}

	fn send_immediate(&mut self, channel: u8, index: u8, rgb: Rgb) -> Result<(), TransportError> {
		self.push(Sent::Immediate { channel, index, rgb })
	}

	fn read_color(&mut self, index: u8) -> Result<Rgb, TransportError> {
		Ok(self.immediate(index).last().copied().unwrap_or_default())
	}
}
