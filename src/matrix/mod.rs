//! Two dimensional framebuffer spread over the channels of a BlinkStick Pro.
//!
//! Every channel drives one panel and owns a contiguous range of columns, in channel order.
//! The grid is as tall as the tallest panel; cells below a shorter panel can be drawn to but
//! are never sent anywhere.
//!
//! ```text
//!   x: 0 ........ 7 | 8 ....... 15
//!      channel R    | channel G
//! ```

mod digits;

use std::ops::Range;

use tracing::trace;

use self::digits::{Stroke, DIGITS};
use crate::{
	protocol::{BYTES_PER_LED, CHANNEL_COUNT},
	remap::remap_rgb,
	Channel,
	ChannelFramebuffer,
	Error,
	Result,
	Rgb,
};

/// Columns and rows of the panel attached to each channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatrixLayout {
	columns: [usize; CHANNEL_COUNT],
	rows:    [usize; CHANNEL_COUNT],
}

impl MatrixLayout {
	pub const fn new() -> Self {
		Self {
			columns: [0; CHANNEL_COUNT],
			rows:    [0; CHANNEL_COUNT],
		}
	}

	pub fn with_channel(mut self, channel: Channel, columns: usize, rows: usize) -> Self {
		self.columns[channel.idx()] = columns;
		self.rows[channel.idx()] = rows;
		self
	}

	pub const fn channel_columns(&self, channel: Channel) -> usize {
		self.columns[channel.idx()]
	}

	pub const fn channel_rows(&self, channel: Channel) -> usize {
		self.rows[channel.idx()]
	}

	/// Number of LEDs wired to `channel`.
	pub const fn led_count(&self, channel: Channel) -> usize {
		self.columns[channel.idx()] * self.rows[channel.idx()]
	}

	pub fn columns(&self) -> usize {
		self.columns.iter().sum()
	}

	pub fn rows(&self) -> usize {
		self.rows.iter().copied().max().unwrap_or(0)
	}

	/// The grid columns owned by `channel`.
	pub fn column_range(&self, channel: Channel) -> Range<usize> {
		let start: usize = self.columns[..channel.idx()].iter().sum();
		start..start + self.columns[channel.idx()]
	}
}

#[derive(Debug, Clone)]
pub struct MatrixFramebuffer {
	layout:   MatrixLayout,
	cols:     usize,
	rows:     usize,
	// row major, wire order
	cells:    Vec<[u8; BYTES_PER_LED]>,
	channels: [ChannelFramebuffer; CHANNEL_COUNT],
}

impl MatrixFramebuffer {
	pub fn new(layout: MatrixLayout) -> Self {
		let cols = layout.columns();
		let rows = layout.rows();

		Self {
			layout,
			cols,
			rows,
			cells: vec![[0; BYTES_PER_LED]; cols * rows],
			channels: Channel::ALL.map(|channel| ChannelFramebuffer::new(layout.led_count(channel))),
		}
	}

	pub fn layout(&self) -> &MatrixLayout {
		&self.layout
	}

	pub fn cols(&self) -> usize {
		self.cols
	}

	pub fn rows(&self) -> usize {
		self.rows
	}

	fn index(&self, x: usize, y: usize) -> Result<usize> {
		if x >= self.cols || y >= self.rows {
			return Err(Error::IndexOutOfRange {
				index: y.saturating_mul(self.cols).saturating_add(x),
				len:   self.cells.len(),
			});
		}
		Ok(y * self.cols + x)
	}

	fn signed_index(&self, (x, y): (i32, i32)) -> Result<usize> {
		match (usize::try_from(x), usize::try_from(y)) {
			(Ok(x), Ok(y)) => self.index(x, y),
			_ => Err(Error::IndexOutOfRange {
				// negative coordinates never address a cell
				index: usize::MAX,
				len:   self.cells.len(),
			}),
		}
	}

	/// Sets the pixel at `x`, `y`, rescaled into `0..=max` when `remap` is `Some(max)`.
	pub fn set(&mut self, x: usize, y: usize, rgb: Rgb, remap: Option<u8>) -> Result<()> {
		let index = self.index(x, y)?;
		let rgb = remap.map_or(rgb, |max| remap_rgb(rgb, max));
		self.cells[index] = rgb.to_grb();
		Ok(())
	}

	pub fn get(&self, x: usize, y: usize) -> Result<Rgb> {
		Ok(Rgb::from_grb(self.cells[self.index(x, y)?]))
	}

	pub fn clear(&mut self) {
		self.cells.fill([0; BYTES_PER_LED]);
	}

	/// Moves every pixel one column to the left.
	///
	/// The leftmost column is dropped when `remove` is set, otherwise it wraps around to
	/// the right edge.
	pub fn shift_left(&mut self, remove: bool) {
		let cols = self.cols;
		if cols == 0 {
			return;
		}
		for row in self.cells.chunks_exact_mut(cols) {
			row.rotate_left(1);
			if remove {
				row[cols - 1] = [0; BYTES_PER_LED];
			}
		}
	}

	/// Moves every pixel one column to the right, see [`shift_left`](Self::shift_left).
	pub fn shift_right(&mut self, remove: bool) {
		let cols = self.cols;
		if cols == 0 {
			return;
		}
		for row in self.cells.chunks_exact_mut(cols) {
			row.rotate_right(1);
			if remove {
				row[0] = [0; BYTES_PER_LED];
			}
		}
	}

	/// Moves every pixel one row up, the top row is dropped or wraps to the bottom.
	pub fn shift_up(&mut self, remove: bool) {
		if self.cells.is_empty() {
			return;
		}
		self.cells.rotate_left(self.cols);
		if remove {
			let last_row = self.cells.len() - self.cols;
			self.cells[last_row..].fill([0; BYTES_PER_LED]);
		}
	}

	/// Moves every pixel one row down, the bottom row is dropped or wraps to the top.
	pub fn shift_down(&mut self, remove: bool) {
		if self.cells.is_empty() {
			return;
		}
		self.cells.rotate_right(self.cols);
		if remove {
			self.cells[..self.cols].fill([0; BYTES_PER_LED]);
		}
	}

	/// Colors every point in `points`, or none of them if any lies outside the grid.
	fn paint(&mut self, points: &[(i32, i32)], rgb: Rgb) -> Result<()> {
		let indices = points
			.iter()
			.map(|&point| self.signed_index(point))
			.collect::<Result<Vec<_>>>()?;

		let grb = rgb.to_grb();
		for index in indices {
			self.cells[index] = grb;
		}
		Ok(())
	}

	/// Draws a line from `x1`, `y1` to `x2`, `y2` and returns the pixels it touched, in order
	/// from the first point to the second.
	///
	/// Colors are stored as given, the controller rescales them.
	pub fn line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, rgb: Rgb) -> Result<Vec<(i32, i32)>> {
		// every point lies in the box spanned by the endpoints
		self.signed_index((x1, y1))?;
		self.signed_index((x2, y2))?;

		let points = line_points(x1, y1, x2, y2);
		self.paint(&points, rgb)?;
		Ok(points)
	}

	/// Draws the outline of the rectangle with opposite corners `x1`, `y1` and `x2`, `y2`.
	pub fn rectangle(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, rgb: Rgb) -> Result<()> {
		self.signed_index((x1, y1))?;
		self.signed_index((x2, y2))?;
		self.paint(&rectangle_points(x1, y1, x2, y2), rgb)
	}

	/// Draws a 3x5 digit with its top left corner at `x`, `y`.
	pub fn digit(&mut self, x: i32, y: i32, n: u8, rgb: Rgb) -> Result<()> {
		let strokes = DIGITS.get(usize::from(n)).ok_or(Error::InvalidDigit(n))?;
		let at = |dx: i32, dy: i32| match (x.checked_add(dx), y.checked_add(dy)) {
			(Some(x), Some(y)) => Ok((x, y)),
			_ => Err(Error::IndexOutOfRange {
				index: usize::MAX,
				len:   self.cells.len(),
			}),
		};

		let mut points = Vec::with_capacity(digits::GLYPH_WIDTH * digits::GLYPH_HEIGHT);
		for stroke in strokes.iter() {
			match *stroke {
				Stroke::Line(x1, y1, x2, y2) => {
					let ((x1, y1), (x2, y2)) = (at(x1, y1)?, at(x2, y2)?);
					points.extend(line_points(x1, y1, x2, y2));
				}
				Stroke::Rect(x1, y1, x2, y2) => {
					let ((x1, y1), (x2, y2)) = (at(x1, y1)?, at(x2, y2)?);
					points.extend(rectangle_points(x1, y1, x2, y2));
				}
				Stroke::Dot(dx, dy) => points.push(at(dx, dy)?),
			}
		}

		self.paint(&points, rgb)
	}

	/// Copies the part of the grid wired to `channel` into that channel's buffer and returns
	/// it, ready to be sent as a frame.
	pub fn channel_frame(&mut self, channel: Channel) -> &ChannelFramebuffer {
		let columns = self.layout.column_range(channel);
		let rows = self.layout.channel_rows(channel);
		let cols = self.cols;

		trace!(?channel, ?columns, rows, "slicing matrix");

		let cells = &self.cells;
		let pixels = (0..rows).flat_map(move |y| cells[y * cols + columns.start..y * cols + columns.end].iter().copied());

		let buffer = &mut self.channels[channel.idx()];
		buffer.load_grb(pixels);
		buffer
	}
}

/// Bresenham rasterization of the line from `x1`, `y1` to `x2`, `y2`.
///
/// Returns `max(|dx|, |dy|) + 1` points, starting at the first endpoint.
pub fn line_points(x1: i32, y1: i32, x2: i32, y2: i32) -> Vec<(i32, i32)> {
	// wide enough for the distance between any two i32 coordinates
	let (x1, y1, x2, y2) = (i64::from(x1), i64::from(y1), i64::from(x2), i64::from(y2));

	let steep = (y2 - y1).abs() > (x2 - x1).abs();
	let (mut x1, mut y1, mut x2, mut y2) = if steep { (y1, x1, y2, x2) } else { (x1, y1, x2, y2) };

	let reversed = x1 > x2;
	if reversed {
		std::mem::swap(&mut x1, &mut x2);
		std::mem::swap(&mut y1, &mut y2);
	}

	let dx = x2 - x1;
	let dy = (y2 - y1).abs();
	let y_step = if y1 < y2 { 1 } else { -1 };

	let mut error = dx / 2;
	let mut y = y1;
	let mut points = Vec::with_capacity(usize::try_from(dx + 1).unwrap_or(0));

	for x in x1..=x2 {
		// x and y stay between the endpoints, so they fit back into i32
		let (major, minor) = (x as i32, y as i32);
		points.push(if steep { (minor, major) } else { (major, minor) });
		error -= dy;
		if error < 0 {
			y += y_step;
			error += dx;
		}
	}

	if reversed {
		points.reverse();
	}
	points
}

fn rectangle_points(x1: i32, y1: i32, x2: i32, y2: i32) -> Vec<(i32, i32)> {
	[
		line_points(x1, y1, x1, y2),
		line_points(x1, y1, x2, y1),
		line_points(x2, y1, x2, y2),
		line_points(x1, y2, x2, y2),
	]
	.concat()
}
