/// One stroke of a glyph, offsets relative to the glyph's top left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stroke {
	Line(i32, i32, i32, i32),
	Rect(i32, i32, i32, i32),
	Dot(i32, i32),
}

use Stroke::{Dot, Line, Rect};

const TOP: Stroke = Line(0, 0, 2, 0);
const MIDDLE: Stroke = Line(0, 2, 2, 2);
const BOTTOM: Stroke = Line(0, 4, 2, 4);

/// 3x5 glyphs for the digits 0 to 9.
pub(crate) static DIGITS: [&[Stroke]; 10] = [
	&[Rect(0, 0, 2, 4)],
	&[Line(1, 0, 1, 4), BOTTOM, Dot(0, 1)],
	&[TOP, MIDDLE, BOTTOM, Dot(2, 1), Dot(0, 3)],
	&[TOP, MIDDLE, BOTTOM, Dot(2, 1), Dot(2, 3)],
	&[Line(0, 0, 0, 2), Line(2, 0, 2, 4), Dot(1, 2)],
	&[TOP, MIDDLE, BOTTOM, Dot(0, 1), Dot(2, 3)],
	&[TOP, MIDDLE, BOTTOM, Dot(0, 1), Dot(2, 3), Dot(0, 3)],
	&[Line(1, 2, 1, 4), TOP, Dot(2, 1)],
	&[TOP, MIDDLE, BOTTOM, Dot(0, 1), Dot(2, 1), Dot(2, 3), Dot(0, 3)],
	&[TOP, MIDDLE, BOTTOM, Dot(0, 1), Dot(2, 1), Dot(2, 3)],
];

pub(crate) const GLYPH_WIDTH: usize = 3;
pub(crate) const GLYPH_HEIGHT: usize = 5;
