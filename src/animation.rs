//! Blink, morph and pulse as step machines.
//!
//! An [`Animation`] only decides *what* happens next, drivers decide how to wait. The
//! blocking driver ([`BlinkStick::run`](crate::BlinkStick::run)) sleeps the thread on
//! [`Step::Suspend`], the tokio driver awaits a timer, so both produce the same sequence of
//! colors and delays.
//!
//! Colors in an animation are in the full `0..=255` range, drivers rescale them on the way
//! to the device.

use std::{collections::VecDeque, time::Duration};

use tracing::warn;

use crate::Rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
	/// Show this color.
	Set(Rgb),
	/// Read the color currently shown and hand it to [`Animation::sampled`].
	Sample,
	/// Wait before the next step.
	Suspend(Duration),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MorphLeg {
	target:   Rgb,
	duration: Duration,
	steps:    u32,
}

#[derive(Debug, Clone)]
enum Plan {
	Blink {
		color:     Rgb,
		delay:     Duration,
		remaining: u32,
		first:     bool,
	},
	Morph(Option<MorphLeg>),
	Pulse {
		color:     Rgb,
		duration:  Duration,
		steps:     u32,
		remaining: u32,
		started:   bool,
	},
}

impl Plan {
	/// Queues the next batch of work, returns `false` once the plan is exhausted.
	fn advance(&mut self, pending: &mut VecDeque<Step>, legs: &mut VecDeque<MorphLeg>) -> bool {
		match self {
			Plan::Blink { remaining: 0, .. } => false,
			Plan::Blink {
				color,
				delay,
				remaining,
				first,
			} => {
				// every blink after the first one starts dark
				if !*first {
					pending.push_back(Step::Suspend(*delay));
				}
				pending.extend([Step::Set(*color), Step::Suspend(*delay), Step::Set(Rgb::BLACK)]);
				*remaining -= 1;
				*first = false;
				true
			}
			Plan::Morph(leg) => match leg.take() {
				Some(leg) => {
					legs.push_back(leg);
					true
				}
				None => false,
			},
			Plan::Pulse { started, .. } if !*started => {
				pending.push_back(Step::Set(Rgb::BLACK));
				*started = true;
				true
			}
			Plan::Pulse { remaining: 0, .. } => false,
			Plan::Pulse {
				color,
				duration,
				steps,
				remaining,
				..
			} => {
				legs.push_back(MorphLeg {
					target:   *color,
					duration: *duration,
					steps:    *steps,
				});
				legs.push_back(MorphLeg {
					target:   Rgb::BLACK,
					duration: *duration,
					steps:    *steps,
				});
				*remaining -= 1;
				true
			}
		}
	}
}

/// A running animation, see the [module docs](self).
#[derive(Debug, Clone)]
pub struct Animation {
	plan:     Plan,
	pending:  VecDeque<Step>,
	legs:     VecDeque<MorphLeg>,
	awaiting: Option<MorphLeg>,
}

impl Animation {
	fn new(plan: Plan) -> Self {
		Self {
			plan,
			pending: VecDeque::new(),
			legs: VecDeque::new(),
			awaiting: None,
		}
	}

	/// Turns `color` on for `delay` and off again, `repeats` times.
	///
	/// Every repeat after the first waits `delay` in the dark before turning on.
	pub fn blink(color: Rgb, repeats: u32, delay: Duration) -> Self {
		Self::new(Plan::Blink {
			color,
			delay,
			remaining: repeats,
			first: true,
		})
	}

	/// Fades from the color currently shown to `color` in `steps` steps over `duration`.
	pub fn morph(color: Rgb, duration: Duration, steps: u32) -> Self {
		Self::new(Plan::Morph(Some(MorphLeg {
			target: color,
			duration,
			steps,
		})))
	}

	/// Turns off, then morphs to `color` and back to black `repeats` times.
	pub fn pulse(color: Rgb, repeats: u32, duration: Duration, steps: u32) -> Self {
		Self::new(Plan::Pulse {
			color,
			duration,
			steps,
			remaining: repeats,
			started: false,
		})
	}

	/// The next step, `None` once the animation is complete.
	pub fn next_step(&mut self) -> Option<Step> {
		loop {
			if let Some(leg) = self.awaiting.take() {
				warn!("morph started without sampling the current color, starting from black");
				self.expand(leg, [0; 3]);
			}
			if let Some(step) = self.pending.pop_front() {
				return Some(step);
			}
			if let Some(leg) = self.legs.pop_front() {
				self.awaiting = Some(leg);
				return Some(Step::Sample);
			}
			if !self.plan.advance(&mut self.pending, &mut self.legs) {
				return None;
			}
		}
	}

	/// Answers a [`Step::Sample`] with the color currently shown, in the `0..=255` range.
	///
	/// Channels are wide so a reading outside the color range can be passed through, the
	/// morph then starts from black.
	pub fn sampled(&mut self, current: [u16; 3]) {
		if let Some(leg) = self.awaiting.take() {
			self.expand(leg, current);
		}
	}

	fn expand(&mut self, leg: MorphLeg, start: [u16; 3]) {
		let start = match start {
			[r, g, b] if r <= 255 && g <= 255 && b <= 255 => Rgb::new(r as u8, g as u8, b as u8),
			_ => Rgb::BLACK,
		};

		self.pending.push_back(Step::Set(start));
		if leg.steps > 0 {
			let delay = leg.duration / leg.steps;
			for color in gradient(start, leg.target, leg.steps) {
				self.pending.extend([Step::Set(color), Step::Suspend(delay)]);
			}
		}
		self.pending.push_back(Step::Set(leg.target));
	}
}

impl Iterator for Animation {
	type Item = Step;

	fn next(&mut self) -> Option<Step> {
		self.next_step()
	}
}

/// The `steps` colors evenly spaced strictly between `start` and `end`.
pub fn gradient(start: Rgb, end: Rgb, steps: u32) -> Vec<Rgb> {
	let mix = |from: u8, to: u8, d: f32| (f32::from(from) * (1.0 - d) + f32::from(to) * d).round() as u8;

	let total = (steps + 1) as f32;
	(1..=steps)
		.map(|n| {
			let d = n as f32 / total;
			Rgb::new(mix(start.r, end.r, d), mix(start.g, end.g, d), mix(start.b, end.b, d))
		})
		.collect()
}
