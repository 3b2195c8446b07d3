use std::{
	sync::{Mutex, MutexGuard, PoisonError},
	time::Duration,
};

use tracing::info;

use crate::{animation::Animation, BlinkStick, ColorRequest, Config, DeviceTransport, Result};

/// Cooperative version of [`BlinkStick`], animations wait on tokio timers instead of
/// sleeping the thread.
///
/// Methods take `&self`, so several animations can run on the same device at once, for
/// example with `tokio::join!`. Steps of different animations never overlap, they only
/// interleave while an animation is waiting.
pub struct AsyncBlinkStick<T> {
	inner: Mutex<BlinkStick<T>>,
}

impl<T: DeviceTransport> AsyncBlinkStick<T> {
	pub fn new(transport: T, config: Config) -> Self {
		Self::from(BlinkStick::new(transport, config))
	}

	/// Locks the underlying controller for direct use. Don't hold on to the guard across an
	/// `.await`.
	pub fn lock(&self) -> MutexGuard<'_, BlinkStick<T>> {
		// a panicking step leaves the controller usable
		self.inner.lock().unwrap_or_else(PoisonError::into_inner)
	}

	pub fn into_inner(self) -> BlinkStick<T> {
		self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
	}

	pub fn set_color<'a>(&self, channel: u8, index: u8, color: impl Into<ColorRequest<'a>>) -> Result<()> {
		self.lock().set_color(channel, index, color)
	}

	pub fn turn_off(&self) -> Result<()> {
		self.lock().turn_off()
	}

	pub async fn blink<'a>(
		&self,
		channel: u8,
		index: u8,
		color: impl Into<ColorRequest<'a>>,
		repeats: u32,
		delay: Duration,
	) -> Result<()> {
		let color = color.into().resolve_lenient();
		info!(channel, index, %color, repeats, ?delay, "blink");
		self.run(channel, index, Animation::blink(color, repeats, delay)).await
	}

	pub async fn morph<'a>(
		&self,
		channel: u8,
		index: u8,
		color: impl Into<ColorRequest<'a>>,
		duration: Duration,
		steps: u32,
	) -> Result<()> {
		let color = color.into().resolve_lenient();
		info!(channel, index, %color, ?duration, steps, "morph");
		self.run(channel, index, Animation::morph(color, duration, steps)).await
	}

	pub async fn pulse<'a>(
		&self,
		channel: u8,
		index: u8,
		color: impl Into<ColorRequest<'a>>,
		repeats: u32,
		duration: Duration,
		steps: u32,
	) -> Result<()> {
		let color = color.into().resolve_lenient();
		info!(channel, index, %color, repeats, ?duration, steps, "pulse");
		self.run(channel, index, Animation::pulse(color, repeats, duration, steps)).await
	}

	/// Plays `animation` on LED `index` of `channel`, yielding to other tasks while waiting.
	pub async fn run(&self, channel: u8, index: u8, mut animation: Animation) -> Result<()> {
		while let Some(step) = animation.next_step() {
			let delay = self.lock().apply_step(channel, index, step, &mut animation)?;
			if let Some(delay) = delay {
				tokio::time::sleep(delay).await;
			}
		}
		Ok(())
	}
}

impl<T> From<BlinkStick<T>> for AsyncBlinkStick<T> {
	fn from(device: BlinkStick<T>) -> Self {
		Self {
			inner: Mutex::new(device),
		}
	}
}
