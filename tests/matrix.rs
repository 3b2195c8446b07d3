mod common;

use std::time::Duration;

use blinkstick_matrix::{BlinkStickPro, BlinkStickProMatrix, Channel, Config, Error, MatrixLayout, Rgb};

use crate::common::{Recorder, Sent};

fn config() -> Config {
	Config {
		transmission_delay: Duration::ZERO,
		..Config::default()
	}
}

fn frames(recorder: &Recorder) -> Vec<(u8, Vec<u8>)> {
	recorder
		.sent()
		.into_iter()
		.filter_map(|sent| match sent {
			Sent::Frame { report_id, report } => Some((report_id, report)),
			Sent::Immediate { .. } => None,
		})
		.collect()
}

#[test]
fn two_panels_flush_only_their_own_columns() {
	let recorder = Recorder::default();
	let layout = MatrixLayout::new().with_channel(Channel::R, 8, 8).with_channel(Channel::G, 8, 8);
	let mut matrix = BlinkStickProMatrix::new(recorder.clone(), config(), layout);

	assert_eq!((matrix.cols(), matrix.rows()), (16, 8));

	matrix.set_color(9, 3, Rgb::new(10, 20, 30), true).unwrap();
	matrix.send_data(Channel::G).unwrap();

	let sent = frames(&recorder);
	assert_eq!(sent.len(), 1);

	let (report_id, report) = &sent[0];
	assert_eq!(*report_id, 9);
	assert_eq!(report.len(), 2 + 64 * 3);
	assert_eq!(&report[..2], &[0, 1]);

	// local column 1, row 3, green red blue
	let offset = 2 + (3 * 8 + 1) * 3;
	assert_eq!(&report[offset..offset + 3], &[20, 10, 30]);
	assert_eq!(report.iter().filter(|&&b| b != 0).count(), 4);
}

#[test]
fn send_all_skips_empty_channels_and_off_blanks_everything() {
	let recorder = Recorder::default();
	let layout = MatrixLayout::new().with_channel(Channel::R, 3, 2).with_channel(Channel::B, 2, 2);
	let mut matrix = BlinkStickProMatrix::new(recorder.clone(), config(), layout);

	matrix.line(0, 0, 4, 0, Rgb::new(255, 255, 255)).unwrap();
	matrix.send_data_all().unwrap();

	let sent = frames(&recorder);
	assert_eq!(sent.iter().map(|(_, report)| report[1]).collect::<Vec<_>>(), vec![0, 2]);
	assert_eq!(&sent[0].1[2..11], &[255; 9]);
	assert_eq!(&sent[1].1[2..8], &[255; 6]);

	matrix.off().unwrap();
	let sent = frames(&recorder);
	assert_eq!(sent.len(), 4);
	assert!(sent[2..].iter().all(|(_, report)| report[2..].iter().all(|&b| b == 0)));
}

#[test]
fn scrolling_wraps_across_channel_boundaries() {
	let layout = MatrixLayout::new().with_channel(Channel::R, 2, 1).with_channel(Channel::G, 2, 1);
	let mut matrix = BlinkStickProMatrix::new(Recorder::default(), config(), layout);
	let red = Rgb::new(255, 0, 0);

	matrix.set_color(1, 0, red, true).unwrap();
	matrix.shift_right(false);
	assert_eq!(matrix.get_color(2, 0).unwrap(), red);

	matrix.shift_right(false);
	matrix.shift_right(false);
	assert_eq!(matrix.get_color(0, 0).unwrap(), red);

	matrix.shift_left(true);
	assert!((0..4).all(|x| matrix.get_color(x, 0).unwrap() == Rgb::BLACK));
}

#[test]
fn max_rgb_applies_to_drawing() {
	let layout = MatrixLayout::new().with_channel(Channel::R, 3, 5);
	let mut matrix = BlinkStickProMatrix::new(
		Recorder::default(),
		Config {
			max_rgb: 51,
			..config()
		},
		layout,
	);

	matrix.digit(0, 0, 1, Rgb::new(255, 0, 0)).unwrap();
	assert_eq!(matrix.get_color(1, 0).unwrap(), Rgb::new(51, 0, 0));
	assert_eq!(matrix.get_color(0, 0).unwrap(), Rgb::BLACK);
}

#[test]
fn max_rgb_changed_on_the_device_applies_to_framebuffers() {
	let mut pro = BlinkStickPro::new(Recorder::default(), config(), [2, 0, 0]);
	pro.device().set_max_rgb(51);
	pro.set_color(Channel::R, 0, Rgb::new(255, 0, 0), true).unwrap();
	pro.set_color(Channel::R, 1, Rgb::new(255, 0, 0), false).unwrap();
	assert_eq!(pro.get_color(Channel::R, 0).unwrap(), Rgb::new(51, 0, 0));
	assert_eq!(pro.get_color(Channel::R, 1).unwrap(), Rgb::new(255, 0, 0));

	let layout = MatrixLayout::new().with_channel(Channel::R, 3, 1);
	let mut matrix = BlinkStickProMatrix::new(Recorder::default(), config(), layout);
	matrix.device().set_max_rgb(51);
	matrix.line(0, 0, 1, 0, Rgb::new(0, 255, 0)).unwrap();
	matrix.set_color(2, 0, Rgb::new(0, 0, 255), true).unwrap();
	assert_eq!(matrix.get_color(0, 0).unwrap(), Rgb::new(0, 51, 0));
	assert_eq!(matrix.get_color(2, 0).unwrap(), Rgb::new(0, 0, 51));
}

#[test]
fn strip_controller_frames_and_errors() {
	let recorder = Recorder::default();
	let mut pro = BlinkStickPro::new(recorder.clone(), config(), [20, 0, 2]);

	pro.set_color(Channel::R, 19, Rgb::new(1, 2, 3), true).unwrap();
	assert!(matches!(
		pro.set_color(Channel::B, 2, Rgb::BLACK, true),
		Err(Error::IndexOutOfRange { index: 2, len: 2 })
	));

	pro.send_data_all().unwrap();
	let sent = frames(&recorder);
	assert_eq!(sent.iter().map(|(id, report)| (*id, report[1])).collect::<Vec<_>>(), vec![(8, 0), (6, 2)]);
	assert_eq!(&sent[0].1[2 + 19 * 3..2 + 20 * 3], &[2, 1, 3]);
}

#[test]
fn oversized_channels_cannot_be_sent() {
	let mut pro = BlinkStickPro::new(Recorder::default(), config(), [65, 0, 0]);
	assert!(matches!(pro.send_data(Channel::R), Err(Error::FrameTooLarge { leds: 65 })));
}

#[test]
fn best_effort_swallows_transport_failures() {
	let recorder = Recorder::failing_after(0);

	let mut pro = BlinkStickPro::new(recorder.clone(), config(), [4, 0, 0]);
	assert!(matches!(pro.send_data_all(), Err(Error::Transport(_))));

	pro.device().set_error_reporting(false);
	pro.send_data_all().unwrap();
	assert!(recorder.sent().is_empty());
}
