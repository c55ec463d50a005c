//! Drawing primitives for the backdrop.
//!
//! The simulation never talks to the canvas directly. Field, emitter and surface
//! draw through a [`Painter`] handed to them per frame, so particle records stay
//! plain data and the browser context lives in one place.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::theme::Color;

/// A 2D drawing target.
pub trait Painter {
	/// Fill an axis-aligned rectangle.
	fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color);
	/// Fill a circle centred on `(x, y)`.
	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color);
	/// Stroke a straight segment.
	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Color);
}

impl Painter for CanvasRenderingContext2d {
	fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
		self.set_fill_style_str(&color.to_css());
		CanvasRenderingContext2d::fill_rect(self, x, y, width, height);
	}

	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) {
		self.begin_path();
		let _ = self.arc(x, y, radius, 0.0, PI * 2.0);
		self.set_fill_style_str(&color.to_css());
		self.fill();
	}

	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Color) {
		self.begin_path();
		self.set_line_width(width);
		self.set_stroke_style_str(&color.to_css());
		self.move_to(from.0, from.1);
		self.line_to(to.0, to.1);
		self.stroke();
	}
}

/// One recorded draw call.
#[cfg(test)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum DrawCall {
	Rect {
		x: f64,
		y: f64,
		width: f64,
		height: f64,
		color: Color,
	},
	Circle {
		x: f64,
		y: f64,
		radius: f64,
		color: Color,
	},
	Line {
		from: (f64, f64),
		to: (f64, f64),
		width: f64,
		color: Color,
	},
}

/// Painter that records every call in order, for asserting on frame output.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingPainter {
	pub calls: Vec<DrawCall>,
}

#[cfg(test)]
impl RecordingPainter {
	pub fn clear(&mut self) {
		self.calls.clear();
	}

	pub fn rects(&self) -> Vec<(f64, f64, f64, f64, Color)> {
		self.calls
			.iter()
			.filter_map(|call| match *call {
				DrawCall::Rect {
					x,
					y,
					width,
					height,
					color,
				} => Some((x, y, width, height, color)),
				_ => None,
			})
			.collect()
	}

	pub fn circles(&self) -> Vec<(f64, f64, f64, Color)> {
		self.calls
			.iter()
			.filter_map(|call| match *call {
				DrawCall::Circle {
					x,
					y,
					radius,
					color,
				} => Some((x, y, radius, color)),
				_ => None,
			})
			.collect()
	}

	pub fn lines(&self) -> Vec<((f64, f64), (f64, f64), f64, Color)> {
		self.calls
			.iter()
			.filter_map(|call| match *call {
				DrawCall::Line {
					from,
					to,
					width,
					color,
				} => Some((from, to, width, color)),
				_ => None,
			})
			.collect()
	}
}

#[cfg(test)]
impl Painter for RecordingPainter {
	fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
		self.calls.push(DrawCall::Rect {
			x,
			y,
			width,
			height,
			color,
		});
	}

	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) {
		self.calls.push(DrawCall::Circle {
			x,
			y,
			radius,
			color,
		});
	}

	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Color) {
		self.calls.push(DrawCall::Line {
			from,
			to,
			width,
			color,
		});
	}
}
