//! Drawing surface dimensions and the live pointer.
//!
//! The surface spans the whole document, not just the viewport: its height is the
//! document's scroll height, and the pointer is stored in document space
//! (viewport coordinates plus scroll offset) so interaction distances stay
//! correct while the page is scrolled.

use super::render::Painter;
use super::theme::FadeStyle;

/// Host snapshot used to size the surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DocumentMetrics {
	pub viewport_width: f64,
	pub viewport_height: f64,
	/// Full scrollable height of the document body.
	pub scroll_height: f64,
}

impl DocumentMetrics {
	/// Width of the layout viewport, scrollbar excluded.
	///
	/// `client_width` is the root element's `clientWidth`; `inner_width` (which
	/// counts the scrollbar) is only used when the root reports no width.
	pub fn layout_width(client_width: i32, inner_width: f64) -> f64 {
		if client_width > 0 {
			f64::from(client_width)
		} else {
			inner_width
		}
	}
}

/// Pointer position in document coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pointer {
	pub x: f64,
	pub y: f64,
}

/// Owns surface dimensions and the shared pointer record.
#[derive(Clone, Debug)]
pub struct Surface {
	width: f64,
	height: f64,
	pointer: Pointer,
	fade: FadeStyle,
}

impl Surface {
	/// Sizes the surface to `metrics` and parks the pointer at the viewport centre.
	pub fn new(metrics: DocumentMetrics, fade: FadeStyle) -> Self {
		let mut surface = Self {
			width: 0.0,
			height: 0.0,
			pointer: Pointer {
				x: metrics.viewport_width / 2.0,
				y: metrics.viewport_height / 2.0,
			},
			fade,
		};
		surface.resize(metrics);
		surface
	}

	pub fn width(&self) -> f64 {
		self.width
	}

	pub fn height(&self) -> f64 {
		self.height
	}

	pub fn pointer(&self) -> &Pointer {
		&self.pointer
	}

	/// Width follows the viewport; height follows the document, not the viewport.
	pub fn resize(&mut self, metrics: DocumentMetrics) {
		self.width = metrics.viewport_width.max(0.0);
		self.height = metrics.scroll_height.max(0.0);
	}

	/// Record a pointer move given in viewport coordinates plus the scroll offset.
	pub fn track_pointer(&mut self, viewport_x: f64, viewport_y: f64, scroll_x: f64, scroll_y: f64) {
		self.pointer.x = viewport_x + scroll_x;
		self.pointer.y = viewport_y + scroll_y;
	}

	/// Paint the translucent fade overlay across the whole surface.
	pub fn clear_frame(&self, painter: &mut impl Painter) {
		painter.fill_rect(0.0, 0.0, self.width, self.height, self.fade.overlay());
	}
}

#[cfg(test)]
mod tests {
	use super::super::render::RecordingPainter;
	use super::super::theme::Color;
	use super::*;

	fn metrics(width: f64, viewport_height: f64, scroll_height: f64) -> DocumentMetrics {
		DocumentMetrics {
			viewport_width: width,
			viewport_height,
			scroll_height,
		}
	}

	#[test]
	fn height_follows_scroll_height_not_viewport() {
		let mut surface = Surface::new(metrics(1000.0, 800.0, 3000.0), FadeStyle::default());
		assert_eq!((surface.width(), surface.height()), (1000.0, 3000.0));

		surface.resize(metrics(640.0, 480.0, 5200.0));
		assert_eq!((surface.width(), surface.height()), (640.0, 5200.0));
	}

	#[test]
	fn layout_width_excludes_scrollbar() {
		// 1000 wide window with a 15 pixel scrollbar.
		assert_eq!(DocumentMetrics::layout_width(985, 1000.0), 985.0);
		// Scrollbar hidden while a dialog is open.
		assert_eq!(DocumentMetrics::layout_width(1000, 1000.0), 1000.0);
		assert_eq!(DocumentMetrics::layout_width(0, 1000.0), 1000.0);
	}

	#[test]
	fn pointer_starts_at_viewport_centre() {
		let surface = Surface::new(metrics(1000.0, 800.0, 3000.0), FadeStyle::default());
		assert_eq!(*surface.pointer(), Pointer { x: 500.0, y: 400.0 });
	}

	#[test]
	fn pointer_tracking_adds_scroll_offset() {
		let mut surface = Surface::new(metrics(1000.0, 800.0, 3000.0), FadeStyle::default());
		surface.track_pointer(120.0, 300.0, 0.0, 900.0);
		assert_eq!(*surface.pointer(), Pointer { x: 120.0, y: 1200.0 });
	}

	#[test]
	fn same_document_spot_maps_to_same_pointer_after_scroll() {
		let mut surface = Surface::new(metrics(1000.0, 800.0, 3000.0), FadeStyle::default());
		surface.track_pointer(200.0, 700.0, 0.0, 0.0);
		let before = *surface.pointer();

		// Scrolled down 500px, the same document point now sits 500px higher on screen.
		surface.track_pointer(200.0, 200.0, 0.0, 500.0);
		assert_eq!(*surface.pointer(), before);
	}

	#[test]
	fn clear_frame_covers_full_document() {
		let surface = Surface::new(metrics(1000.0, 800.0, 3000.0), FadeStyle::default());
		let mut painter = RecordingPainter::default();
		surface.clear_frame(&mut painter);

		assert_eq!(
			painter.rects(),
			vec![(0.0, 0.0, 1000.0, 3000.0, Color::rgba(255, 255, 255, 0.2))]
		);
	}
}
