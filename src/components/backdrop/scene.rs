//! Backdrop state: surface, lattice and trail, advanced one frame at a time.
//!
//! Created once at start-up, then mutated by the frame loop (`tick`) and by the
//! host event handlers (`resize`, `track_pointer`). Both only ever run on the
//! page's event loop, so the scene is shared through `Rc<RefCell<_>>` without
//! any locking.

use log::debug;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::config::BackdropConfig;
use super::grid::GridField;
use super::render::Painter;
use super::surface::{DocumentMetrics, Surface};
use super::trail::TrailEmitter;

/// Everything one frame of the backdrop needs.
pub struct Scene {
	pub surface: Surface,
	pub grid: GridField,
	pub trail: TrailEmitter,
	rng: SmallRng,
}

impl Scene {
	/// Build a scene sized to `metrics`, with the lattice already laid out.
	pub fn new(config: &BackdropConfig, metrics: DocumentMetrics, seed: u64) -> Self {
		let surface = Surface::new(metrics, config.fade.clone());
		let mut grid = GridField::new(config.grid.clone());
		grid.layout(surface.width(), surface.height());

		Self {
			surface,
			grid,
			trail: TrailEmitter::new(config.trail.clone()),
			rng: SmallRng::seed_from_u64(seed),
		}
	}

	/// Resize the surface and relayout the lattice to cover it.
	pub fn resize(&mut self, metrics: DocumentMetrics) {
		self.surface.resize(metrics);
		self.grid
			.layout(self.surface.width(), self.surface.height());
		debug!(
			"ambient-backdrop: surface {}x{}, {} grid particles",
			self.surface.width(),
			self.surface.height(),
			self.grid.particles().len()
		);
	}

	pub fn track_pointer(&mut self, viewport_x: f64, viewport_y: f64, scroll_x: f64, scroll_y: f64) {
		self.surface
			.track_pointer(viewport_x, viewport_y, scroll_x, scroll_y);
	}

	/// Run one frame: fade, lattice, trail.
	pub fn tick(&mut self, painter: &mut impl Painter) {
		self.surface.clear_frame(painter);
		let pointer = *self.surface.pointer();
		self.grid.render_frame(&pointer, painter);
		self.trail.render_frame(&pointer, painter, &mut self.rng);
	}
}

#[cfg(test)]
mod tests {
	use super::super::render::{DrawCall, RecordingPainter};
	use super::*;

	fn metrics(width: f64, scroll_height: f64) -> DocumentMetrics {
		DocumentMetrics {
			viewport_width: width,
			viewport_height: 800.0,
			scroll_height,
		}
	}

	#[test]
	fn new_scene_lays_out_full_document() {
		let scene = Scene::new(&BackdropConfig::default(), metrics(350.0, 3500.0), 7);
		assert_eq!(scene.grid.particles().len(), 10 * 100);
	}

	#[test]
	fn resize_relayouts_grid() {
		let mut scene = Scene::new(&BackdropConfig::default(), metrics(350.0, 350.0), 7);
		assert_eq!(scene.grid.particles().len(), 100);

		scene.resize(metrics(700.0, 350.0));
		assert_eq!(scene.surface.width(), 700.0);
		assert_eq!(scene.grid.particles().len(), 200);
	}

	#[test]
	fn tick_paints_fade_before_particles() {
		let mut scene = Scene::new(&BackdropConfig::default(), metrics(70.0, 70.0), 7);
		let mut painter = RecordingPainter::default();

		scene.tick(&mut painter);
		assert_eq!(painter.rects().len(), 1);
		assert_eq!(painter.rects()[0].2, 70.0);
		assert_eq!(painter.circles().len(), 4);
		assert_eq!(scene.trail.frame_count(), 1);

		scene.tick(&mut painter);
		assert_eq!(scene.trail.particles().len(), 1);
	}

	#[test]
	fn tick_draws_fade_then_grid_then_trail() {
		#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
		enum Stage {
			Fade,
			GridParticle,
			GridLink,
			Trail,
		}

		let config = BackdropConfig::default();
		let trail = (config.trail.color.r, config.trail.color.g, config.trail.color.b);
		let mut scene = Scene::new(&config, metrics(70.0, 70.0), 7);
		let mut painter = RecordingPainter::default();
		scene.tick(&mut painter);
		painter.clear();
		// Second frame emits the first trail particle.
		scene.tick(&mut painter);

		let stages: Vec<Stage> = painter
			.calls
			.iter()
			.map(|call| match *call {
				DrawCall::Rect { .. } => Stage::Fade,
				DrawCall::Line { .. } => Stage::GridLink,
				DrawCall::Circle { color, .. } if (color.r, color.g, color.b) == trail => Stage::Trail,
				DrawCall::Circle { .. } => Stage::GridParticle,
			})
			.collect();

		assert_eq!(stages.first(), Some(&Stage::Fade));
		assert!(stages.windows(2).all(|w| w[0] <= w[1]), "out of order: {stages:?}");
		let count = |stage| stages.iter().filter(|s| **s == stage).count();
		assert_eq!(count(Stage::Fade), 1);
		assert_eq!(count(Stage::GridParticle), 4);
		assert!(count(Stage::GridLink) > 0);
		assert_eq!(count(Stage::Trail), 1);
	}

	#[test]
	fn both_populations_read_the_tracked_pointer() {
		let mut scene = Scene::new(&BackdropConfig::default(), metrics(350.0, 1050.0), 7);
		scene.track_pointer(100.0, 100.0, 0.0, 600.0);
		let mut painter = RecordingPainter::default();
		scene.tick(&mut painter);
		scene.tick(&mut painter);

		let spawned = &scene.trail.particles()[0];
		assert!((spawned.y - spawned.vy - 700.0).abs() < 1e-9);

		// Lattice point at (105, 700) sits 5 units right of the pointer: pushed right.
		let near = scene
			.grid
			.particles()
			.iter()
			.find(|p| p.origin_x == 105.0 && p.origin_y == 700.0)
			.expect("lattice point");
		assert!(near.x > 105.0);
	}
}
