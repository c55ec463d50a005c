//! Interactive lattice of particles that shy away from the pointer.

use log::warn;

use super::render::Painter;
use super::surface::Pointer;
use super::theme::GridStyle;

/// Largest lattice [`GridField::layout`] will build. Beyond this a frame
/// cannot finish in time, so the grid is skipped instead.
pub const MAX_GRID_PARTICLES: usize = 100_000;

/// Repulsion strength at `distance` from the pointer. Zero at or beyond `radius`.
pub fn repulsion_force(distance: f64, radius: f64) -> f64 {
	(radius - distance).max(0.0)
}

/// A single lattice point.
#[derive(Clone, Debug, PartialEq)]
pub struct GridParticle {
	pub x: f64,
	pub y: f64,
	pub origin_x: f64,
	pub origin_y: f64,
	pub distance: f64,
	pub force: f64,
	pub angle: f64,
	/// Current displacement target relative to the origin.
	pub disp_x: f64,
	pub disp_y: f64,
}

impl GridParticle {
	pub fn new(x: f64, y: f64) -> Self {
		Self {
			x,
			y,
			origin_x: x,
			origin_y: y,
			distance: 0.0,
			force: 0.0,
			angle: 0.0,
			disp_x: 0.0,
			disp_y: 0.0,
		}
	}

	/// Push away from the pointer and ease toward the displaced rest position.
	pub fn update(&mut self, pointer: &Pointer, style: &GridStyle) {
		let dx = self.x - pointer.x;
		let dy = self.y - pointer.y;
		self.distance = (dx * dx + dy * dy).sqrt();
		self.force = repulsion_force(self.distance, style.interaction_radius);
		// atan2 is defined at the origin, so a pointer sitting exactly on the particle is fine
		self.angle = dy.atan2(dx);
		self.disp_x = self.angle.cos() * self.force;
		self.disp_y = self.angle.sin() * self.force;
		self.x += (self.origin_x + self.disp_x - self.x) * style.ease;
		self.y += (self.origin_y + self.disp_y - self.y) * style.ease;
	}
}

/// Owns the lattice and draws it with its connecting links.
#[derive(Clone, Debug)]
pub struct GridField {
	particles: Vec<GridParticle>,
	style: GridStyle,
}

impl GridField {
	pub fn new(style: GridStyle) -> Self {
		Self {
			particles: Vec::new(),
			style,
		}
	}

	pub fn particles(&self) -> &[GridParticle] {
		&self.particles
	}

	pub fn style(&self) -> &GridStyle {
		&self.style
	}

	/// Rebuild the lattice over `[0, width) x [0, height)`, column by column.
	pub fn layout(&mut self, width: f64, height: f64) {
		let gap = self.style.gap;
		let columns = lattice_steps(width, gap);
		let rows = lattice_steps(height, gap);

		self.particles.clear();
		let count = columns.checked_mul(rows).unwrap_or(usize::MAX);
		if count > MAX_GRID_PARTICLES {
			warn!(
				"ambient-backdrop: {}x{} lattice exceeds {} particles, grid left empty",
				columns, rows, MAX_GRID_PARTICLES
			);
			return;
		}
		self.particles.reserve(count);
		for i in 0..columns {
			for j in 0..rows {
				self.particles
					.push(GridParticle::new(i as f64 * gap, j as f64 * gap));
			}
		}
	}

	/// Update and draw every particle, then link every pair closer than the link radius.
	pub fn render_frame(&mut self, pointer: &Pointer, painter: &mut impl Painter) {
		let style = &self.style;
		for p in &mut self.particles {
			p.update(pointer, style);
			painter.fill_circle(p.x, p.y, style.particle_size, style.color);
		}

		// All pairs, O(n^2). Lattice density is fixed, so this stays bounded.
		let link_radius = style.link_radius();
		for (i, p1) in self.particles.iter().enumerate() {
			for p2 in &self.particles[i + 1..] {
				let dx = p1.x - p2.x;
				let dy = p1.y - p2.y;
				let distance = (dx * dx + dy * dy).sqrt();
				if distance < link_radius {
					painter.stroke_line(
						(p1.x, p1.y),
						(p2.x, p2.y),
						style.link_width,
						style.color.with_alpha(1.0 - distance / link_radius),
					);
				}
			}
		}
	}
}

/// Number of lattice positions `0, gap, 2*gap, ...` strictly below `extent`.
fn lattice_steps(extent: f64, gap: f64) -> usize {
	if !(extent > 0.0 && gap > 0.0) {
		return 0;
	}
	(extent / gap).ceil() as usize
}
