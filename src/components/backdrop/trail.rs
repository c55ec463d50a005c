//! Short-lived particles shed by the pointer.

use rand::Rng;

use super::render::Painter;
use super::surface::Pointer;
use super::theme::TrailStyle;

/// A single fading trail particle.
#[derive(Clone, Debug, PartialEq)]
pub struct TrailParticle {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub size: f64,
	/// Remaining life in `(0, 1]` while alive. Also the draw alpha.
	pub life: f64,
}

impl TrailParticle {
	/// Spawn at `(x, y)` with a random size and drift.
	pub fn spawn(x: f64, y: f64, style: &TrailStyle, rng: &mut impl Rng) -> Self {
		let size = if style.size_max > style.size_min {
			rng.random_range(style.size_min..style.size_max)
		} else {
			style.size_min
		};
		let (vx, vy) = if style.speed > 0.0 {
			(
				rng.random_range(-style.speed..style.speed),
				rng.random_range(-style.speed..style.speed),
			)
		} else {
			(0.0, 0.0)
		};
		Self {
			x,
			y,
			vx,
			vy,
			size,
			life: 1.0,
		}
	}

	/// Advance one frame. Returns whether the particle is still alive.
	pub fn advance(&mut self, style: &TrailStyle) -> bool {
		self.x += self.vx;
		self.y += self.vy;
		self.life -= style.decay;
		if self.size > style.size_floor {
			self.size = (self.size - style.shrink).max(style.size_floor);
		}
		self.life > 0.0
	}
}

/// Emits trail particles at the pointer and ages them out.
#[derive(Clone, Debug)]
pub struct TrailEmitter {
	particles: Vec<TrailParticle>,
	frame_count: u64,
	style: TrailStyle,
}

impl TrailEmitter {
	pub fn new(style: TrailStyle) -> Self {
		Self {
			particles: Vec::new(),
			frame_count: 0,
			style,
		}
	}

	pub fn particles(&self) -> &[TrailParticle] {
		&self.particles
	}

	pub fn frame_count(&self) -> u64 {
		self.frame_count
	}

	/// Emit on every `emit_interval`-th frame, then age, draw and cull every particle.
	pub fn render_frame(
		&mut self,
		pointer: &Pointer,
		painter: &mut impl Painter,
		rng: &mut impl Rng,
	) {
		self.frame_count += 1;
		let interval = u64::from(self.style.emit_interval.max(1));
		if self.frame_count % interval == 0 {
			self.particles
				.push(TrailParticle::spawn(pointer.x, pointer.y, &self.style, rng));
		}

		let style = &self.style;
		self.particles.retain_mut(|p| {
			let alive = p.advance(style);
			if alive {
				painter.fill_circle(p.x, p.y, p.size, style.color.with_alpha(p.life));
			}
			alive
		});
	}
}
