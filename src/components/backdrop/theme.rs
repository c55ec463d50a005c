//! Visual styling for the backdrop.
//!
//! Colours and per-population style constants. Every style has a `Default`
//! matching the stock look (gold lattice, amber trail, white fade) and can be
//! overridden field by field from the JSON config block.

use serde::Deserialize;

use super::config::ConfigError;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}

	/// Parses a CSS color string.
	/// Supports hex (`#RRGGBB`, `#RGB`) and `rgb()`/`rgba()` functional notation.
	pub fn parse(color_str: &str) -> Option<Self> {
		let s = color_str.trim();
		if let Some(hex) = s.strip_prefix('#') {
			return match hex.len() {
				6 => Some(Self::rgb(
					u8::from_str_radix(hex.get(0..2)?, 16).ok()?,
					u8::from_str_radix(hex.get(2..4)?, 16).ok()?,
					u8::from_str_radix(hex.get(4..6)?, 16).ok()?,
				)),
				3 => {
					let digit = |i: usize| {
						u8::from_str_radix(hex.get(i..i + 1)?, 16)
							.ok()
							.map(|d| d * 17)
					};
					Some(Self::rgb(digit(0)?, digit(1)?, digit(2)?))
				}
				_ => None,
			};
		}

		let inner = s
			.strip_prefix("rgba(")
			.or_else(|| s.strip_prefix("rgb("))?
			.strip_suffix(')')?;
		let nums: Vec<&str> = inner.split(',').map(str::trim).collect();
		if !(3..=4).contains(&nums.len()) {
			return None;
		}
		let a = match nums.get(3) {
			Some(a) => a.parse::<f64>().ok()?.clamp(0.0, 1.0),
			None => 1.0,
		};
		Some(Self::rgba(
			nums[0].parse().ok()?,
			nums[1].parse().ok()?,
			nums[2].parse().ok()?,
			a,
		))
	}
}

impl TryFrom<String> for Color {
	type Error = ConfigError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::parse(&value).ok_or(ConfigError::InvalidColor(value))
	}
}

/// Translucent overlay painted over the whole surface every frame.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct FadeStyle {
	pub color: Color,
	/// Overlay opacity. Lower values leave longer motion trails.
	pub alpha: f64,
}

impl Default for FadeStyle {
	fn default() -> Self {
		Self {
			color: Color::rgb(255, 255, 255),
			alpha: 0.2,
		}
	}
}

impl FadeStyle {
	pub fn overlay(&self) -> Color {
		self.color.with_alpha(self.alpha)
	}
}

/// Lattice layout and pointer-repulsion tuning.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct GridStyle {
	/// Lattice pitch in surface units.
	pub gap: f64,
	/// Pointer distance beyond which particles feel no force.
	pub interaction_radius: f64,
	/// Fraction of the remaining distance to target closed each frame.
	pub ease: f64,
	pub particle_size: f64,
	pub color: Color,
	/// Link radius as a multiple of `gap`.
	pub link_radius_factor: f64,
	pub link_width: f64,
}

impl Default for GridStyle {
	fn default() -> Self {
		Self {
			gap: 35.0,
			interaction_radius: 150.0,
			ease: 0.05,
			particle_size: 2.0,
			color: Color::rgb(255, 215, 0),
			link_radius_factor: 1.5,
			link_width: 0.5,
		}
	}
}

impl GridStyle {
	pub fn link_radius(&self) -> f64 {
		self.gap * self.link_radius_factor
	}
}

/// Cursor trail emission and decay tuning.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct TrailStyle {
	/// Emit one particle every `emit_interval` frames.
	pub emit_interval: u32,
	pub size_min: f64,
	pub size_max: f64,
	/// Max absolute initial velocity per axis.
	pub speed: f64,
	/// Life lost per frame (life starts at 1).
	pub decay: f64,
	/// Size lost per frame while above `size_floor`.
	pub shrink: f64,
	pub size_floor: f64,
	pub color: Color,
}

impl Default for TrailStyle {
	fn default() -> Self {
		Self {
			emit_interval: 2,
			size_min: 1.0,
			size_max: 6.0,
			speed: 1.0,
			decay: 0.02,
			shrink: 0.1,
			size_floor: 0.2,
			color: Color::rgb(255, 193, 7),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_hex_and_functional_colors() {
		assert_eq!(Color::parse("#FFD700"), Some(Color::rgb(255, 215, 0)));
		assert_eq!(Color::parse("#fff"), Some(Color::rgb(255, 255, 255)));
		assert_eq!(
			Color::parse("rgba(255, 193, 7, 0.5)"),
			Some(Color::rgba(255, 193, 7, 0.5))
		);
		assert_eq!(Color::parse("rgb(1,2,3)"), Some(Color::rgb(1, 2, 3)));
	}

	#[test]
	fn rejects_malformed_colors() {
		assert_eq!(Color::parse("gold"), None);
		assert_eq!(Color::parse("#12345"), None);
		assert_eq!(Color::parse("rgb(300, 0, 0)"), None);
		assert_eq!(Color::parse("rgb(1, 2)"), None);
	}

	#[test]
	fn css_output_uses_hex_when_opaque() {
		assert_eq!(Color::rgb(255, 215, 0).to_css(), "#ffd700");
		assert_eq!(
			Color::rgb(255, 255, 255).with_alpha(0.2).to_css(),
			"rgba(255, 255, 255, 0.2)"
		);
	}
}
