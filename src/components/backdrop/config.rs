//! Backdrop configuration.
//!
//! Read from an optional JSON block embedded in the page. Every field falls back
//! to the stock look, so `{}` and a missing block are equivalent.

use serde::Deserialize;

use super::theme::{FadeStyle, GridStyle, TrailStyle};

/// Id of the canvas element the host document provides.
pub const DEFAULT_SURFACE_ID: &str = "interactive-background";

/// Smallest accepted lattice spacing, in CSS pixels.
pub const MIN_GRID_GAP: f64 = 1.0;

/// Invalid configuration values.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
	#[error("invalid color \"{0}\"")]
	InvalidColor(String),

	#[error("{field} must be positive, got {value}")]
	NotPositive { field: &'static str, value: f64 },

	#[error("grid.gap must be at least {min}, got {0}", min = MIN_GRID_GAP)]
	GapTooSmall(f64),

	#[error("grid.ease must be in (0, 1], got {0}")]
	EaseOutOfRange(f64),

	#[error("trail.size_min ({min}) exceeds trail.size_max ({max})")]
	InvertedSizeRange { min: f64, max: f64 },

	#[error("malformed config: {0}")]
	Malformed(String),
}

/// Complete backdrop configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct BackdropConfig {
	pub surface_id: String,
	pub fade: FadeStyle,
	pub grid: GridStyle,
	pub trail: TrailStyle,
}

impl Default for BackdropConfig {
	fn default() -> Self {
		Self {
			surface_id: DEFAULT_SURFACE_ID.to_string(),
			fade: FadeStyle::default(),
			grid: GridStyle::default(),
			trail: TrailStyle::default(),
		}
	}
}

impl BackdropConfig {
	/// Parse and validate a JSON config block.
	pub fn from_json(json: &str) -> Result<Self, ConfigError> {
		let config: Self =
			serde_json::from_str(json).map_err(|e| ConfigError::Malformed(e.to_string()))?;
		config.validate()?;
		Ok(config)
	}

	/// Reject values that would stall or break the simulation.
	pub fn validate(&self) -> Result<(), ConfigError> {
		let positive = [
			("grid.gap", self.grid.gap),
			("grid.particle_size", self.grid.particle_size),
			("trail.decay", self.trail.decay),
		];
		for (field, value) in positive {
			if !(value > 0.0) {
				return Err(ConfigError::NotPositive { field, value });
			}
		}
		if self.grid.gap < MIN_GRID_GAP {
			return Err(ConfigError::GapTooSmall(self.grid.gap));
		}
		if !(self.grid.ease > 0.0 && self.grid.ease <= 1.0) {
			return Err(ConfigError::EaseOutOfRange(self.grid.ease));
		}
		if self.trail.size_min > self.trail.size_max {
			return Err(ConfigError::InvertedSizeRange {
				min: self.trail.size_min,
				max: self.trail.size_max,
			});
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::super::theme::Color;
	use super::*;

	#[test]
	fn empty_object_yields_defaults() {
		let config = BackdropConfig::from_json("{}").unwrap();
		assert_eq!(config.surface_id, "interactive-background");
		assert_eq!(config.grid.gap, 35.0);
		assert_eq!(config.grid.interaction_radius, 150.0);
		assert_eq!(config.grid.ease, 0.05);
		assert_eq!(config.grid.color, Color::rgb(255, 215, 0));
		assert_eq!(config.trail.decay, 0.02);
		assert_eq!(config.trail.emit_interval, 2);
		assert_eq!(config.fade.overlay(), Color::rgba(255, 255, 255, 0.2));
	}

	#[test]
	fn partial_override_keeps_other_defaults() {
		let config = BackdropConfig::from_json(
			r##"{ "grid": { "gap": 50, "color": "#00ff00" }, "trail": { "decay": 0.05 } }"##,
		)
		.unwrap();
		assert_eq!(config.grid.gap, 50.0);
		assert_eq!(config.grid.color, Color::rgb(0, 255, 0));
		assert_eq!(config.grid.ease, 0.05);
		assert_eq!(config.trail.decay, 0.05);
		assert_eq!(config.trail.size_max, 6.0);
		assert_eq!(config.surface_id, "interactive-background");
	}

	#[test]
	fn bad_color_is_malformed() {
		let err = BackdropConfig::from_json(r#"{ "grid": { "color": "gold" } }"#).unwrap_err();
		assert!(matches!(err, ConfigError::Malformed(msg) if msg.contains("gold")));
	}

	#[test]
	fn rejects_values_that_break_the_simulation() {
		assert_eq!(
			BackdropConfig::from_json(r#"{ "grid": { "gap": 0 } }"#).unwrap_err(),
			ConfigError::NotPositive {
				field: "grid.gap",
				value: 0.0
			}
		);
		assert_eq!(
			BackdropConfig::from_json(r#"{ "grid": { "ease": 1.5 } }"#).unwrap_err(),
			ConfigError::EaseOutOfRange(1.5)
		);
		assert_eq!(
			BackdropConfig::from_json(r#"{ "trail": { "size_min": 8 } }"#).unwrap_err(),
			ConfigError::InvertedSizeRange { min: 8.0, max: 6.0 }
		);
	}

	#[test]
	fn rejects_sub_pixel_gap() {
		// A fraction-of-a-pixel gap asks for millions of particles per frame.
		for gap in [0.5, 1e-9] {
			let json = format!(r#"{{ "grid": {{ "gap": {gap} }} }}"#);
			assert_eq!(
				BackdropConfig::from_json(&json).unwrap_err(),
				ConfigError::GapTooSmall(gap)
			);
		}
		assert!(BackdropConfig::from_json(r#"{ "grid": { "gap": 1 } }"#).is_ok());
	}

	#[test]
	fn non_json_is_malformed() {
		assert!(matches!(
			BackdropConfig::from_json("not json"),
			Err(ConfigError::Malformed(_))
		));
	}
}
