//! Interactive particle backdrop.
//!
//! Draws a document-sized background on an HTML canvas with:
//! - A fixed lattice of particles pushed away by the pointer, joined by fading links
//! - A short-lived particle trail following the pointer
//! - A translucent per-frame fade instead of a hard clear, for motion blur
//!
//! The simulation ([`Scene`]) is plain data advanced one frame at a time and
//! draws through the [`Painter`] trait; [`Backdrop`] binds it to the page.
//!
//! # Example
//!
//! ```ignore
//! use ambient_backdrop::components::backdrop::{Backdrop, BackdropConfig};
//!
//! let backdrop = Backdrop::attach(&BackdropConfig::default())?;
//! // later, if the canvas is removed from the page:
//! backdrop.stop();
//! ```

mod animation;
pub mod config;
mod grid;
mod mount;
mod render;
mod scene;
mod surface;
pub mod theme;
mod trail;

pub use animation::{AnimationLoop, LoopState};
pub use config::{BackdropConfig, ConfigError, MIN_GRID_GAP};
pub use grid::{GridField, GridParticle, MAX_GRID_PARTICLES, repulsion_force};
pub use mount::{Backdrop, SurfaceSync};
pub use render::Painter;
pub use scene::Scene;
pub use surface::{DocumentMetrics, Pointer, Surface};
pub use theme::Color;
pub use trail::{TrailEmitter, TrailParticle};
