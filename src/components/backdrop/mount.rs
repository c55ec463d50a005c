//! Attaches the backdrop to the host page.
//!
//! Locates the canvas by id, sizes it to the document, and wires window
//! `resize` and `mousemove` to the shared scene. The frame loop and the window
//! listeners are owned by [`Backdrop`] and released by [`Backdrop::stop`].

use std::cell::RefCell;
use std::rc::Rc;

use leptos::ev;
use leptos::prelude::{WindowListenerHandle, window_event_listener};
use log::{info, warn};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::animation::{FrameDriver, LoopState};
use super::config::BackdropConfig;
use super::scene::Scene;
use super::surface::DocumentMetrics;
use crate::error::{BackdropError, Result};

/// Snapshot the layout viewport width and the body's full scroll height.
///
/// Width comes from `documentElement.clientWidth`, so hiding the scrollbar
/// (as an open dialog does) widens the surface.
pub fn read_document_metrics() -> Option<DocumentMetrics> {
	let window = web_sys::window()?;
	let document = window.document()?;
	let body = document.body()?;
	let client_width = document.document_element().map_or(0, |root| root.client_width());
	Some(DocumentMetrics {
		viewport_width: DocumentMetrics::layout_width(
			client_width,
			window.inner_width().ok()?.as_f64()?,
		),
		viewport_height: window.inner_height().ok()?.as_f64()?,
		scroll_height: body.scroll_height() as f64,
	})
}

/// Keeps the canvas element and the scene in step with the document size.
///
/// Cheap to clone; the resize listener and the modal system each hold one.
#[derive(Clone)]
pub struct SurfaceSync {
	scene: Rc<RefCell<Scene>>,
	canvas: HtmlCanvasElement,
}

impl SurfaceSync {
	/// Re-measure the document, resize the canvas and relayout the lattice.
	pub fn sync(&self) {
		match read_document_metrics() {
			Some(metrics) => self.apply(metrics),
			None => warn!("ambient-backdrop: could not measure document, keeping old size"),
		}
	}

	fn apply(&self, metrics: DocumentMetrics) {
		let mut scene = self.scene.borrow_mut();
		scene.resize(metrics);
		self.canvas.set_width(scene.surface.width() as u32);
		self.canvas.set_height(scene.surface.height() as u32);
	}
}

/// A running backdrop bound to the page.
///
/// Dropping it leaves the animation and listeners running for the rest of the
/// page session; call [`Backdrop::stop`] to tear everything down.
pub struct Backdrop {
	sync: SurfaceSync,
	driver: FrameDriver,
	listeners: Vec<WindowListenerHandle>,
}

impl Backdrop {
	/// Find the surface canvas, size it, and start animating.
	pub fn attach(config: &BackdropConfig) -> Result<Self> {
		let window = web_sys::window().ok_or(BackdropError::NoWindow)?;
		let document = window.document().ok_or(BackdropError::NoDocument)?;
		let canvas: HtmlCanvasElement = document
			.get_element_by_id(&config.surface_id)
			.ok_or_else(|| BackdropError::MissingSurface(config.surface_id.clone()))?
			.dyn_into()
			.map_err(|_| BackdropError::NotACanvas(config.surface_id.clone()))?;
		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")?
			.ok_or(BackdropError::NoContext)?
			.dyn_into()
			.map_err(|_| BackdropError::NoContext)?;

		let metrics = read_document_metrics().ok_or(BackdropError::NoBody)?;
		let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
		let scene = Rc::new(RefCell::new(Scene::new(config, metrics, seed)));
		let sync = SurfaceSync {
			scene: scene.clone(),
			canvas,
		};
		sync.apply(metrics);

		let sync_resize = sync.clone();
		let on_resize = window_event_listener(ev::resize, move |_| sync_resize.sync());

		let scene_mm = scene.clone();
		let on_mousemove = window_event_listener(ev::mousemove, move |e: MouseEvent| {
			let Some(win) = web_sys::window() else {
				return;
			};
			scene_mm.borrow_mut().track_pointer(
				e.client_x() as f64,
				e.client_y() as f64,
				win.scroll_x().unwrap_or(0.0),
				win.scroll_y().unwrap_or(0.0),
			);
		});

		let driver = FrameDriver::start(scene, ctx)?;
		info!(
			"ambient-backdrop: attached to #{} ({}x{})",
			config.surface_id, metrics.viewport_width, metrics.scroll_height
		);

		Ok(Self {
			sync,
			driver,
			listeners: vec![on_resize, on_mousemove],
		})
	}

	/// Handle for collaborators that change the document layout.
	pub fn surface_sync(&self) -> SurfaceSync {
		self.sync.clone()
	}

	pub fn state(&self) -> LoopState {
		self.driver.state()
	}

	/// Stop animating and detach the window listeners.
	pub fn stop(self) {
		self.driver.stop();
		for listener in self.listeners {
			listener.remove();
		}
	}
}
