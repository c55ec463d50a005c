//! ambient-backdrop: mouse-reactive particle background for documents.
//!
//! This crate provides a WASM-based canvas backdrop that covers the full
//! document height, plus the modal and copy-button glue that keeps it in sync
//! with the page.

use log::{Level, debug, error, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{HtmlScriptElement, Window};

pub mod components;
pub mod error;

pub use components::backdrop::{Backdrop, BackdropConfig};
pub use error::BackdropError;

/// Id of the optional `<script type="application/json">` config block.
pub const CONFIG_ELEMENT_ID: &str = "backdrop-config";

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("ambient-backdrop: logging initialized");
}

/// Load the backdrop config from a script element with id="backdrop-config".
/// A missing block gives the defaults; an invalid one is reported and ignored.
pub fn load_config() -> BackdropConfig {
	let Some(json_text) = read_config_text() else {
		return BackdropConfig::default();
	};

	match BackdropConfig::from_json(&json_text) {
		Ok(config) => {
			info!("ambient-backdrop: loaded config for #{}", config.surface_id);
			config
		}
		Err(e) => {
			warn!("ambient-backdrop: ignoring config: {}", e);
			BackdropConfig::default()
		}
	}
}

fn read_config_text() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(CONFIG_ELEMENT_ID)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Everything started by [`start`].
pub struct BackdropHandle {
	pub backdrop: Backdrop,
}

impl BackdropHandle {
	/// Stop the animation loop and remove the backdrop's window listeners.
	/// Dialogs and copy buttons keep working.
	pub fn stop(self) {
		self.backdrop.stop();
	}
}

/// Attach the backdrop, then the modal and clipboard glue. Call once per page,
/// after the document has been parsed (see [`run`]).
///
/// Only a missing surface or document stops start-up; glue wiring problems are
/// logged and skipped.
pub fn start() -> Result<BackdropHandle, BackdropError> {
	let config = load_config();
	let backdrop = Backdrop::attach(&config)?;
	let document = web_sys::window()
		.and_then(|w| w.document())
		.ok_or(BackdropError::NoDocument)?;

	if let Err(e) = components::modal::install_modals(&document, backdrop.surface_sync()) {
		warn!("ambient-backdrop: modals disabled: {}", e);
	}
	if let Err(e) = components::clipboard::install_copy_buttons(&document) {
		warn!("ambient-backdrop: copy buttons disabled: {}", e);
	}

	Ok(BackdropHandle { backdrop })
}

/// Whether a `document.readyState` value means the body is still being parsed.
fn document_is_loading(ready_state: &str) -> bool {
	ready_state == "loading"
}

/// Run `init` once the document has been parsed: right away, or on
/// `DOMContentLoaded` while the document is still loading.
pub fn on_document_ready(init: impl FnOnce() + 'static) -> Result<(), BackdropError> {
	let document = web_sys::window()
		.and_then(|w| w.document())
		.ok_or(BackdropError::NoDocument)?;
	if !document_is_loading(&document.ready_state()) {
		init();
		return Ok(());
	}

	debug!("ambient-backdrop: document loading, deferring start to DOMContentLoaded");
	let callback = Closure::once_into_js(init);
	document.add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())?;
	Ok(())
}

/// Start the backdrop as soon as the page allows, logging any failure.
///
/// The handle is dropped: the backdrop runs for the page lifetime.
pub fn run() {
	let scheduled = on_document_ready(|| {
		if let Err(e) = start() {
			error!("ambient-backdrop: failed to start: {}", e);
		}
	});
	if let Err(e) = scheduled {
		error!("ambient-backdrop: could not schedule start: {}", e);
	}
}
