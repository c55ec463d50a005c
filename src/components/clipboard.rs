//! Copy-to-clipboard buttons.
//!
//! A button with `data-copy-target="<selector>"` copies the rendered text of the
//! element that selector names. The button briefly shows the result, then
//! restores its original markup. Failures are logged and shown on the button;
//! they never reach the backdrop.

use std::cell::Cell;
use std::fmt::Debug;
use std::rc::Rc;
use std::time::Duration;

use leptos::prelude::set_timeout;
use log::{debug, error, info};
use js_sys::{Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{Document, Element, HtmlElement, Window};

use super::modal::{on_click, select_all};
use crate::error::Result;

const BUTTON_SELECTOR: &str = "[data-copy-target]";
const TARGET_ATTRIBUTE: &str = "data-copy-target";
const CLIPBOARD_UNAVAILABLE: &str = "navigator.clipboard unavailable (insecure context?)";

/// How long feedback stays on the button.
pub const REVERT_AFTER: Duration = Duration::from_secs(2);

/// Result of a copy attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CopyOutcome {
	Copied,
	Failed,
}

/// What a button shows until it reverts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Feedback {
	pub label: &'static str,
	/// Extra class applied while the feedback is shown.
	pub class: Option<&'static str>,
}

impl CopyOutcome {
	/// Outcome of a finished write. Failures are logged.
	pub fn from_result<E: Debug>(result: std::result::Result<(), E>) -> Self {
		match result {
			Ok(()) => CopyOutcome::Copied,
			Err(e) => {
				error!("ambient-backdrop: failed to copy text: {:?}", e);
				CopyOutcome::Failed
			}
		}
	}

	pub fn feedback(self) -> Feedback {
		match self {
			CopyOutcome::Copied => Feedback {
				label: "Copied!",
				class: Some("copied"),
			},
			CopyOutcome::Failed => Feedback {
				label: "Failed!",
				class: None,
			},
		}
	}
}

fn show_feedback(button: HtmlElement, outcome: CopyOutcome, original_html: String, busy: Rc<Cell<bool>>) {
	let feedback = outcome.feedback();
	button.set_inner_text(feedback.label);
	if let Some(class) = feedback.class {
		let _ = button.class_list().add_1(class);
	}
	set_timeout(
		move || {
			button.set_inner_html(&original_html);
			if let Some(class) = feedback.class {
				let _ = button.class_list().remove_1(class);
			}
			busy.set(false);
		},
		REVERT_AFTER,
	);
}

/// Start writing `text` to the clipboard.
///
/// Outside a secure context `navigator.clipboard` is undefined and calling
/// through it would throw, so that case is an error here.
fn write_clipboard(window: &Window, text: &str) -> std::result::Result<Promise, String> {
	let navigator = window.navigator();
	let available = Reflect::get(&navigator, &JsValue::from_str("clipboard"))
		.map(|clipboard| !clipboard.is_undefined() && !clipboard.is_null())
		.unwrap_or(false);
	if !available {
		return Err(CLIPBOARD_UNAVAILABLE.to_string());
	}
	Ok(navigator.clipboard().write_text(text))
}

fn copy_target(document: &Document, button: &HtmlElement, busy: &Rc<Cell<bool>>) {
	if busy.get() {
		return;
	}
	let Some(selector) = button.get_attribute(TARGET_ATTRIBUTE) else {
		return;
	};
	let Some(target) = document
		.query_selector(&selector)
		.ok()
		.flatten()
		.and_then(|el| el.dyn_into::<HtmlElement>().ok())
	else {
		debug!("ambient-backdrop: copy target {} not found", selector);
		return;
	};
	let Some(window) = web_sys::window() else {
		return;
	};

	let text = target.inner_text();
	let original_html = button.inner_html();
	let write = write_clipboard(&window, &text);
	busy.set(true);

	let (button, busy) = (button.clone(), busy.clone());
	spawn_local(async move {
		let result = match write {
			Ok(promise) => JsFuture::from(promise)
				.await
				.map(drop)
				.map_err(|e| format!("{:?}", e)),
			Err(reason) => Err(reason),
		};
		show_feedback(button, CopyOutcome::from_result(result), original_html, busy);
	});
}

/// Bind every copy button on the page. Returns how many were bound.
pub fn install_copy_buttons(document: &Document) -> Result<usize> {
	let buttons: Vec<HtmlElement> = select_all(document, BUTTON_SELECTOR)?
		.into_iter()
		.filter_map(|el: Element| el.dyn_into::<HtmlElement>().ok())
		.collect();

	for button in &buttons {
		let document = document.clone();
		let target = button.clone();
		let busy = Rc::new(Cell::new(false));
		on_click(button, move |_| copy_target(&document, &target, &busy));
	}

	info!("ambient-backdrop: {} copy buttons", buttons.len());
	Ok(buttons.len())
}
