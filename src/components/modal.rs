//! Modal dialogs that keep the backdrop in step with the page layout.
//!
//! Opening or closing a dialog toggles page-level classes (`modal-open` on the
//! body hides the scrollbar), which changes the document size. Every transition
//! therefore ends by re-syncing the backdrop surface.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::ev;
use leptos::prelude::window_event_listener;
use log::{debug, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, HtmlElement, KeyboardEvent};

use crate::components::backdrop::SurfaceSync;
use crate::error::{BackdropError, Result};

const ACTIVE_CLASS: &str = "active";
const PAGE_LOCK_CLASS: &str = "modal-open";
const TRIGGER_SELECTOR: &str = "[data-modal-target]";
const TRIGGER_ATTRIBUTE: &str = "data-modal-target";
const OVERLAY_ID: &str = "modal-overlay";
const CLOSE_SELECTOR: &str = ".close-button";

/// Page operations a modal transition performs.
pub trait ModalDom {
	/// Whether `selector` names a dialog on the page.
	fn has_dialog(&self, selector: &str) -> bool;
	fn set_dialog_active(&self, selector: &str, active: bool);
	fn set_overlay_active(&self, active: bool);
	/// Lock or release page scrolling while a dialog is open.
	fn set_page_locked(&self, locked: bool);
}

/// Tracks the open dialog and applies transitions.
///
/// `on_layout_change` runs after every transition that changed the page, once
/// the class changes are in place.
pub struct ModalController<D> {
	dom: D,
	open: Option<String>,
	on_layout_change: Box<dyn Fn()>,
}

impl<D: ModalDom> ModalController<D> {
	pub fn new(dom: D, on_layout_change: impl Fn() + 'static) -> Self {
		Self {
			dom,
			open: None,
			on_layout_change: Box::new(on_layout_change),
		}
	}

	/// Selector of the currently open dialog.
	pub fn active(&self) -> Option<&str> {
		self.open.as_deref()
	}

	/// Open the dialog named by `selector`, closing any other open dialog first.
	/// Returns whether the page changed.
	pub fn open(&mut self, selector: &str) -> bool {
		if self.open.as_deref() == Some(selector) {
			return false;
		}
		if !self.dom.has_dialog(selector) {
			debug!("ambient-backdrop: no dialog matches {}", selector);
			return false;
		}
		if let Some(previous) = self.open.take() {
			self.dom.set_dialog_active(&previous, false);
		}
		self.dom.set_dialog_active(selector, true);
		self.dom.set_overlay_active(true);
		self.dom.set_page_locked(true);
		self.open = Some(selector.to_string());
		(self.on_layout_change)();
		true
	}

	/// Close the open dialog. A no-op when nothing is open.
	pub fn close(&mut self) -> bool {
		let Some(previous) = self.open.take() else {
			return false;
		};
		self.dom.set_dialog_active(&previous, false);
		self.dom.set_overlay_active(false);
		self.dom.set_page_locked(false);
		(self.on_layout_change)();
		true
	}
}

/// [`ModalDom`] over the live document.
pub struct DocumentModalDom {
	document: Document,
	body: HtmlElement,
	overlay: Option<Element>,
}

impl DocumentModalDom {
	pub fn new(document: Document) -> Result<Self> {
		let body = document.body().ok_or(BackdropError::NoBody)?;
		let overlay = document.get_element_by_id(OVERLAY_ID);
		if overlay.is_none() {
			warn!("ambient-backdrop: no #{} element, dialogs open without overlay", OVERLAY_ID);
		}
		Ok(Self {
			document,
			body,
			overlay,
		})
	}

	fn dialog(&self, selector: &str) -> Option<Element> {
		self.document.query_selector(selector).ok().flatten()
	}
}

fn set_class(element: &Element, class: &str, on: bool) {
	let _ = element.class_list().toggle_with_force(class, on);
}

impl ModalDom for DocumentModalDom {
	fn has_dialog(&self, selector: &str) -> bool {
		self.dialog(selector).is_some()
	}

	fn set_dialog_active(&self, selector: &str, active: bool) {
		if let Some(dialog) = self.dialog(selector) {
			set_class(&dialog, ACTIVE_CLASS, active);
		}
	}

	fn set_overlay_active(&self, active: bool) {
		if let Some(overlay) = &self.overlay {
			set_class(overlay, ACTIVE_CLASS, active);
		}
	}

	fn set_page_locked(&self, locked: bool) {
		set_class(&self.body, PAGE_LOCK_CLASS, locked);
	}
}

/// Elements matching `selector`, skipping non-element nodes.
pub(crate) fn select_all(document: &Document, selector: &str) -> Result<Vec<Element>> {
	let nodes = document.query_selector_all(selector)?;
	Ok((0..nodes.length())
		.filter_map(|i| nodes.item(i))
		.filter_map(|node| node.dyn_into::<Element>().ok())
		.collect())
}

/// Attach `handler` to `element`'s click events for the rest of the page session.
pub(crate) fn on_click(element: &Element, handler: impl FnMut(Event) + 'static) {
	let closure = Closure::<dyn FnMut(Event)>::new(handler);
	match element.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref()) {
		Ok(()) => closure.forget(),
		Err(e) => warn!("ambient-backdrop: could not bind click handler: {:?}", e),
	}
}

/// Modal controller shared by every trigger and close handler.
pub type SharedController = Rc<RefCell<ModalController<DocumentModalDom>>>;

/// Wire triggers, overlay, close buttons and Escape to a shared controller.
pub fn install_modals(document: &Document, surface: SurfaceSync) -> Result<SharedController> {
	let dom = DocumentModalDom::new(document.clone())?;
	let overlay = dom.overlay.clone();
	let controller: SharedController =
		Rc::new(RefCell::new(ModalController::new(dom, move || surface.sync())));

	let triggers = select_all(document, TRIGGER_SELECTOR)?;
	for trigger in &triggers {
		let Some(target) = trigger.get_attribute(TRIGGER_ATTRIBUTE) else {
			continue;
		};
		let controller = controller.clone();
		on_click(trigger, move |_| {
			controller.borrow_mut().open(&target);
		});
	}

	let mut closers = select_all(document, CLOSE_SELECTOR)?;
	closers.extend(overlay);
	for closer in &closers {
		let controller = controller.clone();
		on_click(closer, move |_| {
			controller.borrow_mut().close();
		});
	}

	let controller_esc = controller.clone();
	// Lives as long as the page; the handle is not needed.
	let _ = window_event_listener(ev::keydown, move |e: KeyboardEvent| {
		if e.key() == "Escape" {
			controller_esc.borrow_mut().close();
		}
	});

	info!(
		"ambient-backdrop: {} modal triggers, {} close controls",
		triggers.len(),
		closers.len()
	);
	Ok(controller)
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;

	use super::*;

	#[derive(Default)]
	struct FakeDom {
		dialogs: Vec<&'static str>,
		active: RefCell<Vec<String>>,
		overlay: Cell<bool>,
		locked: Cell<bool>,
	}

	impl ModalDom for Rc<FakeDom> {
		fn has_dialog(&self, selector: &str) -> bool {
			self.dialogs.iter().any(|d| *d == selector)
		}

		fn set_dialog_active(&self, selector: &str, active: bool) {
			let mut list = self.active.borrow_mut();
			list.retain(|s| s != selector);
			if active {
				list.push(selector.to_string());
			}
		}

		fn set_overlay_active(&self, active: bool) {
			self.overlay.set(active);
		}

		fn set_page_locked(&self, locked: bool) {
			self.locked.set(locked);
		}
	}

	fn controller() -> (Rc<FakeDom>, Rc<Cell<u32>>, ModalController<Rc<FakeDom>>) {
		let dom = Rc::new(FakeDom {
			dialogs: vec!["#about", "#contact"],
			..FakeDom::default()
		});
		let syncs = Rc::new(Cell::new(0));
		let counter = syncs.clone();
		let controller = ModalController::new(dom.clone(), move || counter.set(counter.get() + 1));
		(dom, syncs, controller)
	}

	#[test]
	fn open_then_close_toggles_classes_and_resyncs() {
		let (dom, syncs, mut modal) = controller();

		assert!(modal.open("#about"));
		assert_eq!(modal.active(), Some("#about"));
		assert_eq!(*dom.active.borrow(), vec!["#about".to_string()]);
		assert!(dom.overlay.get() && dom.locked.get());
		assert_eq!(syncs.get(), 1);

		assert!(modal.close());
		assert!(dom.active.borrow().is_empty());
		assert!(!dom.overlay.get() && !dom.locked.get());
		assert_eq!(syncs.get(), 2);
	}

	#[test]
	fn layout_change_sees_classes_already_applied() {
		let dom = Rc::new(FakeDom {
			dialogs: vec!["#about"],
			..FakeDom::default()
		});
		let seen = Rc::new(Cell::new(false));
		let (dom_cb, seen_cb) = (dom.clone(), seen.clone());
		let mut modal = ModalController::new(dom, move || seen_cb.set(dom_cb.locked.get()));

		modal.open("#about");
		assert!(seen.get());
	}

	#[test]
	fn close_without_open_dialog_is_a_no_op() {
		let (_, syncs, mut modal) = controller();
		assert!(!modal.close());
		assert_eq!(syncs.get(), 0);
	}

	#[test]
	fn unknown_dialog_is_ignored() {
		let (dom, syncs, mut modal) = controller();
		assert!(!modal.open("#missing"));
		assert_eq!(modal.active(), None);
		assert!(!dom.overlay.get());
		assert_eq!(syncs.get(), 0);
	}

	#[test]
	fn switching_dialogs_closes_the_previous_one() {
		let (dom, syncs, mut modal) = controller();
		modal.open("#about");
		assert!(modal.open("#contact"));

		assert_eq!(*dom.active.borrow(), vec!["#contact".to_string()]);
		assert!(dom.locked.get());
		assert_eq!(syncs.get(), 2);

		assert!(!modal.open("#contact"));
		assert_eq!(syncs.get(), 2);
	}
}
