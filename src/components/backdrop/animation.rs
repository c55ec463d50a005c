//! Frame loop for the backdrop.
//!
//! [`AnimationLoop`] is the start/stop state machine and runs single frames, so
//! tests can step it a bounded number of times. [`FrameDriver`] hooks it to
//! `requestAnimationFrame`: the next frame is requested only after the current
//! one has finished, and only while the loop is running.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

use super::render::Painter;
use super::scene::Scene;
use crate::error::{BackdropError, Result};

/// Lifecycle of the frame loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoopState {
	#[default]
	Idle,
	Running,
	Stopped,
}

/// Start/stop control plus frame bookkeeping.
#[derive(Clone, Debug, Default)]
pub struct AnimationLoop {
	state: LoopState,
	frames: u64,
}

impl AnimationLoop {
	pub fn state(&self) -> LoopState {
		self.state
	}

	pub fn frames(&self) -> u64 {
		self.frames
	}

	/// Idle -> Running. A stopped loop stays stopped.
	pub fn start(&mut self) -> bool {
		if self.state == LoopState::Idle {
			self.state = LoopState::Running;
			true
		} else {
			false
		}
	}

	pub fn stop(&mut self) {
		self.state = LoopState::Stopped;
	}

	/// Run one frame if running. Returns whether another frame should be scheduled.
	pub fn frame(&mut self, scene: &mut Scene, painter: &mut impl Painter) -> bool {
		if self.state != LoopState::Running {
			return false;
		}
		scene.tick(painter);
		self.frames += 1;
		true
	}
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Drives an [`AnimationLoop`] from the browser's repaint callback.
pub struct FrameDriver {
	control: Rc<RefCell<AnimationLoop>>,
	callback: FrameCallback,
	pending: Rc<Cell<Option<i32>>>,
}

impl FrameDriver {
	/// Start animating `scene` into `ctx`, one tick per animation frame.
	pub fn start(scene: Rc<RefCell<Scene>>, mut ctx: CanvasRenderingContext2d) -> Result<Self> {
		let window = web_sys::window().ok_or(BackdropError::NoWindow)?;
		let control = Rc::new(RefCell::new(AnimationLoop::default()));
		let callback: FrameCallback = Rc::new(RefCell::new(None));
		let pending = Rc::new(Cell::new(None));

		let (control_anim, callback_inner, pending_anim) =
			(control.clone(), callback.clone(), pending.clone());
		*callback.borrow_mut() = Some(Closure::new(move || {
			pending_anim.set(None);
			let again = control_anim
				.borrow_mut()
				.frame(&mut scene.borrow_mut(), &mut ctx);
			if !again {
				return;
			}
			if let (Some(cb), Some(win)) = (&*callback_inner.borrow(), web_sys::window()) {
				match win.request_animation_frame(cb.as_ref().unchecked_ref()) {
					Ok(id) => pending_anim.set(Some(id)),
					Err(e) => warn!("ambient-backdrop: frame request failed: {:?}", e),
				}
			}
		}));

		control.borrow_mut().start();
		if let Some(ref cb) = *callback.borrow() {
			pending.set(Some(
				window.request_animation_frame(cb.as_ref().unchecked_ref())?,
			));
		}
		info!("ambient-backdrop: animation started");

		Ok(Self {
			control,
			callback,
			pending,
		})
	}

	pub fn state(&self) -> LoopState {
		self.control.borrow().state()
	}

	/// Stop the loop, cancel any pending frame and release the callback.
	pub fn stop(&self) {
		self.control.borrow_mut().stop();
		if let (Some(id), Some(win)) = (self.pending.take(), web_sys::window()) {
			let _ = win.cancel_animation_frame(id);
		}
		self.callback.borrow_mut().take();
		info!(
			"ambient-backdrop: animation stopped after {} frames",
			self.control.borrow().frames()
		);
	}
}
