//! Start-up errors for the browser layer.

use wasm_bindgen::JsValue;

/// Failures that prevent the backdrop from attaching to the page.
#[derive(Debug, thiserror::Error)]
pub enum BackdropError {
	#[error("no global window")]
	NoWindow,

	#[error("window has no document")]
	NoDocument,

	#[error("document has no body")]
	NoBody,

	#[error("no element with id \"{0}\"")]
	MissingSurface(String),

	#[error("element \"{0}\" is not a canvas")]
	NotACanvas(String),

	#[error("canvas has no 2d context")]
	NoContext,

	#[error("javascript error: {0}")]
	Js(String),
}

impl From<JsValue> for BackdropError {
	fn from(value: JsValue) -> Self {
		Self::Js(format!("{:?}", value))
	}
}

/// Convenience Result type with BackdropError
pub type Result<T> = std::result::Result<T, BackdropError>;
