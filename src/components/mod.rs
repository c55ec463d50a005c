//! Page components: the particle backdrop and the UI glue that coordinates with it.

pub mod backdrop;
pub mod clipboard;
pub mod modal;
