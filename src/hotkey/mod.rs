//! Hotkey module for global keyboard bindings
//!
//! Uses the `global-hotkey` crate to capture the two configured key
//! combinations system-wide and turn them into [`AppEvent`]s.
//!
//! [`AppEvent`]: crate::events::AppEvent

mod keys;
mod listener;

pub use listener::HotkeyListener;
