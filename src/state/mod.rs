//! State machine module for the overlay
//!
//! Two states:
//! - Hidden: default, waiting for the toggle hotkey or tray
//! - Shown: text field visible and focused

mod machine;

pub use machine::{OverlayEffect, OverlayMachine, Visibility};
