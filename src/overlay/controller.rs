//! Platform-agnostic overlay logic
//!
//! Runs the state machine, performs dispatches and leaves only window changes
//! for the egui layer to apply.

use std::sync::Arc;

use crate::clipboard::ClipboardSource;
use crate::state::{OverlayEffect, OverlayMachine, Visibility};
use crate::webhook::MessageSink;

/// Inputs reaching the overlay on the UI thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayInput {
    Toggle,
    Escape,
    Submit,
    SendClipboard,
}

/// Window changes left for the window layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowChange {
    Present,
    Hide,
}

pub struct OverlayController {
    machine: OverlayMachine,
    sink: Arc<dyn MessageSink>,
    clipboard: Box<dyn ClipboardSource>,
}

impl OverlayController {
    pub fn new(sink: Arc<dyn MessageSink>, clipboard: Box<dyn ClipboardSource>) -> Self {
        Self {
            machine: OverlayMachine::new(),
            sink,
            clipboard,
        }
    }

    pub fn visibility(&self) -> Visibility {
        self.machine.visibility()
    }

    pub fn text_mut(&mut self) -> &mut String {
        self.machine.text_mut()
    }

    /// Apply one input; dispatches happen here, window changes are returned
    pub fn handle(&mut self, input: OverlayInput) -> Option<WindowChange> {
        let effects = match input {
            OverlayInput::Toggle => self.machine.toggle(),
            OverlayInput::Escape => self.machine.escape(),
            OverlayInput::Submit => self.machine.submit(),
            OverlayInput::SendClipboard => {
                let text = self.clipboard.read_text();
                self.machine.clipboard(text.as_deref())
            }
        };

        let mut change = None;
        for effect in effects {
            match effect {
                OverlayEffect::Dispatch(content) => self.sink.dispatch(content),
                OverlayEffect::Present => change = Some(WindowChange::Present),
                OverlayEffect::Hide => change = Some(WindowChange::Hide),
            }
        }
        change
    }
}
