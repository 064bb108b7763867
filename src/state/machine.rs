//! Core state machine implementation
//!
//! Owns the overlay visibility and its text buffer and turns user input into
//! effects that the window layer applies.

use tracing::{debug, info};

use crate::webhook::{clipboard_content, field_content};

/// The two possible states of the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Window invisible, waiting for a hotkey or the tray
    #[default]
    Hidden,
    /// Window visible with the text field focused
    Shown,
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Visibility::Hidden => write!(f, "Hidden"),
            Visibility::Shown => write!(f, "Shown"),
        }
    }
}

/// Instructions produced by a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayEffect {
    /// Center, show, bring to front and focus the (already cleared) field
    Present,
    /// Make the window invisible
    Hide,
    /// Hand this content to the webhook
    Dispatch(String),
}

/// The overlay state machine
#[derive(Debug, Default)]
pub struct OverlayMachine {
    visibility: Visibility,
    text: String,
}

impl OverlayMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current visibility
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    #[cfg(test)]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text buffer bound to the input field
    pub fn text_mut(&mut self) -> &mut String {
        &mut self.text
    }

    /// Primary hotkey or tray "Show"
    pub fn toggle(&mut self) -> Vec<OverlayEffect> {
        match self.visibility {
            Visibility::Hidden => {
                self.text.clear();
                self.transition_to(Visibility::Shown);
                vec![OverlayEffect::Present]
            }
            Visibility::Shown => self.hide(),
        }
    }

    /// Escape discards whatever was typed
    pub fn escape(&mut self) -> Vec<OverlayEffect> {
        if self.visibility == Visibility::Hidden {
            return Vec::new();
        }
        self.hide()
    }

    /// Enter: send the trimmed text if there is any, then hide
    pub fn submit(&mut self) -> Vec<OverlayEffect> {
        if self.visibility == Visibility::Hidden {
            return Vec::new();
        }

        let mut effects = Vec::with_capacity(2);
        match field_content(&self.text) {
            Some(content) => {
                debug!(chars = content.chars().count(), "submitting message");
                effects.push(OverlayEffect::Dispatch(content));
            }
            None => debug!("empty submit"),
        }
        self.text.clear();
        effects.extend(self.hide());
        effects
    }

    /// Clipboard hotkey; never changes visibility
    pub fn clipboard(&self, text: Option<&str>) -> Vec<OverlayEffect> {
        match text.and_then(clipboard_content) {
            Some(content) => {
                debug!(chars = content.chars().count(), "sending clipboard");
                vec![OverlayEffect::Dispatch(content)]
            }
            None => {
                debug!("clipboard empty, nothing to send");
                Vec::new()
            }
        }
    }

    fn hide(&mut self) -> Vec<OverlayEffect> {
        self.transition_to(Visibility::Hidden);
        vec![OverlayEffect::Hide]
    }

    fn transition_to(&mut self, new_state: Visibility) {
        info!(from = %self.visibility, to = %new_state, "overlay transition");
        self.visibility = new_state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shown() -> OverlayMachine {
        let mut machine = OverlayMachine::new();
        machine.toggle();
        machine
    }

    fn dispatches(effects: &[OverlayEffect]) -> Vec<&str> {
        effects
            .iter()
            .filter_map(|effect| match effect {
                OverlayEffect::Dispatch(content) => Some(content.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_initial_state() {
        let machine = OverlayMachine::new();
        assert_eq!(machine.visibility(), Visibility::Hidden);
        assert_eq!(machine.text(), "");
    }

    #[test]
    fn test_toggle_shows_with_empty_field() {
        let mut machine = OverlayMachine::new();
        machine.text_mut().push_str("leftover");

        let effects = machine.toggle();
        assert_eq!(effects, vec![OverlayEffect::Present]);
        assert_eq!(machine.visibility(), Visibility::Shown);
        assert_eq!(machine.text(), "");
    }

    #[test]
    fn test_double_toggle_returns_to_hidden() {
        let mut machine = OverlayMachine::new();
        machine.toggle();
        let effects = machine.toggle();
        assert_eq!(effects, vec![OverlayEffect::Hide]);
        assert_eq!(machine.visibility(), Visibility::Hidden);
    }

    #[test]
    fn test_submit_dispatches_once_and_hides() {
        let mut machine = shown();
        machine.text_mut().push_str("  deploy finished  ");

        let effects = machine.submit();
        assert_eq!(
            effects,
            vec![
                OverlayEffect::Dispatch("deploy finished".to_string()),
                OverlayEffect::Hide
            ]
        );
        assert_eq!(machine.visibility(), Visibility::Hidden);
        assert_eq!(machine.text(), "");
    }

    #[test]
    fn test_blank_submit_only_hides() {
        for text in ["", "   ", "\t\n"] {
            let mut machine = shown();
            machine.text_mut().push_str(text);

            let effects = machine.submit();
            assert!(dispatches(&effects).is_empty());
            assert_eq!(effects, vec![OverlayEffect::Hide]);
            assert_eq!(machine.visibility(), Visibility::Hidden);
        }
    }

    #[test]
    fn test_escape_never_dispatches() {
        let mut machine = shown();
        machine.text_mut().push_str("half-written thought");

        let effects = machine.escape();
        assert_eq!(effects, vec![OverlayEffect::Hide]);
        assert_eq!(machine.visibility(), Visibility::Hidden);
    }

    #[test]
    fn test_input_ignored_while_hidden() {
        let mut machine = OverlayMachine::new();
        assert!(machine.escape().is_empty());
        assert!(machine.submit().is_empty());
        assert_eq!(machine.visibility(), Visibility::Hidden);
    }

    #[test]
    fn test_clipboard_keeps_visibility() {
        let mut machine = OverlayMachine::new();
        assert_eq!(
            machine.clipboard(Some("  copied  ")),
            vec![OverlayEffect::Dispatch("copied".to_string())]
        );
        assert_eq!(machine.visibility(), Visibility::Hidden);

        machine.toggle();
        machine.text_mut().push_str("draft");
        assert_eq!(machine.clipboard(Some("x")).len(), 1);
        assert_eq!(machine.visibility(), Visibility::Shown);
        assert_eq!(machine.text(), "draft");
    }

    #[test]
    fn test_blank_clipboard_does_nothing() {
        let machine = OverlayMachine::new();
        assert!(machine.clipboard(Some(" \n ")).is_empty());
        assert!(machine.clipboard(None).is_empty());
    }
}
