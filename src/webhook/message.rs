//! Outbound message payload

use serde::Serialize;

/// JSON body posted to the webhook: `{"content": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundMessage<'a> {
    pub content: &'a str,
}

impl<'a> OutboundMessage<'a> {
    pub fn new(content: &'a str) -> Self {
        Self { content }
    }
}

/// Content to send for text typed into the overlay, if any
pub fn field_content(text: &str) -> Option<String> {
    non_blank(text)
}

/// Content to send for the clipboard text, if any
pub fn clipboard_content(text: &str) -> Option<String> {
    non_blank(text)
}

fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
