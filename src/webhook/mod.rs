//! Webhook delivery
//!
//! Messages are posted once, in the background, and forgotten. There is no
//! retry and no error ever reaches the caller.

mod client;
mod message;

pub use client::{MessageSink, WebhookClient};
pub use message::{clipboard_content, field_content};
