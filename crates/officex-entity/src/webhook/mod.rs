//! Webhook subscriptions.

pub mod event;
pub mod model;

pub use event::WebhookEventLabel;
pub use model::{Webhook, WebhookAltIndexID, WebhookFE};
