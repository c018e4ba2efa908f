//! Centralized user-facing messages.
//!
//! Every line the application prints goes through the [`Message`] enum so the
//! wording lives in one place (`display.rs`) and the routing between console
//! output and `tracing` lives in another (`macros.rs`).

pub mod display;
pub mod macros;
pub mod types;

pub use types::Message;
