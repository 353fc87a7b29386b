//! Live reverse-bidding updates over server-sent events.
//!
//! - `sse`: incremental `text/event-stream` decoding
//! - `events`: typed events and the event -> effect table
//! - `state`: connection states and reconnect backoff
//! - `client`: the async driver, transports and subscriber handle
//! - `store`: local session state the effects are applied to

mod client;
mod events;
mod sse;
mod state;
mod store;

pub use client::{HttpTransport, LiveClient};
pub use events::LiveEffect;
pub use state::{ConnectionState, ReconnectPolicy};
pub use store::LiveSessionStore;
