//! Messages exchanged between the UI, App, and Network actors.
//!
//! Key presses become `UiEvent`s, the app answers with `RenderState`
//! snapshots, and store traffic flows as `NetworkCommand`/`NetworkResponse`.

pub mod ui_events;
pub mod network;
pub mod render;

pub use ui_events::UiEvent;
pub use network::{NetworkCommand, NetworkResponse};
pub use render::RenderState;
