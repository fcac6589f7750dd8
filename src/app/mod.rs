//! App layer - view state and the transitions that keep it in sync with the server
//!
//! The App actor receives UI events and network responses, applies them to
//! `AppState`, forwards the resulting network commands and publishes a fresh
//! render state after each message.

pub mod state;
pub mod actor;
pub mod commands;

pub use state::{AppState, ExpenseForm};
pub use actor::AppActor;
