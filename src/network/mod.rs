//! Network layer - the remote expense store and the actor that drives it
//!
//! The Network actor receives store commands, runs each on its own task and
//! sends back responses tagged with the originating request id.

pub mod actor;
pub mod client;
pub mod store;

pub use actor::NetworkActor;
pub use client::ExpenseClient;
pub use store::ExpenseStore;
