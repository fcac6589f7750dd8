//! # Expense TUI
//!
//! A terminal client for a REST expense API.
//!
//! ## Features
//! - Add expenses (title, category, amount, optional date and notes)
//! - Expense table with confirmed deletes
//! - Monthly total for a selectable year/month
//! - Dark and light themes
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (view state and transitions)
//! - Network Layer (Tokio runtime, `ExpenseStore` over reqwest)

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod ui;
pub mod messages;
pub mod app;
pub mod network;

// Re-export commonly used types
pub use error::ApiError;
pub use models::{Expense, ExpenseId, NewExpense, Period, Theme};
pub use messages::{UiEvent, NetworkCommand, NetworkResponse, RenderState};
pub use app::{AppState, AppActor};
pub use network::{ExpenseClient, ExpenseStore, NetworkActor};
