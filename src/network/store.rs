//! Remote store seam - the four operations the app needs from the server

use std::future::Future;

use crate::error::ApiError;
use crate::models::{Expense, ExpenseId, NewExpense, Period};

/// An authoritative expense store.
///
/// Each call is a single request/response cycle with no retries. Futures are
/// `Send` so the network actor can run them on spawned tasks.
pub trait ExpenseStore: Send + Sync + 'static {
    /// All expenses, in server order
    fn list(&self) -> impl Future<Output = Result<Vec<Expense>, ApiError>> + Send;

    /// Create an expense and return the stored record with its identifier
    fn create(&self, input: &NewExpense) -> impl Future<Output = Result<Expense, ApiError>> + Send;

    /// Delete an expense by identifier
    fn remove(&self, id: &ExpenseId) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Sum of expense amounts for a year/month
    fn monthly_total(&self, period: Period) -> impl Future<Output = Result<f64, ApiError>> + Send;
}
