//! Network messages - communication between App and Network layers

use crate::error::ApiError;
use crate::models::{Expense, ExpenseId, NewExpense, Period};

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkCommand {
    /// List every expense
    FetchExpenses { id: u64 },
    /// Create an expense from validated form input
    CreateExpense { id: u64, input: NewExpense },
    /// Delete an expense by its server identifier
    DeleteExpense { id: u64, expense_id: ExpenseId },
    /// Fetch the aggregate for a year/month
    FetchMonthlyTotal { id: u64, period: Period },

    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkResponse {
    ExpensesLoaded {
        id: u64,
        expenses: Vec<Expense>,
    },
    ExpenseCreated {
        id: u64,
        expense: Expense,
    },
    ExpenseDeleted {
        id: u64,
        expense_id: ExpenseId,
    },
    MonthlyTotalLoaded {
        id: u64,
        period: Period,
        total: f64,
    },
    /// Any of the above failed
    Failed {
        id: u64,
        error: ApiError,
    },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::ExpensesLoaded { id, .. } => *id,
            NetworkResponse::ExpenseCreated { id, .. } => *id,
            NetworkResponse::ExpenseDeleted { id, .. } => *id,
            NetworkResponse::MonthlyTotalLoaded { id, .. } => *id,
            NetworkResponse::Failed { id, .. } => *id,
        }
    }
}
