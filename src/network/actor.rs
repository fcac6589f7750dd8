//! Network actor - runs store requests in the Tokio async runtime

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::store::ExpenseStore;

/// Network actor that executes store commands concurrently.
///
/// Requests are never cancelled; the app layer discards responses it no
/// longer waits for.
pub struct NetworkActor<S: ExpenseStore> {
    store: Arc<S>,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl<S: ExpenseStore> NetworkActor<S> {
    pub fn new(store: S, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            store: Arc::new(store),
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::Shutdown) | None => {
                            self.active_requests.abort_all();
                            break;
                        }
                        Some(cmd) => self.spawn(cmd),
                    }
                }

                // Clean up completed tasks
                Some(_result) = self.active_requests.join_next() => {}
            }
        }
    }

    fn spawn(&mut self, cmd: NetworkCommand) {
        let store = Arc::clone(&self.store);
        let response_tx = self.response_tx.clone();

        self.active_requests.spawn(async move {
            if let Some(response) = execute(store.as_ref(), cmd).await {
                let _ = response_tx.send(response);
            }
        });
    }
}

/// Execute one command against the store and wrap the outcome
pub async fn execute<S: ExpenseStore>(store: &S, cmd: NetworkCommand) -> Option<NetworkResponse> {
    let response = match cmd {
        NetworkCommand::FetchExpenses { id } => {
            tracing::info!(id, "Fetching expenses");
            match store.list().await {
                Ok(expenses) => NetworkResponse::ExpensesLoaded { id, expenses },
                Err(error) => NetworkResponse::Failed { id, error },
            }
        }
        NetworkCommand::CreateExpense { id, input } => {
            tracing::info!(id, title = %input.title, amount = input.amount, "Creating expense");
            match store.create(&input).await {
                Ok(expense) => NetworkResponse::ExpenseCreated { id, expense },
                Err(error) => NetworkResponse::Failed { id, error },
            }
        }
        NetworkCommand::DeleteExpense { id, expense_id } => {
            tracing::info!(id, %expense_id, "Deleting expense");
            match store.remove(&expense_id).await {
                Ok(()) => NetworkResponse::ExpenseDeleted { id, expense_id },
                Err(error) => NetworkResponse::Failed { id, error },
            }
        }
        NetworkCommand::FetchMonthlyTotal { id, period } => {
            tracing::info!(id, %period, "Fetching monthly total");
            match store.monthly_total(period).await {
                Ok(total) => NetworkResponse::MonthlyTotalLoaded { id, period, total },
                Err(error) => NetworkResponse::Failed { id, error },
            }
        }
        NetworkCommand::Shutdown => return None,
    };

    match &response {
        NetworkResponse::Failed { id, error } => {
            tracing::warn!(id, reason = error.reason(), "{}", error);
        }
        other => tracing::info!(id = other.id(), "Request completed"),
    }

    Some(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use crate::error::ApiError;
    use crate::models::{Expense, ExpenseId, NewExpense, Period};

    /// In-memory store with server-assigned numeric ids
    #[derive(Default)]
    struct MemoryStore {
        expenses: Mutex<Vec<Expense>>,
        next_id: Mutex<i64>,
    }

    impl ExpenseStore for MemoryStore {
        async fn list(&self) -> Result<Vec<Expense>, ApiError> {
            Ok(self.expenses.lock().unwrap().clone())
        }

        async fn create(&self, input: &NewExpense) -> Result<Expense, ApiError> {
            let mut next_id = self.next_id.lock().unwrap();
            *next_id += 1;
            let expense = Expense {
                id: ExpenseId::Number(*next_id),
                title: input.title.clone(),
                category: input.category.clone(),
                amount: input.amount,
                date: input.date,
                notes: Some(input.notes.clone()),
            };
            self.expenses.lock().unwrap().push(expense.clone());
            Ok(expense)
        }

        async fn remove(&self, id: &ExpenseId) -> Result<(), ApiError> {
            let mut expenses = self.expenses.lock().unwrap();
            let before = expenses.len();
            expenses.retain(|e| &e.id != id);
            if expenses.len() == before {
                Err(ApiError::Delete(String::from("HTTP 404 Not Found")))
            } else {
                Ok(())
            }
        }

        async fn monthly_total(&self, period: Period) -> Result<f64, ApiError> {
            use chrono::Datelike;
            Ok(self
                .expenses
                .lock()
                .unwrap()
                .iter()
                .filter(|e| {
                    e.date
                        .is_some_and(|d| d.year() == period.year && d.month() == period.month)
                })
                .map(|e| e.amount)
                .sum())
        }
    }

    fn new_expense(title: &str, amount: f64) -> NewExpense {
        NewExpense {
            title: title.to_string(),
            category: "Food".to_string(),
            amount,
            date: chrono::NaiveDate::from_ymd_opt(2024, 1, 15),
            notes: String::new(),
        }
    }

    #[tokio::test]
    async fn test_execute_create_then_total() {
        let store = MemoryStore::default();

        let created = execute(&store, NetworkCommand::CreateExpense { id: 1, input: new_expense("Lunch", 12.5) }).await;
        assert!(matches!(
            created,
            Some(NetworkResponse::ExpenseCreated { id: 1, ref expense }) if expense.id == ExpenseId::Number(1)
        ));

        let total = execute(&store, NetworkCommand::FetchMonthlyTotal { id: 2, period: Period::new(2024, 1) }).await;
        assert_eq!(
            total,
            Some(NetworkResponse::MonthlyTotalLoaded { id: 2, period: Period::new(2024, 1), total: 12.5 })
        );
    }

    #[tokio::test]
    async fn test_execute_delete_missing_fails() {
        let store = MemoryStore::default();
        let response = execute(
            &store,
            NetworkCommand::DeleteExpense { id: 5, expense_id: ExpenseId::Number(404) },
        )
        .await;
        assert!(matches!(
            response,
            Some(NetworkResponse::Failed { id: 5, error: ApiError::Delete(_) })
        ));
    }

    #[tokio::test]
    async fn test_actor_answers_each_command_with_its_id() {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (resp_tx, mut resp_rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(NetworkActor::new(MemoryStore::default(), resp_tx).run(cmd_rx));

        cmd_tx.send(NetworkCommand::CreateExpense { id: 10, input: new_expense("Lunch", 12.5) }).unwrap();
        let created = resp_rx.recv().await.unwrap();
        assert_eq!(created.id(), 10);

        cmd_tx.send(NetworkCommand::FetchExpenses { id: 11 }).unwrap();
        match resp_rx.recv().await.unwrap() {
            NetworkResponse::ExpensesLoaded { id, expenses } => {
                assert_eq!(id, 11);
                assert_eq!(expenses.len(), 1);
            }
            other => panic!("unexpected response: {:?}", other),
        }

        cmd_tx.send(NetworkCommand::Shutdown).unwrap();
        handle.await.unwrap();
    }
}
