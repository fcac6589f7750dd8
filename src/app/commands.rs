//! Command handlers - state transitions for UI events and network responses
//!
//! Every transition mutates `AppState` in place and returns the network
//! commands it needs executed. Successful mutations invalidate the monthly
//! total and append a refresh for the selected period.

use crate::app::AppState;
use crate::messages::ui_events::{InputMode, Panel};
use crate::messages::{NetworkCommand, NetworkResponse, UiEvent};
use crate::models::Period;

impl AppState {
    // ========================
    // Dispatch
    // ========================

    /// Commands issued when the screen first mounts: the expense list and the
    /// total for the selected period, requested together.
    pub fn initial_load(&mut self) -> Vec<NetworkCommand> {
        let mut commands = vec![self.load_expenses()];
        commands.push(self.refresh_total());
        commands
    }

    /// Apply a UI event. `Quit` is handled by the actor and is a no-op here.
    pub fn apply(&mut self, event: UiEvent) -> Vec<NetworkCommand> {
        match event {
            // Panel navigation
            UiEvent::NextPanel => self.next_panel(),
            UiEvent::PrevPanel => self.prev_panel(),

            // Form editing
            UiEvent::StartEditing => self.start_editing(),
            UiEvent::StopEditing => self.stop_editing(),
            UiEvent::CharInput(c) => self.enter_char(c),
            UiEvent::Backspace => self.delete_char(),
            UiEvent::CursorLeft => self.move_cursor_left(),
            UiEvent::CursorRight => self.move_cursor_right(),
            UiEvent::NextField => self.next_field(),
            UiEvent::PrevField => self.prev_field(),
            UiEvent::SubmitExpense => return self.submit_expense().into_iter().collect(),

            // Expense table
            UiEvent::SelectNextRow => self.select_next_row(),
            UiEvent::SelectPrevRow => self.select_prev_row(),
            UiEvent::RequestDelete => self.request_delete(),
            UiEvent::ConfirmDelete => return self.confirm_delete().into_iter().collect(),
            UiEvent::CancelDelete => self.cancel_delete(),

            // Monthly summary
            UiEvent::NextMonth => return self.select_period(self.period.next_month()).into_iter().collect(),
            UiEvent::PrevMonth => return self.select_period(self.period.prev_month()).into_iter().collect(),
            UiEvent::NextYear => return self.select_period(self.period.next_year()).into_iter().collect(),
            UiEvent::PrevYear => return self.select_period(self.period.prev_year()).into_iter().collect(),

            // Appearance
            UiEvent::ToggleTheme => self.toggle_theme(),

            // Popups
            UiEvent::DismissAlert => self.dismiss_alert(),
            UiEvent::ToggleHelp => self.toggle_help(),
            UiEvent::CloseHelp => self.close_help(),

            UiEvent::Quit => {}
        }

        Vec::new()
    }

    // ========================
    // Navigation
    // ========================

    pub fn next_panel(&mut self) {
        self.active_panel = self.active_panel.next();
    }

    pub fn prev_panel(&mut self) {
        self.active_panel = self.active_panel.prev();
    }

    // ========================
    // Form editing
    // ========================

    pub fn start_editing(&mut self) {
        self.active_panel = Panel::Form;
        self.input_mode = InputMode::Editing;
        self.cursor_position = self.current_input().len();
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn next_field(&mut self) {
        self.focused_field = self.focused_field.next();
        self.cursor_position = self.current_input().len();
    }

    pub fn prev_field(&mut self) {
        self.focused_field = self.focused_field.prev();
        self.cursor_position = self.current_input().len();
    }

    pub fn move_cursor_left(&mut self) {
        let input = self.current_input();
        if self.cursor_position > 0 {
            let new_pos = input[..self.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.cursor_position = new_pos;
        }
    }

    pub fn move_cursor_right(&mut self) {
        let input = self.current_input();
        if self.cursor_position < input.len() {
            let new_pos = input[self.cursor_position..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_position + i)
                .unwrap_or(input.len());
            self.cursor_position = new_pos;
        }
    }

    pub fn enter_char(&mut self, c: char) {
        let cursor_pos = self.cursor_position;
        let input = self.current_input_mut();
        if cursor_pos <= input.len() {
            input.insert(cursor_pos, c);
            self.cursor_position = cursor_pos + c.len_utf8();
        }
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let cursor_pos = self.cursor_position;
            let input = self.current_input_mut();
            let prev_pos = input[..cursor_pos]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            input.remove(prev_pos);
            self.cursor_position = prev_pos;
        }
    }

    // ========================
    // Add expense
    // ========================

    /// Validate the form and issue a create. Invalid input sets the banner and
    /// issues nothing; the form is kept either way until the server confirms.
    pub fn submit_expense(&mut self) -> Option<NetworkCommand> {
        if self.pending_create.is_some() {
            tracing::debug!("Create already in flight, ignoring submit");
            return None;
        }

        match self.form.validate() {
            Ok(input) => {
                self.error = None;
                self.input_mode = InputMode::Normal;
                let id = self.next_id();
                self.pending_create = Some(id);
                Some(NetworkCommand::CreateExpense { id, input })
            }
            Err(message) => {
                self.error = Some(message);
                None
            }
        }
    }

    // ========================
    // Expense table
    // ========================

    pub fn select_next_row(&mut self) {
        if !self.expenses.is_empty() {
            self.selected_row = (self.selected_row + 1) % self.expenses.len();
        }
    }

    pub fn select_prev_row(&mut self) {
        if !self.expenses.is_empty() {
            self.selected_row = self.selected_row
                .checked_sub(1)
                .unwrap_or(self.expenses.len() - 1);
        }
    }

    fn clamp_selection(&mut self) {
        self.selected_row = self.selected_row.min(self.expenses.len().saturating_sub(1));
    }

    /// Ask for confirmation before deleting the selected row
    pub fn request_delete(&mut self) {
        if let Some(expense) = self.expenses.get(self.selected_row) {
            self.confirm_delete = Some(expense.id.clone());
        }
    }

    /// Issue the confirmed delete. While another delete is in flight the
    /// popup stays open so the confirmation can be repeated once it settles.
    pub fn confirm_delete(&mut self) -> Option<NetworkCommand> {
        if self.pending_delete.is_some() {
            tracing::debug!("Delete already in flight, keeping confirmation open");
            return None;
        }
        let expense_id = self.confirm_delete.take()?;

        let id = self.next_id();
        self.pending_delete = Some(id);
        Some(NetworkCommand::DeleteExpense { id, expense_id })
    }

    pub fn cancel_delete(&mut self) {
        self.confirm_delete = None;
    }

    // ========================
    // Monthly summary
    // ========================

    /// Switch the summary to `period` and refresh its total. The expense list
    /// is not affected. Selecting the current period again is a no-op.
    pub fn select_period(&mut self, period: Period) -> Option<NetworkCommand> {
        if period == self.period {
            return None;
        }
        self.period = period;
        Some(self.refresh_total())
    }

    /// Request the total for the selected period. Any earlier total request
    /// still in flight becomes stale.
    pub fn refresh_total(&mut self) -> NetworkCommand {
        let id = self.next_id();
        self.pending_total = Some(id);
        NetworkCommand::FetchMonthlyTotal { id, period: self.period }
    }

    fn load_expenses(&mut self) -> NetworkCommand {
        let id = self.next_id();
        self.pending_list = Some(id);
        self.is_loading = true;
        self.error = None;
        NetworkCommand::FetchExpenses { id }
    }

    // ========================
    // Appearance & popups
    // ========================

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    // ========================
    // Response handling
    // ========================

    pub fn handle_response(&mut self, response: NetworkResponse) -> Vec<NetworkCommand> {
        let response_id = response.id();
        let mut commands = Vec::new();

        match response {
            NetworkResponse::ExpensesLoaded { expenses, .. } => {
                if self.pending_list == Some(response_id) {
                    self.pending_list = None;
                    self.is_loading = false;
                    self.expenses = expenses;
                    self.clamp_selection();
                }
            }
            NetworkResponse::ExpenseCreated { expense, .. } => {
                if self.pending_create == Some(response_id) {
                    self.pending_create = None;
                    // A list snapshot that landed first may already hold it
                    match self.expenses.iter_mut().find(|e| e.id == expense.id) {
                        Some(slot) => *slot = expense,
                        None => self.expenses.push(expense),
                    }
                    self.form.clear();
                    self.cursor_position = 0;
                    commands.push(self.refresh_total());
                }
            }
            NetworkResponse::ExpenseDeleted { expense_id, .. } => {
                if self.pending_delete == Some(response_id) {
                    self.pending_delete = None;
                    self.expenses.retain(|e| e.id != expense_id);
                    self.clamp_selection();
                    commands.push(self.refresh_total());
                }
            }
            NetworkResponse::MonthlyTotalLoaded { period, total, .. } => {
                if self.pending_total == Some(response_id) {
                    self.pending_total = None;
                    self.monthly_total = total;
                } else {
                    tracing::debug!(id = response_id, %period, "Discarding stale monthly total");
                }
            }
            NetworkResponse::Failed { error, .. } => {
                if self.pending_list == Some(response_id) {
                    self.pending_list = None;
                    self.is_loading = false;
                    self.error = Some(error.to_string());
                } else if self.pending_create == Some(response_id) {
                    self.pending_create = None;
                    self.error = Some(error.to_string());
                } else if self.pending_delete == Some(response_id) {
                    self.pending_delete = None;
                    self.alert = Some(error.to_string());
                } else if self.pending_total == Some(response_id) {
                    // Total failures stay out of the UI; the last total remains
                    self.pending_total = None;
                    tracing::warn!(id = response_id, reason = error.reason(), "{}", error);
                } else {
                    tracing::debug!(id = response_id, "Discarding stale failure");
                }
            }
        }

        commands
    }
}
