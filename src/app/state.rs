//! App state - pure data structure with no I/O logic

use chrono::NaiveDate;

use crate::constants::REQUIRED_FIELDS_MESSAGE;
use crate::messages::ui_events::{FormField, InputMode, Panel};
use crate::messages::RenderState;
use crate::models::{Expense, ExpenseId, NewExpense, Period, Theme};

/// Raw text of the add-expense form
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExpenseForm {
    pub title: String,
    pub category: String,
    pub amount: String,
    pub date: String,
    pub notes: String,
}

impl ExpenseForm {
    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::Category => &self.category,
            FormField::Amount => &self.amount,
            FormField::Date => &self.date,
            FormField::Notes => &self.notes,
        }
    }

    pub fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Title => &mut self.title,
            FormField::Category => &mut self.category,
            FormField::Amount => &mut self.amount,
            FormField::Date => &mut self.date,
            FormField::Notes => &mut self.notes,
        }
    }

    pub fn clear(&mut self) {
        *self = ExpenseForm::default();
    }

    /// Turns the form into a create request, or the message to show instead.
    ///
    /// Title, category and amount must be non-blank. The amount must parse as
    /// a finite number above zero and a non-blank date must be `YYYY-MM-DD`;
    /// a blank date becomes `None`.
    pub fn validate(&self) -> Result<NewExpense, String> {
        let title = self.title.trim();
        let category = self.category.trim();
        let amount = self.amount.trim();

        if title.is_empty() || category.is_empty() || amount.is_empty() {
            return Err(REQUIRED_FIELDS_MESSAGE.to_string());
        }

        let amount: f64 = amount
            .parse()
            .map_err(|_| String::from("Amount must be a number"))?;
        if !amount.is_finite() || amount <= 0.0 {
            return Err(String::from("Amount must be greater than zero"));
        }

        let date = match self.date.trim() {
            "" => None,
            text => Some(
                NaiveDate::parse_from_str(text, "%Y-%m-%d")
                    .map_err(|_| String::from("Date must be YYYY-MM-DD"))?,
            ),
        };

        Ok(NewExpense {
            title: title.to_string(),
            category: category.to_string(),
            amount,
            date,
            notes: self.notes.clone(),
        })
    }
}

/// Main application state - pure data, no I/O
pub struct AppState {
    // Appearance
    pub theme: Theme,

    // Monthly summary
    pub period: Period,
    pub monthly_total: f64,

    // Expense table (read-through cache of the server list)
    pub expenses: Vec<Expense>,
    pub selected_row: usize,
    pub is_loading: bool,

    // Add-expense form
    pub form: ExpenseForm,
    pub focused_field: FormField,
    pub cursor_position: usize,

    // Banner shown above the form
    pub error: Option<String>,

    // UI state
    pub active_panel: Panel,
    pub input_mode: InputMode,

    // Popups
    pub show_help: bool,
    pub confirm_delete: Option<ExpenseId>,
    pub alert: Option<String>,

    // In-flight requests, matched against response ids
    pub next_request_id: u64,
    pub pending_list: Option<u64>,
    pub pending_create: Option<u64>,
    pub pending_delete: Option<u64>,
    pub pending_total: Option<u64>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Period::current(), Theme::default())
    }
}

impl AppState {
    pub fn new(period: Period, theme: Theme) -> Self {
        AppState {
            theme,
            period,
            monthly_total: 0.0,
            expenses: Vec::new(),
            selected_row: 0,
            is_loading: false,
            form: ExpenseForm::default(),
            focused_field: FormField::Title,
            cursor_position: 0,
            error: None,
            active_panel: Panel::Form,
            input_mode: InputMode::Normal,
            show_help: false,
            confirm_delete: None,
            alert: None,
            next_request_id: 1,
            pending_list: None,
            pending_create: None,
            pending_delete: None,
            pending_total: None,
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    /// Get the focused form field content
    pub fn current_input(&self) -> &str {
        self.form.field(self.focused_field)
    }

    /// Get mutable reference to the focused form field
    pub fn current_input_mut(&mut self) -> &mut String {
        self.form.field_mut(self.focused_field)
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            theme: self.theme,
            period: self.period,
            monthly_total: self.monthly_total,
            form_values: FormField::ALL.map(|field| self.form.field(field).to_string()),
            focused_field: self.focused_field,
            cursor_position: self.cursor_position,
            error: self.error.clone(),
            expenses: self.expenses.clone(),
            selected_row: self.selected_row,
            is_loading: self.is_loading,
            active_panel: self.active_panel,
            input_mode: self.input_mode,
            show_help: self.show_help,
            confirm_delete: self.confirm_delete.as_ref().map(|id| {
                self.expenses
                    .iter()
                    .find(|e| &e.id == id)
                    .map(|e| e.title.clone())
                    .unwrap_or_else(|| id.to_string())
            }),
            alert: self.alert.clone(),
        }
    }
}
