//! Render state - data structure sent from App layer to UI for rendering

use crate::messages::ui_events::{FormField, InputMode, Overlay, Panel};
use crate::models::{Expense, Period, Theme};

/// Complete state needed by the UI to render
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    // Appearance
    pub theme: Theme,

    // Monthly summary
    pub period: Period,
    pub monthly_total: f64,

    // Add-expense form, values in `FormField::ALL` order
    pub form_values: [String; 5],
    pub focused_field: FormField,
    pub cursor_position: usize,
    pub error: Option<String>,

    // Expense table
    pub expenses: Vec<Expense>,
    pub selected_row: usize,
    pub is_loading: bool,

    // UI state
    pub active_panel: Panel,
    pub input_mode: InputMode,

    // Popups
    pub show_help: bool,
    pub confirm_delete: Option<String>,
    pub alert: Option<String>,
}

impl RenderState {
    /// Popup flags used for key routing
    pub fn overlay(&self) -> Overlay {
        Overlay {
            show_help: self.show_help,
            confirming_delete: self.confirm_delete.is_some(),
            showing_alert: self.alert.is_some(),
        }
    }
}
