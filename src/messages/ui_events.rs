//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Panel navigation
    NextPanel,
    PrevPanel,

    // Form editing
    StartEditing,
    StopEditing,
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,
    NextField,
    PrevField,
    SubmitExpense,

    // Expense table
    SelectNextRow,
    SelectPrevRow,
    RequestDelete,
    ConfirmDelete,
    CancelDelete,

    // Monthly summary
    NextMonth,
    PrevMonth,
    NextYear,
    PrevYear,

    // Appearance
    ToggleTheme,

    // Popups
    DismissAlert,
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Focused panel of the screen
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum Panel {
    Summary,
    #[default]
    Form,
    Expenses,
}

impl Panel {
    pub fn next(&self) -> Panel {
        match self {
            Panel::Summary => Panel::Form,
            Panel::Form => Panel::Expenses,
            Panel::Expenses => Panel::Summary,
        }
    }

    pub fn prev(&self) -> Panel {
        match self {
            Panel::Summary => Panel::Expenses,
            Panel::Form => Panel::Summary,
            Panel::Expenses => Panel::Form,
        }
    }
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// Field of the add-expense form
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum FormField {
    #[default]
    Title,
    Category,
    Amount,
    Date,
    Notes,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::Title,
        FormField::Category,
        FormField::Amount,
        FormField::Date,
        FormField::Notes,
    ];

    pub fn next(&self) -> FormField {
        match self {
            FormField::Title => FormField::Category,
            FormField::Category => FormField::Amount,
            FormField::Amount => FormField::Date,
            FormField::Date => FormField::Notes,
            FormField::Notes => FormField::Title,
        }
    }

    pub fn prev(&self) -> FormField {
        match self {
            FormField::Title => FormField::Notes,
            FormField::Category => FormField::Title,
            FormField::Amount => FormField::Category,
            FormField::Date => FormField::Amount,
            FormField::Notes => FormField::Date,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Title => "Title",
            FormField::Category => "Category",
            FormField::Amount => "Amount",
            FormField::Date => "Date",
            FormField::Notes => "Notes",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            FormField::Title => "e.g. Groceries",
            FormField::Category => "e.g. Food",
            FormField::Amount => "0.00",
            FormField::Date => "YYYY-MM-DD (optional)",
            FormField::Notes => "optional",
        }
    }
}

/// Popup context needed to route keys
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Overlay {
    pub show_help: bool,
    pub confirming_delete: bool,
    pub showing_alert: bool,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(
    key: KeyEvent,
    active_panel: Panel,
    input_mode: InputMode,
    overlay: Overlay,
) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    // Blocking popups swallow every key
    if overlay.showing_alert {
        return Some(UiEvent::DismissAlert);
    }

    if overlay.confirming_delete {
        return match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Some(UiEvent::ConfirmDelete),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(UiEvent::CancelDelete),
            _ => None,
        };
    }

    if overlay.show_help {
        return Some(UiEvent::CloseHelp);
    }

    match input_mode {
        InputMode::Editing => handle_editing_keys(key),
        InputMode::Normal => handle_normal_keys(key, active_panel),
    }
}

/// Handle keys while a form field is being edited
fn handle_editing_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Esc => Some(UiEvent::StopEditing),
        KeyCode::Enter => Some(UiEvent::SubmitExpense),
        KeyCode::Left => Some(UiEvent::CursorLeft),
        KeyCode::Right => Some(UiEvent::CursorRight),
        KeyCode::Backspace => Some(UiEvent::Backspace),
        KeyCode::Tab | KeyCode::Down => Some(UiEvent::NextField),
        KeyCode::BackTab | KeyCode::Up => Some(UiEvent::PrevField),
        KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
        _ => None,
    }
}

/// Handle keys in normal mode, per focused panel
fn handle_normal_keys(key: KeyEvent, active_panel: Panel) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('q') => return Some(UiEvent::Quit),
        KeyCode::Char('?') => return Some(UiEvent::ToggleHelp),
        KeyCode::Char('t') => return Some(UiEvent::ToggleTheme),
        KeyCode::Tab => return Some(UiEvent::NextPanel),
        KeyCode::BackTab => return Some(UiEvent::PrevPanel),
        _ => {}
    }

    match active_panel {
        Panel::Summary => match key.code {
            KeyCode::Left | KeyCode::Char('h') => Some(UiEvent::PrevMonth),
            KeyCode::Right | KeyCode::Char('l') => Some(UiEvent::NextMonth),
            KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::NextYear),
            KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::PrevYear),
            _ => None,
        },
        Panel::Form => match key.code {
            KeyCode::Char('e') | KeyCode::Enter => Some(UiEvent::StartEditing),
            KeyCode::Char('s') => Some(UiEvent::SubmitExpense),
            KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::PrevField),
            KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::NextField),
            _ => None,
        },
        Panel::Expenses => match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::SelectPrevRow),
            KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::SelectNextRow),
            KeyCode::Char('d') | KeyCode::Delete => Some(UiEvent::RequestDelete),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_alert_swallows_keys() {
        let overlay = Overlay { showing_alert: true, ..Overlay::default() };
        let event = key_to_ui_event(press(KeyCode::Char('q')), Panel::Form, InputMode::Normal, overlay);
        assert_eq!(event, Some(UiEvent::DismissAlert));
    }

    #[test]
    fn test_confirm_delete_keys() {
        let overlay = Overlay { confirming_delete: true, ..Overlay::default() };
        assert_eq!(
            key_to_ui_event(press(KeyCode::Char('y')), Panel::Expenses, InputMode::Normal, overlay),
            Some(UiEvent::ConfirmDelete)
        );
        assert_eq!(
            key_to_ui_event(press(KeyCode::Esc), Panel::Expenses, InputMode::Normal, overlay),
            Some(UiEvent::CancelDelete)
        );
        assert_eq!(
            key_to_ui_event(press(KeyCode::Char('d')), Panel::Expenses, InputMode::Normal, overlay),
            None
        );
    }

    #[test]
    fn test_editing_types_characters() {
        let event = key_to_ui_event(press(KeyCode::Char('q')), Panel::Form, InputMode::Editing, Overlay::default());
        assert_eq!(event, Some(UiEvent::CharInput('q')));
    }

    #[test]
    fn test_panel_specific_arrows() {
        assert_eq!(
            key_to_ui_event(press(KeyCode::Right), Panel::Summary, InputMode::Normal, Overlay::default()),
            Some(UiEvent::NextMonth)
        );
        assert_eq!(
            key_to_ui_event(press(KeyCode::Down), Panel::Expenses, InputMode::Normal, Overlay::default()),
            Some(UiEvent::SelectNextRow)
        );
    }
}
