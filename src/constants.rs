//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Default base resource of the expense API
pub const DEFAULT_API_URL: &str = "http://localhost:9090/api/expenses";

/// Path segment of the monthly aggregate endpoint, relative to the base
pub const TOTAL_MONTH_PATH: &str = "total-month";

/// Log file name inside the log directory
pub const LOG_FILE_NAME: &str = "expense-tui.log";

/// Application name
pub const APP_NAME: &str = "Smart Expense Tracker";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Earliest selectable summary year
pub const MIN_YEAR: i32 = 2000;

/// Latest selectable summary year
pub const MAX_YEAR: i32 = 2100;

/// Banner shown when a required form field is blank
pub const REQUIRED_FIELDS_MESSAGE: &str = "Title, category and amount are required";

/// Prompt of the delete confirmation popup
pub const DELETE_CONFIRM_PROMPT: &str = "Delete this expense?";
