use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_YEAR, MIN_YEAR};

/// Server-assigned expense identifier.
///
/// The server owns the format; both JSON numbers and strings are accepted and
/// echoed back verbatim in delete paths.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExpenseId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpenseId::Number(n) => write!(f, "{}", n),
            ExpenseId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ExpenseId {
    fn from(n: i64) -> Self {
        ExpenseId::Number(n)
    }
}

/// A recorded expense as returned by the server
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub title: String,
    pub category: String,
    pub amount: f64,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Expense {
    /// Table cells in display order: date, title, category, amount, notes
    pub fn table_cells(&self) -> [String; 5] {
        [
            self.date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| String::from("-")),
            self.title.clone(),
            self.category.clone(),
            format_amount(self.amount),
            match self.notes.as_deref() {
                Some(notes) if !notes.is_empty() => notes.to_string(),
                _ => String::from("-"),
            },
        ]
    }
}

/// Body of a create request. An absent date is sent as `null`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewExpense {
    pub title: String,
    pub category: String,
    pub amount: f64,
    pub date: Option<NaiveDate>,
    pub notes: String,
}

/// A (year, month) selection for the monthly summary
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

impl Period {
    pub fn new(year: i32, month: u32) -> Self {
        Period {
            year: year.clamp(MIN_YEAR, MAX_YEAR),
            month: month.clamp(1, 12),
        }
    }

    /// The current local year and month
    pub fn current() -> Self {
        let today = chrono::Local::now().date_naive();
        Period::new(today.year(), today.month())
    }

    /// Next month, wrapping December to January of the same year
    pub fn next_month(self) -> Self {
        Period {
            month: self.month % 12 + 1,
            ..self
        }
    }

    /// Previous month, wrapping January to December of the same year
    pub fn prev_month(self) -> Self {
        Period {
            month: if self.month == 1 { 12 } else { self.month - 1 },
            ..self
        }
    }

    pub fn next_year(self) -> Self {
        Period::new(self.year.saturating_add(1), self.month)
    }

    pub fn prev_year(self) -> Self {
        Period::new(self.year.saturating_sub(1), self.month)
    }
}

impl Default for Period {
    fn default() -> Self {
        Period::current()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// Color theme
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Label of the toggle action, naming the theme it switches to
    pub fn toggle_label(self) -> &'static str {
        match self {
            Theme::Dark => "Light mode",
            Theme::Light => "Dark mode",
        }
    }
}

/// Formats an amount as dollars with two decimals
pub fn format_amount(amount: f64) -> String {
    format!("${:.2}", amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_expense_with_null_notes() {
        let json = r#"{"id":1,"title":"Rent","category":"Housing","amount":1200.00,"date":"2024-01-01","notes":null}"#;
        let expense: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(expense.id, ExpenseId::Number(1));
        assert_eq!(expense.date, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(expense.notes, None);
        assert_eq!(
            expense.table_cells().join(" | "),
            "2024-01-01 | Rent | Housing | $1200.00 | -"
        );
    }

    #[test]
    fn test_decode_expense_with_string_id_and_missing_fields() {
        let json = r#"{"id":"a1b2","title":"Coffee","category":"Food","amount":3.5}"#;
        let expense: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(expense.id.to_string(), "a1b2");
        assert_eq!(expense.table_cells()[0], "-");
        assert_eq!(expense.table_cells()[3], "$3.50");
    }

    #[test]
    fn test_new_expense_sends_null_date() {
        let input = NewExpense {
            title: "Taxi".into(),
            category: "Travel".into(),
            amount: 12.5,
            date: None,
            notes: String::new(),
        };
        let value = serde_json::to_value(&input).unwrap();
        assert!(value["date"].is_null());
        assert_eq!(value["amount"], 12.5);
        assert_eq!(value["notes"], "");
    }

    #[test]
    fn test_period_month_wraps_within_year() {
        assert_eq!(Period::new(2024, 12).next_month(), Period::new(2024, 1));
        assert_eq!(Period::new(2024, 1).prev_month(), Period::new(2024, 12));
    }

    #[test]
    fn test_period_year_is_bounded() {
        assert_eq!(Period::new(2100, 5).next_year().year, 2100);
        assert_eq!(Period::new(2000, 5).prev_year().year, 2000);
        assert_eq!(Period::new(1999, 13), Period::new(2000, 12));
    }

    #[test]
    fn test_theme_toggle_round_trip() {
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggle_label(), "Light mode");
    }
}
