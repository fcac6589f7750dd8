//! Terminal drawing: theme palettes, panels, and popups

use ratatui::{prelude::*, widgets::*};

use crate::constants::{APP_NAME, DELETE_CONFIRM_PROMPT};
use crate::messages::ui_events::{FormField, InputMode, Panel};
use crate::messages::RenderState;
use crate::models::{format_amount, Theme};

/// Width of the form labels, including the trailing colon and padding
const LABEL_WIDTH: usize = 10;

/// Colors for one theme. The root style paints the whole frame, so a theme
/// switch is visible on every cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub root: Style,
    pub border: Style,
    pub focused: Style,
    pub editing: Style,
    pub muted: Style,
    pub accent: Style,
    pub error: Style,
    pub highlight: Style,
    pub popup: Style,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Palette {
        match theme {
            Theme::Dark => Palette {
                root: Style::default().fg(Color::White).bg(Color::Black),
                border: Style::default().fg(Color::Gray),
                focused: Style::default().fg(Color::Cyan),
                editing: Style::default().fg(Color::Yellow),
                muted: Style::default().fg(Color::DarkGray),
                accent: Style::default().fg(Color::Green).bold(),
                error: Style::default().fg(Color::Red).bold(),
                highlight: Style::default().fg(Color::Black).bg(Color::Cyan).bold(),
                popup: Style::default().fg(Color::White).bg(Color::Black),
            },
            Theme::Light => Palette {
                root: Style::default().fg(Color::Black).bg(Color::White),
                border: Style::default().fg(Color::DarkGray),
                focused: Style::default().fg(Color::Blue),
                editing: Style::default().fg(Color::Magenta),
                muted: Style::default().fg(Color::Gray),
                accent: Style::default().fg(Color::Blue).bold(),
                error: Style::default().fg(Color::Red).bold(),
                highlight: Style::default().fg(Color::White).bg(Color::Blue).bold(),
                popup: Style::default().fg(Color::Black).bg(Color::White),
            },
        }
    }

    /// Border style for a panel given focus and editing state
    pub fn panel_border(&self, is_focused: bool, is_editing: bool) -> Style {
        if is_focused && is_editing {
            self.editing
        } else if is_focused {
            self.focused
        } else {
            self.border
        }
    }
}

/// Bordered block with a title, styled for focus
pub fn panel_block<'a>(title: &'a str, border_style: Style) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title)
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

// ============================================================================
// Drawing
// ============================================================================

/// Draw one frame of the whole screen from a render snapshot
pub fn draw(f: &mut Frame, state: &RenderState) {
    let palette = Palette::for_theme(state.theme);
    let area = f.area();

    // Root paint: the theme applies to the whole screen
    f.render_widget(Block::default().style(palette.root), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // Header
            Constraint::Length(3),  // Monthly summary
            Constraint::Length(8),  // Add-expense form
            Constraint::Min(5),     // Expense table
            Constraint::Length(1),  // Status bar
        ])
        .split(area);

    draw_header(f, state, &palette, chunks[0]);
    draw_summary(f, state, &palette, chunks[1]);
    draw_form(f, state, &palette, chunks[2]);
    draw_expenses(f, state, &palette, chunks[3]);
    draw_status_bar(f, state, &palette, chunks[4]);

    // Popups
    if state.show_help {
        draw_help_popup(f, &palette, area);
    }

    if let Some(title) = &state.confirm_delete {
        draw_confirm_popup(f, &palette, title, area);
    }

    if let Some(message) = &state.alert {
        draw_alert_popup(f, &palette, message, area);
    }
}

fn draw_header(f: &mut Frame, state: &RenderState, palette: &Palette, area: Rect) {
    let header = Line::from(vec![
        Span::styled(format!(" {} ", APP_NAME), palette.accent),
        Span::styled(format!("  [t] {} ", state.theme.toggle_label()), palette.muted),
    ]);
    f.render_widget(Paragraph::new(header), area);
}

fn draw_summary(f: &mut Frame, state: &RenderState, palette: &Palette, area: Rect) {
    let is_focused = state.active_panel == Panel::Summary;
    let block = panel_block(" Monthly Summary (←/→ month, ↑/↓ year) ", palette.panel_border(is_focused, false));

    let summary = Line::from(vec![
        Span::raw(" Year: "),
        Span::styled(state.period.year.to_string(), palette.focused),
        Span::raw("   Month: "),
        Span::styled(format!("{:02}", state.period.month), palette.focused),
        Span::raw("   Total: "),
        Span::styled(format_amount(state.monthly_total), palette.accent),
    ]);

    f.render_widget(Paragraph::new(summary).block(block), area);
}

fn draw_form(f: &mut Frame, state: &RenderState, palette: &Palette, area: Rect) {
    let is_focused = state.active_panel == Panel::Form;
    let is_editing = is_focused && state.input_mode == InputMode::Editing;
    let block = panel_block(" Add Expense (e:edit s:submit) ", palette.panel_border(is_focused, is_editing));

    let mut lines = Vec::with_capacity(FormField::ALL.len() + 1);
    lines.push(match &state.error {
        Some(error) => Line::from(Span::styled(error.clone(), palette.error)),
        None => Line::from(Span::styled("Fill in the fields and press Enter", palette.muted)),
    });

    for (field, value) in FormField::ALL.iter().zip(state.form_values.iter()) {
        let label_style = if is_focused && *field == state.focused_field {
            palette.focused
        } else {
            palette.muted
        };
        let label = Span::styled(format!("{:<width$}", format!("{}:", field.label()), width = LABEL_WIDTH), label_style);
        let value = if value.is_empty() {
            Span::styled(field.placeholder(), palette.muted)
        } else {
            Span::raw(value.clone())
        };
        lines.push(Line::from(vec![label, value]));
    }

    f.render_widget(Paragraph::new(lines).block(block), area);

    // Cursor
    if is_editing {
        let row = FormField::ALL
            .iter()
            .position(|field| *field == state.focused_field)
            .unwrap_or(0) as u16;
        let value = &state.form_values[row as usize];
        let column = value[..state.cursor_position.min(value.len())].chars().count() + LABEL_WIDTH;
        let max_x = area.x + area.width.saturating_sub(2);
        let cursor_x = (area.x + 1 + column as u16).min(max_x);
        f.set_cursor_position(Position::new(cursor_x, area.y + 2 + row));
    }
}

fn draw_expenses(f: &mut Frame, state: &RenderState, palette: &Palette, area: Rect) {
    let is_focused = state.active_panel == Panel::Expenses;
    let block = panel_block(" All Expenses (d:delete) ", palette.panel_border(is_focused, false));

    if state.is_loading || state.expenses.is_empty() {
        let text = if state.is_loading { "Loading..." } else { "No expenses yet." };
        f.render_widget(Paragraph::new(Span::styled(text, palette.muted)).block(block), area);
        return;
    }

    let header = Row::new(["Date", "Title", "Category", "Amount", "Notes"]).style(palette.accent);
    let rows: Vec<Row> = state.expenses.iter().map(|e| Row::new(e.table_cells())).collect();
    let widths = [
        Constraint::Length(12),
        Constraint::Percentage(30),
        Constraint::Percentage(20),
        Constraint::Length(12),
        Constraint::Min(10),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(if is_focused { palette.highlight } else { Style::default() });

    let mut table_state = TableState::default();
    table_state.select(Some(state.selected_row));
    f.render_stateful_widget(table, area, &mut table_state);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, palette: &Palette, area: Rect) {
    let status = if state.input_mode == InputMode::Editing {
        " ESC:stop editing | Tab/↑/↓:field | Enter:submit "
    } else {
        " Tab:panel | e:edit | s:submit | d:delete | t:theme | ?:help | q:quit "
    };

    f.render_widget(Paragraph::new(status).style(palette.muted), area);
}

fn draw_help_popup(f: &mut Frame, palette: &Palette, area: Rect) {
    let popup_area = centered_rect(60, 60, area);

    let help_text = r#"
 EXPENSE TUI - Keyboard Shortcuts

 NAVIGATION
   Tab / Shift+Tab    Switch panels

 ADD EXPENSE
   e / Enter          Edit the focused field
   ↑ / ↓              Choose field
   s                  Submit (Enter while editing)

 EXPENSES
   ↑ / ↓              Select row
   d / Delete         Delete selected expense

 MONTHLY SUMMARY
   ← / →              Previous / next month
   ↑ / ↓              Next / previous year

 GENERAL
   t                  Toggle light/dark theme
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let help = Paragraph::new(help_text)
        .block(panel_block(" Help ", palette.focused).style(palette.popup))
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn draw_confirm_popup(f: &mut Frame, palette: &Palette, title: &str, area: Rect) {
    let popup_area = centered_rect(50, 20, area);

    let text = vec![
        Line::from(Span::styled(DELETE_CONFIRM_PROMPT, palette.error)),
        Line::from(format!("\"{}\"", title)),
        Line::from(""),
        Line::from(Span::styled("y: delete   n/Esc: keep", palette.muted)),
    ];

    let confirm = Paragraph::new(text)
        .block(panel_block(" Confirm ", palette.error).style(palette.popup))
        .alignment(Alignment::Center);

    f.render_widget(Clear, popup_area);
    f.render_widget(confirm, popup_area);
}

fn draw_alert_popup(f: &mut Frame, palette: &Palette, message: &str, area: Rect) {
    let popup_area = centered_rect(40, 15, area);

    let text = vec![
        Line::from(Span::styled(message.to_string(), palette.error)),
        Line::from(""),
        Line::from(Span::styled("Press any key", palette.muted)),
    ];

    let alert = Paragraph::new(text)
        .block(panel_block(" Error ", palette.error).style(palette.popup))
        .alignment(Alignment::Center);

    f.render_widget(Clear, popup_area);
    f.render_widget(alert, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ratatui::backend::TestBackend;

    use crate::models::{Expense, ExpenseId, Period};

    fn render(state: &RenderState) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw(f, state)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn lines(buffer: &Buffer) -> Vec<String> {
        buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect())
            .collect()
    }

    fn rent_state() -> RenderState {
        RenderState {
            period: Period::new(2024, 1),
            monthly_total: 1200.0,
            expenses: vec![Expense {
                id: ExpenseId::Number(1),
                title: "Rent".into(),
                category: "Housing".into(),
                amount: 1200.0,
                date: NaiveDate::from_ymd_opt(2024, 1, 1),
                notes: None,
            }],
            ..RenderState::default()
        }
    }

    #[test]
    fn test_draw_rent_total_and_row() {
        let lines = lines(&render(&rent_state()));

        let summary = lines
            .iter()
            .find(|line| line.contains("Total:"))
            .expect("summary line");
        assert!(summary.contains("Year: 2024"));
        assert!(summary.contains("Month: 01"));
        assert!(summary.contains("Total: $1200.00"));

        let row = lines
            .iter()
            .find(|line| line.contains("Rent"))
            .expect("expense row");
        // Cells appear left to right in display order
        let mut rest = row.as_str();
        for cell in ["2024-01-01", "Rent", "Housing", "$1200.00", "-"] {
            let at = rest
                .find(cell)
                .unwrap_or_else(|| panic!("{cell} missing or out of order in {row:?}"));
            rest = &rest[at + cell.len()..];
        }
    }

    #[test]
    fn test_draw_loading_and_empty_list() {
        let loading = RenderState { is_loading: true, ..RenderState::default() };
        assert!(lines(&render(&loading)).iter().any(|line| line.contains("Loading...")));

        let empty = RenderState::default();
        assert!(lines(&render(&empty)).iter().any(|line| line.contains("No expenses yet.")));
    }

    #[test]
    fn test_draw_paints_root_with_theme() {
        let dark = render(&rent_state());
        let light = render(&RenderState { theme: Theme::Light, ..rent_state() });

        // Last cell of the header line is only covered by the root paint
        let corner = dark.area.width as usize - 1;
        assert_eq!(dark.content[corner].bg, Color::Black);
        assert_eq!(light.content[corner].bg, Color::White);
        assert!(lines(&light)[0].contains("Dark mode"));
    }

    #[test]
    fn test_draw_delete_confirmation_popup() {
        let state = RenderState {
            confirm_delete: Some("Rent".into()),
            ..rent_state()
        };
        let lines = lines(&render(&state));
        assert!(lines.iter().any(|line| line.contains(DELETE_CONFIRM_PROMPT)));
        assert!(lines.iter().any(|line| line.contains("\"Rent\"")));
    }

    #[test]
    fn test_themes_paint_different_roots() {
        let dark = Palette::for_theme(Theme::Dark);
        let light = Palette::for_theme(Theme::Light);
        assert_ne!(dark.root, light.root);
        assert_eq!(Palette::for_theme(Theme::Dark.toggled().toggled()), dark);
    }

    #[test]
    fn test_centered_rect_is_inside() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(50, 20, area);
        assert!((49..=51).contains(&popup.width));
        assert!(popup.x > 0 && popup.y > 0 && popup.right() <= area.right());
    }
}
