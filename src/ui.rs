//! Terminal UI for the comparison screen
//!
//! This module maps key presses onto [`PriceComparator`] operations and
//! renders the entries, their unit prices and the result banner using
//! ratatui.

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tracing::debug;

use crate::comparator::{ComparisonResult, Field, PriceComparator};
use crate::config::DisplayConfig;
use crate::messages::{self, StatusMessage};

/// Rows taken by one product card, borders included
const CARD_HEIGHT: u16 = 5;

/// The field currently receiving typed characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Focus {
    pub entry: usize,
    pub field: Field,
}

impl Default for Focus {
    fn default() -> Self {
        Self {
            entry: 0,
            field: Field::Price,
        }
    }
}

/// Application state for the comparison screen
pub struct CompareApp {
    comparator: PriceComparator,
    result: Option<ComparisonResult>,
    status: Option<StatusMessage>,
    focus: Focus,
    last_calculated: Option<DateTime<Local>>,
    display: DisplayConfig,
}

impl CompareApp {
    /// Create a new screen with two empty entries
    pub fn new(display: DisplayConfig) -> Self {
        Self::with_comparator(PriceComparator::new(), display)
    }

    pub fn with_comparator(comparator: PriceComparator, display: DisplayConfig) -> Self {
        Self {
            comparator,
            result: None,
            status: None,
            focus: Focus::default(),
            last_calculated: None,
            display,
        }
    }

    pub fn comparator(&self) -> &PriceComparator {
        &self.comparator
    }

    /// Result of the last calculation, if any
    pub fn result(&self) -> Option<&ComparisonResult> {
        self.result.as_ref()
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Handle keyboard input
    ///
    /// Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return true,
            KeyCode::Char('c') if ctrl => return true,
            KeyCode::Char('n') if ctrl => self.add_entry(),
            KeyCode::Char('d') if ctrl => self.remove_focused(),
            KeyCode::Char('r') if ctrl => self.reset(),
            KeyCode::Enter => self.calculate(),
            KeyCode::Tab | KeyCode::Down => self.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.focus_prev(),
            KeyCode::Backspace => self.delete_char(),
            KeyCode::Char(c) if !ctrl => self.insert_char(c),
            _ => {}
        }
        false
    }

    /// Append an entry and move focus to its price
    pub fn add_entry(&mut self) {
        self.comparator.add_entry();
        self.focus = Focus {
            entry: self.comparator.len() - 1,
            field: Field::Price,
        };
    }

    /// Remove the focused entry; ignored when only two remain
    pub fn remove_focused(&mut self) {
        if self.comparator.remove_entry(self.focus.entry) {
            self.focus.entry = self.focus.entry.min(self.comparator.len() - 1);
        }
    }

    pub fn reset(&mut self) {
        self.comparator.reset();
        self.result = None;
        self.status = None;
        self.focus = Focus::default();
        self.last_calculated = None;
    }

    /// Recompute unit prices and the result banner
    pub fn calculate(&mut self) {
        let result = self.comparator.calculate();
        let status = StatusMessage::from_result(&result, &self.display);
        debug!(error = status.is_error, status = %status, "Calculated");

        self.result = Some(result);
        self.status = Some(status);
        self.last_calculated = Some(Local::now());
    }

    fn focus_next(&mut self) {
        let Focus { entry, field } = self.focus;
        self.focus = match field {
            Field::Price => Focus {
                entry,
                field: Field::Amount,
            },
            Field::Amount => Focus {
                entry: (entry + 1) % self.comparator.len(),
                field: Field::Price,
            },
        };
    }

    fn focus_prev(&mut self) {
        let Focus { entry, field } = self.focus;
        self.focus = match field {
            Field::Amount => Focus {
                entry,
                field: Field::Price,
            },
            Field::Price => Focus {
                entry: entry.checked_sub(1).unwrap_or(self.comparator.len() - 1),
                field: Field::Amount,
            },
        };
    }

    fn focused_text(&self) -> &str {
        self.comparator
            .entries()
            .get(self.focus.entry)
            .map(|entry| entry.field(self.focus.field))
            .unwrap_or_default()
    }

    fn insert_char(&mut self, c: char) {
        let mut text = self.focused_text().to_string();
        text.push(c);
        self.comparator
            .update_entry(self.focus.entry, self.focus.field, text);
    }

    fn delete_char(&mut self) {
        let mut text = self.focused_text().to_string();
        if text.pop().is_some() {
            self.comparator
                .update_entry(self.focus.entry, self.focus.field, text);
        }
    }

    fn is_lowest(&self, index: usize) -> bool {
        self.result
            .as_ref()
            .is_some_and(|result| result.is_lowest(index))
    }

    /// Render the UI
    pub fn render(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // Header
                Constraint::Min(CARD_HEIGHT), // Entries
                Constraint::Length(4), // Result
            ])
            .split(f.area());

        self.render_header(f, chunks[0]);
        self.render_entries(f, chunks[1]);
        self.render_result(f, chunks[2]);
    }

    /// Render header with title and key hints
    fn render_header(&self, f: &mut Frame, area: Rect) {
        let last_calculated = self
            .last_calculated
            .map(|t| t.format("%H:%M:%S").to_string())
            .unwrap_or_else(|| "Never".to_string());

        let remove_hint = if self.comparator.can_remove() {
            " | Ctrl+D remove"
        } else {
            ""
        };

        let title = vec![
            Line::from(vec![
                Span::styled(
                    messages::TITLE,
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("  |  Last calculation: "),
                Span::styled(last_calculated, Style::default().fg(Color::Green)),
            ]),
            Line::from(Span::styled(
                messages::SUBTITLE,
                Style::default().fg(Color::Magenta),
            )),
            Line::from(Span::styled(
                format!(
                    "Tab/↑↓ move | Enter calculate | Ctrl+N add{} | Ctrl+R reset | Esc quit",
                    remove_hint
                ),
                Style::default().fg(Color::DarkGray),
            )),
        ];

        let paragraph = Paragraph::new(title).block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    /// Render one card per entry, scrolled so the focused one is visible
    fn render_entries(&self, f: &mut Frame, area: Rect) {
        let visible = usize::from((area.height / CARD_HEIGHT).max(1));
        let first = (self.focus.entry + 1).saturating_sub(visible);
        let shown = visible.min(self.comparator.len() - first);

        let mut constraints = vec![Constraint::Length(CARD_HEIGHT); shown];
        constraints.push(Constraint::Min(0));
        let slots = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        for (slot, index) in (first..first + shown).enumerate() {
            self.render_card(f, slots[slot], index);
        }
    }

    fn render_card(&self, f: &mut Frame, area: Rect, index: usize) {
        let entry = &self.comparator.entries()[index];
        let lowest = self.is_lowest(index);
        let focused = self.focus.entry == index;

        let mut heading = vec![Span::styled(
            messages::product_heading(index),
            Style::default().add_modifier(Modifier::BOLD),
        )];
        if lowest {
            heading.push(Span::styled(
                format!("  ★ {}", messages::BEST_PRICE_BADGE),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        let inputs = Line::from(vec![
            Span::raw(format!("{}: ", messages::PRICE_LABEL)),
            self.input_span(entry.field(Field::Price), focused, Field::Price),
            Span::raw(format!("   {}: ", messages::AMOUNT_LABEL)),
            self.input_span(entry.field(Field::Amount), focused, Field::Amount),
        ]);

        let unit_text = messages::unit_price_text(
            self.result.as_ref().and_then(|r| r.unit_price(index)),
            &self.display,
        );
        let unit_line = Line::from(vec![
            Span::raw(format!("{}: ", messages::UNIT_PRICE_LABEL)),
            Span::styled(
                unit_text,
                if lowest {
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                },
            ),
        ]);

        let border_style = if lowest {
            Style::default().fg(Color::Green)
        } else if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };

        let paragraph = Paragraph::new(vec![Line::from(heading), inputs, unit_line]).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style),
        );
        f.render_widget(paragraph, area);
    }

    fn input_span(&self, text: &str, focused_entry: bool, field: Field) -> Span<'static> {
        let active = focused_entry && self.focus.field == field;
        let shown = if text.is_empty() && !active {
            "0".to_string()
        } else {
            text.to_string()
        };
        let content = if active {
            format!("[{}▏]", shown)
        } else {
            format!("[{}]", shown)
        };

        let style = if active {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else if text.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };
        Span::styled(content, style)
    }

    /// Render result banner
    fn render_result(&self, f: &mut Frame, area: Rect) {
        let content = match &self.status {
            Some(status) if status.is_error => vec![Line::from(Span::styled(
                status.headline.clone(),
                Style::default().fg(Color::Red),
            ))],
            Some(status) => {
                let mut lines = vec![Line::from(Span::styled(
                    status.headline.clone(),
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ))];
                if let Some(detail) = &status.detail {
                    lines.push(Line::from(Span::styled(
                        detail.clone(),
                        Style::default().fg(Color::DarkGray),
                    )));
                }
                lines
            }
            None => vec![Line::from(Span::styled(
                "Enter prices and amounts, then press Enter to calculate.",
                Style::default().fg(Color::Yellow),
            ))],
        };

        let paragraph = Paragraph::new(content).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Result"),
        );
        f.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(app: &mut CompareApp, code: KeyCode) -> bool {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(app: &mut CompareApp, c: char) -> bool {
        app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    fn type_text(app: &mut CompareApp, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_compare_app_creation() {
        let app = CompareApp::new(DisplayConfig::default());
        assert_eq!(app.comparator().len(), 2);
        assert!(app.result().is_none());
        assert!(app.status().is_none());
        assert_eq!(app.focus(), Focus::default());
    }

    #[test]
    fn test_focus_wraps_forward_and_backward() {
        let mut app = CompareApp::new(DisplayConfig::default());
        press(&mut app, KeyCode::BackTab);
        assert_eq!(
            app.focus(),
            Focus {
                entry: 1,
                field: Field::Amount
            }
        );
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus(), Focus::default());
    }

    #[test]
    fn test_typing_and_backspace_edit_focused_field() {
        let mut app = CompareApp::new(DisplayConfig::default());
        type_text(&mut app, "12x");
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "3");

        let entry = &app.comparator().entries()[0];
        assert_eq!(entry.price, "12");
        assert_eq!(entry.amount, "3");
    }

    #[test]
    fn test_backspace_on_empty_field_is_noop() {
        let mut app = CompareApp::new(DisplayConfig::default());
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.comparator().entries()[0].price, "");
    }

    #[test]
    fn test_add_moves_focus_and_remove_clamps_it() {
        let mut app = CompareApp::new(DisplayConfig::default());
        ctrl(&mut app, 'n');
        assert_eq!(app.focus().entry, 2);

        ctrl(&mut app, 'd');
        assert_eq!(app.comparator().len(), 2);
        assert_eq!(app.focus().entry, 1);

        ctrl(&mut app, 'd');
        assert_eq!(app.comparator().len(), 2);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = CompareApp::new(DisplayConfig::default());
        assert!(!press(&mut app, KeyCode::Char('q')));
        assert!(press(&mut app, KeyCode::Esc));
        assert!(ctrl(&mut app, 'c'));
    }

    #[test]
    fn test_release_events_are_ignored() {
        let mut app = CompareApp::new(DisplayConfig::default());
        let mut key = KeyEvent::new(KeyCode::Char('7'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        app.handle_key(key);
        assert_eq!(app.comparator().entries()[0].price, "");
    }

    #[test]
    fn test_reset_clears_result() {
        let mut app = CompareApp::new(DisplayConfig::default());
        type_text(&mut app, "5");
        press(&mut app, KeyCode::Enter);
        assert!(app.result().is_some());

        ctrl(&mut app, 'r');
        assert!(app.result().is_none());
        assert!(app.status().is_none());
        assert_eq!(app.comparator().entries()[0].price, "");
    }
}
