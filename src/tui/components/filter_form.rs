//! # Filter Form
//!
//! Modal overlay for editing the five search fields. Tab/arrows move
//! between fields, Enter applies, Esc dismisses without applying. The
//! form edits a private copy; nothing reaches the directory until the
//! caller receives [`FilterFormEvent::Apply`].

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::core::filters::SearchFilters;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const FIELD_COUNT: usize = 5;
const FIELD_LABELS: [&str; FIELD_COUNT] = [
    "Name",
    "Email",
    "Phone number",
    "Department",
    "Enrollment number",
];

/// High-level outcome of a key press inside the form.
pub enum FilterFormEvent {
    Apply(SearchFilters),
    Dismiss,
}

pub struct FilterForm {
    values: [String; FIELD_COUNT],
    selected: usize,
}

impl FilterForm {
    /// Opens the form pre-filled with the currently applied criteria.
    pub fn new(current: &SearchFilters) -> Self {
        Self {
            values: [
                current.name.clone(),
                current.email.clone(),
                current.phone_number.clone(),
                current.department.clone(),
                current.enrollment_number.clone(),
            ],
            selected: 0,
        }
    }

    /// The criteria as currently edited.
    pub fn filters(&self) -> SearchFilters {
        SearchFilters {
            name: self.values[0].clone(),
            email: self.values[1].clone(),
            phone_number: self.values[2].clone(),
            department: self.values[3].clone(),
            enrollment_number: self.values[4].clone(),
        }
    }

    fn select_next(&mut self) {
        self.selected = (self.selected + 1) % FIELD_COUNT;
    }

    fn select_prev(&mut self) {
        self.selected = (self.selected + FIELD_COUNT - 1) % FIELD_COUNT;
    }
}

impl EventHandler for FilterForm {
    type Event = FilterFormEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<FilterFormEvent> {
        match event {
            TuiEvent::Submit => Some(FilterFormEvent::Apply(self.filters())),
            TuiEvent::Escape => Some(FilterFormEvent::Dismiss),
            TuiEvent::NextField | TuiEvent::ScrollDown => {
                self.select_next();
                None
            }
            TuiEvent::PrevField | TuiEvent::ScrollUp => {
                self.select_prev();
                None
            }
            TuiEvent::InputChar(c) => {
                self.values[self.selected].push(*c);
                None
            }
            TuiEvent::Backspace => {
                self.values[self.selected].pop();
                None
            }
            _ => None,
        }
    }
}

impl Component for FilterForm {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let popup = centered_rect(area, 50, (FIELD_COUNT + 4) as u16);
        frame.render_widget(Clear, popup);

        let mut lines: Vec<Line> = Vec::with_capacity(FIELD_COUNT + 2);
        for (i, label) in FIELD_LABELS.iter().enumerate() {
            let style = if i == self.selected {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let marker = if i == self.selected { "> " } else { "  " };
            lines.push(Line::from(vec![
                Span::styled(format!("{marker}{label}: "), style),
                Span::raw(self.values[i].clone()),
            ]));
        }
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "Tab next field · Enter apply · Esc cancel",
            Style::default().add_modifier(Modifier::DIM),
        )));

        let form = Paragraph::new(lines).block(Block::bordered().title("Filters"));
        frame.render_widget(form, popup);
    }
}

/// Centers a fixed-height popup of the given percentage width.
fn centered_rect(area: Rect, percent_x: u16, height: u16) -> Rect {
    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .areas(area);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(middle);
    center
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_typing_edits_the_selected_field() {
        let mut form = FilterForm::new(&SearchFilters::default());

        for c in "ada".chars() {
            assert!(form.handle_event(&TuiEvent::InputChar(c)).is_none());
        }
        assert_eq!(form.filters().name, "ada");

        // Tab down to Department and type there.
        form.handle_event(&TuiEvent::NextField);
        form.handle_event(&TuiEvent::NextField);
        form.handle_event(&TuiEvent::NextField);
        form.handle_event(&TuiEvent::InputChar('C'));
        form.handle_event(&TuiEvent::InputChar('S'));

        let filters = form.filters();
        assert_eq!(filters.name, "ada");
        assert_eq!(filters.department, "CS");
        assert!(filters.email.is_empty());
    }

    #[test]
    fn test_backspace_and_field_wrapping() {
        let mut form = FilterForm::new(&SearchFilters::default());
        form.handle_event(&TuiEvent::InputChar('x'));
        form.handle_event(&TuiEvent::Backspace);
        assert!(form.filters().name.is_empty());

        // PrevField from the first entry wraps to the last.
        form.handle_event(&TuiEvent::PrevField);
        form.handle_event(&TuiEvent::InputChar('7'));
        assert_eq!(form.filters().enrollment_number, "7");
    }

    #[test]
    fn test_submit_applies_and_escape_dismisses() {
        let mut form = FilterForm::new(&SearchFilters {
            department: "CS".to_string(),
            ..Default::default()
        });

        match form.handle_event(&TuiEvent::Submit) {
            Some(FilterFormEvent::Apply(filters)) => assert_eq!(filters.department, "CS"),
            _ => panic!("expected Apply"),
        }
        assert!(matches!(
            form.handle_event(&TuiEvent::Escape),
            Some(FilterFormEvent::Dismiss)
        ));
    }

    #[test]
    fn test_form_renders_labels() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut form = FilterForm::new(&SearchFilters::default());

        terminal.draw(|f| form.render(f, f.area())).unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Filters"));
        assert!(text.contains("Department"));
        assert!(text.contains("Enrollment number"));
    }
}
