//! # Student Card
//!
//! One bordered card per student: name in the border title, contact and
//! enrollment details inside. Cards have a fixed height so the list can
//! scroll by whole cards without measuring.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::api::types::Student;
use crate::tui::component::Component;

/// Rows a rendered card occupies: three content lines plus borders.
pub const CARD_HEIGHT: u16 = 5;

pub struct StudentCard<'a> {
    pub student: &'a Student,
}

impl<'a> StudentCard<'a> {
    pub fn new(student: &'a Student) -> Self {
        Self { student }
    }

    pub fn paragraph(&self) -> Paragraph<'a> {
        let s = self.student;
        let dim = Style::default().add_modifier(Modifier::DIM);

        let lines = vec![
            Line::from(vec![
                Span::styled(s.department.as_str(), Style::default().fg(Color::Yellow)),
                Span::raw("  "),
                Span::styled(s.enrollment_number.as_str(), Style::default().fg(Color::Magenta)),
            ]),
            Line::from(vec![
                Span::styled(s.email.as_str(), Style::default().fg(Color::Cyan)),
                Span::raw("  "),
                Span::raw(s.phone_number.as_str()),
            ]),
            Line::from(vec![
                Span::styled(format!("born {}", s.dob), dim),
                Span::styled(format!("  joined {}", s.joining_date), dim),
                Span::styled(format!("  {}", s.address), dim),
            ]),
        ];

        Paragraph::new(lines).block(
            Block::bordered()
                .title(s.name.as_str())
                .title_style(Style::default().fg(Color::Green)),
        )
    }
}

impl Component for StudentCard<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(self.paragraph(), area);
    }
}

/// Placeholder card shown while a page is loading.
pub fn skeleton_paragraph() -> Paragraph<'static> {
    let dim = Style::default().fg(Color::DarkGray);
    let lines = vec![
        Line::from(Span::styled("░░░░░░░░  ░░░░░░", dim)),
        Line::from(Span::styled("░░░░░░░░░░░░░░░░░░░░░░", dim)),
        Line::from(Span::styled("░░░░░░░░░░░░░░", dim)),
    ];
    Paragraph::new(lines).block(Block::bordered().border_style(dim))
}
