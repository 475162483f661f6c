use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::Paragraph;

use crate::core::directory::{Directory, FetchStatus};
use crate::core::filters::Mode;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::card::{CARD_HEIGHT, StudentCard, skeleton_paragraph};

pub fn draw_ui(frame: &mut Frame, directory: &Directory, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Length(1), Min(0), Length(1)]);
    let [title_area, criteria_area, list_area, footer_area] = layout.areas(frame.area());

    frame.render_widget(Span::raw(title_text(directory)), title_area);
    frame.render_widget(
        Span::styled(criteria_text(directory), Style::default().add_modifier(Modifier::DIM)),
        criteria_area,
    );

    draw_card_list(frame, list_area, directory, tui);
    draw_footer(frame, footer_area, directory);

    // Filter overlay goes on top of everything
    if let Some(ref mut form) = tui.filter_form {
        form.render(frame, frame.area());
    }
}

fn title_text(directory: &Directory) -> String {
    let summary = directory.summary();
    let mut title = format!("Roster Directory ({} mode)", directory.mode().label());
    if summary.loaded > 0 {
        let total = summary
            .total
            .map(|t| t.to_string())
            .unwrap_or_else(|| "many".to_string());
        title.push_str(&format!(" | Showing {} of {} students", summary.loaded, total));
    }
    if directory.is_loading() {
        title.push_str(" | Loading...");
    }
    title
}

fn criteria_text(directory: &Directory) -> String {
    let filters = directory.filters();
    let active: Vec<String> = filters
        .fields()
        .into_iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .map(|(key, value)| format!("{key}={value}"))
        .collect();
    let filter_part = if active.is_empty() {
        "filters: none".to_string()
    } else {
        format!("filters: {}", active.join(", "))
    };

    let sort_part = match directory.mode() {
        // Cursor order is fixed server-side; sorting is not available.
        Mode::Cursor => "order: id desc (server)".to_string(),
        Mode::Offset => match directory.sort() {
            Some(spec) => format!("sort: {}", spec.query_value()),
            None => "sort: none".to_string(),
        },
    };

    format!("{filter_part} | {sort_part}")
}

fn draw_card_list(frame: &mut Frame, area: Rect, directory: &Directory, tui: &mut TuiState) {
    let students = directory.students();
    tui.cards_total = students.len();
    tui.scroll_offset = tui.scroll_offset.min(students.len().saturating_sub(1));

    if students.is_empty() {
        if directory.is_loading() {
            draw_skeletons(frame, area, usize::MAX);
        } else if directory.status() == &FetchStatus::Idle {
            let empty = Paragraph::new("No students found").alignment(Alignment::Center);
            frame.render_widget(empty, area);
        }
        tui.last_visible_card = 0;
        return;
    }

    let mut y = area.y;
    let mut last_visible = tui.scroll_offset;
    for (index, student) in students.iter().enumerate().skip(tui.scroll_offset) {
        if y >= area.bottom() {
            break;
        }
        let height = CARD_HEIGHT.min(area.bottom() - y);
        let card_area = Rect::new(area.x, y, area.width, height);
        StudentCard::new(student).render(frame, card_area);
        y += CARD_HEIGHT;
        last_visible = index;
    }
    tui.last_visible_card = last_visible;

    // Space below the last card: loading placeholders or the end notice.
    if y < area.bottom() {
        let rest = Rect::new(area.x, y, area.width, area.bottom() - y);
        if directory.is_loading() {
            draw_skeletons(frame, rest, 2);
        } else if !directory.has_more() {
            let notice = Paragraph::new("You've reached the end of the list")
                .alignment(Alignment::Center)
                .style(Style::default().add_modifier(Modifier::DIM));
            frame.render_widget(notice, rest);
        }
    }
}

fn draw_skeletons(frame: &mut Frame, area: Rect, max: usize) {
    let mut y = area.y;
    let mut drawn = 0;
    while y < area.bottom() && drawn < max {
        let height = CARD_HEIGHT.min(area.bottom() - y);
        frame.render_widget(skeleton_paragraph(), Rect::new(area.x, y, area.width, height));
        y += CARD_HEIGHT;
        drawn += 1;
    }
}

fn draw_footer(frame: &mut Frame, area: Rect, directory: &Directory) {
    let footer = match directory.status() {
        FetchStatus::Error(message) => Span::styled(
            format!("Error: {message} (scroll to retry, f to change filters)"),
            Style::default().fg(Color::Red),
        ),
        _ => Span::styled(
            "f filters · m mode · c clear · n/d/j sort · ↑↓ scroll · q quit",
            Style::default().add_modifier(Modifier::DIM),
        ),
    };
    frame.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, Page};
    use crate::core::directory::Directory;
    use crate::core::filters::{Mode, SearchFilters};
    use crate::test_support::envelope;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(directory: &Directory, tui: &mut TuiState) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_ui(f, directory, tui)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_draw_ui_empty_idle() {
        let directory = Directory::new(Mode::Offset);
        let mut tui = TuiState::new();
        let text = render(&directory, &mut tui);
        assert!(text.contains("Roster Directory (offset mode)"));
        assert!(text.contains("No students found"));
        assert!(text.contains("filters: none"));
    }

    #[test]
    fn test_draw_ui_shows_cards_and_summary() {
        let mut directory = Directory::new(Mode::Offset);
        directory.apply(0, Ok(Page::from(envelope(&[1, 2], 17, 5, 0, false))));

        let mut tui = TuiState::new();
        let text = render(&directory, &mut tui);
        assert!(text.contains("Showing 2 of 17 students"));
        assert!(text.contains("Student 1"));
        assert!(text.contains("Student 2"));
        assert_eq!(tui.cards_total, 2);
        assert_eq!(tui.last_visible_card, 1);
    }

    #[test]
    fn test_draw_ui_cursor_mode_shows_many() {
        let mut directory = Directory::new(Mode::Cursor);
        directory.apply(0, Ok(Page::from(crate::test_support::students(&[1, 2, 3, 4]))));

        let mut tui = TuiState::new();
        let text = render(&directory, &mut tui);
        assert!(text.contains("Showing 4 of many students"));
        assert!(text.contains("order: id desc (server)"));
    }

    #[test]
    fn test_draw_ui_error_footer_keeps_cards() {
        let mut directory = Directory::new(Mode::Cursor);
        directory.apply(0, Ok(Page::from(crate::test_support::students(&[1, 2, 3, 4]))));
        directory.begin_fetch().unwrap();
        directory.apply(0, Err(ApiError::Network("boom".to_string())));

        let mut tui = TuiState::new();
        let text = render(&directory, &mut tui);
        assert!(text.contains("Error: network error: boom"));
        assert!(text.contains("Student 1"));
    }

    #[test]
    fn test_draw_ui_active_filters_listed() {
        let mut directory = Directory::new(Mode::Offset);
        directory.set_filters(SearchFilters {
            department: "CS".to_string(),
            ..Default::default()
        });
        let mut tui = TuiState::new();
        let text = render(&directory, &mut tui);
        assert!(text.contains("filters: department=CS"));
    }
}
