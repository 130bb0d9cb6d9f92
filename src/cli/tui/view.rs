//! Phonebook screen: form, filter, contact list, status bar and toasts

use std::time::Instant;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use super::app::{App, Focus};
use crate::cli::form::Field;
use crate::cli::notify::{Toast, ToastKind};
use crate::storage::{ToastPosition, ToastTheme};

const TOAST_WIDTH: u16 = 42;

/// Draw the whole screen
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(4), // Form
            Constraint::Length(3), // Filter
            Constraint::Min(3),    // Contacts
            Constraint::Length(3), // Status bar
        ])
        .split(area);

    let title = Paragraph::new("Phonebook")
        .style(Style::default().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    draw_form(frame, app, chunks[1]);
    draw_filter(frame, app, chunks[2]);
    draw_contacts(frame, app, chunks[3]);
    draw_status_bar(frame, app, chunks[4]);
    draw_toasts(frame, app, area);
}

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

fn draw_form(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus() == Focus::Form;
    let form = app.form();

    let field_line = |field: Field, value: &str| {
        let active = focused && form.focus() == field;
        let marker = if active { "> " } else { "  " };
        let style = if active {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        Line::from(vec![
            Span::raw(marker),
            Span::styled(format!("{:<8}", format!("{}:", field.label())), style),
            Span::raw(value.to_string()),
        ])
    };

    let lines = vec![
        field_line(Field::Name, form.name()),
        field_line(Field::Number, form.number()),
    ];

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title("Add contact [Enter]")
            .borders(Borders::ALL)
            .border_style(border_style(focused)),
    );
    frame.render_widget(paragraph, area);

    if focused {
        let (row, value) = match form.focus() {
            Field::Name => (0, form.name()),
            Field::Number => (1, form.number()),
        };
        let y = area.y + 1 + row;
        frame.set_cursor_position(Position::new(cursor_x(area, 1 + 2 + 8, value), y));
    }
}

fn draw_filter(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus() == Focus::Filter;
    let filter = app.store().filter();

    let paragraph = Paragraph::new(filter.to_string()).block(
        Block::default()
            .title("Find contacts by name")
            .borders(Borders::ALL)
            .border_style(border_style(focused)),
    );
    frame.render_widget(paragraph, area);

    if focused {
        frame.set_cursor_position(Position::new(cursor_x(area, 1, filter), area.y + 1));
    }
}

/// Column after `text` drawn at `offset` inside `area`, kept within the border
fn cursor_x(area: Rect, offset: u16, text: &str) -> u16 {
    let width = u16::try_from(Line::from(text).width()).unwrap_or(u16::MAX);
    area.x
        .saturating_add(offset)
        .saturating_add(width)
        .min(area.right().saturating_sub(2))
}

fn draw_contacts(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus() == Focus::List;
    let store = app.store();

    let items: Vec<ListItem> = store
        .visible_contacts()
        .map(|c| ListItem::new(format!("{}: {}", c.name, c.number)))
        .collect();
    let shown = items.len();

    let title = if store.filter().is_empty() {
        format!("Contacts ({})", store.len())
    } else {
        format!("Contacts ({} of {})", shown, store.len())
    };

    let list = List::new(items)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(border_style(focused)),
        )
        .highlight_style(
            Style::default()
                .bg(if focused { Color::DarkGray } else { Color::Reset })
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if shown > 0 {
        state.select(Some(app.selected()));
    }

    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let hint = match app.focus() {
        Focus::Form => "[Tab] next field  [Enter] add  [Esc] quit",
        Focus::Filter => "type to filter  [Enter] list  [Tab] next  [Esc] quit",
        Focus::List => "[j/k] move  [d] delete  [/] filter  [n] new  [q] quit",
    };

    let paragraph = Paragraph::new(hint).block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn draw_toasts(frame: &mut Frame, app: &App, area: Rect) {
    let queue = app.toasts();
    let config = queue.config();
    let now = Instant::now();
    let height = if config.hide_progress_bar { 3 } else { 4 };

    for (index, toast) in queue.toasts().iter().rev().enumerate() {
        let Some(rect) = toast_area(area, config.position, index as u16, height) else {
            break;
        };

        let mut lines = vec![Line::from(toast.message.clone())];
        if !config.hide_progress_bar {
            lines.push(progress_line(toast, now, queue.auto_close(), rect.width.saturating_sub(2)));
        }

        let (style, border) = toast_style(toast.kind, config.theme);
        let paragraph = Paragraph::new(lines).style(style).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border),
        );

        frame.render_widget(Clear, rect);
        frame.render_widget(paragraph, rect);
    }
}

fn progress_line(toast: &Toast, now: Instant, auto_close: Option<std::time::Duration>, width: u16) -> Line<'static> {
    match toast.remaining(now, auto_close) {
        Some(fraction) => {
            let filled = (fraction * width as f64).round() as usize;
            Line::from("▔".repeat(filled))
        }
        None => Line::from(""),
    }
}

fn toast_style(kind: ToastKind, theme: ToastTheme) -> (Style, Style) {
    let accent = match kind {
        ToastKind::Success => Color::Green,
        ToastKind::Error => Color::Red,
    };

    match theme {
        ToastTheme::Colored => {
            let fg = match kind {
                ToastKind::Success => Color::Black,
                ToastKind::Error => Color::White,
            };
            let style = Style::default().bg(accent).fg(fg);
            (style, style)
        }
        ToastTheme::Dark => (
            Style::default().bg(Color::Black).fg(Color::White),
            Style::default().fg(accent),
        ),
        ToastTheme::Light => (
            Style::default().bg(Color::White).fg(Color::Black),
            Style::default().fg(accent),
        ),
    }
}

/// Where the `index`-th newest toast goes, stacking away from the configured corner.
///
/// Returns None once the stack no longer fits on screen.
pub fn toast_area(area: Rect, position: ToastPosition, index: u16, height: u16) -> Option<Rect> {
    let width = TOAST_WIDTH.min(area.width);
    let offset = index.checked_mul(height)?;
    if offset.checked_add(height)? > area.height {
        return None;
    }

    let x = match position {
        ToastPosition::TopLeft | ToastPosition::BottomLeft => area.x,
        ToastPosition::TopCenter | ToastPosition::BottomCenter => area.x + (area.width - width) / 2,
        ToastPosition::TopRight | ToastPosition::BottomRight => area.x + area.width - width,
    };

    let y = if position.is_top() {
        area.y + offset
    } else {
        area.y + area.height - height - offset
    };

    Some(Rect::new(x, y, width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Contact, ContactStore};
    use crate::storage::NotifyConfig;
    use ratatui::backend::TestBackend;

    #[test]
    fn bottom_left_stacks_upwards() {
        let area = Rect::new(0, 0, 100, 30);

        let first = toast_area(area, ToastPosition::BottomLeft, 0, 4).unwrap();
        let second = toast_area(area, ToastPosition::BottomLeft, 1, 4).unwrap();

        assert_eq!(first, Rect::new(0, 26, TOAST_WIDTH, 4));
        assert_eq!(second, Rect::new(0, 22, TOAST_WIDTH, 4));
    }

    #[test]
    fn top_right_stacks_downwards() {
        let area = Rect::new(0, 0, 100, 30);

        let first = toast_area(area, ToastPosition::TopRight, 0, 3).unwrap();
        let second = toast_area(area, ToastPosition::TopRight, 1, 3).unwrap();

        assert_eq!(first, Rect::new(100 - TOAST_WIDTH, 0, TOAST_WIDTH, 3));
        assert_eq!(second.y, 3);
    }

    #[test]
    fn centered_and_narrow_screens() {
        let area = Rect::new(0, 0, 20, 10);
        let rect = toast_area(area, ToastPosition::TopCenter, 0, 3).unwrap();

        assert_eq!(rect, Rect::new(0, 0, 20, 3));
        assert!(toast_area(area, ToastPosition::TopCenter, 3, 3).is_none());
    }

    #[test]
    fn cursor_follows_display_width() {
        let area = Rect::new(2, 0, 40, 3);

        assert_eq!(cursor_x(area, 1, "abc"), 6);
        assert_eq!(cursor_x(area, 1, "李雷"), 7);
        assert_eq!(cursor_x(area, 1, ""), 3);
    }

    #[test]
    fn cursor_stays_inside_the_box_for_long_input() {
        let area = Rect::new(0, 0, 40, 3);

        assert_eq!(cursor_x(area, 11, &"x".repeat(70_000)), 38);
        assert_eq!(cursor_x(area, 11, &"李".repeat(40_000)), 38);
    }

    #[test]
    fn renders_contacts_and_toast() {
        let store = ContactStore::with_contacts(vec![Contact::new(
            "id-1".parse().unwrap(),
            "Rosie Simpson",
            "459-12-56",
        )]);
        let mut app = App::new(store, NotifyConfig::default());
        app.handle_key(crossterm::event::KeyEvent::new(
            crossterm::event::KeyCode::Enter,
            crossterm::event::KeyModifiers::NONE,
        ));

        let mut terminal = ratatui::Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| draw(frame, &app)).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|cell| cell.symbol()).collect();

        assert!(text.contains("Phonebook"));
        assert!(text.contains("Rosie Simpson: 459-12-56"));
        assert!(text.contains("Name is required"));
    }
}
