use ratatui::{
    layout::{Constraint, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{Focus, Form};

const HELP: &str = "[Tab/Shift+Tab to switch, Enter to confirm, Esc to quit]";

/// Draw the three fields, the last error if any and the keys help
pub fn render(frame: &mut Frame, form: &Form) {
    let [url, _, start, _, end, _, error, help] =
        Layout::vertical([Constraint::Length(1); 8]).areas(frame.area());

    for (focus, area) in Focus::ALL.into_iter().zip([url, start, end]) {
        render_field(frame, form, focus, area);
    }

    if let Some(msg) = form.error() {
        let style = Style::new().fg(Color::Red);
        frame.render_widget(Paragraph::new(Span::styled(msg, style)), error);
    }

    let style = Style::new().fg(Color::DarkGray);
    frame.render_widget(Paragraph::new(Span::styled(HELP, style)), help);
}

fn render_field(frame: &mut Frame, form: &Form, focus: Focus, area: Rect) {
    let field = form.field(focus);
    let is_focused = form.focus() == focus;

    let label_style = if is_focused {
        Style::new().fg(Color::Magenta).add_modifier(Modifier::BOLD)
    } else {
        Style::new()
    };
    let label = Span::styled(format!("{}: ", focus.label()), label_style);

    let label_width = label.width();
    let room = usize::from(area.width).saturating_sub(label_width);

    // Scroll the focused field so that its cursor stays visible
    let scroll = if is_focused {
        scroll_offset(field.before_cursor(), room)
    } else {
        0
    };
    let visible = &field.value()[scroll..];

    let value = if field.value().is_empty() {
        Span::styled(focus.placeholder(), Style::new().fg(Color::DarkGray))
    } else {
        Span::raw(visible)
    };

    frame.render_widget(Paragraph::new(Line::from(vec![label, value])), area);

    if is_focused {
        let before = &field.before_cursor()[scroll..];
        let offset = label_width + Span::raw(before).width();
        let x = area
            .x
            .saturating_add(u16::try_from(offset).unwrap_or(u16::MAX))
            .min(area.right().saturating_sub(1));
        frame.set_cursor_position(Position::new(x, area.y));
    }
}

/// Byte offset of the first shown character, so that the text before the
/// cursor and the cursor itself fit in `room` columns
fn scroll_offset(before_cursor: &str, room: usize) -> usize {
    before_cursor
        .char_indices()
        .map(|(i, _)| i)
        .find(|&i| Span::raw(&before_cursor[i..]).width() < room)
        .unwrap_or(before_cursor.len())
}
