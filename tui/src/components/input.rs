use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use crate::state::AppState;
use crate::utils::layout;

/// Component for rendering the input field and the send control
pub struct InputComponent;

impl InputComponent {
    /// Render the input area
    pub fn render(state: &mut AppState, f: &mut Frame, area: Rect) {
        let chunks = layout::create_input_layout(area);
        Self::render_field(state, f, chunks[0]);
        Self::render_send_control(state, f, chunks[1]);
    }

    fn render_field(state: &AppState, f: &mut Frame, area: Rect) {
        // Available space for text (accounting for borders)
        let text_width = area.width.saturating_sub(2) as usize;
        let text_height = area.height.saturating_sub(2) as usize;

        let (lines, (cursor_line, cursor_col)) =
            layout_input(state.input(), state.input_cursor, text_width);

        // Keep the cursor line on screen
        let scroll_pos = cursor_line.saturating_sub(text_height.saturating_sub(1));
        let display_text = lines
            .into_iter()
            .skip(scroll_pos)
            .take(text_height)
            .collect::<Vec<_>>()
            .join("\n");

        let input_widget = Paragraph::new(display_text).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(" Message (Enter to send, Shift+Enter for newline) "),
        );
        f.render_widget(input_widget, area);

        if state.cursor_visible && text_width > 0 && text_height > 0 {
            let cursor_x = area.x + 1 + cursor_col.min(text_width - 1) as u16;
            let cursor_y = area.y + 1 + (cursor_line - scroll_pos) as u16;
            f.set_cursor(cursor_x, cursor_y);
        }
    }

    fn render_send_control(state: &AppState, f: &mut Frame, area: Rect) {
        let ui = state.widget.ui();
        let style = if ui.send_enabled() {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let button = Paragraph::new(ui.send_label().to_string())
            .style(style)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(style));
        f.render_widget(button, area);
    }
}

/// Hard-wrap input text to `width` columns and locate the cursor.
///
/// Returns the visual lines and the cursor's (line, column). `cursor` is a
/// byte index into `input`.
pub fn layout_input(input: &str, cursor: usize, width: usize) -> (Vec<String>, (usize, usize)) {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut col = 0;
    let mut cursor_pos = None;

    for (i, ch) in input.char_indices() {
        if ch == '\n' {
            if i == cursor {
                cursor_pos = Some((lines.len(), col));
            }
            lines.push(std::mem::take(&mut current));
            col = 0;
            continue;
        }
        if col == width {
            lines.push(std::mem::take(&mut current));
            col = 0;
        }
        if i == cursor {
            cursor_pos = Some((lines.len(), col));
        }
        current.push(ch);
        col += 1;
    }

    let end = (lines.len(), col);
    lines.push(current);
    (lines, cursor_pos.unwrap_or(end))
}
