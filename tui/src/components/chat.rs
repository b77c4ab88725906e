use chatbox_core::{Message, Sender};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};
use crate::state::AppState;

/// Component for rendering the transcript panel
pub struct ChatComponent;

impl ChatComponent {
    /// Render the transcript
    pub fn render(state: &mut AppState, f: &mut Frame, area: Rect) {
        let available_width = area.width.saturating_sub(4) as usize; // Account for borders and padding

        let chat_lines = if state.widget.transcript().is_empty() {
            Self::welcome_lines(state)
        } else {
            Self::transcript_lines(state.widget.transcript().messages(), available_width)
        };

        // Calculate scroll limits
        let content_height = chat_lines.len();
        let visible_height = area.height.saturating_sub(2) as usize; // Account for borders
        let max_scroll = content_height.saturating_sub(visible_height);

        let scroll_pos = if state.widget.transcript().follows_latest() {
            max_scroll
        } else {
            state.chat_scroll.min(max_scroll)
        };

        // Keep the stored position in range so scrolling up starts from what is on screen
        state.chat_scroll = scroll_pos;

        let visible_lines: Vec<Line> = chat_lines
            .into_iter()
            .skip(scroll_pos)
            .take(visible_height)
            .collect();

        let title = if state.widget.transcript().follows_latest() {
            " Chat "
        } else {
            " Chat [scrolled - End to follow] "
        };

        let chat = Paragraph::new(Text::from(visible_lines))
            .block(Block::default().borders(Borders::ALL).title(title));

        f.render_widget(chat, area);

        if content_height > visible_height {
            let scrollbar = Scrollbar::default()
                .orientation(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("↑"))
                .end_symbol(Some("↓"));
            let mut scrollbar_state = ScrollbarState::new(max_scroll.max(1)).position(scroll_pos);
            f.render_stateful_widget(
                scrollbar,
                area.inner(&ratatui::layout::Margin { vertical: 1, horizontal: 0 }),
                &mut scrollbar_state,
            );
        }
    }

    fn welcome_lines(state: &AppState) -> Vec<Line<'static>> {
        let info = state.widget.endpoint_info();
        vec![Line::from(Span::styled(
            format!(
                "Connected to {} ({}). Type a message and press Enter.",
                info.target, info.name
            ),
            Style::default().fg(Color::Yellow),
        ))]
    }

    /// All visual lines of the transcript, with a blank line between messages
    pub fn transcript_lines(messages: &[Message], width: usize) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for message in messages {
            lines.extend(Self::message_lines(message, width));
            lines.push(Line::from(""));
        }
        lines
    }

    /// Visual lines of one message: the label on the first line, every `\n`
    /// starting a new line, long lines wrapped to `width`
    pub fn message_lines(message: &Message, width: usize) -> Vec<Line<'static>> {
        let color = match message.sender() {
            Sender::User => Color::Cyan,
            Sender::Bot => Color::Green,
        };
        let label = format!("{}: ", message.label());
        let indent = " ".repeat(label.chars().count());
        let text_width = width.saturating_sub(indent.len()).max(1);

        let mut lines = Vec::new();
        for text_line in message.lines() {
            for segment in wrap_text(text_line, text_width) {
                let lead = if lines.is_empty() {
                    Span::styled(label.clone(), Style::default().fg(color).add_modifier(Modifier::BOLD))
                } else {
                    Span::raw(indent.clone())
                };
                lines.push(Line::from(vec![lead, Span::styled(segment, Style::default().fg(color))]));
            }
        }
        lines
    }
}

/// Word-wrap one line of text. An empty line stays one empty line; words
/// longer than `width` are split.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split(' ') {
        let mut word_len = word.chars().count();
        let needed = if current_len == 0 { word_len } else { current_len + 1 + word_len };

        if needed <= width {
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.push_str(word);
            current_len += word_len;
            continue;
        }

        if current_len > 0 {
            lines.push(std::mem::take(&mut current));
        }

        let mut rest: &str = word;
        while word_len > width {
            let split = rest
                .char_indices()
                .nth(width)
                .map_or(rest.len(), |(i, _)| i);
            lines.push(rest[..split].to_string());
            rest = &rest[split..];
            word_len -= width;
        }
        current.push_str(rest);
        current_len = word_len;
    }

    lines.push(current);
    lines
}
