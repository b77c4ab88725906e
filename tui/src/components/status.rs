use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};
use crate::state::AppState;

/// Component for rendering the status line
pub struct StatusComponent;

impl StatusComponent {
    /// Render the status line
    pub fn render(state: &AppState, f: &mut Frame, area: Rect) {
        let busy = state.widget.is_busy();
        let target = state.widget.endpoint_info().target;

        let status_text = if busy {
            format!("● Waiting for {} | Esc/Ctrl+C to quit", target)
        } else {
            format!(
                "Ready - {} | Enter to send, ↑↓/PgUp/PgDn to scroll, End to follow, Esc to quit",
                target
            )
        };

        let status = Paragraph::new(status_text).style(if busy {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::Green)
        });

        f.render_widget(status, area);
    }
}
