use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};
use tracing::debug;
use crate::state::AppState;

/// Typed as the whole input, exits instead of being sent
const QUIT_COMMAND: &str = "/quit";

/// Handles input events for the application
pub struct InputHandler;

impl InputHandler {
    /// Handle input events (keyboard and mouse)
    pub fn handle_event(state: &mut AppState, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                Self::handle_key_event(state, key);
            }
            Event::Mouse(mouse_event) => {
                Self::handle_mouse_event(state, mouse_event);
            }
            Event::Paste(text) => {
                // Pasted line breaks arrive as \r\n or a bare \r
                let text = text.replace("\r\n", "\n").replace('\r', "\n");
                for ch in text.chars() {
                    Self::insert_char(state, ch);
                }
            }
            _ => {}
        }
    }

    /// Handle one key press
    pub fn handle_key_event(state: &mut AppState, key: KeyEvent) {
        let modifiers = key.modifiers;

        match key.code {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                Self::request_quit(state);
            }
            KeyCode::Esc => {
                Self::request_quit(state);
            }
            KeyCode::Enter if modifiers.contains(KeyModifiers::SHIFT) => {
                Self::insert_char(state, '\n');
            }
            KeyCode::Enter => {
                // Enter never lands in the input field
                Self::submit_input(state);
            }
            KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
                Self::insert_char(state, c);
            }
            KeyCode::Backspace => {
                Self::delete_char(state);
            }
            KeyCode::Delete => {
                Self::delete_char_forward(state);
            }
            KeyCode::Left => {
                Self::move_cursor_left(state);
            }
            KeyCode::Right => {
                Self::move_cursor_right(state);
            }
            KeyCode::Home => {
                state.input_cursor = 0;
            }
            KeyCode::End => {
                // Jump to end of input and back to the newest message
                state.input_cursor = state.input().len();
                state.widget.transcript_mut().set_follow_latest(true);
            }
            KeyCode::Up => Self::scroll_chat_up(state, 1),
            KeyCode::Down => Self::scroll_chat_down(state, 1),
            KeyCode::PageUp => Self::scroll_chat_up(state, 10),
            KeyCode::PageDown => Self::scroll_chat_down(state, 10),
            _ => {}
        }
    }

    fn handle_mouse_event(state: &mut AppState, mouse_event: MouseEvent) {
        match mouse_event.kind {
            MouseEventKind::ScrollUp => Self::scroll_chat_up(state, 3),
            MouseEventKind::ScrollDown => Self::scroll_chat_down(state, 3),
            _ => {}
        }
    }

    fn scroll_chat_up(state: &mut AppState, lines: usize) {
        state.chat_scroll = state.chat_scroll.saturating_sub(lines);
        // Stop following new messages while the user reads back
        state.widget.transcript_mut().set_follow_latest(false);
    }

    fn scroll_chat_down(state: &mut AppState, lines: usize) {
        // Clamped to the bottom when the chat panel renders
        state.chat_scroll = state.chat_scroll.saturating_add(lines);
        state.widget.transcript_mut().set_follow_latest(false);
    }

    /// Ask the main loop to exit via the event bus
    fn request_quit(state: &mut AppState) {
        if state.event_sender.send_quit().is_err() {
            state.should_quit = true;
        }
    }

    /// Submit the current input to the widget
    fn submit_input(state: &mut AppState) {
        let raw = state.input().to_string();
        if raw.trim() == QUIT_COMMAND {
            Self::request_quit(state);
            return;
        }

        if state.widget.submit_detached(&raw, &state.event_sender) {
            state.input_cursor = 0;
        } else {
            debug!("Nothing submitted");
        }
    }

    /// Insert a character at the cursor position
    fn insert_char(state: &mut AppState, ch: char) {
        let cursor = state.input_cursor.min(state.input().len());
        state.widget.ui_mut().input_value.insert(cursor, ch);
        state.input_cursor = cursor + ch.len_utf8();
    }

    /// Delete character before cursor
    fn delete_char(state: &mut AppState) {
        let previous = state.input()[..state.input_cursor].char_indices().next_back();
        if let Some((start, _)) = previous {
            state.widget.ui_mut().input_value.remove(start);
            state.input_cursor = start;
        }
    }

    /// Delete character under cursor
    fn delete_char_forward(state: &mut AppState) {
        if state.input_cursor < state.input().len() {
            let cursor = state.input_cursor;
            state.widget.ui_mut().input_value.remove(cursor);
        }
    }

    /// Move cursor left
    fn move_cursor_left(state: &mut AppState) {
        let previous = state.input()[..state.input_cursor].char_indices().next_back();
        if let Some((start, _)) = previous {
            state.input_cursor = start;
        }
    }

    /// Move cursor right
    fn move_cursor_right(state: &mut AppState) {
        let next = state.input()[state.input_cursor..].chars().next();
        if let Some(ch) = next {
            state.input_cursor += ch.len_utf8();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::EventHandler;
    use chatbox_core::endpoint::MockEndpoint;
    use chatbox_core::{AppEvent, ChatWidget, EventBus, Message};
    use std::sync::Arc;
    use std::time::Duration;

    fn state_with_mock() -> (AppState, Arc<MockEndpoint>) {
        let endpoint = Arc::new(MockEndpoint::new().with_delay(Duration::from_millis(10)));
        let state = AppState::new(ChatWidget::new(endpoint.clone()), EventBus::new());
        (state, endpoint)
    }

    fn press(state: &mut AppState, code: KeyCode) {
        InputHandler::handle_key_event(state, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(state: &mut AppState, text: &str) {
        for ch in text.chars() {
            press(state, KeyCode::Char(ch));
        }
    }

    #[test]
    fn test_editing_keeps_cursor_on_char_boundaries() {
        let (mut state, _) = state_with_mock();
        type_text(&mut state, "héllo");
        assert_eq!(state.input(), "héllo");
        assert_eq!(state.input_cursor, "héllo".len());

        press(&mut state, KeyCode::Left);
        press(&mut state, KeyCode::Left);
        press(&mut state, KeyCode::Left);
        press(&mut state, KeyCode::Left);
        press(&mut state, KeyCode::Backspace);
        assert_eq!(state.input(), "éllo");
        assert_eq!(state.input_cursor, 0);

        press(&mut state, KeyCode::Delete);
        assert_eq!(state.input(), "llo");

        press(&mut state, KeyCode::Right);
        type_text(&mut state, "X");
        assert_eq!(state.input(), "lXlo");
    }

    #[test]
    fn test_shift_enter_inserts_newline() {
        let (mut state, endpoint) = state_with_mock();
        type_text(&mut state, "a");
        InputHandler::handle_key_event(
            &mut state,
            KeyEvent::new(KeyCode::Enter, KeyModifiers::SHIFT),
        );
        type_text(&mut state, "b");

        assert_eq!(state.input(), "a\nb");
        assert!(state.widget.transcript().is_empty());
        assert_eq!(endpoint.calls(), 0);
    }

    #[tokio::test]
    async fn test_enter_submits_and_clears_input() {
        let (mut state, _) = state_with_mock();
        type_text(&mut state, "hi");
        press(&mut state, KeyCode::Enter);

        assert_eq!(state.input(), "");
        assert_eq!(state.input_cursor, 0);
        assert_eq!(state.widget.transcript().messages(), &[Message::user("hi")]);
        assert!(!state.widget.ui().send_enabled());

        // Typing continues while the request is in flight, but Enter waits
        type_text(&mut state, "next");
        press(&mut state, KeyCode::Enter);
        assert_eq!(state.input(), "next");
        assert_eq!(state.widget.transcript().len(), 1);

        match state.event_receiver.recv().await {
            Some(AppEvent::ReplyReady(reply)) => state.widget.finish(reply),
            other => panic!("Expected ReplyReady, got {:?}", other),
        }
        assert!(state.widget.ui().send_enabled());
    }

    #[test]
    fn test_blank_enter_does_nothing() {
        let (mut state, endpoint) = state_with_mock();
        type_text(&mut state, "   ");
        press(&mut state, KeyCode::Enter);

        assert_eq!(state.input(), "   ");
        assert!(state.widget.transcript().is_empty());
        assert!(state.widget.ui().send_enabled());
        assert_eq!(endpoint.calls(), 0);
    }

    /// Apply every queued app event, as the main loop would
    fn drain_events(state: &mut AppState) {
        while let Ok(event) = state.event_receiver.try_recv() {
            EventHandler::handle_event(state, event);
        }
    }

    #[test]
    fn test_quit_command_and_keys() {
        let (mut state, endpoint) = state_with_mock();
        type_text(&mut state, "/quit");
        press(&mut state, KeyCode::Enter);
        assert!(!state.should_quit);
        drain_events(&mut state);
        assert!(state.should_quit);
        assert_eq!(endpoint.calls(), 0);

        let (mut state, _) = state_with_mock();
        InputHandler::handle_key_event(
            &mut state,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        drain_events(&mut state);
        assert!(state.should_quit);
        assert_eq!(state.input(), "");

        let (mut state, _) = state_with_mock();
        press(&mut state, KeyCode::Esc);
        drain_events(&mut state);
        assert!(state.should_quit);
    }

    #[test]
    fn test_paste_normalizes_line_breaks() {
        let (mut state, endpoint) = state_with_mock();
        type_text(&mut state, ">");
        InputHandler::handle_event(&mut state, Event::Paste("a\r\nb\rc".to_string()));

        assert_eq!(state.input(), ">a\nb\nc");
        assert_eq!(state.input_cursor, state.input().len());
        assert!(state.widget.transcript().is_empty());
        assert_eq!(endpoint.calls(), 0);
    }

    #[test]
    fn test_scrolling_stops_following() {
        let (mut state, _) = state_with_mock();
        state.chat_scroll = 5;

        press(&mut state, KeyCode::Up);
        assert_eq!(state.chat_scroll, 4);
        assert!(!state.widget.transcript().follows_latest());

        press(&mut state, KeyCode::End);
        assert!(state.widget.transcript().follows_latest());
    }
}
