use chatbox_core::{AppEvent, ChatWidget, EventBus, EventSender};
use std::time::Instant;
use tokio::sync::mpsc;

/// Application state
pub struct AppState {
    /// The chat widget: transcript, input field and send control
    pub widget: ChatWidget,

    /// Handle given to background requests for reporting back
    pub event_sender: EventSender,

    /// Event receiver for handling app events
    pub event_receiver: mpsc::UnboundedReceiver<AppEvent>,

    /// Cursor position in the input text (byte index)
    pub input_cursor: usize,

    /// First visible transcript line
    pub chat_scroll: usize,

    /// Whether the application should quit
    pub should_quit: bool,

    /// Whether cursor is visible (for blinking effect)
    pub cursor_visible: bool,

    /// Last time cursor blinked
    pub last_cursor_blink: Instant,
}

impl AppState {
    /// Create a new application state
    pub fn new(widget: ChatWidget, event_bus: EventBus) -> Self {
        let event_sender = event_bus.sender();
        Self {
            widget,
            event_sender,
            event_receiver: event_bus.into_receiver(),
            input_cursor: 0,
            chat_scroll: 0,
            should_quit: false,
            cursor_visible: true,
            last_cursor_blink: Instant::now(),
        }
    }

    /// Current input text
    pub fn input(&self) -> &str {
        &self.widget.ui().input_value
    }

    /// Update cursor blinking state
    pub fn update_cursor_blink(&mut self) {
        let now = Instant::now();
        if now.duration_since(self.last_cursor_blink).as_millis() >= 500 {
            self.cursor_visible = !self.cursor_visible;
            self.last_cursor_blink = now;
        }
    }
}
