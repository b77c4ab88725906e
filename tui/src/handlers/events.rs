use chatbox_core::AppEvent;
use tracing::debug;
use crate::state::AppState;

/// Handles application events coming off the event bus
pub struct EventHandler;

impl EventHandler {
    /// Handle application events
    pub fn handle_event(state: &mut AppState, event: AppEvent) {
        debug!("Handling app event: {:?}", event);
        match event {
            AppEvent::ReplyReady(reply) => {
                state.widget.finish(reply);
            }
            AppEvent::Quit => {
                state.should_quit = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatbox_core::endpoint::{MockEndpoint, SERVER_ERROR_REPLY};
    use chatbox_core::{ChatWidget, EndpointError, EventBus, Message};
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_reply_event_completes_turn() {
        let endpoint = Arc::new(MockEndpoint::new().with_delay(Duration::from_millis(10)));
        let mut state = AppState::new(ChatWidget::new(endpoint), EventBus::new());

        let sender = state.event_sender.clone();
        assert!(state.widget.submit_detached("hi", &sender));
        assert!(state.widget.is_busy());

        let event = state.event_receiver.recv().await.unwrap();
        EventHandler::handle_event(&mut state, event);

        assert!(!state.widget.is_busy());
        assert_eq!(
            state.widget.transcript().last(),
            Some(&Message::bot("You said: hi"))
        );
    }

    #[tokio::test]
    async fn test_error_event_renders_fallback() {
        let endpoint = Arc::new(MockEndpoint::new().with_delay(Duration::ZERO));
        let mut state = AppState::new(ChatWidget::new(endpoint), EventBus::new());

        let sender = state.event_sender.clone();
        state.widget.submit_detached("hi", &sender);
        // Drain the real reply, then feed a failure in its place
        let _ = state.event_receiver.recv().await;
        EventHandler::handle_event(
            &mut state,
            AppEvent::ReplyReady(Err(EndpointError::Status(502))),
        );

        assert_eq!(
            state.widget.transcript().last(),
            Some(&Message::bot(SERVER_ERROR_REPLY))
        );
        assert!(state.widget.ui().send_enabled());
    }

    #[test]
    fn test_quit_event() {
        let endpoint = Arc::new(MockEndpoint::new());
        let mut state = AppState::new(ChatWidget::new(endpoint), EventBus::new());

        EventHandler::handle_event(&mut state, AppEvent::Quit);
        assert!(state.should_quit);
    }
}
