use std::sync::Arc;
use tracing::{debug, warn};

use crate::endpoint::{ChatEndpoint, EndpointInfo};
use crate::events::{EventSender, Reply};
use crate::message::Message;
use crate::transcript::Transcript;
use crate::ui::UiState;

/// A chat widget: transcript, input field, send control and the endpoint it talks to.
///
/// One user turn is a linear cycle. [`ChatWidget::submit`] renders the user
/// message, clears the input and disables the send control, then awaits the
/// endpoint and renders exactly one bot message (the reply or a fallback)
/// before re-enabling the control. Front ends that must keep drawing while the
/// request is in flight use [`ChatWidget::submit_detached`] and hand the
/// outcome back through [`ChatWidget::finish`].
pub struct ChatWidget {
    transcript: Transcript,
    ui: UiState,
    endpoint: Arc<dyn ChatEndpoint>,
}

impl ChatWidget {
    /// Create a widget with an empty transcript and an idle send control
    pub fn new(endpoint: Arc<dyn ChatEndpoint>) -> Self {
        Self::with_parts(endpoint, Transcript::new(), UiState::new())
    }

    /// Create a widget around existing UI elements
    pub fn with_parts(endpoint: Arc<dyn ChatEndpoint>, transcript: Transcript, ui: UiState) -> Self {
        Self {
            transcript,
            ui,
            endpoint,
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn transcript_mut(&mut self) -> &mut Transcript {
        &mut self.transcript
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut UiState {
        &mut self.ui
    }

    pub fn endpoint_info(&self) -> EndpointInfo {
        self.endpoint.info()
    }

    /// Whether a request is currently in flight
    pub fn is_busy(&self) -> bool {
        !self.ui.send_enabled()
    }

    /// Append a message to the transcript and scroll to it
    pub fn render(&mut self, message: Message) {
        self.transcript.render(message);
    }

    /// Run a full turn inline. Returns `false` when nothing was sent.
    pub async fn submit(&mut self, raw_input: &str) -> bool {
        let Some(text) = self.begin(raw_input) else {
            return false;
        };

        let reply = self.endpoint.send(&text).await;
        self.finish(reply);
        true
    }

    /// Start a turn and deliver its outcome as [`crate::AppEvent::ReplyReady`].
    /// Returns `false` when nothing was sent.
    pub fn submit_detached(&mut self, raw_input: &str, events: &EventSender) -> bool {
        let Some(text) = self.begin(raw_input) else {
            return false;
        };

        // Spawn background task so the UI keeps redrawing while we wait
        let endpoint = self.endpoint.clone();
        let sender = events.clone();
        tokio::spawn(async move {
            let reply = endpoint.send(&text).await;
            if sender.send_reply(reply).is_err() {
                debug!("Reply dropped: event loop has shut down");
            }
        });
        true
    }

    /// Complete the in-flight turn: render the reply (or its fallback) and re-enable sending
    pub fn finish(&mut self, reply: Reply) {
        if !self.is_busy() {
            warn!("Ignoring reply with no request in flight");
            return;
        }

        let message = match reply {
            Ok(text) => {
                debug!("Received reply ({} bytes)", text.len());
                Message::bot(text)
            }
            Err(error) => {
                // Cause stays in the debug log; only the fallback is shown
                debug!("Chat request failed: {}", error);
                Message::bot(error.fallback_reply())
            }
        };
        self.render(message);
        self.ui.end_request();
    }

    /// Shared first half of a turn. `None` means nothing should be sent.
    fn begin(&mut self, raw_input: &str) -> Option<String> {
        if self.is_busy() {
            debug!("Send control disabled; ignoring submit");
            return None;
        }

        let text = raw_input.trim();
        if text.is_empty() {
            return None;
        }
        let text = text.to_string();

        self.render(Message::user(text.clone()));
        self.ui.clear_input();
        self.ui.begin_request();
        debug!("Submitting message ({} bytes)", text.len());
        Some(text)
    }
}
