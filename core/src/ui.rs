/// Label shown on the send control while idle
pub const SEND_LABEL: &str = "Send";

/// Label shown on the send control while a request is in flight
pub const WORKING_LABEL: &str = "Thinking...";

/// Input field and send control of a widget.
///
/// The send control is disabled only between [`UiState::begin_request`] and
/// [`UiState::end_request`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    /// Current contents of the input field
    pub input_value: String,
    send_enabled: bool,
    send_label: String,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            input_value: String::new(),
            send_enabled: true,
            send_label: SEND_LABEL.to_string(),
        }
    }

    pub fn send_enabled(&self) -> bool {
        self.send_enabled
    }

    pub fn send_label(&self) -> &str {
        &self.send_label
    }

    pub fn clear_input(&mut self) {
        self.input_value.clear();
    }

    /// Disable the send control for an in-flight request
    pub fn begin_request(&mut self) {
        self.send_enabled = false;
        self.send_label = WORKING_LABEL.to_string();
    }

    /// Re-enable the send control and restore its label
    pub fn end_request(&mut self) {
        self.send_enabled = true;
        self.send_label = SEND_LABEL.to_string();
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}
