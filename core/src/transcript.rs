use crate::message::Message;

/// Ordered, append-only list of rendered messages.
///
/// `follow_latest` is the auto-scroll flag: rendering a message turns it on so
/// the view jumps to the newest entry; a front end turns it off when the user
/// scrolls back through history.
#[derive(Debug, Clone)]
pub struct Transcript {
    messages: Vec<Message>,
    follow_latest: bool,
}

impl Transcript {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            follow_latest: true,
        }
    }

    /// Append a message and scroll to it
    pub fn render(&mut self, message: Message) {
        self.messages.push(message);
        self.follow_latest = true;
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn follows_latest(&self) -> bool {
        self.follow_latest
    }

    pub fn set_follow_latest(&mut self, follow: bool) {
        self.follow_latest = follow;
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Sender;

    #[test]
    fn test_render_appends_in_order_and_follows() {
        let mut transcript = Transcript::new();
        transcript.set_follow_latest(false);

        transcript.render(Message::user("first"));
        transcript.render(Message::bot("second"));

        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.messages()[0].text(), "first");
        assert_eq!(transcript.last().map(Message::sender), Some(Sender::Bot));
        assert!(transcript.follows_latest());
    }
}
