use super::message::{Message, Role};

/// Messages retained per conversation; older ones are dropped
const MAX_RETAINED: usize = 500;

/// The open conversation as seen by the console
#[derive(Debug, Default)]
pub struct Transcript {
    chat_id: Option<String>,
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
        if self.messages.len() > MAX_RETAINED {
            let excess = self.messages.len() - MAX_RETAINED;
            self.messages.drain(..excess);
        }
    }

    /// Start a new conversation, forgetting the old one
    pub fn switch_to(&mut self, chat_id: Option<String>) {
        self.chat_id = chat_id;
        self.messages.clear();
    }

    pub fn chat_id(&self) -> Option<&str> {
        self.chat_id.as_deref()
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

    /// The last `window` messages, oldest first
    pub fn context(&self, window: usize) -> Vec<Message> {
        let start = self.messages.len().saturating_sub(window);
        self.messages[start..].to_vec()
    }

    /// Text of the most recent customer message
    pub fn last_inbound(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::Client)
            .map(|m| m.text.as_str())
    }
}
