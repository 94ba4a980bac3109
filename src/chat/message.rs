use serde::{Deserialize, Serialize};

/// Who wrote a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The end customer; their messages trigger suggestions
    Client,
    /// The person using the console
    #[serde(alias = "manager", alias = "agent")]
    Operator,
}

impl Role {
    /// Speaker name used in prompts and the transcript pane
    pub fn speaker(&self) -> &'static str {
        match self {
            Role::Client => "Client",
            Role::Operator => "Operator",
        }
    }
}

/// A single chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub text: String,
}

impl Message {
    pub fn client(text: impl Into<String>) -> Self {
        Self {
            role: Role::Client,
            text: text.into(),
        }
    }

    pub fn operator(text: impl Into<String>) -> Self {
        Self {
            role: Role::Operator,
            text: text.into(),
        }
    }

    pub fn is_inbound(&self) -> bool {
        self.role == Role::Client
    }
}

/// Something that happened in the host chat
///
/// Feed lines use a `type` tag, e.g.
/// `{"type":"message","role":"client","text":"Hi"}` or
/// `{"type":"switch_chat","chat_id":"42"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatEvent {
    /// A message was appended to the open conversation
    Message(Message),
    /// The operator opened a different conversation
    SwitchChat {
        #[serde(default)]
        chat_id: Option<String>,
    },
}
