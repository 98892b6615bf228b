use serde::{Deserialize, Serialize};

/// Who produced a turn in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

/// One turn of a conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub speaker: Speaker,
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Assistant,
            text: text.into(),
        }
    }
}

/// Ordered, append-only message log for one session.
///
/// Grows without bound for the process lifetime; there is no trimming or
/// eviction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionHistory {
    turns: Vec<ChatTurn>,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, turn: ChatTurn) {
        self.turns.push(turn);
    }

    pub fn extend(&mut self, turns: impl IntoIterator<Item = ChatTurn>) {
        self.turns.extend(turns);
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
