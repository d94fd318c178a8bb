//! Conversation-related types.

use serde::{Deserialize, Serialize};

/// Who a message comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The person typing questions.
    User,
    /// The answering service, or the fallback text standing in for it.
    Bot,
}

/// A single message in the transcript.
///
/// Messages are immutable once created.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Message {
    role: Role,
    text: String,
}

impl Message {
    #[inline]
    pub(crate) fn user(text: String) -> Self {
        Self {
            role: Role::User,
            text,
        }
    }

    #[inline]
    pub(crate) fn bot(text: String) -> Self {
        Self {
            role: Role::Bot,
            text,
        }
    }

    /// Returns the role of this message.
    #[inline]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the text of this message.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// The append-only history of a conversation.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct Transcript {
    items: Vec<Message>,
}

impl Transcript {
    #[inline]
    pub(crate) fn push(&mut self, msg: Message) {
        self.items.push(msg);
    }

    /// Returns all messages in chronological order.
    #[inline]
    pub fn messages(&self) -> &[Message] {
        &self.items
    }

    /// Returns the number of messages with the given role.
    pub fn count(&self, role: Role) -> usize {
        self.items.iter().filter(|msg| msg.role == role).count()
    }

    /// Returns the number of messages.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing has been said yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
