//! Append-only conversation log for one chat session.

use crate::resolver::QueryResolver;
use serde::{Deserialize, Serialize};

pub const GREETING: &str =
    "Hello! I'm your Certificate Submission Assistant. How can I help you today?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Originator {
    Assistant,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessage {
    /// 1-based, strictly increasing in insertion order.
    pub id: u64,
    pub text: String,
    pub originator: Originator,
    /// Unix timestamp (milliseconds) when the message was appended.
    pub timestamp_ms: i64,
}

fn now_ms() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

/// Messages of a session in insertion order. There is no way to edit or remove one.
#[derive(Debug, Clone, Default)]
pub struct ConversationLog {
    messages: Vec<ConversationMessage>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A log seeded with the assistant greeting.
    pub fn with_greeting() -> Self {
        let mut log = Self::new();
        log.push_assistant(GREETING);
        log
    }

    fn push(&mut self, text: impl Into<String>, originator: Originator) -> &ConversationMessage {
        let id = self.messages.last().map_or(1, |m| m.id + 1);
        let timestamp_ms = self
            .messages
            .last()
            .map_or_else(now_ms, |m| now_ms().max(m.timestamp_ms));
        self.messages.push(ConversationMessage {
            id,
            text: text.into(),
            originator,
            timestamp_ms,
        });
        &self.messages[self.messages.len() - 1]
    }

    pub fn push_user(&mut self, text: impl Into<String>) -> &ConversationMessage {
        self.push(text, Originator::User)
    }

    pub fn push_assistant(&mut self, text: impl Into<String>) -> &ConversationMessage {
        self.push(text, Originator::Assistant)
    }

    /// Appends `input` as a user message and the resolver's answer as the assistant reply.
    pub fn exchange(&mut self, resolver: &QueryResolver, input: &str) -> &ConversationMessage {
        self.push_user(input);
        let answer = resolver.resolve(input);
        self.push_assistant(answer)
    }

    pub fn messages(&self) -> &[ConversationMessage] {
        &self.messages
    }

    pub fn last(&self) -> Option<&ConversationMessage> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
