//! Agent entity: a named persona with a fixed instruction and growing history.

use crate::session::entities::Message;

/// A generative persona backing one story role (Entity)
///
/// The instruction prompt is fixed at creation. The history only ever
/// grows: turns are appended as user/assistant pairs and never edited.
#[derive(Debug, Clone)]
pub struct Agent {
    instruction: String,
    history: Vec<Message>,
}

impl Agent {
    pub fn new(instruction: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
            history: Vec::new(),
        }
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// Record one completed exchange.
    pub fn record_exchange(&mut self, user: impl Into<String>, assistant: impl Into<String>) {
        self.history.push(Message::user(user));
        self.history.push(Message::assistant(assistant));
    }

    /// Full message sequence for a new request: instruction, history, then
    /// the pending user turn.
    pub fn conversation_with(&self, user_text: &str) -> Vec<Message> {
        let mut messages = Vec::with_capacity(self.history.len() + 2);
        messages.push(Message::system(self.instruction.clone()));
        messages.extend(self.history.iter().cloned());
        messages.push(Message::user(user_text));
        messages
    }
}
