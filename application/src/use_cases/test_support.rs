//! Test doubles shared by the use case tests.

use crate::ports::completion_provider::{CompletionProvider, ProviderError};
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use crate::ports::progress::StoryProgressNotifier;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use storyloom_domain::{Message, Model, Role, Stage};

/// Provider that replays a fixed script and records every request.
pub(crate) struct ScriptedProvider {
    script: Mutex<VecDeque<Result<String, ProviderError>>>,
    calls: Mutex<Vec<Vec<Message>>>,
}

impl ScriptedProvider {
    pub(crate) fn new(script: Vec<Result<String, ProviderError>>) -> Self {
        Self {
            script: Mutex::new(VecDeque::from(script)),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn replies<'a>(replies: impl IntoIterator<Item = &'a str>) -> Self {
        Self::new(replies.into_iter().map(|r| Ok(r.to_string())).collect())
    }

    pub(crate) fn calls(&self) -> Vec<Vec<Message>> {
        self.calls.lock().unwrap().clone()
    }

    /// The final user turn of every request, in order.
    pub(crate) fn user_prompts(&self) -> Vec<String> {
        self.calls()
            .iter()
            .filter_map(|messages| {
                messages
                    .iter()
                    .rev()
                    .find(|m| m.role == Role::User)
                    .map(|m| m.content.clone())
            })
            .collect()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    async fn complete(
        &self,
        _model: &Model,
        messages: &[Message],
    ) -> Result<String, ProviderError> {
        self.calls.lock().unwrap().push(messages.to_vec());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ProviderError::Other("No more responses".to_string())))
    }
}

/// Logger that keeps events in memory.
#[derive(Default)]
pub(crate) struct RecordingLogger {
    pub(crate) events: Mutex<Vec<(&'static str, serde_json::Value)>>,
}

impl ConversationLogger for RecordingLogger {
    fn log(&self, event: ConversationEvent) {
        self.events
            .lock()
            .unwrap()
            .push((event.event_type, event.payload));
    }
}

/// Progress notifier that keeps a textual trace of callbacks.
#[derive(Default)]
pub(crate) struct RecordingProgress {
    pub(crate) trace: Mutex<Vec<String>>,
}

impl StoryProgressNotifier for RecordingProgress {
    fn on_stage_start(&self, stage: Stage) {
        self.trace.lock().unwrap().push(format!("start {stage}"));
    }

    fn on_attempt_failed(&self, stage: Stage, attempt: usize, max_attempts: usize, _reason: &str) {
        self.trace
            .lock()
            .unwrap()
            .push(format!("fail {stage} {attempt}/{max_attempts}"));
    }

    fn on_stage_complete(&self, stage: Stage, success: bool) {
        self.trace
            .lock()
            .unwrap()
            .push(format!("done {stage} {success}"));
    }
}

pub(crate) const WORLD: &str = "Once upon a time, in a fog-bound river town, a young archivist named Ami found a letter that should not exist.\n\n\
She followed its directions to the old ferry landing, where a pale figure waited in the lantern light.\n\n\
Character List:\n1. Ami\n2. Qinghe (the ghost)";

pub(crate) const BACKGROUND: &str = "Background: Qinghe drowned at the ferry landing forty years ago while carrying a letter.\n\n\
Personality: patient, wry, and quietly desperate to finish the errand she started.";

pub(crate) const DIALOGUE: &str = "Qinghe lifts the lantern and studies you for a long moment.\n\
\"You read my letter,\" she says. \"Then you know what comes next.\"\n\n\
A. **\"I want to help you deliver it.\"**\n\
B. **\"Who was the letter meant for?\"**\n\
C. **\"I should not be here.\"**";

pub(crate) const DIALOGUE_MISSING_C: &str = "Qinghe lifts the lantern and studies you for a long moment.\n\n\
A. **\"I want to help you deliver it.\"**\n\
B. **\"Who was the letter meant for?\"**";
