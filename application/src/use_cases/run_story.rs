//! Run Story use case
//!
//! Sequences the story pipeline:
//!
//! ```text
//! world ─▶ character background ─▶ character agent ─▶ dialogue ─▶ choice ─▶ choice ...
//! ```
//!
//! The opening stages convert failure into `None` and stop the run. Player
//! choices go through the [`RetryController`] and report failure as
//! [`StoryError::ChoiceFailed`].

use super::exchange::{ConversationGateway, Exchange, ExchangeError};
use super::retry::{AttemptOutcome, RetryController};
use crate::config::StoryParams;
use crate::ports::completion_provider::CompletionProvider;
use crate::ports::conversation_logger::ConversationLogger;
use crate::ports::progress::{NoProgress, StoryProgressNotifier};
use std::sync::Arc;
use storyloom_domain::{
    AgentId, AgentRegistry, Cast, Dialogue, DomainError, Extracted, PlayerChoice, ResponseKind,
    Stage, StoryOutcome, StoryPromptTemplate, StoryStage,
};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while continuing a story
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoryError {
    #[error("Invalid choice '{0}'. Please choose A, B, or C")]
    InvalidPlayerChoice(String),

    #[error("Agent '{0}' not found")]
    AgentNotFound(String),

    #[error("The story cannot take a choice while {0}")]
    NotAwaitingChoice(StoryStage),

    #[error("Failed to process choice: {0}")]
    ChoiceFailed(String),
}

impl From<DomainError> for StoryError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::AgentNotFound(id) => StoryError::AgentNotFound(id),
            DomainError::InvalidChoice(choice) => StoryError::InvalidPlayerChoice(choice),
        }
    }
}

/// Per-run state: the agents, the dialogue transcript and the pipeline stage.
#[derive(Debug, Clone)]
pub struct StorySession {
    registry: AgentRegistry,
    chats: Vec<String>,
    stage: StoryStage,
    cast: Option<Cast>,
}

impl Default for StorySession {
    fn default() -> Self {
        Self::new()
    }
}

impl StorySession {
    /// A fresh session with the built-in story agents registered.
    pub fn new() -> Self {
        Self::with_registry(AgentRegistry::with_story_agents())
    }

    pub fn with_registry(registry: AgentRegistry) -> Self {
        Self {
            registry,
            chats: Vec::new(),
            stage: StoryStage::Idle,
            cast: None,
        }
    }

    pub fn registry(&self) -> &AgentRegistry {
        &self.registry
    }

    /// Character replies in the order they were produced.
    pub fn chats(&self) -> &[String] {
        &self.chats
    }

    pub fn stage(&self) -> StoryStage {
        self.stage
    }

    /// Cast named by the story opening, once generated.
    pub fn cast(&self) -> Option<&Cast> {
        self.cast.as_ref()
    }

    fn terminate(&mut self) {
        self.stage = StoryStage::Terminated;
    }
}

/// Use case for running a story
pub struct RunStoryUseCase<P: CompletionProvider + ?Sized> {
    gateway: ConversationGateway<P>,
    retry: RetryController,
    params: StoryParams,
    progress: Arc<dyn StoryProgressNotifier>,
}

impl<P: CompletionProvider + ?Sized> RunStoryUseCase<P> {
    pub fn new(provider: Arc<P>, params: StoryParams) -> Self {
        Self {
            gateway: ConversationGateway::new(provider, params.model.clone()),
            retry: RetryController::new(params.retry_policy()),
            params,
            progress: Arc::new(NoProgress),
        }
    }

    pub fn with_progress(mut self, progress: Arc<dyn StoryProgressNotifier>) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.gateway = self.gateway.with_conversation_logger(logger);
        self
    }

    pub fn params(&self) -> &StoryParams {
        &self.params
    }

    /// Run the opening stages: world, background, character agent, dialogue.
    ///
    /// Returns `None` as soon as a stage fails.
    pub async fn run(&self, session: &mut StorySession, theme: &str) -> Option<StoryOutcome> {
        info!("Starting story with theme '{}'", theme);

        let (world_overview, cast) = self.generate_world(session, theme).await?;
        let character_overview = self
            .generate_character_background(session, &world_overview, &cast.counterpart)
            .await?;
        self.add_character_agent(session, &cast.counterpart);
        let opening_dialogue = self
            .generate_dialogue(session, &world_overview, &character_overview, &cast)
            .await?;

        Some(StoryOutcome {
            world_overview,
            cast,
            character_overview,
            opening_dialogue,
            chats: session.chats.clone(),
        })
    }

    /// Ask the world manager for a story opening and its cast.
    pub async fn generate_world(
        &self,
        session: &mut StorySession,
        theme: &str,
    ) -> Option<(String, Cast)> {
        self.progress.on_stage_start(Stage::World);

        let prompt = StoryPromptTemplate::world_beginning(theme);
        let result = self
            .exchange_stage(
                session,
                Stage::World,
                &AgentId::world_manager(),
                &prompt,
                Some(ResponseKind::WorldInit),
            )
            .await
            .and_then(|exchange| {
                let cast = exchange.extracted.into_cast()?;
                Some((exchange.response, cast))
            });

        match &result {
            Some((_, cast)) => {
                info!(
                    "World generated with protagonist '{}' and counterpart '{}'",
                    cast.protagonist, cast.counterpart
                );
                session.cast = Some(cast.clone());
                session.stage = StoryStage::WorldGenerated;
            }
            None => {
                warn!("Max attempts reached. Unable to generate initial story.");
                session.terminate();
            }
        }

        self.progress.on_stage_complete(Stage::World, result.is_some());
        result
    }

    /// Ask the character maker for the background of `name`.
    pub async fn generate_character_background(
        &self,
        session: &mut StorySession,
        world_overview: &str,
        name: &str,
    ) -> Option<String> {
        self.progress.on_stage_start(Stage::CharacterBackground);

        let prompt = StoryPromptTemplate::character_background(world_overview, name);
        let result = self
            .exchange_stage(
                session,
                Stage::CharacterBackground,
                &AgentId::character_maker(),
                &prompt,
                Some(ResponseKind::CharacterBackground),
            )
            .await
            .map(|exchange| exchange.response);

        if result.is_some() {
            session.stage = StoryStage::CharacterBackgroundGenerated;
        } else {
            warn!("Max attempts reached. Unable to generate character background.");
            session.terminate();
        }

        self.progress
            .on_stage_complete(Stage::CharacterBackground, result.is_some());
        result
    }

    /// Register a role-playing agent for `name`.
    ///
    /// Never fails the run; a blank name is logged and skipped.
    pub fn add_character_agent(&self, session: &mut StorySession, name: &str) {
        self.progress.on_stage_start(Stage::CharacterAgent);

        let name = name.trim();
        if name.is_empty() {
            warn!("Failed to add character agent: empty character name");
            self.progress.on_stage_complete(Stage::CharacterAgent, false);
            return;
        }

        session
            .registry
            .register(name, StoryPromptTemplate::character_agent_system(name));
        session.stage = StoryStage::CharacterAgentAdded;
        debug!("Character agent '{}' registered", name);

        self.progress.on_stage_complete(Stage::CharacterAgent, true);
    }

    /// Open the dialogue between the counterpart and the protagonist.
    ///
    /// The reply is kept whatever its shape; options are only attached
    /// when it carries exactly the A/B/C markers.
    pub async fn generate_dialogue(
        &self,
        session: &mut StorySession,
        world_overview: &str,
        character_overview: &str,
        cast: &Cast,
    ) -> Option<Dialogue> {
        self.progress.on_stage_start(Stage::Dialogue);

        let prompt = StoryPromptTemplate::dialogue(world_overview, character_overview, cast);
        let agent = AgentId::new(cast.counterpart.as_str());
        let result = self
            .exchange_stage(session, Stage::Dialogue, &agent, &prompt, None)
            .await
            .map(|exchange| {
                let options = ResponseKind::CharacterDialogue
                    .validate(&exchange.response)
                    .into_result()
                    .ok()
                    .and_then(Extracted::into_options);
                Dialogue {
                    text: exchange.response,
                    options,
                }
            });

        match &result {
            Some(dialogue) => {
                session.chats.push(dialogue.text.clone());
                session.stage = if dialogue.options.is_some() {
                    StoryStage::AwaitingChoice
                } else {
                    StoryStage::DialogueGenerated
                };
            }
            None => {
                warn!("Max attempts reached. Unable to generate dialogue.");
                session.terminate();
            }
        }

        self.progress.on_stage_complete(Stage::Dialogue, result.is_some());
        result
    }

    /// Feed the player's `choice` to the character agent `name`.
    ///
    /// The choice must be exactly `A`, `B` or `C`, and the session must be
    /// waiting on a dialogue turn; otherwise the call fails before the agent
    /// is contacted. A terminated session stays terminated.
    pub async fn process_player_choice(
        &self,
        session: &mut StorySession,
        name: &str,
        choice: &str,
    ) -> Result<Dialogue, StoryError> {
        let choice: PlayerChoice = choice.parse()?;
        if !session.stage.accepts_choice() {
            return Err(StoryError::NotAwaitingChoice(session.stage));
        }
        let agent = AgentId::new(name);

        self.progress.on_stage_start(Stage::Choice);
        info!("Player chose {} for '{}'", choice, agent);

        let outcome = self
            .retry
            .attempt_with_retry_observed(
                &self.gateway,
                &mut session.registry,
                &agent,
                &choice.letter().to_string(),
                Some(ResponseKind::CharacterDialogue),
                |attempt, reason| {
                    self.progress.on_attempt_failed(
                        Stage::Choice,
                        attempt,
                        self.params.max_attempts,
                        reason,
                    )
                },
            )
            .await;

        let outcome = match outcome {
            Ok(outcome) => outcome,
            Err(e) => {
                self.progress.on_stage_complete(Stage::Choice, false);
                return Err(e.into());
            }
        };

        match outcome {
            AttemptOutcome::Success {
                response,
                extracted,
                ..
            } => {
                session.chats.push(response.clone());
                session.stage = StoryStage::AwaitingChoice;
                self.progress.on_stage_complete(Stage::Choice, true);
                Ok(Dialogue {
                    text: response,
                    options: extracted.into_options(),
                })
            }
            failed => {
                let message = failed.failure_message().unwrap_or_default();
                warn!("{}", message);
                session.terminate();
                self.progress.on_stage_complete(Stage::Choice, false);
                Err(StoryError::ChoiceFailed(message))
            }
        }
    }

    /// One stage exchange, repeated on any error up to the attempt budget.
    ///
    /// No backoff and no feedback: the same prompt is resent.
    async fn exchange_stage(
        &self,
        session: &mut StorySession,
        stage: Stage,
        agent: &AgentId,
        prompt: &str,
        expect: Option<ResponseKind>,
    ) -> Option<Exchange> {
        let max_attempts = self.params.max_attempts;

        for attempt in 1..=max_attempts {
            match self
                .gateway
                .exchange(&mut session.registry, agent, prompt, expect)
                .await
            {
                Ok(exchange) => return Some(exchange),
                Err(e @ ExchangeError::AgentNotFound(_)) => {
                    warn!("Stage {} cannot run: {}", stage, e);
                    self.progress
                        .on_attempt_failed(stage, attempt, max_attempts, &e.reason());
                    return None;
                }
                Err(e) => {
                    warn!("Attempt {}/{} failed: {}", attempt, max_attempts, e);
                    self.progress
                        .on_attempt_failed(stage, attempt, max_attempts, &e.reason());
                }
            }
        }

        None
    }
}
