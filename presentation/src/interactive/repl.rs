//! Reply loop: feeds player choices to the character agent

use crate::output::console::StoryFormatter;
use std::io::Write;
use storyloom_application::{CompletionProvider, RunStoryUseCase, StoryError, StorySession};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// One line of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyInput {
    /// A reply to send (upper-cased, not yet validated)
    Choice(String),
    /// Leave the story
    Quit,
    /// Blank line
    Empty,
}

/// Interpret a line typed at the reply prompt.
pub fn parse_reply(line: &str) -> ReplyInput {
    let line = line.trim();
    match line.to_ascii_lowercase().as_str() {
        "" => ReplyInput::Empty,
        "q" | "quit" | "exit" | "/quit" => ReplyInput::Quit,
        _ => ReplyInput::Choice(line.to_ascii_uppercase()),
    }
}

/// Plays replies against one character agent
pub struct StoryRepl<'a, P: CompletionProvider + ?Sized> {
    use_case: &'a RunStoryUseCase<P>,
    speaker: String,
}

impl<'a, P: CompletionProvider + ?Sized> StoryRepl<'a, P> {
    pub fn new(use_case: &'a RunStoryUseCase<P>, speaker: impl Into<String>) -> Self {
        Self {
            use_case,
            speaker: speaker.into(),
        }
    }

    /// Send `choices` in order, printing each continuation.
    ///
    /// Stops at the first failure.
    pub async fn play_scripted(
        &self,
        session: &mut StorySession,
        choices: &[String],
    ) -> Result<(), StoryError> {
        for choice in choices {
            self.reply(session, choice).await?;
        }
        Ok(())
    }

    /// Prompt for replies on `input` until the player quits, input ends,
    /// or the story can no longer continue.
    ///
    /// Mistyped replies are reported and asked again.
    pub async fn run<R: AsyncBufRead + Unpin>(
        &self,
        session: &mut StorySession,
        input: R,
    ) -> Result<(), StoryError> {
        let mut lines = input.lines();

        while session.stage().accepts_choice() {
            print!("\n{} reply (A/B/C, q to quit): ", self.speaker);
            let _ = std::io::stdout().flush();

            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) | Err(_) => break,
            };

            match parse_reply(&line) {
                ReplyInput::Empty => continue,
                ReplyInput::Quit => break,
                ReplyInput::Choice(choice) => match self.reply(session, &choice).await {
                    Ok(()) => {}
                    Err(e @ StoryError::InvalidPlayerChoice(_)) => eprintln!("{}", e),
                    Err(e) => return Err(e),
                },
            }
        }

        Ok(())
    }

    async fn reply(&self, session: &mut StorySession, choice: &str) -> Result<(), StoryError> {
        let dialogue = self
            .use_case
            .process_player_choice(session, &self.speaker, choice)
            .await?;
        println!("{}", StoryFormatter::format_continuation(&self.speaker, &dialogue));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};
    use storyloom_application::{ProviderError, StoryParams};
    use storyloom_domain::{Cast, Message, Model, StoryStage};

    const REPLY: &str = "Qinghe smiles faintly and turns toward the water.\n\n\
A. \"Follow her.\"\n\
B. \"Call out to her.\"\n\
C. \"Stay where you are.\"";

    /// Answers every request with the same reply and counts requests.
    struct EchoProvider {
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl CompletionProvider for EchoProvider {
        async fn complete(
            &self,
            _model: &Model,
            messages: &[Message],
        ) -> Result<String, ProviderError> {
            let last = messages.last().map(|m| m.content.clone()).unwrap_or_default();
            self.calls.lock().unwrap().push(last);
            Ok(REPLY.to_string())
        }
    }

    /// A session whose opening dialogue has been shown; the opening
    /// request is not counted.
    async fn setup() -> (Arc<EchoProvider>, RunStoryUseCase<EchoProvider>, StorySession) {
        let provider = Arc::new(EchoProvider {
            calls: Mutex::new(Vec::new()),
        });
        let use_case = RunStoryUseCase::new(Arc::clone(&provider), StoryParams::default());
        let mut session = StorySession::new();
        use_case.add_character_agent(&mut session, "Qinghe");
        use_case
            .generate_dialogue(
                &mut session,
                "A river town.",
                "Background.",
                &Cast::new("Ami", "Qinghe"),
            )
            .await
            .unwrap();
        provider.calls.lock().unwrap().clear();
        (provider, use_case, session)
    }

    #[test]
    fn test_parse_reply() {
        assert_eq!(parse_reply(" b \n"), ReplyInput::Choice("B".to_string()));
        assert_eq!(parse_reply("Quit"), ReplyInput::Quit);
        assert_eq!(parse_reply("q"), ReplyInput::Quit);
        assert_eq!(parse_reply("   "), ReplyInput::Empty);
        assert_eq!(parse_reply("d"), ReplyInput::Choice("D".to_string()));
    }

    #[tokio::test]
    async fn test_play_scripted() {
        let (provider, use_case, mut session) = setup().await;
        let repl = StoryRepl::new(&use_case, "Qinghe");

        repl.play_scripted(&mut session, &["A".to_string(), "C".to_string()])
            .await
            .unwrap();

        assert_eq!(*provider.calls.lock().unwrap(), vec!["A", "C"]);
        assert_eq!(session.chats().len(), 3);
    }

    #[tokio::test]
    async fn test_play_scripted_stops_on_invalid_choice() {
        let (provider, use_case, mut session) = setup().await;
        let repl = StoryRepl::new(&use_case, "Qinghe");

        let err = repl
            .play_scripted(&mut session, &["X".to_string(), "A".to_string()])
            .await
            .unwrap_err();

        assert_eq!(err, StoryError::InvalidPlayerChoice("X".to_string()));
        assert!(provider.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_interactive_loop_skips_bad_input_and_quits() {
        let (provider, use_case, mut session) = setup().await;
        let repl = StoryRepl::new(&use_case, "Qinghe");
        assert_eq!(session.stage(), StoryStage::AwaitingChoice);

        let input: &[u8] = b"\nd\nb\nq\nc\n";
        repl.run(&mut session, input).await.unwrap();

        assert_eq!(*provider.calls.lock().unwrap(), vec!["B"]);
    }

    #[tokio::test]
    async fn test_interactive_loop_needs_an_opening_dialogue() {
        let provider = Arc::new(EchoProvider {
            calls: Mutex::new(Vec::new()),
        });
        let use_case = RunStoryUseCase::new(Arc::clone(&provider), StoryParams::default());
        let mut session = StorySession::new();
        use_case.add_character_agent(&mut session, "Qinghe");
        let repl = StoryRepl::new(&use_case, "Qinghe");

        let input: &[u8] = b"a\nb\n";
        repl.run(&mut session, input).await.unwrap();

        let err = repl
            .play_scripted(&mut session, &["A".to_string()])
            .await
            .unwrap_err();
        assert_eq!(
            err,
            StoryError::NotAwaitingChoice(StoryStage::CharacterAgentAdded)
        );
        assert!(provider.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_interactive_loop_ends_with_input() {
        let (provider, use_case, mut session) = setup().await;
        let repl = StoryRepl::new(&use_case, "Qinghe");
        repl.play_scripted(&mut session, &["A".to_string()])
            .await
            .unwrap();

        let input: &[u8] = b"c";
        repl.run(&mut session, input).await.unwrap();

        assert_eq!(provider.calls.lock().unwrap().len(), 2);
    }
}
