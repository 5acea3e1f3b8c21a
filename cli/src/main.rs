//! CLI entrypoint for storyloom
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;
use storyloom_application::{RunStoryUseCase, StorySession};
use storyloom_infrastructure::{
    ConfigLoader, FileConfig, JsonlConversationLogger, OpenAiCompletionProvider, OpenAiSettings,
};
use storyloom_presentation::{
    Cli, OutputFormat, ProgressReporter, SimpleProgress, StoryFormatter, StoryRepl,
};
use tokio::io::BufReader;
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize logging based on verbosity level.
///
/// The returned guard flushes the log file on drop.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
            let name = path
                .file_name()
                .with_context(|| format!("Invalid log file path: {}", path.display()))?;
            let appender = tracing_appender::rolling::never(dir.unwrap_or(Path::new(".")), name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    Ok(guard)
}

/// Load the file configuration and apply command-line overrides.
fn load_config(cli: &Cli) -> Result<FileConfig> {
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?
    };

    if let Some(model) = &cli.model {
        config.provider.model = model.clone();
    }
    if let Some(max_attempts) = cli.max_attempts {
        config.story.max_attempts = max_attempts;
    }
    if let Some(path) = &cli.conversation_log {
        config.output.conversation_log = Some(path.clone());
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    if cli.show_config {
        for line in ConfigLoader::config_sources(cli.config.as_deref()) {
            println!("{}", line);
        }
        let config = load_config(&cli)?;
        println!("\nEffective configuration:\n");
        println!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    if cli.output == OutputFormat::Json && (cli.interactive || !cli.choice.is_empty()) {
        bail!("--output json cannot be combined with --choice or --interactive");
    }

    let config = load_config(&cli)?;
    StoryFormatter::set_color(config.output.color);
    info!("Starting storyloom");

    // === Dependency Injection ===
    let mut settings = OpenAiSettings::new(config.provider.base_url.clone())
        .with_timeout(config.provider.timeout());
    match config.provider.api_key() {
        Some(key) => settings = settings.with_api_key(key),
        None => warn!(
            "{} is not set; requests are sent without an API key",
            config.provider.api_key_env
        ),
    }
    let provider = Arc::new(OpenAiCompletionProvider::new(settings)?);

    let mut use_case = RunStoryUseCase::new(provider, config.story_params());
    if !cli.quiet {
        use_case = if std::io::stderr().is_terminal() {
            use_case.with_progress(Arc::new(ProgressReporter::new()))
        } else {
            use_case.with_progress(Arc::new(SimpleProgress))
        };
    }
    if let Some(path) = &config.output.conversation_log {
        match JsonlConversationLogger::new(path) {
            Some(logger) => {
                info!("Recording conversation to {}", logger.path().display());
                use_case = use_case.with_conversation_logger(Arc::new(logger));
            }
            None => warn!("Continuing without a conversation log"),
        }
    }

    let theme = cli.theme.clone().unwrap_or_else(|| config.story.theme.clone());
    let mut session = StorySession::new();

    let Some(outcome) = use_case.run(&mut session, &theme).await else {
        bail!("Unable to generate the story opening for theme '{}'", theme);
    };
    debug!(agents = ?session.registry().ids(), "Story opening ready");

    match cli.output {
        OutputFormat::Story => println!("{}", StoryFormatter::format_outcome(&outcome)),
        OutputFormat::Json => {
            println!("{}", StoryFormatter::format_json(&outcome));
            return Ok(());
        }
    }

    let repl = StoryRepl::new(&use_case, outcome.cast.counterpart.as_str());
    repl.play_scripted(&mut session, &cli.choice).await?;

    if cli.interactive {
        repl.run(&mut session, BufReader::new(tokio::io::stdin()))
            .await?;
    }

    Ok(())
}
