mod cli;
mod commands;
mod shell;

use std::path::{Path, PathBuf};
use std::time::Duration;

use sparring_ai::{GeminiClient, GeminiConfig, Persona, Session, SessionContext};
use sparring_common::SparringError;
use sparring_config::schema::LogLevel;
use sparring_config::SparringConfig;
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::EnvFilter;

use crate::cli::Args;
use crate::shell::Shell;

/// Load environment variables from a .env file (KEY=VALUE lines).
/// Existing variables win over file values.
fn load_dotenv() {
    let mut candidates = vec![PathBuf::from(".env")];
    if let Some(config_dir) = dirs::config_dir() {
        candidates.push(config_dir.join("sparring").join(".env"));
    }

    for path in &candidates {
        if let Ok(contents) = std::fs::read_to_string(path) {
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                if let Some((key, value)) = line.split_once('=') {
                    let key = key.trim().trim_start_matches("export ").trim();
                    let value = value.trim().trim_matches('"').trim_matches('\'');
                    if std::env::var(key).is_err() {
                        std::env::set_var(key, value);
                    }
                }
            }
            return;
        }
    }
}

fn load_config(path: Option<&str>) -> Result<SparringConfig, SparringError> {
    let config = match path {
        Some(path) => sparring_config::load_config_from(Path::new(path))?,
        None => sparring_config::load_config()?,
    };
    Ok(config)
}

/// `--log-level` wins over the configured level; an unparsable override
/// falls back to `info`.
fn log_directive(cli_level: Option<&str>, level: LogLevel) -> Directive {
    let directive = match cli_level {
        Some(filter) => filter.to_string(),
        None => format!("sparring={}", level.as_directive()),
    };
    directive
        .parse()
        .unwrap_or_else(|_| Directive::from(LevelFilter::INFO))
}

fn init_logging(args: &Args, level: LogLevel) {
    let directive = log_directive(args.log_level.as_deref(), level);
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .with_writer(std::io::stderr)
        .init();
}

fn build_persona(config: &SparringConfig) -> Persona {
    let mut persona = Persona::default();
    if let Some(preamble) = &config.persona.preamble {
        persona = persona.with_preamble(preamble.clone());
    }
    if let Some(ack) = &config.persona.acknowledgment {
        persona = persona.with_acknowledgment(ack.clone());
    }
    if let Some(template) = &config.persona.seed_template {
        persona = persona.with_seed_template(template.clone());
    }
    persona
}

fn build_context(args: &Args, config: &SparringConfig) -> SessionContext {
    let defaults = &config.context;
    SessionContext::new(
        args.stage
            .as_deref()
            .map(shell::resolve_stage)
            .unwrap_or_else(|| defaults.stage.clone()),
        args.class.clone().unwrap_or_else(|| defaults.class.clone()),
        args.subject.clone().unwrap_or_else(|| defaults.subject.clone()),
        args.topic.clone().unwrap_or_else(|| defaults.topic.clone()),
    )
}

fn build_client(args: &Args, config: &SparringConfig) -> Result<GeminiClient, SparringError> {
    let api_key = sparring_config::resolve_api_key(args.api_key.as_deref(), config)?;
    let model = args.model.clone().unwrap_or_else(|| config.model.name.clone());
    let timeout = match config.model.request_timeout_secs {
        0 => None,
        secs => Some(Duration::from_secs(u64::from(secs))),
    };

    let gemini = GeminiConfig::new(api_key)
        .with_model(model)
        .with_max_tokens(config.model.max_tokens)
        .with_temperature(config.model.temperature)
        .with_timeout(timeout);
    tracing::debug!(config = ?gemini, "Gemini client configured");

    Ok(GeminiClient::new(gemini)?)
}

async fn run(args: Args, config: SparringConfig) -> Result<(), SparringError> {
    let client = build_client(&args, &config)?;
    let session = Session::new(client.model())
        .with_persona(build_persona(&config))
        .with_context(build_context(&args, &config));
    tracing::info!(session = %session.id(), model = client.model(), "Session started");

    if let Some(prompt) = args.prompt {
        let mut session = session;
        let reply = session.submit(&client, prompt).await?;
        println!("{reply}");
        return Ok(());
    }

    let stream = config.model.stream && !args.no_stream;
    let mut shell = Shell::new(session, &client, stream);
    shell.run(args.seed).await
}

fn main() {
    // Load .env before anything reads the environment
    load_dotenv();

    let args = cli::parse();

    let config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            // No config level to honor yet
            init_logging(&args, LogLevel::default());
            tracing::error!("Failed to load config: {e}");
            eprintln!("sparring: {e}");
            std::process::exit(2);
        }
    };

    init_logging(&args, config.logging.level);
    tracing::info!("Sparring v{} starting...", env!("CARGO_PKG_VERSION"));

    // Single session with at most one request in flight.
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!("Failed to start runtime: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(run(args, config)) {
        tracing::error!("{e}");
        eprintln!("sparring: {e}");
        std::process::exit(1);
    }
    tracing::info!("Shutdown complete");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(filter: &str) -> String {
        filter.parse::<Directive>().unwrap().to_string()
    }

    #[test]
    fn config_level_scopes_to_the_workspace_crates() {
        let directive = log_directive(None, LogLevel::Debug);
        assert_eq!(directive.to_string(), parsed("sparring=debug"));
    }

    #[test]
    fn cli_filter_overrides_config_level() {
        let directive = log_directive(Some("sparring_ai=trace"), LogLevel::Warn);
        assert_eq!(directive.to_string(), parsed("sparring_ai=trace"));
    }

    #[test]
    fn unparsable_cli_filter_falls_back_to_info() {
        let directive = log_directive(Some("sparring=loud"), LogLevel::Error);
        assert_eq!(
            directive.to_string(),
            Directive::from(LevelFilter::INFO).to_string()
        );
    }
}
