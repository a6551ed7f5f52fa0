use clap::Parser;

/// Sparring: a lesson-planning chat partner for Lehrplan 21, backed by Gemini.
#[derive(Parser, Debug)]
#[command(name = "sparring", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Log level override (trace, debug, info, warn, error or a full filter).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Gemini API key (otherwise GOOGLE_API_KEY or the config file).
    #[arg(long)]
    pub api_key: Option<String>,

    /// Model id override.
    #[arg(short = 'm', long)]
    pub model: Option<String>,

    /// Send one message, print the reply, and exit.
    #[arg(short = 'p', long)]
    pub prompt: Option<String>,

    /// Start by generating ideas from the planning context.
    #[arg(long)]
    pub seed: bool,

    /// Wait for the whole reply instead of streaming it.
    #[arg(long)]
    pub no_stream: bool,

    /// Stage / cycle, e.g. "Zyklus 2 (3. - 6. Klasse)".
    #[arg(long)]
    pub stage: Option<String>,

    /// Class, e.g. "4. Klasse".
    #[arg(long)]
    pub class: Option<String>,

    /// Subject, e.g. "Mathematik".
    #[arg(long)]
    pub subject: Option<String>,

    /// Topic, e.g. "Bruchrechnen".
    #[arg(long)]
    pub topic: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}
