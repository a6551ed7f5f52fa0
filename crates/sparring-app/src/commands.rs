//! Parsing of one line of shell input.

/// What a line of input asks the shell to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Blank line; nothing to do.
    Empty,
    /// Generate ideas from the planning context.
    Seed,
    Reset,
    ShowContext,
    SetContext { key: String, value: String },
    History,
    Usage,
    Help,
    Quit,
    /// A slash command that could not be understood, with a hint.
    Invalid(String),
    /// Anything else goes to the model verbatim.
    Message(String),
}

pub const HELP: &str = "\
Commands:
  /seed                 generate ideas from the planning context
  /reset                start a new chat (context is kept)
  /context              show the planning context
  /set <key> <value>    change stage, class, subject or topic
                        (/set stage 1|2|3 picks a Lehrplan 21 cycle)
  /history              show the conversation so far
  /usage                show token usage
  /help                 show this help
  /quit                 exit
Anything else is sent as a message.";

pub fn parse(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Empty;
    }
    let Some(rest) = line.strip_prefix('/') else {
        return Command::Message(line.to_string());
    };

    let (name, args) = match rest.split_once(char::is_whitespace) {
        Some((name, args)) => (name, args.trim()),
        None => (rest, ""),
    };

    match name {
        "seed" | "ideen" => Command::Seed,
        "reset" | "new" => Command::Reset,
        "context" => Command::ShowContext,
        "set" => parse_set(args),
        "history" => Command::History,
        "usage" => Command::Usage,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => Command::Invalid(format!("unknown command /{other}, try /help")),
    }
}

fn parse_set(args: &str) -> Command {
    match args.split_once(char::is_whitespace) {
        Some((key, value)) if !value.trim().is_empty() => Command::SetContext {
            key: key.to_lowercase(),
            value: value.trim().to_string(),
        },
        _ => Command::Invalid("usage: /set <stage|class|subject|topic> <value>".into()),
    }
}
