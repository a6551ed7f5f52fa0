//! Interactive terminal chat over a `Session`.

use std::io::Write;

use sparring_ai::{AiClient, ChunkCallback, Session, Speaker, CONTEXT_KEYS, STAGE_PRESETS};
use sparring_common::SparringError;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::commands::{self, Command};

const WELCOME: &str = "Hallo! Ich bin bereit. Tippe /seed, um einen ersten Entwurf basierend auf deinem Kontext zu erhalten, oder stelle eine konkrete Frage. (/help für alle Befehle)";
const THINKING: &str = "Durchforste Lehrplan 21 und methodische Konzepte...";
const RETRY_HINT: &str = "Sende die Nachricht erneut, um es noch einmal zu versuchen.";

/// Whether the loop should keep reading input.
#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Shell<'a> {
    session: Session,
    client: &'a dyn AiClient,
    stream: bool,
}

impl<'a> Shell<'a> {
    pub fn new(session: Session, client: &'a dyn AiClient, stream: bool) -> Self {
        Self {
            session,
            client,
            stream,
        }
    }

    /// Read commands from stdin until `/quit` or end of input.
    pub async fn run(&mut self, start_with_seed: bool) -> Result<(), SparringError> {
        let mut out = std::io::stdout();
        self.print_banner(&mut out)?;

        if start_with_seed {
            self.handle(Command::Seed, &mut out).await?;
        }

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            write!(out, "> ")?;
            out.flush()?;

            let Some(line) = lines.next_line().await? else {
                debug!("stdin closed");
                break;
            };
            if self.handle(commands::parse(&line), &mut out).await? == Flow::Quit {
                break;
            }
        }

        info!(turns = self.session.turn_count(), "Shell finished");
        Ok(())
    }

    /// Execute one command, writing user-facing output to `out`.
    pub async fn handle(&mut self, command: Command, out: &mut dyn Write) -> std::io::Result<Flow> {
        match command {
            Command::Empty => {}
            Command::Quit => return Ok(Flow::Quit),
            Command::Help => writeln!(out, "{}", commands::HELP)?,
            Command::Invalid(hint) => writeln!(out, "{hint}")?,
            Command::Seed => {
                let seed = self.session.seed_prompt();
                writeln!(out, "{seed}")?;
                self.send(seed, out).await?;
            }
            Command::Message(text) => self.send(text, out).await?,
            Command::Reset => {
                self.session.reset();
                writeln!(out, "Neuer Chat gestartet.")?;
                self.print_banner(out)?;
            }
            Command::ShowContext => {
                writeln!(out, "Aktueller Fokus: {}", self.session.context().focus_line())?;
            }
            Command::SetContext { key, value } => {
                let mut context = self.session.context().clone();
                let value = if key == "stage" {
                    resolve_stage(&value)
                } else {
                    value
                };
                if context.set(&key, value) {
                    self.session.set_context(context);
                    writeln!(out, "Aktueller Fokus: {}", self.session.context().focus_line())?;
                } else {
                    writeln!(
                        out,
                        "unknown key '{key}', expected one of: {}",
                        CONTEXT_KEYS.join(", ")
                    )?;
                }
            }
            Command::History => {
                if self.session.transcript().is_empty() {
                    writeln!(out, "(noch keine Nachrichten)")?;
                }
                for turn in self.session.transcript() {
                    let who = match turn.role {
                        Speaker::User => "Du",
                        Speaker::Model => "Sparring",
                    };
                    writeln!(out, "[{who}]\n{}\n", turn.content)?;
                }
            }
            Command::Usage => {
                let tracker = self.session.tracker();
                let total = tracker.total();
                writeln!(
                    out,
                    "{}: {} calls, {} input + {} output = {} tokens",
                    self.session.model(),
                    tracker.call_count(),
                    total.input_tokens,
                    total.output_tokens,
                    total.total_tokens()
                )?;
                if let Some(last) = tracker.last() {
                    writeln!(out, "last request carried {} input tokens", last.input_tokens)?;
                }
            }
        }
        Ok(Flow::Continue)
    }

    async fn send(&mut self, text: String, out: &mut dyn Write) -> std::io::Result<()> {
        writeln!(out, "{THINKING}")?;
        out.flush()?;

        let result = if self.stream {
            // Chunks are written as they arrive; the committed reply is not
            // printed again.
            let (tx, mut rx) = mpsc::unbounded_channel::<String>();
            let on_chunk: ChunkCallback = Box::new(move |chunk: String| {
                let _ = tx.send(chunk);
            });
            let submit = self.session.submit_streaming(self.client, text, on_chunk);
            let print = async {
                while let Some(chunk) = rx.recv().await {
                    write!(out, "{chunk}")?;
                    out.flush()?;
                }
                Ok::<(), std::io::Error>(())
            };
            let (result, printed) = tokio::join!(submit, print);
            printed?;
            result.map(|_| String::new())
        } else {
            self.session.submit(self.client, text).await
        };

        match result {
            Ok(reply) => writeln!(out, "{reply}\n")?,
            Err(e) => {
                writeln!(out, "\nEin Fehler ist aufgetreten: {e}")?;
                if e.is_retryable() {
                    writeln!(out, "{RETRY_HINT}")?;
                }
            }
        }
        Ok(())
    }

    fn print_banner(&self, out: &mut dyn Write) -> std::io::Result<()> {
        writeln!(out, "Aktueller Fokus: {}", self.session.context().focus_line())?;
        if self.session.transcript().is_empty() {
            writeln!(out, "{WELCOME}")?;
        }
        Ok(())
    }
}

/// `1`, `2`, `3` pick a Lehrplan 21 cycle; anything else is taken as-is.
pub fn resolve_stage(value: &str) -> String {
    value
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| STAGE_PRESETS.get(i))
        .map(|preset| preset.to_string())
        .unwrap_or_else(|| value.to_string())
}
