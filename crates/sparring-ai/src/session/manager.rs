//! Session struct, request assembly, and transcript access.

use sparring_common::SessionId;
use tracing::info;

use crate::context::SessionContext;
use crate::persona::Persona;
use crate::token_tracker::TokenTracker;
use crate::{Speaker, Turn};

/// A single conversation with the generation service.
pub struct Session {
    /// Identity of the current logical conversation.
    pub(super) id: SessionId,
    /// Visible history. Never contains the priming exchange.
    pub(super) transcript: Vec<Turn>,
    pub(super) persona: Persona,
    pub(super) context: SessionContext,
    pub(super) tracker: TokenTracker,
    /// Model id, used to label token usage.
    pub(super) model: String,
}

impl Session {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            id: SessionId::new(),
            transcript: Vec::new(),
            persona: Persona::default(),
            context: SessionContext::default(),
            tracker: TokenTracker::new(),
            model: model.into(),
        }
    }

    pub fn with_persona(mut self, persona: Persona) -> Self {
        self.persona = persona;
        self
    }

    pub fn with_context(mut self, context: SessionContext) -> Self {
        self.context = context;
        self
    }

    /// Replace the planning context. Takes effect for the next seed prompt
    /// and, if the session is not primed yet, for the priming turn.
    pub fn set_context(&mut self, context: SessionContext) {
        self.context = context;
    }

    /// Opening prompt interpolated from the current context.
    pub fn seed_prompt(&self) -> String {
        self.persona.seed(&self.context)
    }

    /// Whether the persona has been delivered, i.e. a reply was committed
    /// since the last reset.
    ///
    /// Priming is keyed on the first committed reply, not on the first
    /// request: if the opening exchange fails, the next request carries the
    /// persona again (so it may be sent on call 1 and call 2). The service
    /// keeps no state between calls, so a request whose predecessor failed
    /// has never seen the persona.
    pub fn is_primed(&self) -> bool {
        self.transcript.iter().any(|turn| turn.role == Speaker::Model)
    }

    /// The exact turn list the next generation call will carry.
    ///
    /// Unprimed: `[persona, acknowledgment] ++ transcript`.
    /// Primed: the transcript alone.
    pub fn build_request(&self) -> Vec<Turn> {
        let mut turns = Vec::with_capacity(self.transcript.len() + 2);
        if !self.is_primed() {
            turns.push(Turn::user(self.persona.priming_text(&self.context)));
            turns.push(Turn::model(self.persona.acknowledgment.clone()));
        }
        turns.extend(self.transcript.iter().cloned());
        turns
    }

    /// Clear the transcript and start a new logical conversation.
    /// Context, persona and token totals are kept.
    pub fn reset(&mut self) {
        let dropped = self.transcript.len();
        self.transcript.clear();
        self.id = SessionId::new();
        info!(session = %self.id, dropped, "Session reset");
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn persona(&self) -> &Persona {
        &self.persona
    }

    pub fn tracker(&self) -> &TokenTracker {
        &self.tracker
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Number of turns in the transcript.
    pub fn turn_count(&self) -> usize {
        self.transcript.len()
    }
}
