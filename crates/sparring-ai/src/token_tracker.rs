//! Token usage tracking for a session.

use crate::TokenUsage;

/// Cumulative token usage across the calls of a session.
#[derive(Debug, Default)]
pub struct TokenTracker {
    total: TokenUsage,
    last: Option<TokenUsage>,
    call_count: u64,
}

impl TokenTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record token usage from one successful generation call.
    pub fn record(&mut self, usage: &TokenUsage) {
        self.total.input_tokens = self.total.input_tokens.saturating_add(usage.input_tokens);
        self.total.output_tokens = self.total.output_tokens.saturating_add(usage.output_tokens);
        self.call_count += 1;
        self.last = Some(usage.clone());
    }

    pub fn total(&self) -> &TokenUsage {
        &self.total
    }

    /// Usage of the most recent call; its input count is roughly the
    /// current context size.
    pub fn last(&self) -> Option<&TokenUsage> {
        self.last.as_ref()
    }

    pub fn call_count(&self) -> u64 {
        self.call_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usage(input: u64, output: u64) -> TokenUsage {
        TokenUsage {
            input_tokens: input,
            output_tokens: output,
        }
    }

    #[test]
    fn accumulates_total_and_remembers_last_call() {
        let mut tracker = TokenTracker::new();
        assert!(tracker.last().is_none());

        tracker.record(&usage(100, 20));
        tracker.record(&usage(150, 30));

        assert_eq!(tracker.total(), &usage(250, 50));
        assert_eq!(tracker.last(), Some(&usage(150, 30)));
        assert_eq!(tracker.call_count(), 2);
    }

    #[test]
    fn totals_saturate() {
        let mut tracker = TokenTracker::new();
        tracker.record(&usage(u64::MAX, 1));
        tracker.record(&usage(5, 1));
        assert_eq!(tracker.total().input_tokens, u64::MAX);
        assert_eq!(tracker.total().output_tokens, 2);
    }
}
