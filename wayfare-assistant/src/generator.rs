use wayfare_core::DateWindow;

use crate::rules::{default_rules, ReplyRule};
use crate::templates;

/// Deterministic, rule-based reply generator standing in for a real AI
/// backend. Same utterance and date window always produce the same text.
pub struct ReplyEngine {
    rules: Vec<ReplyRule>,
}

impl ReplyEngine {
    pub fn new(rules: Vec<ReplyRule>) -> Self {
        Self { rules }
    }

    /// Generate an assistant reply. Total: always returns non-empty text,
    /// no state, no I/O.
    pub fn generate(&self, utterance: &str, window: &DateWindow) -> String {
        let lowered = utterance.to_lowercase();
        for rule in &self.rules {
            if rule.matches(&lowered) {
                tracing::debug!("Reply matched {:?} theme", rule.theme);
                return templates::themed_reply(rule.theme, window);
            }
        }
        tracing::debug!("Reply fell through to the clarifying questions");
        templates::fallback_reply(window)
    }
}

impl Default for ReplyEngine {
    fn default() -> Self {
        Self::new(default_rules())
    }
}
