//! Player name moderation.
//!
//! Every submitted name passes through the filter before anything is
//! stored. The rules are deliberately blunt: an empty or oversized name,
//! an embedded address, or a blocked word anywhere in the name is enough
//! to refuse it.

use tracing::debug;

const MAX_NAME_LEN: usize = 24;

/// Default blocked-word list. Case-insensitive substring match.
const DEFAULT_BLOCKLIST: &[&str] = &["damn", "hell", "crap", "idiot", "stupid"];

/// Outcome of a moderation check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Rejected(String),
}

pub struct NameFilter {
    blocked: Vec<String>,
}

impl Default for NameFilter {
    fn default() -> Self {
        Self {
            blocked: DEFAULT_BLOCKLIST.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl NameFilter {
    pub fn with_blocklist(words: impl IntoIterator<Item = String>) -> Self {
        Self {
            blocked: words.into_iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    pub fn check(&self, name: &str) -> Verdict {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Verdict::Rejected("name must not be empty".to_string());
        }
        if trimmed.chars().count() > MAX_NAME_LEN {
            return Verdict::Rejected(format!("name longer than {MAX_NAME_LEN} characters"));
        }
        if trimmed.contains('@') {
            return Verdict::Rejected("name must not contain an address".to_string());
        }
        let lowered = trimmed.to_lowercase();
        for word in &self.blocked {
            if lowered.contains(word.as_str()) {
                debug!(name = %trimmed, %word, "Name hit the blocklist");
                return Verdict::Rejected("name contains a blocked word".to_string());
            }
        }
        Verdict::Accepted
    }
}
