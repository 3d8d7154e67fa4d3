/// Reply theme picked by keyword matching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyTheme {
    Beach,
    City,
    Adventure,
}

/// One keyword rule; any listed keyword appearing in the lowercased
/// utterance selects the theme.
#[derive(Debug, Clone)]
pub struct ReplyRule {
    pub theme: ReplyTheme,
    pub keywords: Vec<&'static str>,
}

impl ReplyRule {
    pub fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|keyword| lowered.contains(keyword))
    }
}

/// The rule table, evaluated in order with first match winning. Order is
/// part of the contract: an utterance mentioning both "beach" and "city"
/// gets the beach reply.
pub fn default_rules() -> Vec<ReplyRule> {
    vec![
        ReplyRule {
            theme: ReplyTheme::Beach,
            keywords: vec!["beach", "tropical"],
        },
        ReplyRule {
            theme: ReplyTheme::City,
            keywords: vec!["city", "urban"],
        },
        ReplyRule {
            theme: ReplyTheme::Adventure,
            keywords: vec!["adventure", "hiking"],
        },
    ]
}
