pub mod generator;
pub mod rules;
pub mod templates;

pub use generator::ReplyEngine;
pub use rules::{default_rules, ReplyRule, ReplyTheme};
pub use templates::STARTER_PROMPTS;
