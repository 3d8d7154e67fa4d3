pub mod controller;
pub mod date_sync;

pub use controller::{ConversationController, SendOutcome, Turn};
pub use date_sync::DateSync;
