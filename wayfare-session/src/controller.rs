use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use uuid::Uuid;
use wayfare_assistant::ReplyEngine;
use wayfare_core::{derived_title, Message, MessageDraft, TripError, TripPatch, TripRepository};
use wayfare_store::{Config, TripStore};

/// The committed message pair produced by one successful turn.
#[derive(Debug, Clone)]
pub struct Turn {
    pub user: Message,
    pub assistant: Message,
}

/// Result of a send: either a full turn, or nothing happened (blank input
/// or an unknown/missing trip under the lenient policy).
#[derive(Debug, Clone)]
pub enum SendOutcome {
    Ignored,
    Replied(Turn),
}

impl SendOutcome {
    pub fn turn(self) -> Option<Turn> {
        match self {
            SendOutcome::Replied(turn) => Some(turn),
            SendOutcome::Ignored => None,
        }
    }
}

/// Orchestrates one conversation turn: commit the user message, pause for
/// the simulated think-time, generate and commit the assistant reply, then
/// derive trip metadata on the first turn.
///
/// Concurrent sends against the same trip are neither queued nor rejected;
/// callers are expected to serialize them (the send action is disabled
/// while `is_awaiting` reports true). The store's atomic append means an
/// unserialized caller can interleave turns but never lose a message.
pub struct ConversationController {
    store: Arc<TripStore>,
    replies: ReplyEngine,
    thinking_delay: Duration,
    typing: Arc<Mutex<HashSet<Uuid>>>,
}

impl ConversationController {
    pub fn new(store: Arc<TripStore>, thinking_delay: Duration) -> Self {
        Self {
            store,
            replies: ReplyEngine::default(),
            thinking_delay,
            typing: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    pub fn from_config(store: Arc<TripStore>, config: &Config) -> Self {
        Self::new(store, config.engine.thinking_delay())
    }

    /// True while a send against this trip is between its user and
    /// assistant commits.
    pub fn is_awaiting(&self, trip_id: Uuid) -> bool {
        self.typing
            .lock()
            .map(|set| set.contains(&trip_id))
            .unwrap_or(false)
    }

    /// Run one turn against the addressed trip.
    pub async fn send_message(
        &self,
        trip_id: Uuid,
        text: &str,
    ) -> Result<SendOutcome, TripError> {
        let text = text.trim();
        if text.is_empty() {
            if self.store.mode().is_strict() {
                return Err(TripError::EmptyContent);
            }
            return Ok(SendOutcome::Ignored);
        }

        let Some(trip) = self.store.trip(trip_id).await else {
            if self.store.mode().is_strict() {
                return Err(TripError::TripNotFound(trip_id));
            }
            return Ok(SendOutcome::Ignored);
        };
        let first_turn = trip.messages.is_empty();

        tracing::info!("Turn started on trip {} ({})", trip_id, preview(text));
        let _guard = TypingGuard::mark(&self.typing, trip_id);

        let Some(user) = self
            .store
            .add_message(trip_id, MessageDraft::user(text))
            .await?
        else {
            return Ok(SendOutcome::Ignored);
        };

        // The one suspension point: simulated think-time, no real work.
        tokio::time::sleep(self.thinking_delay).await;

        // Re-read the trip so a date selection made during the pause is
        // honored by the reply.
        let window = self
            .store
            .trip(trip_id)
            .await
            .map(|t| t.date_window())
            .unwrap_or_default();
        let reply = self.replies.generate(text, &window);

        let Some(assistant) = self
            .store
            .add_message(trip_id, MessageDraft::assistant(reply))
            .await?
        else {
            // Trip deleted while the assistant was thinking.
            return Ok(SendOutcome::Ignored);
        };

        if first_turn {
            let patch = TripPatch {
                title: Some(derived_title(text)),
                description: Some(text.to_string()),
                ..Default::default()
            };
            self.store.update_trip(trip_id, patch).await?;
            tracing::debug!("Derived metadata for trip {}", trip_id);
        }

        tracing::info!("Turn completed on trip {}", trip_id);
        Ok(SendOutcome::Replied(Turn { user, assistant }))
    }

    /// Send against the currently selected trip, the form the presentation
    /// layer uses.
    pub async fn send_to_current(&self, text: &str) -> Result<SendOutcome, TripError> {
        match self.store.current_trip().await {
            Some(trip) => self.send_message(trip.id, text).await,
            None if self.store.mode().is_strict() => Err(TripError::NoCurrentTrip),
            None => Ok(SendOutcome::Ignored),
        }
    }
}

/// Clears the awaiting flag when the send completes, including when the
/// future is dropped mid-pause.
struct TypingGuard {
    typing: Arc<Mutex<HashSet<Uuid>>>,
    trip_id: Uuid,
}

impl TypingGuard {
    fn mark(typing: &Arc<Mutex<HashSet<Uuid>>>, trip_id: Uuid) -> Self {
        if let Ok(mut set) = typing.lock() {
            set.insert(trip_id);
        }
        Self {
            typing: typing.clone(),
            trip_id,
        }
    }
}

impl Drop for TypingGuard {
    fn drop(&mut self) {
        if let Ok(mut set) = self.typing.lock() {
            set.remove(&self.trip_id);
        }
    }
}

/// Log-safe preview of an utterance; full content never reaches the logs.
fn preview(text: &str) -> String {
    const MAX: usize = 24;
    if text.chars().count() > MAX {
        let head: String = text.chars().take(MAX).collect();
        format!("{}…, {} chars", head, text.chars().count())
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfare_core::{MessageRole, ValidationMode};

    fn controller(mode: ValidationMode) -> (Arc<TripStore>, ConversationController) {
        let store = Arc::new(TripStore::new(mode));
        let controller = ConversationController::new(store.clone(), Duration::ZERO);
        (store, controller)
    }

    #[tokio::test]
    async fn test_blank_input_is_ignored() {
        let (store, controller) = controller(ValidationMode::Lenient);
        let trip = store.create_trip().await;

        let outcome = controller.send_message(trip.id, "   \n ").await.unwrap();
        assert!(outcome.turn().is_none());
        assert!(store.trip(trip.id).await.unwrap().messages.is_empty());
    }

    #[tokio::test]
    async fn test_blank_input_errors_in_strict_mode() {
        let (store, controller) = controller(ValidationMode::Strict);
        let trip = store.create_trip().await;

        let result = controller.send_message(trip.id, "  ").await;
        assert!(matches!(result, Err(TripError::EmptyContent)));
        assert!(store.trip(trip.id).await.unwrap().messages.is_empty());
    }

    #[tokio::test]
    async fn test_turn_commits_user_then_assistant() {
        let (store, controller) = controller(ValidationMode::Lenient);
        let trip = store.create_trip().await;

        let turn = controller
            .send_message(trip.id, "beach please")
            .await
            .unwrap()
            .turn()
            .unwrap();
        assert_eq!(turn.user.role, MessageRole::User);
        assert_eq!(turn.assistant.role, MessageRole::Assistant);

        let messages = store.trip(trip.id).await.unwrap().messages;
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].id, turn.user.id);
        assert_eq!(messages[1].id, turn.assistant.id);
    }

    #[tokio::test]
    async fn test_first_turn_derives_metadata_once() {
        let (store, controller) = controller(ValidationMode::Lenient);
        let trip = store.create_trip().await;
        let long = "I want a relaxing two week trip to the mountains with my family and friends this summer";

        controller.send_message(trip.id, long).await.unwrap();
        let after_first = store.trip(trip.id).await.unwrap();
        assert_eq!(after_first.title, "I want a relaxing two week tri...");
        assert_eq!(after_first.description, long);

        controller
            .send_message(trip.id, "make it a city break instead")
            .await
            .unwrap();
        let after_second = store.trip(trip.id).await.unwrap();
        assert_eq!(after_second.title, after_first.title);
        assert_eq!(after_second.description, after_first.description);
        assert_eq!(after_second.messages.len(), 4);
    }

    #[tokio::test]
    async fn test_trimmed_text_feeds_title_and_message() {
        let (store, controller) = controller(ValidationMode::Lenient);
        let trip = store.create_trip().await;

        controller.send_message(trip.id, "  beach please  ").await.unwrap();
        let updated = store.trip(trip.id).await.unwrap();
        assert_eq!(updated.title, "beach please");
        assert_eq!(updated.messages[0].content, "beach please");
    }

    #[tokio::test]
    async fn test_send_to_current_without_selection() {
        let (_, lenient) = controller(ValidationMode::Lenient);
        let outcome = lenient.send_to_current("beach please").await.unwrap();
        assert!(outcome.turn().is_none());

        let (_, strict) = controller(ValidationMode::Strict);
        assert!(matches!(
            strict.send_to_current("beach please").await,
            Err(TripError::NoCurrentTrip)
        ));
    }

    #[tokio::test]
    async fn test_unknown_trip_per_mode() {
        let (_, lenient) = controller(ValidationMode::Lenient);
        let outcome = lenient.send_message(Uuid::new_v4(), "hello").await.unwrap();
        assert!(outcome.turn().is_none());

        let (_, strict) = controller(ValidationMode::Strict);
        assert!(matches!(
            strict.send_message(Uuid::new_v4(), "hello").await,
            Err(TripError::TripNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_awaiting_flag_clears_after_turn() {
        let (store, controller) = controller(ValidationMode::Lenient);
        let trip = store.create_trip().await;

        assert!(!controller.is_awaiting(trip.id));
        controller.send_message(trip.id, "hello there").await.unwrap();
        assert!(!controller.is_awaiting(trip.id));
    }

    #[test]
    fn test_preview_truncates_long_text() {
        assert_eq!(preview("short"), "short");
        let long = "a".repeat(40);
        let shown = preview(&long);
        assert!(shown.starts_with(&"a".repeat(24)));
        assert!(shown.ends_with("40 chars"));
    }
}
