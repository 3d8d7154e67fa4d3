use serde::Serialize;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::{Stream, StreamExt};
use uuid::Uuid;
use wayfare_core::MessageRole;

/// Change notification broadcast by the store after every mutation.
///
/// Events are sent while the write lock is still held, so subscribers
/// observe them in mutation order.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TripEvent {
    TripCreated { trip_id: Uuid },
    TripUpdated { trip_id: Uuid },
    TripDeleted { trip_id: Uuid },
    MessageAppended { trip_id: Uuid, message_id: Uuid, role: MessageRole },
    CurrentTripChanged { trip_id: Option<Uuid> },
}

/// Adapt a broadcast receiver into a `Stream`, dropping lag errors: a slow
/// subscriber misses events rather than stalling the store.
pub fn event_stream(rx: broadcast::Receiver<TripEvent>) -> impl Stream<Item = TripEvent> {
    BroadcastStream::new(rx).filter_map(|event| event.ok())
}
