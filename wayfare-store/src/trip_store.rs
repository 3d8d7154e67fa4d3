use tokio::sync::{broadcast, RwLock};
use uuid::Uuid;
use wayfare_core::{
    validation, Message, MessageDraft, Trip, TripError, TripPatch, TripRepository, TripStatus,
    ValidationMode,
};

use crate::config::Config;
use crate::events::TripEvent;
use crate::seed;

const EVENT_CHANNEL_CAPACITY: usize = 100;

struct StoreState {
    trips: Vec<Trip>,
    current: Option<Uuid>,
}

/// In-memory trip collection plus the current-trip pointer.
///
/// Every mutation runs entirely under the single write lock, so appends are
/// atomic and there is no uncommitted window visible to readers. Each
/// mutation broadcasts a `TripEvent` before the lock is released, which
/// keeps the event order equal to the mutation order.
pub struct TripStore {
    state: RwLock<StoreState>,
    events: broadcast::Sender<TripEvent>,
    mode: ValidationMode,
}

impl TripStore {
    pub fn new(mode: ValidationMode) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            state: RwLock::new(StoreState {
                trips: Vec::new(),
                current: None,
            }),
            events,
            mode,
        }
    }

    /// Build a store from configuration, seeding the demo trips when asked.
    pub fn from_config(config: &Config) -> Self {
        let trips = if config.engine.seed_demo_trips {
            let trips = seed::demo_trips();
            tracing::info!("Seeding {} demo trips", trips.len());
            trips
        } else {
            Vec::new()
        };
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            state: RwLock::new(StoreState {
                trips,
                current: None,
            }),
            events,
            mode: config.engine.validation_mode,
        }
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    /// Subscribe to change notifications. Receivers that fall behind the
    /// channel capacity skip events instead of blocking the store.
    pub fn subscribe(&self) -> broadcast::Receiver<TripEvent> {
        self.events.subscribe()
    }

    fn emit(&self, event: TripEvent) {
        // Send only fails when nobody is subscribed, which is fine.
        let _ = self.events.send(event);
    }

    fn missing(&self, id: Uuid) -> Result<(), TripError> {
        if self.mode.is_strict() {
            Err(TripError::TripNotFound(id))
        } else {
            tracing::debug!("Ignoring operation on unknown trip {}", id);
            Ok(())
        }
    }
}

impl Default for TripStore {
    fn default() -> Self {
        Self::new(ValidationMode::Lenient)
    }
}

#[async_trait::async_trait]
impl TripRepository for TripStore {
    async fn create_trip(&self) -> Trip {
        let trip = Trip::new();
        let mut state = self.state.write().await;
        state.trips.push(trip.clone());
        state.current = Some(trip.id);
        tracing::info!("Created trip {}", trip.id);
        self.emit(TripEvent::TripCreated { trip_id: trip.id });
        self.emit(TripEvent::CurrentTripChanged {
            trip_id: Some(trip.id),
        });
        trip
    }

    async fn update_trip(&self, id: Uuid, patch: TripPatch) -> Result<(), TripError> {
        let mut state = self.state.write().await;
        let Some(trip) = state.trips.iter_mut().find(|t| t.id == id) else {
            return self.missing(id);
        };

        if self.mode.is_strict() {
            let start = patch.start_date.unwrap_or(trip.start_date);
            let end = patch.end_date.unwrap_or(trip.end_date);
            if !validation::date_window_is_valid(start, end) {
                // Prior values stay untouched.
                return Err(TripError::InvalidDateRange {
                    start: start.unwrap_or_default(),
                    end: end.unwrap_or_default(),
                });
            }
        }

        trip.apply(patch);
        tracing::debug!("Updated trip {}", id);
        self.emit(TripEvent::TripUpdated { trip_id: id });
        Ok(())
    }

    async fn delete_trip(&self, id: Uuid) -> Result<(), TripError> {
        let mut state = self.state.write().await;
        let before = state.trips.len();
        state.trips.retain(|t| t.id != id);
        if state.trips.len() == before {
            return self.missing(id);
        }

        tracing::info!("Deleted trip {}", id);
        self.emit(TripEvent::TripDeleted { trip_id: id });
        if state.current == Some(id) {
            state.current = None;
            self.emit(TripEvent::CurrentTripChanged { trip_id: None });
        }
        Ok(())
    }

    async fn set_current_trip(&self, id: Option<Uuid>) -> Result<(), TripError> {
        let mut state = self.state.write().await;
        if self.mode.is_strict() {
            if let Some(id) = id {
                if !state.trips.iter().any(|t| t.id == id) {
                    return Err(TripError::TripNotFound(id));
                }
            }
        }
        state.current = id;
        self.emit(TripEvent::CurrentTripChanged { trip_id: id });
        Ok(())
    }

    async fn add_message(
        &self,
        trip_id: Uuid,
        draft: MessageDraft,
    ) -> Result<Option<Message>, TripError> {
        if draft.content.trim().is_empty() {
            if self.mode.is_strict() {
                return Err(TripError::EmptyContent);
            }
            tracing::debug!("Ignoring blank message for trip {}", trip_id);
            return Ok(None);
        }

        let mut state = self.state.write().await;
        let Some(trip) = state.trips.iter_mut().find(|t| t.id == trip_id) else {
            self.missing(trip_id)?;
            return Ok(None);
        };

        let mut message = Message::new(draft.role, draft.content);
        // Clamp against clock regression so the sequence stays monotonic.
        if let Some(last) = trip.messages.last() {
            if message.timestamp < last.timestamp {
                message.timestamp = last.timestamp;
            }
        }
        trip.messages.push(message.clone());
        tracing::debug!(
            "Appended {} message {} to trip {}",
            message.role,
            message.id,
            trip_id
        );
        self.emit(TripEvent::MessageAppended {
            trip_id,
            message_id: message.id,
            role: message.role,
        });
        Ok(Some(message))
    }

    async fn trips(&self) -> Vec<Trip> {
        self.state.read().await.trips.clone()
    }

    async fn trip(&self, id: Uuid) -> Option<Trip> {
        let state = self.state.read().await;
        state.trips.iter().find(|t| t.id == id).cloned()
    }

    async fn current_trip(&self) -> Option<Trip> {
        let state = self.state.read().await;
        let id = state.current?;
        state.trips.iter().find(|t| t.id == id).cloned()
    }

    async fn trips_with_status(&self, status: TripStatus) -> Vec<Trip> {
        let state = self.state.read().await;
        state
            .trips
            .iter()
            .filter(|t| t.status == status)
            .cloned()
            .collect()
    }
}
