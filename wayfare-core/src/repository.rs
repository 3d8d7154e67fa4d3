use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::{Message, MessageDraft, Trip, TripPatch, TripStatus};

/// Errors surfaced by trip operations. In lenient mode most of these never
/// escape; strict mode reports all of them (see `ValidationMode`).
#[derive(Debug, thiserror::Error)]
pub enum TripError {
    #[error("Trip not found: {0}")]
    TripNotFound(Uuid),

    #[error("No trip is currently selected")]
    NoCurrentTrip,

    #[error("End date {end} is before start date {start}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Message content is empty")]
    EmptyContent,
}

/// Repository contract for trip data access, owned by the store crate.
///
/// Mutations are synchronous from the caller's point of view: once a call
/// returns, the change is visible to every subsequent read.
#[async_trait]
pub trait TripRepository: Send + Sync {
    /// Register a default trip, make it current, and return the snapshot.
    async fn create_trip(&self) -> Trip;

    /// Merge a partial update into the addressed trip.
    async fn update_trip(&self, id: Uuid, patch: TripPatch) -> Result<(), TripError>;

    /// Remove a trip; clears the current pointer when it pointed there.
    async fn delete_trip(&self, id: Uuid) -> Result<(), TripError>;

    /// Set or clear the current-trip pointer.
    async fn set_current_trip(&self, id: Option<Uuid>) -> Result<(), TripError>;

    /// Assign id and timestamp, then atomically append to the trip's
    /// conversation. Returns the committed message, or `Ok(None)` when the
    /// trip is unknown or the content is blank and the store is lenient.
    async fn add_message(
        &self,
        trip_id: Uuid,
        draft: MessageDraft,
    ) -> Result<Option<Message>, TripError>;

    /// All trips in insertion order.
    async fn trips(&self) -> Vec<Trip>;

    /// A single trip snapshot by id.
    async fn trip(&self, id: Uuid) -> Option<Trip>;

    /// The currently selected trip, if the pointer resolves.
    async fn current_trip(&self) -> Option<Trip>;

    /// Trips filtered by status, insertion order preserved.
    async fn trips_with_status(&self, status: TripStatus) -> Vec<Trip>;
}
