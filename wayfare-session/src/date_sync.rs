use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;
use wayfare_core::{DateWindow, Trip, TripError, TripPatch, TripRepository};
use wayfare_store::TripStore;

/// One-way projection from the calendar widget's selection into trip
/// state. The reverse direction runs once, when a trip becomes current.
pub struct DateSync {
    store: Arc<TripStore>,
}

impl DateSync {
    pub fn new(store: Arc<TripStore>) -> Self {
        Self { store }
    }

    /// Write the picker selection into the trip. Both fields are written
    /// every time; an absent side clears the stored date.
    pub async fn apply_selection(
        &self,
        trip_id: Uuid,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<(), TripError> {
        tracing::debug!("Syncing date selection into trip {}", trip_id);
        self.store
            .update_trip(trip_id, TripPatch::dates(start, end))
            .await
    }

    /// Seed the picker from trip state when the trip becomes current.
    /// `Some` only when both dates are present.
    pub fn initial_selection(trip: &Trip) -> Option<DateWindow> {
        match (trip.start_date, trip.end_date) {
            (Some(start), Some(end)) => Some(DateWindow {
                start: Some(start),
                end: Some(end),
            }),
            _ => None,
        }
    }
}
