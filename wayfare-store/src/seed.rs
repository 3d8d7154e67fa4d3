use chrono::{NaiveDate, TimeZone, Utc};
use uuid::Uuid;
use wayfare_core::{Message, MessageRole, Trip, TripStatus};

/// The two demo trips shown to a fresh install, used when
/// `engine.seed_demo_trips` is on.
pub fn demo_trips() -> Vec<Trip> {
    vec![
        Trip {
            id: Uuid::new_v4(),
            title: "Weekend in Paris".to_string(),
            description: "A romantic getaway to the city of lights".to_string(),
            start_date: NaiveDate::from_ymd_opt(2026, 2, 14),
            end_date: NaiveDate::from_ymd_opt(2026, 2, 16),
            messages: vec![
                Message {
                    id: Uuid::new_v4(),
                    role: MessageRole::User,
                    content: "I want to plan a romantic weekend in Paris for Valentine's Day"
                        .to_string(),
                    timestamp: demo_timestamp(2026, 1, 10),
                },
                Message {
                    id: Uuid::new_v4(),
                    role: MessageRole::Assistant,
                    content: "Paris is perfect for Valentine's Day! I'd recommend staying in the \
                              Marais district. Would you like suggestions for romantic restaurants \
                              and activities?"
                        .to_string(),
                    timestamp: demo_timestamp(2026, 1, 10),
                },
            ],
            created_at: demo_timestamp(2026, 1, 10),
            status: TripStatus::Confirmed,
        },
        Trip {
            id: Uuid::new_v4(),
            title: "Tokyo Adventure".to_string(),
            description: "Exploring Japanese culture and cuisine".to_string(),
            start_date: NaiveDate::from_ymd_opt(2026, 4, 1),
            end_date: NaiveDate::from_ymd_opt(2026, 4, 10),
            messages: Vec::new(),
            created_at: demo_timestamp(2026, 1, 5),
            status: TripStatus::Planning,
        },
    ]
}

fn demo_timestamp(year: i32, month: u32, day: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_trips_fixture() {
        let trips = demo_trips();
        assert_eq!(trips.len(), 2);

        let paris = &trips[0];
        assert_eq!(paris.title, "Weekend in Paris");
        assert_eq!(paris.status, TripStatus::Confirmed);
        assert_eq!(paris.messages.len(), 2);
        assert_eq!(paris.messages[0].role, MessageRole::User);
        assert_eq!(paris.messages[1].role, MessageRole::Assistant);
        assert_eq!(paris.duration_days(), Some(2));

        let tokyo = &trips[1];
        assert_eq!(tokyo.title, "Tokyo Adventure");
        assert_eq!(tokyo.status, TripStatus::Planning);
        assert!(tokyo.messages.is_empty());
    }

    #[test]
    fn test_demo_ids_are_fresh_per_call() {
        let first = demo_trips();
        let second = demo_trips();
        assert_ne!(first[0].id, second[0].id);
    }
}
