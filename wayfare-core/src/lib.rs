pub mod identity;
pub mod models;
pub mod repository;
pub mod validation;

pub use models::{
    derived_title, DateWindow, Message, MessageDraft, MessageRole, Trip, TripPatch, TripStatus,
};
pub use repository::{TripError, TripRepository};
pub use validation::ValidationMode;
