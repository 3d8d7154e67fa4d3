use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum derived-title length before truncation kicks in.
pub const TITLE_MAX_CHARS: usize = 30;

/// Trip status in the planning lifecycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TripStatus {
    Planning,
    Confirmed,
    Completed,
}

impl TripStatus {
    /// Human-readable badge text
    pub fn label(&self) -> &'static str {
        match self {
            TripStatus::Planning => "Planning",
            TripStatus::Confirmed => "Confirmed",
            TripStatus::Completed => "Completed",
        }
    }
}

impl std::fmt::Display for TripStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for TripStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "planning" => Ok(TripStatus::Planning),
            "confirmed" => Ok(TripStatus::Confirmed),
            "completed" => Ok(TripStatus::Completed),
            _ => Err(format!("Invalid trip status: {}", s)),
        }
    }
}

/// Author of a conversation message
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One utterance in a trip's conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(role: MessageRole, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content,
            timestamp: Utc::now(),
        }
    }
}

/// Caller-supplied half of a message; id and timestamp are store-assigned
#[derive(Debug, Clone)]
pub struct MessageDraft {
    pub role: MessageRole,
    pub content: String,
}

impl MessageDraft {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// A planning record with dates, status, and an attached conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trip {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
    pub status: TripStatus,
}

impl Trip {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            title: "New Trip".to_string(),
            description: String::new(),
            start_date: None,
            end_date: None,
            messages: Vec::new(),
            created_at: Utc::now(),
            status: TripStatus::Planning,
        }
    }

    /// Whole days between the two dates; `None` unless both are set
    pub fn duration_days(&self) -> Option<i64> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => Some((end - start).num_days()),
            _ => None,
        }
    }

    /// Timestamp of the newest message, if any
    pub fn last_activity(&self) -> Option<DateTime<Utc>> {
        self.messages.last().map(|m| m.timestamp)
    }

    pub fn date_window(&self) -> DateWindow {
        DateWindow {
            start: self.start_date,
            end: self.end_date,
        }
    }

    /// Merge a partial update; absent fields keep their prior values
    pub fn apply(&mut self, patch: TripPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(start_date) = patch.start_date {
            self.start_date = start_date;
        }
        if let Some(end_date) = patch.end_date {
            self.end_date = end_date;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

impl Default for Trip {
    fn default() -> Self {
        Self::new()
    }
}

/// Partial-update carrier for `update_trip`. Dates nest an `Option` so a
/// patch can clear them; messages are append-only and not patchable.
#[derive(Debug, Clone, Default)]
pub struct TripPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<Option<NaiveDate>>,
    pub end_date: Option<Option<NaiveDate>>,
    pub status: Option<TripStatus>,
}

impl TripPatch {
    pub fn dates(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self {
            start_date: Some(start),
            end_date: Some(end),
            ..Default::default()
        }
    }

    pub fn status(status: TripStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}

/// A start/end date selection, either side optional
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// Title derived from the first user message: the full text when short,
/// otherwise the first 30 characters plus an ellipsis (char-boundary safe).
pub fn derived_title(text: &str) -> String {
    if text.chars().count() > TITLE_MAX_CHARS {
        let mut title: String = text.chars().take(TITLE_MAX_CHARS).collect();
        title.push_str("...");
        title
    } else {
        text.to_string()
    }
}
