use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Error policy applied uniformly across every trip operation.
///
/// `Lenient` treats unknown ids, blank input, and inverted date ranges as
/// silent no-ops. `Strict` surfaces each of them as a `TripError` and
/// leaves prior state untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    #[default]
    Lenient,
    Strict,
}

impl ValidationMode {
    pub fn is_strict(&self) -> bool {
        matches!(self, ValidationMode::Strict)
    }
}

impl std::str::FromStr for ValidationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lenient" => Ok(ValidationMode::Lenient),
            "strict" => Ok(ValidationMode::Strict),
            _ => Err(format!("Invalid validation mode: {}", s)),
        }
    }
}

/// True when the window is ordered or incomplete; only a present pair with
/// `end < start` counts as invalid.
pub fn date_window_is_valid(start: Option<NaiveDate>, end: Option<NaiveDate>) -> bool {
    match (start, end) {
        (Some(start), Some(end)) => end >= start,
        _ => true,
    }
}
