use chrono::NaiveDate;
use wayfare_core::DateWindow;

use crate::rules::ReplyTheme;

/// Suggestion chips shown by presentation layers next to an empty
/// conversation.
pub const STARTER_PROMPTS: [&str; 3] = ["Beach vacation", "City adventure", "Mountain hiking"];

/// "Feb 14" style, used inside the beach date parenthetical
fn short_date(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// "February 14, 2026" style, used in the fallback clauses
fn long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

pub fn themed_reply(theme: ReplyTheme, window: &DateWindow) -> String {
    match theme {
        ReplyTheme::Beach => beach_reply(window),
        ReplyTheme::City => city_reply(),
        ReplyTheme::Adventure => adventure_reply(),
    }
}

fn beach_reply(window: &DateWindow) -> String {
    let date_clause = match window.start {
        Some(start) => format!(
            " ({} - {})",
            short_date(start),
            window.end.map(short_date).unwrap_or_else(|| "...".to_string())
        ),
        None => String::new(),
    };
    format!(
        "🏖️ A beach getaway sounds wonderful! Based on your dates{date_clause}, I'd recommend:\n\n\
         **Top Beach Destinations:**\n\
         • Maldives - Perfect for luxury overwater villas\n\
         • Bali, Indonesia - Great mix of beaches and culture\n\
         • Cancún, Mexico - Beautiful Caribbean waters\n\n\
         Would you like me to elaborate on any of these destinations?"
    )
}

fn city_reply() -> String {
    "🏙️ City adventures are always exciting! Here are some recommendations:\n\n\
     **Must-Visit Cities:**\n\
     • Tokyo, Japan - Blend of tradition and innovation\n\
     • Barcelona, Spain - Art, architecture, and beaches\n\
     • New York City - The city that never sleeps\n\n\
     What kind of city experience interests you most - cultural, culinary, or nightlife?"
        .to_string()
}

fn adventure_reply() -> String {
    "🏔️ Adventure awaits! For thrill-seekers, I suggest:\n\n\
     **Adventure Destinations:**\n\
     • Queenstown, New Zealand - Adventure capital\n\
     • Costa Rica - Rainforests and zip-lining\n\
     • Swiss Alps - Hiking and stunning views\n\n\
     How intense of an adventure are you looking for?"
        .to_string()
}

pub fn fallback_reply(window: &DateWindow) -> String {
    let from_clause = window
        .start
        .map(|d| format!(" from {}", long_date(d)))
        .unwrap_or_default();
    let to_clause = window
        .end
        .map(|d| format!(" to {}", long_date(d)))
        .unwrap_or_default();
    format!(
        "Great! I'd love to help you plan your trip{from_clause}{to_clause}.\n\n\
         To give you the best recommendations, could you tell me:\n\
         • What type of experience are you looking for? (relaxation, adventure, culture)\n\
         • Your budget range\n\
         • Any specific activities you want to include\n\n\
         Feel free to describe your dream trip in detail! 🌍✨"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(start: Option<(i32, u32, u32)>, end: Option<(i32, u32, u32)>) -> DateWindow {
        DateWindow {
            start: start.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            end: end.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
        }
    }

    #[test]
    fn test_short_and_long_date_formats() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 7).unwrap();
        assert_eq!(short_date(date), "Feb 7");
        assert_eq!(long_date(date), "February 7, 2026");
    }

    #[test]
    fn test_beach_reply_interpolates_dates() {
        let reply = beach_reply(&window(Some((2026, 2, 14)), Some((2026, 2, 16))));
        assert!(reply.contains("(Feb 14 - Feb 16)"));

        let open_ended = beach_reply(&window(Some((2026, 2, 14)), None));
        assert!(open_ended.contains("(Feb 14 - ...)"));

        let undated = beach_reply(&window(None, None));
        assert!(!undated.contains('('));
    }

    #[test]
    fn test_fallback_clauses_are_independent() {
        let both = fallback_reply(&window(Some((2026, 4, 1)), Some((2026, 4, 10))));
        assert!(both.contains("trip from April 1, 2026 to April 10, 2026."));

        let start_only = fallback_reply(&window(Some((2026, 4, 1)), None));
        assert!(start_only.contains("trip from April 1, 2026."));
        assert!(!start_only.contains(" to April"));

        let undated = fallback_reply(&window(None, None));
        assert!(undated.contains("plan your trip.\n"));
    }
}
