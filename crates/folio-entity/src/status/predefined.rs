//! Static catalog of predefined statuses.

use serde::Serialize;

/// Emoji offered for custom statuses when none is picked.
pub const DEFAULT_EMOJI: &str = "😊";

/// Catalog ids styled as busy.
pub const BUSY_STATUS_IDS: [&str; 3] = ["busy", "focusing", "meeting"];

/// Catalog ids styled as away.
pub const AWAY_STATUS_IDS: [&str; 2] = ["away", "lunch"];

/// An entry of the predefined status catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PredefinedStatus {
    pub id: &'static str,
    pub emoji: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

const fn entry(
    id: &'static str,
    emoji: &'static str,
    label: &'static str,
    description: &'static str,
) -> PredefinedStatus {
    PredefinedStatus {
        id,
        emoji,
        label,
        description,
    }
}

/// The catalog, in the order it is offered.
///
/// `learning` and `reading` share an emoji; lookups by emoji resolve to
/// the first entry.
pub static PREDEFINED_STATUSES: [PredefinedStatus; 18] = [
    entry("busy", "💼", "Busy", "Working on something important"),
    entry("focusing", "🎯", "Focusing", "Deep work mode, minimal interruptions"),
    entry("available", "✅", "Available", "Available for collaboration"),
    entry("away", "🏃", "Away", "Away from Keyboard"),
    entry("coding", "👨\u{200d}💻", "Coding", "In the zone, writing code"),
    entry("meeting", "📅", "In a meeting", "Currently in a meeting"),
    entry("lunch", "🍽\u{fe0f}", "Out to lunch", "Taking a lunch break"),
    entry("learning", "📚", "Learning", "Studying or learning something new"),
    entry("debugging", "🐛", "Debugging", "Fixing bugs and issues"),
    entry("designing", "🎨", "Designing", "Working on UI/UX design"),
    entry("sleeping", "💤", "Sleeping", "Sleeping"),
    entry("gym", "🏋\u{fe0f}", "Gym", "Working out at the gym"),
    entry("shopping", "🛒", "Shopping", "Shopping at the mall"),
    entry("watching", "🎥", "Watching", "Watching a movie"),
    entry("reading", "📚", "Reading", "Reading a book"),
    entry("traveling", "🌍", "Traveling", "Traveling to a new place"),
    entry("cleaning", "🧹", "Cleaning", "Cleaning the house"),
    entry("cooking", "🍳", "Cooking", "Cooking a meal"),
];
