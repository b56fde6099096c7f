//! Pure presence helpers: styling, expiry, relative and absolute times,
//! and message checks.
//!
//! Functions that depend on the clock have an `_at` variant taking `now`
//! explicitly. Expiry is derived at read time; nothing rewrites a record
//! once its `expiresAt` has passed.

use chrono::{DateTime, Datelike, Days, Duration, FixedOffset, Local, TimeZone, Utc};

use folio_entity::status::{
    AWAY_STATUS_IDS, BUSY_STATUS_IDS, ClearAfter, PREDEFINED_STATUSES, PredefinedStatus,
    PublicStatus, StatusCategory, UserStatus,
};

/// Longest status message accepted, in characters.
pub const MAX_MESSAGE_LENGTH: usize = 80;

/// Offset of Indian Standard Time from UTC, in seconds.
const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// Badge category of a predefined status id.
pub fn status_style_category(id: &str) -> StatusCategory {
    if BUSY_STATUS_IDS.contains(&id) {
        StatusCategory::Busy
    } else if AWAY_STATUS_IDS.contains(&id) {
        StatusCategory::Away
    } else {
        StatusCategory::Online
    }
}

/// First catalog entry using `emoji`.
///
/// A custom status that reuses a catalog emoji resolves to that entry.
pub fn find_predefined_status(emoji: &str) -> Option<&'static PredefinedStatus> {
    PREDEFINED_STATUSES.iter().find(|s| s.emoji == emoji)
}

pub fn find_predefined_status_by_id(id: &str) -> Option<&'static PredefinedStatus> {
    PREDEFINED_STATUSES.iter().find(|s| s.id == id)
}

/// Badge category of a public status, inferred from its emoji.
pub fn display_category(status: &PublicStatus) -> StatusCategory {
    find_predefined_status(&status.emoji)
        .map(|s| status_style_category(s.id))
        .unwrap_or_default()
}

/// When a status set now with `clear_after` should expire.
pub fn calculate_expiration_time(clear_after: ClearAfter) -> Option<DateTime<Local>> {
    calculate_expiration_time_at(clear_after, Local::now())
}

/// [`calculate_expiration_time`] relative to `now`, in `now`'s time zone.
///
/// `Today` ends at 23:59:59.999 of the current day. `Week` ends at
/// 23:59:59.999 of the coming Sunday, a full week out when `now` is a
/// Sunday.
pub fn calculate_expiration_time_at<Tz: TimeZone>(
    clear_after: ClearAfter,
    now: DateTime<Tz>,
) -> Option<DateTime<Tz>> {
    match clear_after {
        ClearAfter::Never => None,
        ClearAfter::Minutes(minutes) => Some(now + Duration::minutes(i64::from(minutes))),
        ClearAfter::Today => end_of_day(&now, 0),
        ClearAfter::Week => {
            let days_until_sunday = 7 - u64::from(now.weekday().num_days_from_sunday());
            end_of_day(&now, days_until_sunday)
        }
    }
}

fn end_of_day<Tz: TimeZone>(now: &DateTime<Tz>, days_ahead: u64) -> Option<DateTime<Tz>> {
    let local = now
        .date_naive()
        .checked_add_days(Days::new(days_ahead))?
        .and_hms_milli_opt(23, 59, 59, 999)?;
    now.timezone().from_local_datetime(&local).earliest()
}

/// Relative age of `timestamp`, e.g. `"5m ago"`.
pub fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    format_time_ago_at(timestamp, Utc::now())
}

pub fn format_time_ago_at(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - timestamp).num_seconds().div_euclid(60);
    if minutes < 1 {
        return "just now".to_string();
    }
    if minutes < 60 {
        return format!("{minutes}m ago");
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{hours}h ago");
    }
    match hours / 24 {
        1 => "yesterday".to_string(),
        days => format!("{days}d ago"),
    }
}

/// `"16 Oct 2026, 09:05 AM"` in `tz`.
pub fn format_status_date<Tz: TimeZone>(timestamp: DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    timestamp
        .with_timezone(tz)
        .format("%-d %b %Y, %I:%M %p")
        .to_string()
}

/// `"16/10/2026 at 9:05:00 am"` in `tz`.
pub fn format_status_date_time<Tz: TimeZone>(timestamp: DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    timestamp
        .with_timezone(tz)
        .format("%-d/%-m/%Y at %-I:%M:%S %P")
        .to_string()
}

/// The "last updated" tooltip text, always in Indian Standard Time.
pub fn format_status_timestamp(timestamp: DateTime<Utc>) -> String {
    let Some(ist) = FixedOffset::east_opt(IST_OFFSET_SECS) else {
        return timestamp.format("%-d %b %Y, %I:%M %p UTC").to_string();
    };
    format!("{} IST", format_status_date(timestamp, &ist))
}

/// Whether `status` should still be shown.
pub fn is_status_active(status: &UserStatus) -> bool {
    is_status_active_at(status, Utc::now())
}

pub fn is_status_active_at(status: &UserStatus, now: DateTime<Utc>) -> bool {
    if !status.is_active {
        return false;
    }
    match status.expires_at {
        Some(expires_at) => now < expires_at,
        None => true,
    }
}

/// Non-blank after trimming and at most [`MAX_MESSAGE_LENGTH`] characters.
pub fn validate_status_message(message: &str) -> bool {
    !message.trim().is_empty() && message.chars().count() <= MAX_MESSAGE_LENGTH
}

/// Trim and cut to [`MAX_MESSAGE_LENGTH`] characters.
pub fn sanitize_status_message(message: &str) -> String {
    message.trim().chars().take(MAX_MESSAGE_LENGTH).collect()
}
