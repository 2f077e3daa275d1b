//! Display formatting for timestamps and chat authors.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use chrono::{DateTime, Local, TimeZone};
use protocol::address::same_address;
use protocol::pixels::Timestamp;

/// `HH:MM` of an RFC 3339 timestamp in `tz`. Unparseable input is returned as is.
pub fn clock_time_in<Tz: TimeZone>(timestamp: &str, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    DateTime::parse_from_rfc3339(timestamp)
        .map(|t| t.with_timezone(tz).format("%H:%M").to_string())
        .unwrap_or_else(|_| timestamp.to_owned())
}

/// `HH:MM` in the viewer's local time.
pub fn clock_time(timestamp: &str) -> String {
    clock_time_in(timestamp, &Local)
}

/// Date and time of an RFC 3339 timestamp in `tz`.
pub fn date_time_in<Tz: TimeZone>(timestamp: &str, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    DateTime::parse_from_rfc3339(timestamp)
        .map(|t| t.with_timezone(tz).format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|_| timestamp.to_owned())
}

/// Date and time of a pixel's update stamp in `tz`. Epoch milliseconds are
/// converted; text goes through [`date_time_in`].
pub fn pixel_time_in<Tz: TimeZone>(stamp: &Timestamp, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match stamp {
        Timestamp::Text(text) => date_time_in(text, tz),
        Timestamp::Millis(n) => stamp
            .as_millis()
            .and_then(|ms| tz.timestamp_millis_opt(ms).single())
            .map_or_else(|| n.to_string(), |t| t.format("%Y-%m-%d %H:%M:%S").to_string()),
    }
}

/// A pixel's update stamp in the viewer's local time.
pub fn pixel_time(stamp: &Timestamp) -> String {
    pixel_time_in(stamp, &Local)
}

/// CSS modifier for a chat author: messages from the connected wallet stand out.
pub fn author_class(full_address: Option<&str>, wallet: Option<&str>) -> &'static str {
    match (full_address, wallet) {
        (Some(author), Some(me)) if same_address(author, me) => "chat-message__user chat-message__user--self",
        _ => "chat-message__user",
    }
}
