//! Publish-date parsing and formatting.
//!
//! Export items carry an RFC-2822 `pubDate` (`Fri, 25 Dec 2020 11:20:35
//! +0000`). We interpret it in UTC and format per configuration: a custom
//! strftime string takes precedence, otherwise a full ISO-8601 timestamp
//! when time is requested, otherwise a date-only string.
//!
//! An unparseable date is a data-quality signal, not a crash: the raw value
//! propagates into the output untouched so the writer surfaces it verbatim.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, SecondsFormat, Utc};

use crate::config::ConvertOptions;

const ISO_DATE: &str = "%Y-%m-%d";

/// Format an item's raw `pubDate` value per configuration.
pub fn format_post_date(raw: &str, options: &ConvertOptions) -> String {
    let parsed = match DateTime::parse_from_rfc2822(raw) {
        Ok(dt) => dt.with_timezone(&Utc),
        Err(_) => return raw.to_string(),
    };

    if let Some(fmt) = options
        .custom_date_formatting
        .as_deref()
        .filter(|f| !f.is_empty())
    {
        format_custom(parsed, fmt)
    } else if options.include_time_with_date {
        parsed.to_rfc3339_opts(SecondsFormat::Millis, true)
    } else {
        parsed.format(ISO_DATE).to_string()
    }
}

/// Apply a user-supplied strftime format. A format string chrono cannot
/// parse falls back to the ISO date instead of panicking mid-run.
fn format_custom(date: DateTime<Utc>, fmt: &str) -> String {
    let items: Vec<Item<'_>> = StrftimeItems::new(fmt).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return date.format(ISO_DATE).to_string();
    }
    date.format_with_items(items.into_iter()).to_string()
}
