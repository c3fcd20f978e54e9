use anyhow::Result;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::types::Tag;

/// Bound `records` to the window between two tags' timestamps.
///
/// `date_of` selects the textual date field to bound on (`closed_at` for
/// issues, `merged_at` for pull requests); `resolve` maps a tag name to
/// its commit timestamp, `None` meaning unbounded on that side.
///
/// With both tags absent the input is returned unchanged. Otherwise a
/// record survives iff its date field parses to a UTC timestamp `t` with
/// `t > older` (exclusive) and `t <= newer` (inclusive). The asymmetry
/// keeps a record whose timestamp equals a tag's own timestamp out of two
/// adjacent release windows while still counting it toward the newer tag.
/// Records without a parseable date are always excluded, even when a bound
/// failed to resolve.
///
/// A resolver failure aborts the whole selection.
pub fn select_by_time_range<R, D, T>(
    records: &[R],
    date_of: D,
    older_tag: Option<&Tag>,
    newer_tag: Option<&Tag>,
    resolve: T,
) -> Result<Vec<R>>
where
    R: Clone,
    D: Fn(&R) -> Option<&str>,
    T: Fn(&str) -> Result<Option<DateTime<Utc>>>,
{
    if older_tag.is_none() && newer_tag.is_none() {
        return Ok(records.to_vec());
    }

    let older_time = match older_tag {
        Some(tag) => resolve(&tag.name)?,
        None => None,
    };
    let newer_time = match newer_tag {
        Some(tag) => resolve(&tag.name)?,
        None => None,
    };

    let selected = records
        .iter()
        .filter(|record| {
            let Some(raw) = date_of(record) else {
                return false;
            };
            let Some(time) = parse_timestamp(raw) else {
                tracing::debug!("excluding record with unparseable date {raw:?}");
                return false;
            };
            older_time.is_none_or(|older| time > older)
                && newer_time.is_none_or(|newer| time <= newer)
        })
        .cloned()
        .collect();

    Ok(selected)
}

/// Parse an ISO-8601-like date string, normalized to UTC.
///
/// Accepts RFC 3339 (the tracker's wire format), a space- or T-separated
/// naive datetime, and a bare date; naive values are taken as UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
        return Some(t.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(t) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(t.and_utc());
        }
    }
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(d.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}
