use crate::statsapi::ScheduleDate;
use serde_json::Value;

/// Expand one date's schedule entry into the individual games it holds.
///
/// A double-header arrives as two (or more) entries under `games`; each is
/// yielded as an independent game, in upstream order. An absent or
/// non-array `games` yields nothing.
pub fn games_for_date(entry: &ScheduleDate) -> impl Iterator<Item = &Value> {
    entry
        .0
        .get("games")
        .and_then(Value::as_array)
        .map(|games| games.as_slice())
        .unwrap_or_default()
        .iter()
}

pub fn is_double_header(entry: &ScheduleDate) -> bool {
    games_for_date(entry).count() > 1
}
