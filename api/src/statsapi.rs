//! MLB Stats API raw wire types: serde shapes for deserializing statsapi responses.
//! These map to our clean domain types via the builders in record.rs and client.rs.
use serde::Deserialize;
use serde_json::Value;

// ---------------------------------------------------------------------------
// Schedule  (/schedule)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScheduleResponse {
    #[serde(default)]
    pub dates: Vec<ScheduleDate>,
}

/// One date's worth of schedule as returned upstream.
///
/// Kept as an untyped value: a single malformed date must not fail
/// deserialization of the whole schedule response.
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(transparent)]
pub struct ScheduleDate(pub Value);

impl ScheduleDate {
    /// The `date` label of this entry, e.g. "2019-03-28".
    pub fn date(&self) -> Option<&str> {
        self.0.get("date").and_then(Value::as_str)
    }
}

impl From<Value> for ScheduleDate {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RawGame {
    pub game_pk: u64,
    pub game_type: String,
    /// ISO 8601, e.g. "2019-03-28T20:05:00Z".
    pub game_date: String,
    pub status: RawStatus,
    pub teams: RawTeams,
    pub venue: Option<RawVenue>,
    pub game_number: Option<u8>,
    pub double_header: Option<String>, // "N" | "Y" | "S"
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RawStatus {
    pub abstract_game_state: String, // "Preview" | "Live" | "Final" | ...
    pub detailed_state: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RawTeams {
    pub home: RawSide,
    pub away: RawSide,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RawSide {
    pub team: RawTeam,
    /// Absent until the game starts.
    pub score: Option<u16>,
    pub league_record: Option<RawLeagueRecord>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RawTeam {
    pub id: Option<u32>,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RawLeagueRecord {
    pub wins: u16,
    pub losses: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RawVenue {
    pub name: Option<String>,
}

// ---------------------------------------------------------------------------
// Linescore  (/game/{gamePk}/linescore)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LinescoreResponse {
    pub current_inning: Option<u8>,
    pub inning_state: Option<String>, // "Top" | "Middle" | "Bottom" | "End"
    pub scheduled_innings: Option<u8>,
    #[serde(default)]
    pub innings: Vec<RawInning>,
    pub teams: Option<RawLineTeams>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RawInning {
    pub num: u8,
    pub home: Option<RawLineStats>,
    pub away: Option<RawLineStats>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RawLineTeams {
    pub home: Option<RawLineStats>,
    pub away: Option<RawLineStats>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RawLineStats {
    /// Missing for a half inning that was never played (e.g. bottom 9th).
    pub runs: Option<u16>,
    pub hits: Option<u16>,
    pub errors: Option<u16>,
    pub left_on_base: Option<u16>,
}

// ---------------------------------------------------------------------------
// Roster  (/teams/{teamId}/roster)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RosterResponse {
    #[serde(default)]
    pub roster: Vec<RawRosterEntry>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RawRosterEntry {
    pub person: RawPerson,
    pub jersey_number: Option<String>,
    pub position: Option<RawPosition>,
    pub status: Option<RawRosterStatus>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RawPerson {
    pub id: u64,
    pub full_name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RawPosition {
    pub abbreviation: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RawRosterStatus {
    pub description: Option<String>,
}
