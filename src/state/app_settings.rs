use log::LevelFilter;
use std::str::FromStr;

pub const DEFAULT_TEAM: &str = "boston";

/// Settings read once at startup from `MLBTUI_*` environment variables and
/// the command line.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
    pub team: String,
    /// Season shown on the Team tab. `None` follows the calendar.
    pub season: Option<i32>,
    pub api_url: Option<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            full_screen: false,
            log_level: None,
            team: DEFAULT_TEAM.to_string(),
            season: None,
            api_url: None,
        }
    }
}

impl AppSettings {
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let mut settings = Self::default();
        if let Some(team) = non_empty("MLBTUI_TEAM") {
            settings.team = team;
        }
        settings.season = non_empty("MLBTUI_SEASON").and_then(|v| v.parse().ok());
        settings.log_level = non_empty("MLBTUI_LOG").and_then(|v| LevelFilter::from_str(&v).ok());
        settings.api_url = non_empty("MLBTUI_API_URL");
        settings
    }
}
