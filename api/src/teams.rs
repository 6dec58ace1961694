use crate::client::ApiError;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::LazyLock;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Team {
    pub id: u32,
    pub name: String,
}

/// (team id, canonical name, aliases). Aliases are matched exactly after
/// lower-casing and trimming; a city shared by two clubs is never an alias.
const TEAMS: &[(u32, &str, &[&str])] = &[
    (108, "Los Angeles Angels", &["angels", "laa", "anaheim", "anaheim angels"]),
    (109, "Arizona Diamondbacks", &["diamondbacks", "dbacks", "d-backs", "ari", "arizona"]),
    (110, "Baltimore Orioles", &["orioles", "o's", "bal", "baltimore"]),
    (111, "Boston Red Sox", &["red sox", "bos", "boston"]),
    (112, "Chicago Cubs", &["cubs", "chc"]),
    (113, "Cincinnati Reds", &["reds", "cin", "cincinnati"]),
    (114, "Cleveland Guardians", &["guardians", "indians", "cleveland indians", "cle", "cleveland"]),
    (115, "Colorado Rockies", &["rockies", "col", "colorado"]),
    (116, "Detroit Tigers", &["tigers", "det", "detroit"]),
    (117, "Houston Astros", &["astros", "hou", "houston"]),
    (118, "Kansas City Royals", &["royals", "kc", "kansas city"]),
    (119, "Los Angeles Dodgers", &["dodgers", "lad"]),
    (120, "Washington Nationals", &["nationals", "nats", "wsh", "washington"]),
    (121, "New York Mets", &["mets", "nym"]),
    (133, "Oakland Athletics", &["athletics", "a's", "oak", "oakland"]),
    (134, "Pittsburgh Pirates", &["pirates", "pit", "pittsburgh"]),
    (135, "San Diego Padres", &["padres", "sd", "san diego"]),
    (136, "Seattle Mariners", &["mariners", "sea", "seattle"]),
    (137, "San Francisco Giants", &["giants", "sf", "san francisco"]),
    (138, "St. Louis Cardinals", &["cardinals", "stl", "st louis", "st. louis", "saint louis"]),
    (139, "Tampa Bay Rays", &["rays", "tb", "tampa", "tampa bay"]),
    (140, "Texas Rangers", &["rangers", "tex", "texas"]),
    (141, "Toronto Blue Jays", &["blue jays", "jays", "tor", "toronto"]),
    (142, "Minnesota Twins", &["twins", "min", "minnesota"]),
    (143, "Philadelphia Phillies", &["phillies", "phi", "philadelphia"]),
    (144, "Atlanta Braves", &["braves", "atl", "atlanta"]),
    (145, "Chicago White Sox", &["white sox", "cws", "chw"]),
    (146, "Miami Marlins", &["marlins", "mia", "miami", "florida marlins"]),
    (147, "New York Yankees", &["yankees", "nyy", "yanks"]),
    (158, "Milwaukee Brewers", &["brewers", "mil", "milwaukee"]),
];

static BY_KEY: LazyLock<HashMap<String, usize>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    for (idx, (_, name, aliases)) in TEAMS.iter().enumerate() {
        map.insert(normalize(name), idx);
        for alias in *aliases {
            map.insert(normalize(alias), idx);
        }
    }
    map
});

fn normalize(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Resolve a free-text team name ("boston", "Red Sox", "BOS") to a club.
pub fn resolve(name: &str) -> Result<Team, ApiError> {
    let (id, canonical, _) = BY_KEY
        .get(&normalize(name))
        .map(|&idx| TEAMS[idx])
        .ok_or_else(|| ApiError::TeamNotFound(name.trim().to_owned()))?;
    Ok(Team { id, name: canonical.to_owned() })
}

/// Every club, in table order.
pub fn all() -> impl Iterator<Item = Team> {
    TEAMS.iter().map(|(id, name, _)| Team { id: *id, name: (*name).to_owned() })
}
