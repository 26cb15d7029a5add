use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRef {
    pub abbrev: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    #[serde(rename = "homeTeam")]
    pub home_team: TeamRef,
    #[serde(rename = "awayTeam")]
    pub away_team: TeamRef,
}

impl Game {
    pub fn new(home: impl Into<String>, away: impl Into<String>) -> Self {
        Self {
            home_team: TeamRef {
                abbrev: home.into(),
            },
            away_team: TeamRef {
                abbrev: away.into(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GameDay {
    #[serde(default)]
    pub games: Option<Vec<Game>>,
}

/// Body of `schedule/now`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ScheduleResponse {
    #[serde(rename = "gameWeek", default)]
    pub game_week: Option<Vec<GameDay>>,
}
