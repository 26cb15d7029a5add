use serde::{Deserialize, Serialize};
use std::fmt;

pub const INTERNATIONAL: &str = "International";

/// The league sends names either as plain strings or as `{"default": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocalizedName {
    Plain(String),
    Localized { default: String },
}

impl Default for LocalizedName {
    fn default() -> Self {
        Self::Plain(String::new())
    }
}

impl LocalizedName {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Plain(s) => s,
            Self::Localized { default } => default,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.as_str().trim().is_empty()
    }
}

impl From<&str> for LocalizedName {
    fn from(value: &str) -> Self {
        Self::Plain(value.to_string())
    }
}

impl fmt::Display for LocalizedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub first_name: LocalizedName,
    pub last_name: LocalizedName,
    #[serde(default)]
    pub birth_city: LocalizedName,
    #[serde(default)]
    pub birth_state_province: Option<LocalizedName>,
    #[serde(default)]
    pub birth_country: String,
    #[serde(default)]
    pub team_abbrev: String,
    #[serde(default)]
    pub team_logo: String,
    #[serde(default, alias = "sweaterNumber")]
    pub number: Option<u32>,
    #[serde(default, alias = "positionCode")]
    pub position: Option<String>,
}

impl Player {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Birth state/province, or "International" when the roster has none.
    pub fn region(&self) -> &str {
        self.birth_state_province
            .as_ref()
            .filter(|region| !region.is_blank())
            .map(LocalizedName::as_str)
            .unwrap_or(INTERNATIONAL)
    }

    /// "City, StateProvince, Country" with an empty middle part when there is no region.
    pub fn hometown(&self) -> String {
        let region = self
            .birth_state_province
            .as_ref()
            .map(LocalizedName::as_str)
            .unwrap_or("");
        format!("{}, {}, {}", self.birth_city, region, self.birth_country)
    }
}

/// Body of `roster/{team}/{season}`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RosterResponse {
    #[serde(default)]
    pub forwards: Vec<Player>,
    #[serde(default)]
    pub defensemen: Vec<Player>,
    #[serde(default)]
    pub goalies: Vec<Player>,
}

impl RosterResponse {
    pub fn into_players(self) -> Vec<Player> {
        let mut players = self.forwards;
        players.extend(self.defensemen);
        players.extend(self.goalies);
        players
    }
}
