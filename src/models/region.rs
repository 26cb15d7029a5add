use crate::models::player::Player;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionGroup {
    pub region: String,
    pub players: Vec<Player>,
}

/// Region buckets ordered by label.
pub type RegionGroups = Vec<RegionGroup>;
