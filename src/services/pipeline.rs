use crate::api::NhlApi;
use crate::error::AppError;
use crate::models::player::Player;
use crate::models::region::{RegionGroup, RegionGroups};
use crate::models::schedule::Game;
use futures::future::try_join_all;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

// First-seen order, away before home.
pub fn extract_teams(games: &[Game]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut teams = Vec::new();
    for game in games {
        for abbrev in [&game.away_team.abbrev, &game.home_team.abbrev] {
            if seen.insert(abbrev.as_str()) {
                teams.push(abbrev.clone());
            }
        }
    }
    teams
}

/// Fetches every team's roster concurrently and flattens them in `teams` order.
/// One failed team fails the whole call.
pub async fn fetch_all_rosters(
    api: &NhlApi,
    teams: &[String],
    force_fresh: bool,
) -> Result<Vec<Player>, AppError> {
    info!("Fetching rosters for {} teams", teams.len());

    let fetches = teams.iter().map(|team| async move {
        api.fetch_roster(team, force_fresh)
            .await
            .map_err(|e| AppError::aggregation(team.as_str(), e))
    });

    // try_join_all yields results in input order, not completion order.
    let rosters = try_join_all(fetches).await?;
    let players: Vec<Player> = rosters.into_iter().flatten().collect();

    debug!("Collected {} players", players.len());
    Ok(players)
}

/// Case-insensitive first. Labels that differ only in case put lowercase first.
pub fn compare_regions(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

pub fn group_by_region(players: Vec<Player>) -> RegionGroups {
    let mut buckets: HashMap<String, Vec<Player>> = HashMap::new();
    for player in players {
        buckets
            .entry(player.region().to_string())
            .or_default()
            .push(player);
    }

    let mut groups: RegionGroups = buckets
        .into_iter()
        .map(|(region, players)| RegionGroup { region, players })
        .collect();
    groups.sort_by(|a, b| compare_regions(&a.region, &b.region));
    groups
}
