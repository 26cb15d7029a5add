use crate::config::Config;
use crate::error::AppError;
use crate::models::cache::FetchCache;
use crate::models::player::{Player, RosterResponse};
use crate::models::schedule::{Game, ScheduleResponse};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, Url};
use serde_json::Value;
use tracing::{debug, error, info, warn};

pub const SCHEDULE_KEY: &str = "schedules";

pub fn roster_key(team: &str) -> String {
    format!("roster-{team}")
}

pub struct NhlApi {
    client: Client,
    config: Config,
    cache: FetchCache,
}

impl NhlApi {
    pub fn new(config: Config) -> Result<Self, AppError> {
        let cache = FetchCache::new(config.cache_duration());
        Self::with_cache(config, cache)
    }

    pub fn with_cache(config: Config, cache: FetchCache) -> Result<Self, AppError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert("x-requested-with", HeaderValue::from_static("XMLHttpRequest"));

        let client = Client::builder()
            .timeout(config.http_timeout())
            .default_headers(headers)
            .build()
            .map_err(|e| AppError::config_error(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            config,
            cache,
        })
    }

    pub fn cache(&self) -> &FetchCache {
        &self.cache
    }

    pub fn schedule_url(&self) -> String {
        format!("{}/schedule/now", self.config.api_base)
    }

    pub fn roster_url(&self, team: &str) -> String {
        format!("{}/roster/{}/{}", self.config.api_base, team, self.config.season)
    }

    /// The URL actually requested: either `target` itself or the relay carrying it.
    pub fn request_url(&self, target: &str) -> Result<Url, AppError> {
        let url = match &self.config.proxy_url {
            Some(proxy) => Url::parse_with_params(proxy, &[("url", target)]),
            None => Url::parse(target),
        };
        url.map_err(|e| AppError::config_error(format!("Cannot build request URL for {target}: {e}")))
    }

    async fn fetch_json(&self, target: &str) -> Result<Value, AppError> {
        let url = self.request_url(target)?;
        debug!("Sending request to {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| AppError::network(url.as_str(), e))?;

        let status = response.status();
        debug!("Response status: {}", status);
        if !status.is_success() {
            return Err(AppError::http_status(status.as_u16(), url.as_str()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::network(url.as_str(), e))?;

        serde_json::from_str(&body).map_err(|e| AppError::data_format(target, e.to_string()))
    }

    pub async fn get_with_cache(
        &self,
        target: &str,
        key: &str,
        force_fresh: bool,
    ) -> Result<Value, AppError> {
        self.cache
            .get_or_fetch(key, force_fresh, || self.fetch_json(target))
            .await
            .map_err(|e| {
                error!("Fetch failed for {} ({}): {}", key, target, e);
                AppError::fetch(key, e)
            })
    }

    /// Drops a cached body that turned out to have the wrong shape, so the next
    /// plain load asks the network again.
    fn discard_on_error<T>(&self, key: &str, result: Result<T, AppError>) -> Result<T, AppError> {
        result.map_err(|e| {
            warn!("Discarding cached {}: {}", key, e);
            self.cache.invalidate(key);
            e
        })
    }

    pub async fn fetch_schedule_now(&self, force_fresh: bool) -> Result<Vec<Game>, AppError> {
        let url = self.schedule_url();
        info!("Fetching schedule from {}", url);
        let json = self.get_with_cache(&url, SCHEDULE_KEY, force_fresh).await?;

        let games = self.discard_on_error(SCHEDULE_KEY, parse_schedule(json))?;
        debug!("Schedule has {} games", games.len());
        Ok(games)
    }

    pub async fn fetch_roster(&self, team: &str, force_fresh: bool) -> Result<Vec<Player>, AppError> {
        let url = self.roster_url(team);
        let key = roster_key(team);
        let json = self.get_with_cache(&url, &key, force_fresh).await?;

        let roster: RosterResponse = self.discard_on_error(
            &key,
            serde_json::from_value(json)
                .map_err(|e| AppError::data_format(format!("roster {team}"), e.to_string())),
        )?;

        let mut players = roster.into_players();
        for player in players.iter_mut().filter(|p| p.team_abbrev.is_empty()) {
            player.team_abbrev = team.to_string();
        }
        debug!("Parsed {} players for {}", players.len(), team);
        Ok(players)
    }
}

fn parse_schedule(json: Value) -> Result<Vec<Game>, AppError> {
    let schedule: ScheduleResponse = serde_json::from_value(json)
        .map_err(|e| AppError::data_format("schedule", e.to_string()))?;

    let first_day = schedule
        .game_week
        .and_then(|days| days.into_iter().next())
        .ok_or_else(|| AppError::data_format("schedule", "missing gameWeek[0]"))?;

    Ok(first_day.games.unwrap_or_default())
}
