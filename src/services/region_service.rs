use crate::api::NhlApi;
use crate::config::Config;
use crate::error::AppError;
use crate::models::region::RegionGroups;
use crate::services::pipeline::{extract_teams, fetch_all_rosters, group_by_region};
use tracing::{error, info};

/// Presentation side of a load cycle.
pub trait Renderer {
    fn show_loading(&mut self);
    fn render(&mut self, groups: &RegionGroups);
    fn show_error(&mut self, message: &str);
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Success(RegionGroups),
    Error(String),
}

impl LoadState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Success(_) => "success",
            Self::Error(_) => "error",
        }
    }
}

pub struct RegionService {
    api: NhlApi,
    state: LoadState,
}

impl RegionService {
    pub fn new(config: Config) -> Result<Self, AppError> {
        Ok(Self::with_api(NhlApi::new(config)?))
    }

    pub fn with_api(api: NhlApi) -> Self {
        Self {
            api,
            state: LoadState::Idle,
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub async fn fetch_grouped_players(&self, force_fresh: bool) -> Result<RegionGroups, AppError> {
        let games = self.api.fetch_schedule_now(force_fresh).await?;
        let teams = extract_teams(&games);
        info!("{} games today, {} teams", games.len(), teams.len());

        let players = fetch_all_rosters(&self.api, &teams, force_fresh).await?;
        let groups = group_by_region(players);
        info!("Grouped players into {} regions", groups.len());
        Ok(groups)
    }

    /// Runs a full load cycle. The renderer sees the loading indicator first, then
    /// either the grouped players or the error message.
    pub async fn load<R: Renderer>(&mut self, renderer: &mut R, force_fresh: bool) -> &LoadState {
        self.state = LoadState::Loading;
        renderer.show_loading();

        self.state = match self.fetch_grouped_players(force_fresh).await {
            Ok(groups) => {
                renderer.render(&groups);
                LoadState::Success(groups)
            }
            Err(e) => {
                error!("Load failed: {}", e);
                let message = e.to_string();
                renderer.show_error(&message);
                LoadState::Error(message)
            }
        };
        &self.state
    }

    /// Starts a new cycle only after a failed one; otherwise leaves the state as is.
    pub async fn retry<R: Renderer>(&mut self, renderer: &mut R) -> &LoadState {
        if matches!(self.state, LoadState::Error(_)) {
            info!("Retrying after failed load");
            return self.load(renderer, false).await;
        }
        &self.state
    }

    pub async fn refresh<R: Renderer>(&mut self, renderer: &mut R) -> &LoadState {
        self.load(renderer, true).await
    }
}
