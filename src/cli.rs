use crate::config::Config;
use crate::error::AppError;
use clap::Parser;

/// Groups tonight's NHL players by where they were born.
#[derive(Parser, Debug, Default)]
#[command(about, long_about = None)]
pub struct Args {
    /// Load once, print the result and exit.
    #[arg(short, long)]
    pub once: bool,

    /// Season code such as 20242025.
    #[arg(short, long, value_name = "SEASON")]
    pub season: Option<String>,

    /// Base URL of the league API.
    #[arg(long, value_name = "URL")]
    pub api_base: Option<String>,

    /// Relay URL that receives the real URL in its `url` query parameter.
    #[arg(long, value_name = "URL", conflicts_with = "no_proxy")]
    pub proxy: Option<String>,

    /// Call the league API directly instead of through the relay.
    #[arg(long)]
    pub no_proxy: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    pub debug: bool,
}

impl Args {
    pub fn apply(&self, mut config: Config) -> Result<Config, AppError> {
        if let Some(season) = &self.season {
            config.season = season.clone();
        }
        if let Some(api_base) = &self.api_base {
            config.api_base = api_base.trim_end_matches('/').to_string();
        }
        if let Some(proxy) = &self.proxy {
            config.proxy_url = Some(proxy.clone());
        }
        if self.no_proxy {
            config.proxy_url = None;
        }
        config.validate()?;
        Ok(config)
    }
}
