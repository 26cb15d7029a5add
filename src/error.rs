use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Network error while fetching {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP error! status: {status} (URL: {url})")]
    HttpStatus { status: u16, url: String },

    #[error("Invalid {context} data format: {message}")]
    DataFormat { context: String, message: String },

    #[error("Failed to fetch data for {key}: {source}")]
    Fetch {
        key: String,
        #[source]
        source: Box<AppError>,
    },

    #[error("Failed to fetch team rosters ({team}): {source}")]
    Aggregation {
        team: String,
        #[source]
        source: Box<AppError>,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    pub fn http_status(status: u16, url: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            url: url.into(),
        }
    }

    pub fn data_format(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DataFormat {
            context: context.into(),
            message: message.into(),
        }
    }

    pub fn fetch(key: impl Into<String>, source: AppError) -> Self {
        Self::Fetch {
            key: key.into(),
            source: Box::new(source),
        }
    }

    pub fn aggregation(team: impl Into<String>, source: AppError) -> Self {
        Self::Aggregation {
            team: team.into(),
            source: Box::new(source),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Walks through `Fetch` and `Aggregation` wrappers to the error that started it.
    pub fn root_cause(&self) -> &AppError {
        match self {
            Self::Fetch { source, .. } | Self::Aggregation { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
