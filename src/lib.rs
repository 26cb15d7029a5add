pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used items
pub use api::NhlApi;
pub use config::Config;
pub use error::AppError;
pub use services::region_service::{LoadState, RegionService, Renderer};
pub use utils::display::TerminalRenderer;
