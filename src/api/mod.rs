pub mod nhl;

pub use nhl::NhlApi;
