pub mod cache;
pub mod player;
pub mod region;
pub mod schedule;

pub use cache::{CacheEntry, Clock, FetchCache, SystemClock, CACHE_DURATION};
pub use player::{LocalizedName, Player, RosterResponse, INTERNATIONAL};
pub use region::{RegionGroup, RegionGroups};
pub use schedule::{Game, GameDay, ScheduleResponse, TeamRef};
