pub mod config;
pub mod error;
pub mod types;

pub use config::{load_config, BotConfig, DebugConfig, MicroConfig};
pub use error::{MicroError, Result};
pub use types::{Player, Tick, TilePos, UnitTag, Vec2};
