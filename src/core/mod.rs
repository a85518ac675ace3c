pub mod config;
pub mod error;
pub mod types;

pub use config::AtelierConfig;
pub use error::{BlueprintError, Result};
pub use types::{BlueprintKey, Point, Version, INITIAL_VERSION};
