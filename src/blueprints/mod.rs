//! Blueprint catalogue
//!
//! Blueprints are stored under their (author, name) key in a shared
//! `BlueprintStore`; `BlueprintService` layers creation, lookup, versioned
//! updates and point filtering on top of it.

pub mod filter;
pub mod registry;
pub mod schema;
pub mod service;
pub mod store;

pub use filter::{DedupeAdjacent, FilterKind, PointFilter, StripEven};
pub use registry::{load_directory, load_file, parse_blueprints, sample_blueprints};
pub use schema::Blueprint;
pub use service::BlueprintService;
pub use store::{BlueprintStore, BlueprintTable};
