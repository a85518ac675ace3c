//! Blueprint Atelier - versioned blueprint catalogue with point filters

pub mod blueprints;
pub mod command;
pub mod core;
