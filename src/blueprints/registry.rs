//! Blueprint sources: the built-in sample catalogue and TOML files.
//!
//! A blueprint file holds any number of `[[blueprints]]` tables:
//!
//! ```toml
//! [[blueprints]]
//! author = "mack"
//! name = "mypaint"
//! points = [{ x = 40, y = 40 }, { x = 15, y = 15 }]
//! ```

use std::path::Path;

use serde::Deserialize;

use super::schema::Blueprint;
use crate::core::error::{BlueprintError, Result};

#[derive(Debug, Deserialize)]
struct BlueprintFile {
    #[serde(default)]
    blueprints: Vec<Blueprint>,
}

/// Parse blueprints from TOML text
pub fn parse_blueprints(content: &str) -> Result<Vec<Blueprint>> {
    let file: BlueprintFile =
        toml::from_str(content).map_err(|e| BlueprintError::Parse(e.to_string()))?;

    for blueprint in &file.blueprints {
        if blueprint.author.trim().is_empty() || blueprint.name.trim().is_empty() {
            return Err(BlueprintError::Parse(format!(
                "blueprint '{}' needs a non-empty author and name",
                blueprint.key()
            )));
        }
    }

    Ok(file.blueprints)
}

/// Load blueprints from a TOML file
pub fn load_file(path: &Path) -> Result<Vec<Blueprint>> {
    let content = std::fs::read_to_string(path)?;
    let blueprints = parse_blueprints(&content).map_err(|e| match e {
        BlueprintError::Parse(msg) => BlueprintError::Parse(format!("{}: {}", path.display(), msg)),
        other => other,
    })?;
    tracing::debug!("Read {} blueprints from {}", blueprints.len(), path.display());
    Ok(blueprints)
}

/// Load all .toml files from a directory recursively
pub fn load_directory(path: &Path) -> Result<Vec<Blueprint>> {
    let mut blueprints = Vec::new();
    load_directory_recursive(path, &mut blueprints)?;
    Ok(blueprints)
}

fn load_directory_recursive(path: &Path, blueprints: &mut Vec<Blueprint>) -> Result<()> {
    let mut entries = std::fs::read_dir(path)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    // read_dir order is platform dependent
    entries.sort();

    for entry_path in entries {
        if entry_path.is_dir() {
            load_directory_recursive(&entry_path, blueprints)?;
        } else if entry_path.extension().map_or(false, |ext| ext == "toml") {
            blueprints.extend(load_file(&entry_path)?);
        }
    }
    Ok(())
}

/// The sample catalogue a fresh store can be seeded with
pub fn sample_blueprints() -> Vec<Blueprint> {
    let pts = [(140, 140), (115, 115), (115, 115), (140, 140), (140, 140)];
    let house = [(100, 500), (300, 500), (300, 300), (200, 200), (100, 300)];
    let random = [(100, 200), (300, 400), (0, 300), (200, 350), (127, 300)];
    let zigzag = [(100, 0), (0, 500), (300, 0), (0, 200), (100, 0)];
    let scribble = [
        (100, 50),
        (70, 500),
        (300, 120),
        (20, 200),
        (100, 0),
        (30, 120),
        (20, 0),
        (100, 0),
        (300, 120),
        (250, 260),
        (100, 180),
        (30, 120),
        (20, 123),
        (100, 170),
    ];

    vec![
        Blueprint::from_coords("andres", "MyPlane", &pts),
        Blueprint::from_coords("andres", "MyPlane2", &house),
        Blueprint::from_coords("andres", "MyPlane3", &random),
        Blueprint::from_coords("andres", "MyPlane4", &zigzag),
        Blueprint::from_coords("andres", "MyPlane5", &scribble),
        Blueprint::from_coords("juan", "MyPlane", &zigzag),
        Blueprint::from_coords("juan", "MyPlane1", &scribble),
    ]
}
