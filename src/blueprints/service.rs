//! Blueprint service: store access plus point filtering
//!
//! All persistence goes through the `BlueprintStore`. Operations that read,
//! modify and write back a blueprint run inside a store transaction so that
//! concurrent callers serialize instead of overwriting each other.

use super::filter::{FilterKind, PointFilter};
use super::schema::Blueprint;
use super::store::BlueprintStore;
use crate::core::config::AtelierConfig;
use crate::core::error::{BlueprintError, Result};

pub struct BlueprintService {
    store: BlueprintStore,
    filter: Box<dyn PointFilter>,
}

impl BlueprintService {
    /// Create a service over `store` that reduces points with `filter`
    pub fn new(store: BlueprintStore, filter: Box<dyn PointFilter>) -> Self {
        Self { store, filter }
    }

    /// Create a service using the filter named by `kind`
    pub fn with_filter_kind(store: BlueprintStore, kind: FilterKind) -> Self {
        Self::new(store, kind.build())
    }

    /// Build the store and service described by a config
    ///
    /// Seeds the sample catalogue if asked to, then loads every configured
    /// blueprint file.
    pub fn from_config(config: &AtelierConfig) -> Result<Self> {
        config.validate()?;

        let store = if config.seed_samples {
            BlueprintStore::with_samples()
        } else {
            BlueprintStore::new()
        };

        for path in &config.blueprint_files {
            let blueprints = super::registry::load_file(path)?;
            let count = store.load_into(blueprints)?;
            tracing::info!("Loaded {} blueprints from {}", count, path.display());
        }

        Ok(Self::with_filter_kind(store, config.default_filter))
    }

    /// Handle to the underlying store
    pub fn store(&self) -> &BlueprintStore {
        &self.store
    }

    /// Tag of the filter this service applies
    pub fn filter_kind(&self) -> FilterKind {
        self.filter.kind()
    }

    /// Register a new blueprint (fails with `AlreadyExists` on a taken key)
    pub fn add_new_blueprint(&self, blueprint: Blueprint) -> Result<()> {
        let key = blueprint.key();
        self.store.save(blueprint)?;
        tracing::info!("Created blueprint {}", key);
        Ok(())
    }

    pub fn get_blueprint(&self, author: &str, name: &str) -> Result<Blueprint> {
        self.store.get(author, name)
    }

    pub fn get_blueprints_by_author(&self, author: &str) -> Result<Vec<Blueprint>> {
        self.store.get_by_author(author)
    }

    /// Snapshot of every blueprint, ordered by (author, name)
    pub fn get_all_blueprints(&self) -> Vec<Blueprint> {
        self.store.get_all()
    }

    /// One summary line per stored blueprint, in key order
    pub fn summaries(&self) -> Vec<String> {
        self.get_all_blueprints().iter().map(Blueprint::summary).collect()
    }

    /// Filter the blueprint at `ordinal` in the full listing
    ///
    /// The listing is ordered by (author, name), so an ordinal names the same
    /// blueprint for as long as the set of keys doesn't change. The filtered
    /// points are written back; the version is left alone.
    pub fn filter_blueprint(&self, ordinal: usize) -> Result<Blueprint> {
        self.store.transaction(|table| {
            let total = table.len();
            let key = table
                .get_all()
                .get(ordinal)
                .map(|bp| bp.key())
                .ok_or_else(|| {
                    BlueprintError::InvalidState(format!(
                        "blueprint ordinal {} out of range (catalogue holds {})",
                        ordinal, total
                    ))
                })?;

            let blueprint = table.get_mut(&key.author, &key.name)?;
            let before = blueprint.points.len();
            self.filter.apply(blueprint);
            tracing::info!(
                "Filtered {} with {}: {} -> {} points",
                key,
                self.filter.kind(),
                before,
                blueprint.points.len()
            );
            Ok(blueprint.clone())
        })
    }

    /// Filter the blueprint stored under (author, name)
    pub fn filter_blueprint_by_key(&self, author: &str, name: &str) -> Result<Blueprint> {
        self.store.transaction(|table| {
            let blueprint = table.get_mut(author, name)?;
            self.filter.apply(blueprint);
            tracing::info!("Filtered {}/{} with {}", author, name, self.filter.kind());
            Ok(blueprint.clone())
        })
    }

    /// Replace the points of an existing blueprint and bump its version
    ///
    /// Only `updated.points` is taken from the incoming value; the stored
    /// author and name are kept. Returns the blueprint as written.
    pub fn update_blueprint(
        &self,
        author: &str,
        name: &str,
        updated: Blueprint,
    ) -> Result<Blueprint> {
        self.store.transaction(|table| {
            let mut existing = table
                .get_by_author(author)
                .ok()
                .and_then(|found| found.into_iter().find(|bp| bp.matches(author, name)))
                .cloned()
                .ok_or_else(|| BlueprintError::not_found(author, name))?;

            existing.points = updated.points;
            existing.version += 1;
            tracing::info!("Updated blueprint {} to v{}", existing.key(), existing.version);

            table.upsert(existing.clone());
            Ok(existing)
        })
    }

    /// Remove a blueprint
    pub fn delete_blueprint(&self, author: &str, name: &str) -> Result<Blueprint> {
        let removed = self.store.delete(author, name)?;
        tracing::info!("Deleted blueprint {}", removed.key());
        Ok(removed)
    }
}

impl std::fmt::Debug for BlueprintService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlueprintService")
            .field("blueprints", &self.store.len())
            .field("filter", &self.filter.kind())
            .finish()
    }
}
