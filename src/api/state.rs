use std::sync::Arc;
use std::time::Duration;

use crate::{
    catalog::Catalog,
    services::{CoverLookup, DisabledCovers, GenreMapping},
};

/// Shared application state
///
/// Everything here is read-only after startup, so handlers share it without
/// locking.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub mapping: Arc<GenreMapping>,
    pub covers: Arc<dyn CoverLookup>,
    pub cover_timeout: Duration,
}

impl AppState {
    pub fn new(
        catalog: Catalog,
        mapping: GenreMapping,
        covers: Arc<dyn CoverLookup>,
        cover_timeout: Duration,
    ) -> Self {
        Self {
            catalog: Arc::new(catalog),
            mapping: Arc::new(mapping),
            covers,
            cover_timeout,
        }
    }

    /// State with the default genre table and no cover lookups
    pub fn without_covers(catalog: Catalog) -> Self {
        Self::new(
            catalog,
            GenreMapping::default(),
            Arc::new(DisabledCovers),
            Duration::from_secs(1),
        )
    }
}
