//! Runtime context for CLI commands

use anyhow::{Context, Result};
use romtag_catalog::{Catalog, QueryCache, RecordBuilder, XmlStarletCatalog};
use romtag_core::{CacheLayout, Config, DirStore, RecordStore};
use std::path::Path;
use std::sync::Arc;

use crate::cli::GlobalArgs;

/// Load configuration and apply command-line overrides
pub fn load_config(args: &GlobalArgs) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path).context("Failed to load configuration file")?,
        None => Config::load_from_dir(Path::new("."))
            .context("Failed to load configuration from the working directory")?,
    };

    if let Some(cache_dir) = &args.cache_dir {
        config.cache_dir = cache_dir.clone();
    }
    if let Some(catalog) = &args.catalog {
        config.catalog = Some(catalog.clone());
    }
    config.validate()?;
    Ok(config)
}

/// Loaded configuration, catalog and cache layout for one run
pub struct RuntimeContext {
    pub config: Config,

    /// Present when a catalog file is configured
    pub catalog: Option<Arc<dyn Catalog>>,

    pub layout: CacheLayout,

    pub verbose: bool,
}

impl RuntimeContext {
    /// Create a new runtime context from the loaded configuration.
    ///
    /// With a catalog the cache is keyed by the catalog's version; without
    /// one the most recently built cache is used read-only.
    pub async fn new(args: &GlobalArgs, config: Config) -> Result<Self> {
        let (catalog, layout) = match &config.catalog {
            Some(path) => {
                let catalog: Arc<dyn Catalog> = Arc::new(
                    XmlStarletCatalog::new(config.xmlstarlet.clone(), path)
                        .context("Failed to open catalog")?,
                );
                let version = catalog
                    .version()
                    .await
                    .context("Failed to read catalog version")?;
                let layout = CacheLayout::for_version(&config.cache_dir, &version)?;
                (Some(catalog), layout)
            }
            None => {
                let layout = CacheLayout::current(&config.cache_dir)
                    .context("No catalog configured; set `catalog` in romtag.yml or pass --catalog")?;
                (None, layout)
            }
        };
        log::debug!(
            "Using cache {} (catalog version {})",
            layout.root().display(),
            layout.version()
        );

        Ok(Self {
            config,
            catalog,
            layout,
            verbose: args.verbose,
        })
    }

    /// Record store of the current catalog version
    pub fn records(&self) -> Result<RecordStore> {
        let store = DirStore::open(self.layout.records_dir())?;
        Ok(RecordStore::new(Box::new(store)))
    }

    /// Record builder, when a catalog is configured
    pub fn builder(&self) -> Result<Option<RecordBuilder>> {
        let Some(catalog) = &self.catalog else {
            return Ok(None);
        };
        let queries = DirStore::open(self.layout.queries_dir())?;
        let cache = QueryCache::new(catalog.clone(), Box::new(queries));
        Ok(Some(RecordBuilder::new(cache, self.records()?)))
    }

    /// Print verbose output if enabled
    pub fn verbose(&self, msg: &str) {
        if self.verbose {
            eprintln!("[verbose] {}", msg);
        }
    }
}
