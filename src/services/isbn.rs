//! ISBN resolution across bibliographic sources
//!
//! Sources are asked one after the other in priority order. The first record carrying a
//! title wins; later sources are not queried. Nothing is cached and partial records are
//! never merged.

use std::sync::Arc;

use crate::{
    config::LookupConfig,
    error::{AppError, AppResult, LookupFailure},
    models::BibliographicRecord,
    sources::{
        BibliographicSource, BnfSource, GoogleBooksSource, OpenLibrarySource, SourceError,
        SourceOutcome,
    },
};

#[derive(Clone)]
pub struct IsbnLookupService {
    sources: Vec<Arc<dyn BibliographicSource>>,
}

impl IsbnLookupService {
    /// Sources in the given priority order
    pub fn new(sources: Vec<Arc<dyn BibliographicSource>>) -> Self {
        Self { sources }
    }

    /// BnF, then Google Books, then Open Library; disabled sources are left out
    pub fn from_config(config: &LookupConfig) -> AppResult<Self> {
        let agent = config.user_agent.as_str();
        let internal = |e: SourceError| AppError::Internal(format!("Failed to build HTTP client: {}", e));

        let mut sources: Vec<Arc<dyn BibliographicSource>> = Vec::new();
        if config.bnf.enabled {
            sources.push(Arc::new(BnfSource::new(&config.bnf, agent).map_err(internal)?));
        }
        if config.google_books.enabled {
            sources.push(Arc::new(
                GoogleBooksSource::new(&config.google_books, agent).map_err(internal)?,
            ));
        }
        if config.open_library.enabled {
            sources.push(Arc::new(
                OpenLibrarySource::new(&config.open_library, agent).map_err(internal)?,
            ));
        }

        tracing::info!(
            "ISBN lookup sources: {:?}",
            sources.iter().map(|s| s.name()).collect::<Vec<_>>()
        );
        Ok(Self::new(sources))
    }

    /// Names of the configured sources, in priority order
    pub fn source_names(&self) -> Vec<&'static str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Resolve `identifier` to the first titled record, in source priority order
    pub async fn resolve(&self, identifier: &str) -> Result<BibliographicRecord, LookupFailure> {
        let start = std::time::Instant::now();

        for source in &self.sources {
            tracing::debug!("Looking up {} on {}", identifier, source.name());

            match source.lookup(identifier).await {
                SourceOutcome::Found(record) if record.is_hit() => {
                    tracing::info!(
                        "Resolved {} via {} in {:?}",
                        identifier,
                        source.name(),
                        start.elapsed()
                    );
                    return Ok(record);
                }
                // TODO: records without a title still carry authors/publisher; decide whether
                // they should be surfaced instead of skipped
                SourceOutcome::Found(_) => {
                    tracing::debug!("{} returned a record without title for {}", source.name(), identifier);
                }
                SourceOutcome::NoMatch => {}
            }
        }

        tracing::info!("No source knows {} ({:?})", identifier, start.elapsed());
        Err(LookupFailure)
    }
}
