//! Business logic services

pub mod barcode;
pub mod catalog;
pub mod isbn;
pub mod storage;

use crate::{config::LookupConfig, error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub isbn: isbn::IsbnLookupService,
    pub barcode: barcode::BarcodeService,
    pub catalog: catalog::CatalogService,
    pub storage: storage::StorageService,
}

impl Services {
    /// Create all services with the given repository and source settings
    pub fn new(repository: Repository, lookup_config: &LookupConfig) -> AppResult<Self> {
        let isbn = isbn::IsbnLookupService::from_config(lookup_config)?;
        Ok(Self::with_lookup(repository, isbn))
    }

    /// Create all services around an already built lookup service
    pub fn with_lookup(repository: Repository, isbn: isbn::IsbnLookupService) -> Self {
        Self {
            barcode: barcode::BarcodeService::new(isbn.clone()),
            catalog: catalog::CatalogService::new(repository.clone(), isbn.clone()),
            storage: storage::StorageService::new(repository),
            isbn,
        }
    }
}
