//! Barcode scan intake: resolve a scanned code and propose where to shelve the book

use crate::{
    error::LookupFailure,
    models::{BibliographicRecord, Placement},
};

use super::isbn::IsbnLookupService;

/// A resolved scan, waiting for the operator's confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    pub record: BibliographicRecord,
    pub placement: Placement,
}

#[derive(Clone)]
pub struct BarcodeService {
    lookup: IsbnLookupService,
}

impl BarcodeService {
    pub fn new(lookup: IsbnLookupService) -> Self {
        Self { lookup }
    }

    /// Resolve `code` and pair the record with the requested placement.
    ///
    /// The code is not parsed or checksummed and the placement is not checked against
    /// the storage registries; nothing is written to the catalog.
    pub async fn scan(&self, code: &str, placement: Placement) -> Result<ScanResult, LookupFailure> {
        tracing::info!(
            "Barcode scan {} for placard {} / shelf {}",
            code,
            placement.container,
            placement.shelf
        );

        let record = self.lookup.resolve(code).await?;
        Ok(ScanResult { record, placement })
    }
}
