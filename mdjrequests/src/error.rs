//! Types d'erreurs pour mdjrequests

use mdjcatalog::{CatalogError, TrackUri};

/// Erreurs du moteur de demandes
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Missing track identifier")]
    MissingUri,

    #[error("Track already queued: {0}")]
    Duplicate(TrackUri),

    #[error("Catalog lookup failed: {0}")]
    Lookup(#[from] CatalogError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Type Result spécialisé pour mdjrequests
pub type Result<T> = std::result::Result<T, Error>;
