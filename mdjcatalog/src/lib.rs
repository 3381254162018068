//! # MDJCatalog
//!
//! Common traits and types for MDJMusic track catalogs.
//!
//! This crate provides the foundational abstraction between the request
//! engine (`mdjrequests`) and whatever upstream service resolves track
//! metadata (`mdjspotify` in production, in-memory fakes in tests).
//!
//! ## Features
//!
//! - **Canonical identifiers**: [`TrackUri`] normalizes every way a client
//!   can hand us a track reference.
//! - **Explicit item typing**: [`PlayableItem`] distinguishes playable
//!   tracks from everything else a catalog can resolve.
//! - **Distinguishable failures**: [`CatalogError`] makes lookup failures
//!   explicit so callers can choose a fail-open or fail-closed policy.
//! - **Send + Sync**: ready for async servers, usable as
//!   `Arc<dyn TrackCatalog>`.

mod error;
mod models;
mod uri;

pub use error::{CatalogError, Result};
pub use models::{ArtistRef, CatalogTrack, PlayableItem};
pub use uri::TrackUri;

use std::fmt::Debug;

/// Main trait for track catalogs
///
/// Implementations resolve canonical track identifiers to metadata and
/// artist identifiers to genre tags. Both operations MUST report lookup
/// failures through [`CatalogError`] rather than returning empty or
/// default data: an empty genre list means "this artist has no genre
/// tags", never "the lookup failed".
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` for use in async servers.
#[async_trait::async_trait]
pub trait TrackCatalog: Debug + Send + Sync {
    /// Resolves a canonical track identifier to catalog metadata
    ///
    /// Returns [`PlayableItem::Other`] when the identifier resolves to
    /// something that is not a playable music track.
    ///
    /// # Errors
    ///
    /// * [`CatalogError::NotFound`] if the identifier is unknown
    /// * any other [`CatalogError`] on lookup failure
    async fn get_track(&self, uri: &TrackUri) -> Result<PlayableItem>;

    /// Returns the genre tags of an artist, in catalog order
    ///
    /// An empty vector is a valid answer (the artist has no tags).
    ///
    /// # Errors
    ///
    /// * [`CatalogError::NotFound`] if the artist is unknown
    /// * any other [`CatalogError`] on lookup failure
    async fn get_artist_genres(&self, artist_id: &str) -> Result<Vec<String>>;
}

// Re-export commonly used types
pub use async_trait::async_trait;
