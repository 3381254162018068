//! Data model shared by all catalog implementations

use crate::uri::TrackUri;
use serde::{Deserialize, Serialize};

/// An ordered reference to an artist, as returned by the catalog
///
/// The first entry of a track's artist list is the display artist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistRef {
    /// Catalog identifier of the artist
    pub id: String,
    /// Human-readable artist name
    pub name: String,
}

impl ArtistRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Metadata for a playable music track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogTrack {
    /// Canonical identifier of the track
    pub uri: TrackUri,
    /// Track title
    pub title: String,
    /// Explicit-content flag
    pub explicit: bool,
    /// Artists in catalog order (first entry is the display artist)
    pub artists: Vec<ArtistRef>,
}

impl CatalogTrack {
    /// Returns the display artist, if the catalog reported any
    pub fn lead_artist(&self) -> Option<&ArtistRef> {
        self.artists.first()
    }
}

/// A resolved catalog item
///
/// Catalogs can resolve an identifier to things that are not playable
/// music tracks (episodes, local files, removed content). Instead of
/// duck-typing on missing fields, the distinction is explicit: only the
/// `Track` variant carries the fields the classifier needs, and every
/// other variant short-circuits to the empty-genre, no-match path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayableItem {
    /// A playable music track with full metadata
    Track(CatalogTrack),
    /// Anything else the catalog resolved the identifier to
    Other {
        /// Catalog-reported kind (e.g. "episode", "local")
        kind: String,
    },
}

impl PlayableItem {
    /// Returns the track metadata if this item is a playable track
    pub fn as_track(&self) -> Option<&CatalogTrack> {
        match self {
            PlayableItem::Track(track) => Some(track),
            PlayableItem::Other { .. } => None,
        }
    }

    /// Returns true if this item is a playable track
    pub fn is_track(&self) -> bool {
        matches!(self, PlayableItem::Track(_))
    }
}
