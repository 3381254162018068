//! Implémentation du contrat [`TrackCatalog`] pour le client Spotify
//!
//! C'est le point d'entrée utilisé par le moteur de requêtes : il ne
//! connaît que le trait, jamais le client concret.

use crate::client::SpotifyClient;
use crate::models::Track;
use mdjcatalog::{ArtistRef, CatalogTrack, PlayableItem, TrackCatalog, TrackUri};
use tracing::debug;

/// Convertit une track Spotify vers le modèle commun des catalogues
///
/// Tout objet dont le type n'est pas "track" (épisode de podcast,
/// fichier local...) devient [`PlayableItem::Other`] : le classifieur le
/// traitera par le chemin sans genre, sans correspondance possible.
pub(crate) fn to_playable_item(track: Track) -> PlayableItem {
    if let Some(kind) = track.item_type.as_deref() {
        if kind != "track" {
            debug!("Resolved item is not a playable track: {}", kind);
            return PlayableItem::Other {
                kind: kind.to_string(),
            };
        }
    }

    let uri = match track.uri.as_deref() {
        Some(uri) => TrackUri::canonicalize(uri),
        None => TrackUri::canonicalize(&track.id),
    };

    PlayableItem::Track(CatalogTrack {
        uri,
        title: track.name,
        explicit: track.explicit,
        artists: track
            .artists
            .into_iter()
            .map(|a| ArtistRef::new(a.id, a.name))
            .collect(),
    })
}

#[async_trait::async_trait]
impl TrackCatalog for SpotifyClient {
    async fn get_track(&self, uri: &TrackUri) -> mdjcatalog::Result<PlayableItem> {
        let track = SpotifyClient::get_track(self, uri.track_id()).await?;
        Ok(to_playable_item(track))
    }

    async fn get_artist_genres(&self, artist_id: &str) -> mdjcatalog::Result<Vec<String>> {
        let artist = SpotifyClient::get_artist(self, artist_id).await?;
        Ok(artist.genres)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SimplifiedArtist;

    fn sample_track(item_type: Option<&str>) -> Track {
        Track {
            id: "abc123".to_string(),
            name: "Sample".to_string(),
            uri: Some("spotify:track:abc123".to_string()),
            explicit: true,
            artists: vec![
                SimplifiedArtist {
                    id: "a1".to_string(),
                    name: "Lead".to_string(),
                },
                SimplifiedArtist {
                    id: "a2".to_string(),
                    name: "Feat".to_string(),
                },
            ],
            album: None,
            item_type: item_type.map(|s| s.to_string()),
        }
    }

    #[test]
    fn test_track_conversion() {
        let item = to_playable_item(sample_track(Some("track")));
        let track = item.as_track().unwrap();
        assert_eq!(track.uri.track_id(), "abc123");
        assert!(track.explicit);
        assert_eq!(track.artists.len(), 2);
        assert_eq!(track.lead_artist().unwrap().name, "Lead");
    }

    #[test]
    fn test_non_track_becomes_other() {
        let item = to_playable_item(sample_track(Some("episode")));
        assert!(!item.is_track());
        match item {
            PlayableItem::Other { kind } => assert_eq!(kind, "episode"),
            _ => panic!("expected Other"),
        }
    }

    #[test]
    fn test_missing_type_defaults_to_track() {
        // Certaines réponses partielles omettent le champ "type"
        let item = to_playable_item(sample_track(None));
        assert!(item.is_track());
    }

    #[test]
    fn test_missing_uri_falls_back_to_id() {
        let mut track = sample_track(Some("track"));
        track.uri = None;
        let item = to_playable_item(track);
        assert_eq!(item.as_track().unwrap().uri.track_id(), "abc123");
    }
}
