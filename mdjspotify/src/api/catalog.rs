//! Module d'accès au catalogue Spotify (tracks, artistes, recherche)

use super::SpotifyApi;
use crate::error::Result;
use crate::models::{Artist, Track};
use serde::Deserialize;
use tracing::debug;

/// Taille maximale d'un lot pour l'endpoint "several artists"
const ARTISTS_BATCH_LIMIT: usize = 50;

/// Limite maximale acceptée par l'endpoint de recherche
const SEARCH_LIMIT_MAX: usize = 50;

/// Réponse de l'endpoint /v1/artists (batch)
#[derive(Debug, Deserialize)]
struct SeveralArtistsResponse {
    // L'API retourne null pour les IDs inconnus
    artists: Vec<Option<Artist>>,
}

/// Réponse paginée de l'API
#[derive(Debug, Deserialize)]
struct PagingResponse<T> {
    items: Vec<T>,
}

/// Réponse de l'endpoint /v1/search?type=track
#[derive(Debug, Deserialize)]
struct SearchResponse {
    tracks: PagingResponse<Track>,
}

impl SpotifyApi {
    /// Récupère une track par son ID
    pub async fn get_track(&self, track_id: &str) -> Result<Track> {
        debug!("Fetching track {}", track_id);
        let endpoint = format!("/v1/tracks/{}", track_id);
        let params = self.market_params();
        self.get(&endpoint, &params).await
    }

    /// Récupère un artiste (objet complet, avec genres) par son ID
    pub async fn get_artist(&self, artist_id: &str) -> Result<Artist> {
        debug!("Fetching artist {}", artist_id);
        let endpoint = format!("/v1/artists/{}", artist_id);
        self.get(&endpoint, &[]).await
    }

    /// Récupère plusieurs artistes en un seul appel (par lots de 50)
    ///
    /// Les IDs inconnus sont ignorés : le résultat ne contient que les
    /// artistes résolus, dans l'ordre des lots.
    pub async fn get_several_artists(&self, artist_ids: &[String]) -> Result<Vec<Artist>> {
        if artist_ids.is_empty() {
            return Ok(vec![]);
        }

        let mut artists = Vec::with_capacity(artist_ids.len());
        for chunk in artist_ids.chunks(ARTISTS_BATCH_LIMIT) {
            let ids = chunk.join(",");
            debug!("Fetching {} artists in one batch", chunk.len());
            let response: SeveralArtistsResponse =
                self.get("/v1/artists", &[("ids", ids.as_str())]).await?;
            artists.extend(response.artists.into_iter().flatten());
        }

        Ok(artists)
    }

    /// Recherche des tracks dans le catalogue
    ///
    /// La limite est bornée à l'intervalle accepté par l'API (1..=50).
    pub async fn search_tracks(&self, query: &str, limit: usize) -> Result<Vec<Track>> {
        let capped = limit.clamp(1, SEARCH_LIMIT_MAX);
        let limit_str = capped.to_string();

        debug!("Searching tracks for '{}' (limit {})", query, capped);

        let mut params = vec![("q", query), ("type", "track"), ("limit", limit_str.as_str())];
        if let Some(market) = self.market() {
            params.push(("market", market));
        }

        let response: SearchResponse = self.get("/v1/search", &params).await?;
        Ok(response.tracks.items)
    }

    fn market_params(&self) -> Vec<(&str, &str)> {
        match self.market() {
            Some(market) => vec![("market", market)],
            None => vec![],
        }
    }
}
