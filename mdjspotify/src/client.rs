//! Client principal pour interagir avec l'API Spotify
//!
//! Ce module fournit un client haut-niveau avec token applicatif et cache
//! intégré.

use crate::api::SpotifyApi;
use crate::cache::SpotifyCache;
use crate::config_ext::SpotifyConfigExt;
use crate::error::Result;
use crate::models::{Artist, Track, TrackSummary};
use mdjconfig::Config;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Genre affiché quand l'artiste principal n'a aucun tag
const UNKNOWN_GENRE: &str = "unknown";

/// Client Spotify haut-niveau avec cache
pub struct SpotifyClient {
    /// API bas-niveau
    api: SpotifyApi,
    /// Cache en mémoire
    cache: Arc<SpotifyCache>,
}

impl SpotifyClient {
    /// Crée un nouveau client avec les credentials fournis
    ///
    /// Le token applicatif est obtenu paresseusement au premier appel.
    ///
    /// # Exemple
    ///
    /// ```rust,no_run
    /// use mdjspotify::SpotifyClient;
    ///
    /// # fn main() -> anyhow::Result<()> {
    /// let client = SpotifyClient::new("client_id", "client_secret")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(client_id: &str, client_secret: &str) -> Result<Self> {
        info!("Creating Spotify client");
        Ok(Self {
            api: SpotifyApi::new(client_id, client_secret)?,
            cache: Arc::new(SpotifyCache::new()),
        })
    }

    /// Crée un client en utilisant la configuration de mdjconfig
    pub fn from_config() -> Result<Self> {
        let config = mdjconfig::get_config();
        Self::from_config_obj(config.as_ref())
    }

    /// Crée un client depuis un objet Config spécifique
    pub fn from_config_obj(config: &Config) -> Result<Self> {
        let (client_id, client_secret) = config.get_spotify_credentials()?;
        let timeout = Duration::from_secs(config.get_catalog_timeout_secs()? as u64);
        let capacity = config.get_catalog_cache_capacity()? as u64;

        let mut api = SpotifyApi::with_timeout(client_id, client_secret, timeout)?;
        api.set_market(config.get_spotify_market());

        if let (Some(api_base), Some(accounts_base)) = (
            config.get_spotify_api_base_url(),
            config.get_spotify_accounts_base_url(),
        ) {
            api.set_base_urls(api_base, accounts_base);
        }

        Ok(Self {
            api,
            cache: Arc::new(SpotifyCache::with_capacity(capacity)),
        })
    }

    /// Construit un client autour d'une API déjà configurée (tests)
    pub fn with_api(api: SpotifyApi) -> Self {
        Self {
            api,
            cache: Arc::new(SpotifyCache::new()),
        }
    }

    /// Retourne une référence au cache
    pub fn cache(&self) -> Arc<SpotifyCache> {
        self.cache.clone()
    }

    // ============ Tracks ============

    /// Récupère une track par son ID
    pub async fn get_track(&self, track_id: &str) -> Result<Track> {
        if let Some(track) = self.cache.get_track(track_id).await {
            debug!("Track {} found in cache", track_id);
            return Ok(track);
        }

        let track = self.api.get_track(track_id).await?;
        self.cache.put_track(track_id.to_string(), track.clone()).await;

        Ok(track)
    }

    // ============ Artists ============

    /// Récupère un artiste par son ID
    pub async fn get_artist(&self, artist_id: &str) -> Result<Artist> {
        if let Some(artist) = self.cache.get_artist(artist_id).await {
            debug!("Artist {} found in cache", artist_id);
            return Ok(artist);
        }

        let artist = self.api.get_artist(artist_id).await?;
        self.cache
            .put_artist(artist_id.to_string(), artist.clone())
            .await;

        Ok(artist)
    }

    /// Récupère plusieurs artistes, en ne demandant à l'API que les absents
    /// du cache
    pub async fn get_several_artists(&self, artist_ids: &[String]) -> Result<Vec<Artist>> {
        let mut resolved: HashMap<String, Artist> = HashMap::new();
        let mut missing: Vec<String> = Vec::new();

        for id in artist_ids {
            match self.cache.get_artist(id).await {
                Some(artist) => {
                    resolved.insert(id.clone(), artist);
                }
                None => missing.push(id.clone()),
            }
        }

        if !missing.is_empty() {
            for artist in self.api.get_several_artists(&missing).await? {
                self.cache
                    .put_artist(artist.id.clone(), artist.clone())
                    .await;
                resolved.insert(artist.id.clone(), artist);
            }
        }

        // Restituer dans l'ordre demandé, en ignorant les IDs non résolus
        Ok(artist_ids
            .iter()
            .filter_map(|id| resolved.remove(id))
            .collect())
    }

    // ============ Recherche ============

    /// Recherche des tracks dans le catalogue
    pub async fn search_tracks(&self, query: &str, limit: usize) -> Result<Vec<Track>> {
        let cache_key = format!("{}:{}", query, limit);

        if let Some(tracks) = self.cache.get_search(&cache_key).await {
            debug!("Search results for '{}' found in cache", query);
            return Ok(tracks);
        }

        let tracks = self.api.search_tracks(query, limit).await?;
        self.cache.put_search(cache_key, tracks.clone()).await;

        Ok(tracks)
    }

    /// Recherche des tracks et construit des résumés d'affichage
    ///
    /// Pour chaque résultat : titre, artiste principal, premier genre de
    /// cet artiste (résolu en un seul appel batch) et la plus petite
    /// pochette disponible.
    pub async fn search_track_summaries(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<TrackSummary>> {
        let tracks = self.search_tracks(query, limit).await?;
        if tracks.is_empty() {
            return Ok(vec![]);
        }

        let lead_ids: Vec<String> = tracks
            .iter()
            .filter_map(|t| t.lead_artist().map(|a| a.id.clone()))
            .collect();

        let artists = self.get_several_artists(&lead_ids).await?;
        let id_to_genre: HashMap<&str, &str> = artists
            .iter()
            .map(|a| {
                let genre = a.genres.first().map(|g| g.as_str()).unwrap_or(UNKNOWN_GENRE);
                (a.id.as_str(), genre)
            })
            .collect();

        let summaries = tracks
            .iter()
            .map(|track| {
                let (artist_name, artist_id) = match track.lead_artist() {
                    Some(a) => (a.name.as_str(), a.id.as_str()),
                    None => ("", ""),
                };
                TrackSummary {
                    name: track.name.clone(),
                    artist: artist_name.to_string(),
                    genre: id_to_genre
                        .get(artist_id)
                        .copied()
                        .unwrap_or(UNKNOWN_GENRE)
                        .to_string(),
                    uri: track
                        .uri
                        .clone()
                        .unwrap_or_else(|| format!("spotify:track:{}", track.id)),
                    image_url: track.smallest_image_url().map(|s| s.to_string()),
                }
            })
            .collect();

        Ok(summaries)
    }
}

impl std::fmt::Debug for SpotifyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpotifyClient")
            .field("api", &self.api)
            .finish_non_exhaustive()
    }
}
