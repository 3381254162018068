//! Système de cache en mémoire pour les données Spotify
//!
//! Ce module fournit un cache en mémoire avec TTL pour minimiser les
//! requêtes à l'API Spotify.

use crate::models::{Artist, Track};
use moka::future::Cache as MokaCache;
use std::sync::Arc;
use std::time::Duration;

/// Cache principal pour les données Spotify
#[derive(Clone)]
pub struct SpotifyCache {
    /// Cache des tracks (TTL: 1 heure)
    tracks: Arc<MokaCache<String, Track>>,
    /// Cache des artistes (TTL: 1 heure)
    artists: Arc<MokaCache<String, Artist>>,
    /// Cache des résultats de recherche (TTL: 15 minutes)
    searches: Arc<MokaCache<String, Vec<Track>>>,
}

impl SpotifyCache {
    /// Crée un nouveau cache avec les paramètres par défaut
    pub fn new() -> Self {
        Self::with_capacity(1000)
    }

    /// Crée un nouveau cache avec une capacité spécifique
    pub fn with_capacity(max_capacity: u64) -> Self {
        Self {
            tracks: Arc::new(
                MokaCache::builder()
                    .max_capacity(max_capacity * 2)
                    .time_to_live(Duration::from_secs(3600)) // 1 heure
                    .build(),
            ),
            artists: Arc::new(
                MokaCache::builder()
                    .max_capacity(max_capacity)
                    .time_to_live(Duration::from_secs(3600)) // 1 heure
                    .build(),
            ),
            searches: Arc::new(
                MokaCache::builder()
                    .max_capacity(max_capacity / 2)
                    .time_to_live(Duration::from_secs(900)) // 15 minutes
                    .build(),
            ),
        }
    }

    // ============ Tracks ============

    /// Récupère une track depuis le cache
    pub async fn get_track(&self, id: &str) -> Option<Track> {
        self.tracks.get(id).await
    }

    /// Ajoute une track au cache
    pub async fn put_track(&self, id: String, track: Track) {
        self.tracks.insert(id, track).await;
    }

    /// Invalide une track du cache
    pub async fn invalidate_track(&self, id: &str) {
        self.tracks.invalidate(id).await;
    }

    // ============ Artists ============

    /// Récupère un artiste depuis le cache
    pub async fn get_artist(&self, id: &str) -> Option<Artist> {
        self.artists.get(id).await
    }

    /// Ajoute un artiste au cache
    pub async fn put_artist(&self, id: String, artist: Artist) {
        self.artists.insert(id, artist).await;
    }

    /// Invalide un artiste du cache
    pub async fn invalidate_artist(&self, id: &str) {
        self.artists.invalidate(id).await;
    }

    // ============ Recherches ============

    /// Récupère un résultat de recherche depuis le cache
    pub async fn get_search(&self, key: &str) -> Option<Vec<Track>> {
        self.searches.get(key).await
    }

    /// Ajoute un résultat de recherche au cache
    pub async fn put_search(&self, key: String, tracks: Vec<Track>) {
        self.searches.insert(key, tracks).await;
    }

    // ============ Maintenance ============

    /// Vide tous les caches
    pub async fn clear_all(&self) {
        self.tracks.invalidate_all();
        self.artists.invalidate_all();
        self.searches.invalidate_all();
    }

    /// Retourne des statistiques sur le cache
    pub async fn stats(&self) -> CacheStats {
        self.tracks.run_pending_tasks().await;
        self.artists.run_pending_tasks().await;
        self.searches.run_pending_tasks().await;

        CacheStats {
            tracks_count: self.tracks.entry_count(),
            artists_count: self.artists.entry_count(),
            searches_count: self.searches.entry_count(),
        }
    }
}

impl Default for SpotifyCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistiques du cache
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CacheStats {
    /// Nombre de tracks en cache
    pub tracks_count: u64,
    /// Nombre d'artistes en cache
    pub artists_count: u64,
    /// Nombre de recherches en cache
    pub searches_count: u64,
}

impl CacheStats {
    /// Retourne le nombre total d'entrées en cache
    pub fn total_count(&self) -> u64 {
        self.tracks_count + self.artists_count + self.searches_count
    }
}
