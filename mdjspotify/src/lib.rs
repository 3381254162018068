//! # mdjspotify - Adaptateur catalogue Spotify pour MDJMusic
//!
//! Cette crate implémente le contrat [`mdjcatalog::TrackCatalog`] au-dessus
//! de l'API Web Spotify :
//! - Couche REST bas-niveau avec timeout borné (`api`)
//! - Token applicatif client-credentials renouvelé automatiquement
//! - Cache en mémoire avec TTL (`moka`) pour tracks, artistes et recherches
//! - Recherche avec résumés d'affichage (artiste principal + genre + pochette)
//!
//! # Exemple d'utilisation
//!
//! ```no_run
//! use mdjspotify::SpotifyClient;
//! use mdjcatalog::{TrackCatalog, TrackUri};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! // Credentials lus dans la configuration mdjconfig
//! let client = SpotifyClient::from_config()?;
//!
//! let uri = TrackUri::canonicalize("https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC");
//! let item = TrackCatalog::get_track(&client, &uri).await?;
//!
//! if let Some(track) = item.as_track() {
//!     println!("{} — explicit: {}", track.title, track.explicit);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
mod cache;
mod catalog_impl;
mod client;
mod config_ext;
mod error;
pub mod models;

// Réexports publics
pub use cache::{CacheStats, SpotifyCache};
pub use client::SpotifyClient;
pub use config_ext::SpotifyConfigExt;
pub use error::{Result, SpotifyError};
pub use models::{Artist, SimplifiedArtist, Track, TrackSummary};
