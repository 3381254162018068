//! Gestion des erreurs pour le client Spotify

use mdjcatalog::CatalogError;
use thiserror::Error;

/// Type Result personnalisé pour mdjspotify
pub type Result<T> = std::result::Result<T, SpotifyError>;

/// Erreurs possibles lors de l'utilisation du client Spotify
#[derive(Error, Debug)]
pub enum SpotifyError {
    /// Erreur d'authentification (credentials invalides ou token expiré)
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Ressource non trouvée (track, artiste, etc.)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Erreur HTTP
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Erreur de parsing JSON
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Erreur de configuration (anyhow)
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    /// Erreur de configuration Spotify (client id/secret manquants, etc.)
    #[error("Spotify configuration error: {0}")]
    Configuration(String),

    /// Erreur de l'API Spotify
    #[error("Spotify API error (code {code}): {message}")]
    ApiError { code: u16, message: String },

    /// Quota dépassé (rate limiting)
    #[error("Rate limit exceeded, please try again later")]
    RateLimitExceeded,

    /// Erreur générique
    #[error("Spotify error: {0}")]
    Other(String),
}

impl SpotifyError {
    /// Crée une erreur API depuis un code de statut HTTP et un message
    pub fn from_status_code(code: u16, message: impl Into<String>) -> Self {
        match code {
            401 | 403 => Self::Unauthorized(message.into()),
            404 => Self::NotFound(message.into()),
            429 => Self::RateLimitExceeded,
            _ => Self::ApiError {
                code,
                message: message.into(),
            },
        }
    }

    /// Vérifie si l'erreur est une erreur de credentials (401/403)
    pub fn is_auth_error(&self) -> bool {
        matches!(self, SpotifyError::Unauthorized(_))
    }

    /// Vérifie si l'erreur est une erreur de rate limiting
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, SpotifyError::RateLimitExceeded)
    }
}

// Conversion vers le contrat commun des catalogues : chaque échec de
// lookup reste distinguable côté moteur de requêtes.
impl From<SpotifyError> for CatalogError {
    fn from(err: SpotifyError) -> Self {
        match err {
            SpotifyError::NotFound(msg) => CatalogError::NotFound(msg),
            SpotifyError::Unauthorized(msg) => CatalogError::Unauthorized(msg),
            SpotifyError::RateLimitExceeded => CatalogError::RateLimitExceeded,
            SpotifyError::Http(e) if e.is_timeout() => CatalogError::Timeout,
            SpotifyError::Http(e) => CatalogError::Transport(e.to_string()),
            SpotifyError::JsonParse(e) => CatalogError::InvalidResponse(e.to_string()),
            SpotifyError::ApiError { code, message } => {
                CatalogError::Other(format!("API error (code {code}): {message}"))
            }
            other => CatalogError::Other(other.to_string()),
        }
    }
}
