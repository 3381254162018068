//! Extension pour intégrer la configuration Spotify dans mdjconfig
//!
//! Ce module fournit le trait `SpotifyConfigExt` qui permet d'ajouter
//! facilement des méthodes de gestion des credentials Spotify à
//! `mdjconfig::Config`.

use anyhow::{anyhow, Result};
use mdjconfig::Config;
use serde_yaml::Value;

/// Trait d'extension pour gérer la configuration Spotify dans mdjconfig
///
/// # Exemple
///
/// ```rust,ignore
/// use mdjconfig::get_config;
/// use mdjspotify::SpotifyConfigExt;
///
/// let config = get_config();
/// let (client_id, client_secret) = config.get_spotify_credentials()?;
/// ```
pub trait SpotifyConfigExt {
    /// Récupère le client ID Spotify depuis la configuration
    ///
    /// # Errors
    ///
    /// Retourne une erreur si le client ID n'est pas configuré
    fn get_spotify_client_id(&self) -> Result<String>;

    /// Définit le client ID Spotify dans la configuration
    fn set_spotify_client_id(&self, client_id: &str) -> Result<()>;

    /// Récupère le client secret Spotify depuis la configuration
    ///
    /// # Errors
    ///
    /// Retourne une erreur si le client secret n'est pas configuré
    fn get_spotify_client_secret(&self) -> Result<String>;

    /// Définit le client secret Spotify dans la configuration
    fn set_spotify_client_secret(&self, client_secret: &str) -> Result<()>;

    /// Récupère les credentials Spotify (client ID et secret)
    ///
    /// # Errors
    ///
    /// Retourne une erreur si l'un des credentials n'est pas configuré
    fn get_spotify_credentials(&self) -> Result<(String, String)>;

    /// Récupère le marché configuré (code ISO 3166-1 alpha-2), s'il existe
    fn get_spotify_market(&self) -> Option<String>;

    /// Définit le marché pour les requêtes catalogue
    fn set_spotify_market(&self, market: &str) -> Result<()>;

    /// Récupère l'override de l'URL de base de l'API (tests uniquement)
    fn get_spotify_api_base_url(&self) -> Option<String>;

    /// Récupère l'override de l'URL du service de tokens (tests uniquement)
    fn get_spotify_accounts_base_url(&self) -> Option<String>;
}

impl SpotifyConfigExt for Config {
    fn get_spotify_client_id(&self) -> Result<String> {
        self.get_optional_string(&["spotify", "client_id"])
            .ok_or_else(|| anyhow!("Spotify client_id is not configured"))
    }

    fn set_spotify_client_id(&self, client_id: &str) -> Result<()> {
        self.set_value(
            &["spotify", "client_id"],
            Value::String(client_id.to_string()),
        )
    }

    fn get_spotify_client_secret(&self) -> Result<String> {
        self.get_optional_string(&["spotify", "client_secret"])
            .ok_or_else(|| anyhow!("Spotify client_secret is not configured"))
    }

    fn set_spotify_client_secret(&self, client_secret: &str) -> Result<()> {
        self.set_value(
            &["spotify", "client_secret"],
            Value::String(client_secret.to_string()),
        )
    }

    fn get_spotify_credentials(&self) -> Result<(String, String)> {
        Ok((
            self.get_spotify_client_id()?,
            self.get_spotify_client_secret()?,
        ))
    }

    fn get_spotify_market(&self) -> Option<String> {
        self.get_optional_string(&["spotify", "market"])
    }

    fn set_spotify_market(&self, market: &str) -> Result<()> {
        self.set_value(&["spotify", "market"], Value::String(market.to_string()))
    }

    fn get_spotify_api_base_url(&self) -> Option<String> {
        self.get_optional_string(&["spotify", "api_base_url"])
    }

    fn get_spotify_accounts_base_url(&self) -> Option<String> {
        self.get_optional_string(&["spotify", "accounts_base_url"])
    }
}
