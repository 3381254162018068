//! Couche d'accès à l'API REST Spotify
//!
//! Ce module fournit une interface bas-niveau pour communiquer avec l'API
//! Web Spotify, avec un timeout borné par requête : un catalogue lent ne
//! retarde que l'appel qui l'a invoqué.

pub mod auth;
pub mod catalog;

use crate::error::{Result, SpotifyError};
use auth::BearerToken;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// URL de base de l'API Web Spotify
const API_BASE_URL: &str = "https://api.spotify.com";

/// URL de base du service de tokens
const ACCOUNTS_BASE_URL: &str = "https://accounts.spotify.com";

/// Timeout par défaut des requêtes sortantes
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client API bas-niveau pour communiquer avec Spotify
pub struct SpotifyApi {
    /// Client HTTP
    client: Client,
    /// Client ID de l'application
    client_id: String,
    /// Client secret de l'application
    client_secret: String,
    /// Marché optionnel (code ISO 3166-1 alpha-2)
    market: Option<String>,
    /// Token applicatif courant (client credentials)
    token: Mutex<Option<BearerToken>>,
    /// URL de base de l'API (overridable pour les tests)
    api_base: String,
    /// URL de base du service de tokens (overridable pour les tests)
    accounts_base: String,
}

impl SpotifyApi {
    /// Crée une nouvelle instance de l'API avec le timeout par défaut
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Result<Self> {
        Self::with_timeout(client_id, client_secret, DEFAULT_TIMEOUT)
    }

    /// Crée une nouvelle instance avec un timeout spécifique
    pub fn with_timeout(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            market: None,
            token: Mutex::new(None),
            api_base: API_BASE_URL.to_string(),
            accounts_base: ACCOUNTS_BASE_URL.to_string(),
        })
    }

    /// Définit le marché pour les requêtes catalogue
    pub fn set_market(&mut self, market: Option<String>) {
        self.market = market;
    }

    /// Retourne le marché configuré
    pub fn market(&self) -> Option<&str> {
        self.market.as_deref()
    }

    /// Retourne le client ID
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Remplace les URLs de base (tests uniquement)
    pub fn set_base_urls(&mut self, api_base: impl Into<String>, accounts_base: impl Into<String>) {
        self.api_base = api_base.into();
        self.accounts_base = accounts_base.into();
    }

    /// Effectue une requête GET authentifiée à l'API
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let token = self.ensure_token().await?;
        let url = format!("{}{}", self.api_base, endpoint);

        debug!("GET {} with {} params", url, params.len());

        let response = self
            .client
            .get(&url)
            .bearer_auth(&token)
            .query(params)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Traite la réponse HTTP
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        let status = response.status();
        let status_code = status.as_u16();

        debug!("Response status: {}", status);

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = extract_error_message(&error_text).unwrap_or(error_text.clone());
            warn!("API error ({}): {}", status_code, message);
            return Err(SpotifyError::from_status_code(status_code, message));
        }

        let text = response.text().await?;

        // Parser la réponse
        serde_json::from_str(&text).map_err(|e| {
            warn!("Failed to parse response: {}", e);
            SpotifyError::JsonParse(e)
        })
    }

    pub(crate) fn accounts_base(&self) -> &str {
        &self.accounts_base
    }

    pub(crate) fn http_client(&self) -> &Client {
        &self.client
    }

    pub(crate) fn token_slot(&self) -> &Mutex<Option<BearerToken>> {
        &self.token
    }

    pub(crate) fn credentials(&self) -> (&str, &str) {
        (&self.client_id, &self.client_secret)
    }
}

impl std::fmt::Debug for SpotifyApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpotifyApi")
            .field("client_id", &self.client_id)
            .field("market", &self.market)
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}

/// Extrait le message d'erreur de l'enveloppe `{"error": {"status", "message"}}`
fn extract_error_message(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    json.get("error")?
        .get("message")?
        .as_str()
        .map(|s| s.to_string())
}
