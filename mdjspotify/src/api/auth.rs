//! Module d'authentification applicative (client credentials)
//!
//! Seul le token applicatif nécessaire aux lookups catalogue vit ici.
//! L'échange authorization-code côté utilisateur est hors périmètre et
//! reste à la charge de la couche appelante.

use super::SpotifyApi;
use crate::error::{Result, SpotifyError};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use serde::Deserialize;
use tracing::{debug, info};

/// Marge avant expiration : on renouvelle un peu en avance pour ne pas
/// envoyer une requête avec un token sur le point d'expirer.
const EXPIRY_LEEWAY_SECS: i64 = 60;

/// Réponse de l'endpoint /api/token
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[allow(dead_code)]
    token_type: String,
    expires_in: i64,
}

/// Token applicatif avec son horodatage d'expiration
#[derive(Debug, Clone)]
pub(crate) struct BearerToken {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

impl BearerToken {
    /// Vérifie si le token doit être renouvelé
    pub fn is_expired(&self) -> bool {
        Utc::now() + ChronoDuration::seconds(EXPIRY_LEEWAY_SECS) >= self.expires_at
    }
}

impl SpotifyApi {
    /// Retourne un token valide, en le renouvelant si nécessaire
    ///
    /// Le renouvellement est sérialisé : deux appels concurrents ne
    /// déclenchent qu'une seule requête de token.
    pub(crate) async fn ensure_token(&self) -> Result<String> {
        let mut slot = self.token_slot().lock().await;

        if let Some(token) = slot.as_ref() {
            if !token.is_expired() {
                return Ok(token.access_token.clone());
            }
            debug!("Access token expired, requesting a new one");
        }

        let token = self.request_token().await?;
        let access_token = token.access_token.clone();
        *slot = Some(token);
        Ok(access_token)
    }

    /// Demande un nouveau token via le flow client credentials
    async fn request_token(&self) -> Result<BearerToken> {
        let (client_id, client_secret) = self.credentials();

        if client_id.is_empty() || client_secret.is_empty() {
            return Err(SpotifyError::Configuration(
                "Spotify client id/secret are not configured".to_string(),
            ));
        }

        info!("Requesting Spotify client-credentials token");

        let url = format!("{}/api/token", self.accounts_base());
        let response = self
            .http_client()
            .post(&url)
            .basic_auth(client_id, Some(client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SpotifyError::from_status_code(status.as_u16(), body));
        }

        let token: TokenResponse = response.json().await?;

        debug!("Token obtained, expires in {}s", token.expires_in);

        Ok(BearerToken {
            access_token: token.access_token,
            expires_at: Utc::now() + ChronoDuration::seconds(token.expires_in),
        })
    }
}
