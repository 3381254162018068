//! Façade du moteur de demandes

use crate::classify::classify;
use crate::error::{Error, Result};
use crate::policy::PolicyStore;
use crate::queue::QueueStore;
use crate::reclassify::reclassify_owner;
use crate::record::RequestRecord;
use mdjcatalog::{PlayableItem, TrackCatalog, TrackUri};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

/// Résultat d'une soumission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// L'identifiant était déjà en file ; rien n'a été modifié
    AlreadyQueued,
    /// La demande a été classifiée et mise en file
    Queued(RequestRecord),
}

/// Instantané sérialisable des files d'un propriétaire
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RequestLists {
    pub valid: Vec<RequestRecord>,
    pub invalid: Vec<RequestRecord>,
}

/// Moteur de demandes multi-propriétaires
///
/// Regroupe le registre des politiques, le registre des files et le
/// catalogue. Toute l'API des couches soumission / politique /
/// restitution passe par cette façade ; le moteur est partageable entre
/// tâches (`Arc<RequestEngine>`).
pub struct RequestEngine {
    catalog: Arc<dyn TrackCatalog>,
    policies: PolicyStore,
    queues: QueueStore,
}

impl RequestEngine {
    pub fn new(catalog: Arc<dyn TrackCatalog>) -> Self {
        info!("Creating request engine");
        Self {
            catalog,
            policies: PolicyStore::new(),
            queues: QueueStore::new(),
        }
    }

    // ============ Soumission ============

    /// Soumet un identifiant de piste pour un propriétaire
    ///
    /// L'identifiant est canonicalisé avant toute comparaison. Une
    /// résoumission d'un identifiant déjà en file retourne
    /// [`SubmitOutcome::AlreadyQueued`] sans toucher aux files. Un échec
    /// de lookup catalogue fait échouer la soumission : sans métadonnées,
    /// pas de verdict.
    pub async fn submit_request(&self, owner: &str, raw_identifier: &str) -> Result<SubmitOutcome> {
        if raw_identifier.trim().is_empty() {
            return Err(Error::MissingUri);
        }

        let uri = TrackUri::canonicalize(raw_identifier);
        if self.queues.contains_uri(owner, &uri) {
            debug!("Track {} already queued for owner {}", uri, owner);
            return Ok(SubmitOutcome::AlreadyQueued);
        }

        let policy = self.policies.get(owner);
        let record = match self.catalog.get_track(&uri).await? {
            PlayableItem::Track(track) => {
                // À la soumission, seuls les genres de l'artiste principal
                // sont consultés
                let (artist_name, genres) = match track.lead_artist() {
                    Some(artist) => (
                        artist.name.clone(),
                        self.catalog.get_artist_genres(&artist.id).await?,
                    ),
                    None => (String::new(), vec![]),
                };

                classify(&policy, &track.title, &artist_name, &genres, track.explicit, uri)
            }
            PlayableItem::Other { kind } => {
                // Pas une piste jouable : aucun genre, aucun match possible
                debug!("Submitted item {} is not a track ({})", uri, kind);
                classify(&policy, "", "", &[], false, uri)
            }
        };

        match self.queues.add(owner, record.clone()) {
            Ok(()) => {
                info!(
                    "Queued {} for owner {} (valid={})",
                    record.uri, owner, record.valid
                );
                Ok(SubmitOutcome::Queued(record))
            }
            // Une soumission concurrente du même identifiant a gagné la
            // course entre le test de présence et l'insertion
            Err(Error::Duplicate(_)) => Ok(SubmitOutcome::AlreadyQueued),
            Err(e) => Err(e),
        }
    }

    // ============ Restitution ============

    /// Instantané des deux files, dans l'ordre d'insertion
    pub fn list_requests(&self, owner: &str) -> RequestLists {
        RequestLists {
            valid: self.queues.get_valid(owner),
            invalid: self.queues.get_invalid(owner),
        }
    }

    // ============ Exécution ============

    /// Retire une demande une fois traitée en aval
    ///
    /// Accepte n'importe quelle forme d'identifiant, canonicalisée avant
    /// la recherche. Retourne l'enregistrement retiré s'il existait.
    pub fn remove_by_uri(&self, owner: &str, raw_identifier: &str) -> Option<RequestRecord> {
        let uri = TrackUri::canonicalize(raw_identifier);
        self.queues.remove_by_uri(owner, &uri)
    }

    /// Supprime tout l'état de files du propriétaire
    pub fn clear_all(&self, owner: &str) {
        self.queues.clear_all(owner);
    }

    // ============ Politique ============

    /// Remplace la liste des genres autorisés
    ///
    /// Ne reclasse pas implicitement : l'appelant déclenche
    /// [`reclassify_all`](Self::reclassify_all) quand il le souhaite.
    pub fn set_allowed_genres(&self, owner: &str, genres: &[String]) {
        self.policies.set_allowed_genres(owner, genres);
    }

    /// Genres autorisés courants, dans l'ordre de saisie
    pub fn allowed_genres(&self, owner: &str) -> Vec<String> {
        self.policies.allowed_genres(owner)
    }

    /// Autorise ou refuse le contenu explicite
    pub fn set_allow_explicit(&self, owner: &str, allow: bool) {
        self.policies.set_allow_explicit(owner, allow);
    }

    /// Le contenu explicite est-il accepté ?
    pub fn allow_explicit(&self, owner: &str) -> bool {
        self.policies.allow_explicit(owner)
    }

    /// Reclasse toutes les demandes du propriétaire sous sa politique
    /// courante
    pub async fn reclassify_all(&self, owner: &str) {
        let policy = self.policies.get(owner);
        reclassify_owner(&self.catalog, &policy, &self.queues, owner).await;
    }
}

impl std::fmt::Debug for RequestEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestEngine")
            .field("catalog", &self.catalog)
            .finish_non_exhaustive()
    }
}
