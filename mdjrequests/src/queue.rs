//! Files de demandes par propriétaire (valides / invalides)

use crate::error::{Error, Result};
use crate::record::RequestRecord;
use indexmap::IndexMap;
use mdjcatalog::TrackUri;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Paire de files d'un propriétaire, indexées par identifiant canonique
///
/// Invariant : un identifiant apparaît dans au plus une des deux files,
/// et au plus une fois au total.
#[derive(Debug, Default)]
struct QueuePair {
    valid: IndexMap<TrackUri, RequestRecord>,
    invalid: IndexMap<TrackUri, RequestRecord>,
}

impl QueuePair {
    fn contains(&self, uri: &TrackUri) -> bool {
        self.valid.contains_key(uri) || self.invalid.contains_key(uri)
    }

    /// Construit une paire neuve en partitionnant sur le verdict
    ///
    /// Les doublons éventuels sont fusionnés, dernière occurrence gagnante.
    fn from_records(records: Vec<RequestRecord>) -> Self {
        let mut pair = Self::default();
        for record in records {
            pair.valid.shift_remove(&record.uri);
            pair.invalid.shift_remove(&record.uri);
            if record.valid {
                pair.valid.insert(record.uri.clone(), record);
            } else {
                pair.invalid.insert(record.uri.clone(), record);
            }
        }
        pair
    }
}

/// Registre des files, une paire par propriétaire
///
/// Le verrou du registre n'est tenu que pour résoudre l'entrée d'un
/// propriétaire : deux propriétaires différents ne se gênent jamais.
#[derive(Debug, Default)]
pub struct QueueStore {
    by_owner: RwLock<HashMap<String, Arc<RwLock<QueuePair>>>>,
}

impl QueueStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&self, owner: &str) -> Arc<RwLock<QueuePair>> {
        if let Some(entry) = self.by_owner.read().unwrap().get(owner) {
            return entry.clone();
        }

        let mut map = self.by_owner.write().unwrap();
        map.entry(owner.to_string())
            .or_insert_with(|| Arc::new(RwLock::new(QueuePair::default())))
            .clone()
    }

    /// Insère un enregistrement dans la file désignée par son verdict
    ///
    /// Refuse un identifiant déjà présent dans l'une ou l'autre file.
    pub fn add(&self, owner: &str, record: RequestRecord) -> Result<()> {
        let entry = self.entry(owner);
        let mut pair = entry.write().unwrap();

        if pair.contains(&record.uri) {
            return Err(Error::Duplicate(record.uri));
        }

        debug!(
            "Queueing {} for owner {} (valid={})",
            record.uri, owner, record.valid
        );

        if record.valid {
            pair.valid.insert(record.uri.clone(), record);
        } else {
            pair.invalid.insert(record.uri.clone(), record);
        }

        Ok(())
    }

    /// L'identifiant est-il déjà présent dans l'une des deux files ?
    pub fn contains_uri(&self, owner: &str, uri: &TrackUri) -> bool {
        self.entry(owner).read().unwrap().contains(uri)
    }

    /// Retire l'enregistrement de la file qui le détient
    ///
    /// Retourne l'enregistrement retiré, ou None s'il était absent.
    pub fn remove_by_uri(&self, owner: &str, uri: &TrackUri) -> Option<RequestRecord> {
        let entry = self.entry(owner);
        let mut pair = entry.write().unwrap();

        pair.valid
            .shift_remove(uri)
            .or_else(|| pair.invalid.shift_remove(uri))
    }

    /// Copie de la file valide, dans l'ordre d'insertion
    pub fn get_valid(&self, owner: &str) -> Vec<RequestRecord> {
        self.entry(owner).read().unwrap().valid.values().cloned().collect()
    }

    /// Copie de la file invalide, dans l'ordre d'insertion
    pub fn get_invalid(&self, owner: &str) -> Vec<RequestRecord> {
        self.entry(owner)
            .read()
            .unwrap()
            .invalid
            .values()
            .cloned()
            .collect()
    }

    /// Instantané cohérent des deux files (valides puis invalides)
    pub fn snapshot(&self, owner: &str) -> Vec<RequestRecord> {
        let entry = self.entry(owner);
        let pair = entry.read().unwrap();

        pair.valid
            .values()
            .chain(pair.invalid.values())
            .cloned()
            .collect()
    }

    /// Remplace les deux files d'un coup
    ///
    /// La paire de remplacement est construite hors verrou puis échangée
    /// en bloc : un lecteur concurrent voit l'ancienne paire ou la
    /// nouvelle, jamais un état intermédiaire. Sur deux remplacements qui
    /// se chevauchent, le dernier échange gagne.
    pub fn replace_all(&self, owner: &str, records: Vec<RequestRecord>) {
        let rebuilt = QueuePair::from_records(records);
        debug!(
            "Replacing queues for owner {} ({} valid, {} invalid)",
            owner,
            rebuilt.valid.len(),
            rebuilt.invalid.len()
        );

        let entry = self.entry(owner);
        *entry.write().unwrap() = rebuilt;
    }

    /// Supprime tout l'état du propriétaire
    pub fn clear_all(&self, owner: &str) {
        debug!("Clearing all queues for owner {}", owner);
        self.by_owner.write().unwrap().remove(owner);
    }
}
