//! Politiques de filtrage par propriétaire

use indexmap::IndexSet;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Politique de filtrage d'un propriétaire
///
/// Une liste de genres vide signifie "pas de filtre de genre". Le contenu
/// explicite est refusé par défaut.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnerPolicy {
    /// Genres autorisés, minuscules, dans l'ordre de saisie
    pub allowed_genres: IndexSet<String>,
    /// Autoriser les pistes marquées "explicit"
    pub allow_explicit: bool,
}

impl OwnerPolicy {
    /// Le filtre de genre est actif dès que la liste n'est pas vide
    pub fn filter_active(&self) -> bool {
        !self.allowed_genres.is_empty()
    }
}

/// Registre des politiques, une par propriétaire
///
/// Les propriétaires ne sont jamais pré-enregistrés : la politique par
/// défaut est créée au premier accès, exactement une fois même sous
/// accès concurrent.
#[derive(Debug, Default)]
pub struct PolicyStore {
    by_owner: RwLock<HashMap<String, Arc<RwLock<OwnerPolicy>>>>,
}

impl PolicyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Résout l'entrée d'un propriétaire, en la créant au besoin
    fn entry(&self, owner: &str) -> Arc<RwLock<OwnerPolicy>> {
        if let Some(entry) = self.by_owner.read().unwrap().get(owner) {
            return entry.clone();
        }

        let mut map = self.by_owner.write().unwrap();
        map.entry(owner.to_string())
            .or_insert_with(|| {
                debug!("Creating default policy for owner {}", owner);
                Arc::new(RwLock::new(OwnerPolicy::default()))
            })
            .clone()
    }

    /// Retourne un instantané de la politique du propriétaire
    pub fn get(&self, owner: &str) -> OwnerPolicy {
        self.entry(owner).read().unwrap().clone()
    }

    /// Remplace la liste des genres autorisés
    ///
    /// Chaque entrée est passée en minuscules et débarrassée des espaces
    /// de bord ; les entrées vides sont ignorées, les doublons fusionnés
    /// en conservant l'ordre de première apparition.
    pub fn set_allowed_genres(&self, owner: &str, genres: &[String]) {
        let cleaned: IndexSet<String> = genres
            .iter()
            .map(|g| g.to_lowercase().trim().to_string())
            .filter(|g| !g.is_empty())
            .collect();

        debug!(
            "Setting {} allowed genres for owner {}",
            cleaned.len(),
            owner
        );

        let entry = self.entry(owner);
        entry.write().unwrap().allowed_genres = cleaned;
    }

    /// Retourne les genres autorisés dans l'ordre de saisie
    pub fn allowed_genres(&self, owner: &str) -> Vec<String> {
        self.entry(owner)
            .read()
            .unwrap()
            .allowed_genres
            .iter()
            .cloned()
            .collect()
    }

    /// Autorise ou refuse le contenu explicite
    ///
    /// Indépendant de la liste de genres : les deux écritures ne sont
    /// pas transactionnelles.
    pub fn set_allow_explicit(&self, owner: &str, allow: bool) {
        debug!("Setting allow_explicit={} for owner {}", allow, owner);
        self.entry(owner).write().unwrap().allow_explicit = allow;
    }

    /// Le contenu explicite est-il accepté pour ce propriétaire ?
    pub fn allow_explicit(&self, owner: &str) -> bool {
        self.entry(owner).read().unwrap().allow_explicit
    }
}
