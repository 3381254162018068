//! Enregistrement immuable d'une demande classifiée

use mdjcatalog::TrackUri;
use serde::{Deserialize, Serialize};

/// Instantané d'une demande produit par le classifieur
///
/// Un enregistrement n'est jamais modifié en place : la reclassification
/// en produit un nouveau et remplace l'ancien en bloc.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RequestRecord {
    /// Titre de la piste
    pub title: String,
    /// Nom d'affichage de l'artiste principal
    pub artist: String,
    /// Genre d'affichage retenu par le classifieur
    pub genre: String,
    /// La piste porte le flag "explicit"
    pub explicit: bool,
    /// Identifiant canonique de la piste
    pub uri: TrackUri,
    /// Verdict du classifieur sous la politique courante
    pub valid: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_serialization() {
        let record = RequestRecord {
            title: "Song".to_string(),
            artist: "Artist".to_string(),
            genre: "rock".to_string(),
            explicit: false,
            uri: TrackUri::canonicalize("abc123"),
            valid: true,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["uri"], "spotify:track:abc123");
        assert_eq!(json["valid"], true);
    }
}
