//! Structures de données pour représenter les objets Spotify

use serde::{Deserialize, Serialize};

/// Représente un artiste Spotify (objet complet, avec genres)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Artist {
    /// Identifiant unique de l'artiste
    pub id: String,
    /// Nom de l'artiste
    pub name: String,
    /// Tags de genre associés à l'artiste, dans l'ordre du catalogue
    #[serde(default)]
    pub genres: Vec<String>,
}

/// Représente un artiste simplifié (tel qu'attaché à une track)
///
/// L'objet simplifié ne porte pas les genres : il faut récupérer
/// l'objet [`Artist`] complet pour les obtenir.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimplifiedArtist {
    /// Identifiant unique de l'artiste
    pub id: String,
    /// Nom de l'artiste
    pub name: String,
}

/// Image de couverture (l'API les retourne de la plus grande à la plus petite)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Image {
    /// URL de l'image
    pub url: String,
    /// Hauteur en pixels
    #[serde(default)]
    pub height: Option<u32>,
    /// Largeur en pixels
    #[serde(default)]
    pub width: Option<u32>,
}

/// Album simplifié attaché à une track
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Album {
    /// Nom de l'album
    pub name: String,
    /// Images de couverture
    #[serde(default)]
    pub images: Vec<Image>,
}

/// Représente une piste (track) Spotify
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Track {
    /// Identifiant unique de la piste
    pub id: String,
    /// Titre de la piste
    pub name: String,
    /// URI Spotify (ex: "spotify:track:...")
    #[serde(default)]
    pub uri: Option<String>,
    /// Indique si la piste porte le flag "explicit"
    #[serde(default)]
    pub explicit: bool,
    /// Artistes de la piste, dans l'ordre du catalogue
    #[serde(default)]
    pub artists: Vec<SimplifiedArtist>,
    /// Album contenant la piste
    #[serde(default)]
    pub album: Option<Album>,
    /// Type d'objet retourné par l'API ("track", "episode", ...)
    #[serde(rename = "type", default)]
    pub item_type: Option<String>,
}

impl Track {
    /// Retourne l'artiste principal (premier de la liste), s'il existe
    pub fn lead_artist(&self) -> Option<&SimplifiedArtist> {
        self.artists.first()
    }

    /// Retourne l'URL de la plus petite image de couverture
    ///
    /// L'API retourne les images triées de la plus grande à la plus
    /// petite : on prend la dernière.
    pub fn smallest_image_url(&self) -> Option<&str> {
        self.album
            .as_ref()
            .and_then(|album| album.images.last())
            .map(|image| image.url.as_str())
    }
}

/// Résumé d'une track pour l'affichage des résultats de recherche
///
/// C'est la forme consommée par la couche de soumission : titre, artiste
/// principal, premier genre connu de cet artiste et pochette.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrackSummary {
    /// Titre de la piste
    pub name: String,
    /// Nom de l'artiste principal
    pub artist: String,
    /// Premier genre de l'artiste principal, ou "unknown"
    pub genre: String,
    /// URI Spotify de la piste
    pub uri: String,
    /// URL de la pochette (la plus petite disponible)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}
