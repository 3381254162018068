//! Classification d'une demande selon la politique du propriétaire

use crate::normalize::normalize_genre;
use crate::policy::OwnerPolicy;
use crate::record::RequestRecord;
use mdjcatalog::TrackUri;

/// Genre affiché quand aucun tag n'est disponible
pub const UNKNOWN_GENRE: &str = "unknown";

/// Cherche le premier genre candidat accepté par la liste autorisée
///
/// Boucle externe sur les candidats dans l'ordre d'entrée, boucle interne
/// sur les genres autorisés dans l'ordre de saisie ; premier succès
/// retenu. Deux genres se correspondent quand leurs formes normalisées
/// sont égales ou que l'une contient l'autre ("rock" accepte ainsi
/// "classic rock", et "k-pop" est accepté par "pop").
fn match_candidate<'a>(policy: &OwnerPolicy, candidates: &'a [String]) -> Option<&'a str> {
    if candidates.is_empty() || policy.allowed_genres.is_empty() {
        return None;
    }

    let allowed_norm: Vec<String> = policy
        .allowed_genres
        .iter()
        .map(|a| normalize_genre(a))
        .collect();

    for candidate in candidates {
        let cn = normalize_genre(candidate);
        for an in &allowed_norm {
            if cn == *an || cn.contains(an.as_str()) || an.contains(cn.as_str()) {
                return Some(candidate.as_str());
            }
        }
    }

    None
}

/// Produit l'enregistrement classifié d'une demande
///
/// Fonction pure, sans I/O : les genres candidats ont déjà été résolus
/// par l'appelant.
///
/// Le genre d'affichage est le candidat accepté s'il y en a un, sinon le
/// premier candidat, sinon "unknown". Le verdict combine le filtre de
/// genre (inactif quand la liste autorisée est vide) et le flag
/// "explicit".
pub fn classify(
    policy: &OwnerPolicy,
    title: &str,
    artist: &str,
    candidate_genres: &[String],
    explicit: bool,
    uri: TrackUri,
) -> RequestRecord {
    let matched = match_candidate(policy, candidate_genres);

    let genre = match matched {
        Some(g) => g.to_string(),
        None => candidate_genres
            .first()
            .cloned()
            .unwrap_or_else(|| UNKNOWN_GENRE.to_string()),
    };

    let valid = (!policy.filter_active() || matched.is_some())
        && (policy.allow_explicit || !explicit);

    RequestRecord {
        title: title.to_string(),
        artist: artist.to_string(),
        genre,
        explicit,
        uri,
        valid,
    }
}
