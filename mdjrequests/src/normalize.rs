//! Normalisation des clés de genre pour la comparaison

/// Réduit un tag de genre à sa clé de comparaison
///
/// Minuscules, espaces de bord retirés, `&` et `+` remplacés par "and",
/// tout caractère non alphanumérique supprimé. La forme "rnb" est
/// rapprochée de "randb" pour que "RnB" et "R&B" se correspondent.
pub fn normalize_genre(genre: &str) -> String {
    let lowered = genre.to_lowercase();
    let replaced = lowered.trim().replace('&', "and").replace('+', "and");
    let key: String = replaced
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();

    if key == "rnb" {
        "randb".to_string()
    } else {
        key
    }
}
