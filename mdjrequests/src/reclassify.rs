//! Réévaluation en lot des files après un changement de politique

use crate::classify::classify;
use crate::policy::OwnerPolicy;
use crate::queue::QueueStore;
use crate::record::RequestRecord;
use indexmap::IndexSet;
use mdjcatalog::{PlayableItem, TrackCatalog, TrackUri};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Caches à durée de vie d'une seule passe de reclassification
///
/// Chaque piste et chaque artiste ne sont demandés au catalogue qu'une
/// fois par passe, quel que soit le nombre d'enregistrements qui les
/// partagent. Jetés à la fin de la passe.
#[derive(Default)]
struct RunCaches {
    tracks: HashMap<TrackUri, PlayableItem>,
    artist_genres: HashMap<String, Vec<String>>,
}

/// Reclasse toutes les demandes d'un propriétaire sous sa politique courante
///
/// L'instantané couvre les deux files (valides puis invalides). Chaque
/// enregistrement est recalculé à partir de métadonnées fraîches ; si une
/// des récupérations échoue, l'enregistrement est conservé tel quel et la
/// passe continue. Les deux files sont remplacées en une seule fois à la
/// fin, jamais pendant la passe.
pub(crate) async fn reclassify_owner(
    catalog: &Arc<dyn TrackCatalog>,
    policy: &OwnerPolicy,
    queues: &QueueStore,
    owner: &str,
) {
    let snapshot = queues.snapshot(owner);
    if snapshot.is_empty() {
        debug!("No queued requests for owner {}, nothing to reclassify", owner);
        return;
    }

    info!(
        "Reclassifying {} queued requests for owner {}",
        snapshot.len(),
        owner
    );

    let mut caches = RunCaches::default();
    let mut rebuilt = Vec::with_capacity(snapshot.len());

    for record in snapshot {
        match recompute(catalog, policy, &mut caches, &record).await {
            Ok(updated) => rebuilt.push(updated),
            Err(e) => {
                // Conservation en l'état : un échec de lookup ne doit ni
                // faire disparaître la demande ni interrompre le lot
                warn!(
                    "Keeping request {} as-is, catalog lookup failed: {}",
                    record.uri, e
                );
                rebuilt.push(record);
            }
        }
    }

    queues.replace_all(owner, rebuilt);
}

/// Recalcule un enregistrement à partir des métadonnées du catalogue
async fn recompute(
    catalog: &Arc<dyn TrackCatalog>,
    policy: &OwnerPolicy,
    caches: &mut RunCaches,
    record: &RequestRecord,
) -> mdjcatalog::Result<RequestRecord> {
    let item = match caches.tracks.get(&record.uri) {
        Some(item) => item.clone(),
        None => {
            let item = catalog.get_track(&record.uri).await?;
            caches.tracks.insert(record.uri.clone(), item.clone());
            item
        }
    };

    let track = match item {
        PlayableItem::Track(track) => track,
        PlayableItem::Other { ref kind } => {
            // Pas de genres possibles : classification au chemin vide
            debug!("Queued item {} resolved as non-track ({})", record.uri, kind);
            return Ok(classify(
                policy,
                &record.title,
                &record.artist,
                &[],
                record.explicit,
                record.uri.clone(),
            ));
        }
    };

    // Agrégation des genres de TOUS les artistes de la piste, chacun
    // minuscules/sans espaces de bord, premier vu conservé
    let mut gathered: IndexSet<String> = IndexSet::new();
    for artist in &track.artists {
        let tags = match caches.artist_genres.get(&artist.id) {
            Some(tags) => tags.clone(),
            None => {
                let tags = catalog.get_artist_genres(&artist.id).await?;
                caches.artist_genres.insert(artist.id.clone(), tags.clone());
                tags
            }
        };
        for tag in tags {
            let cleaned = tag.trim().to_lowercase();
            if !cleaned.is_empty() {
                gathered.insert(cleaned);
            }
        }
    }
    let genres: Vec<String> = gathered.into_iter().collect();

    let artist_name = track
        .lead_artist()
        .map(|a| a.name.clone())
        .unwrap_or_else(|| record.artist.clone());

    Ok(classify(
        policy,
        &track.title,
        &artist_name,
        &genres,
        track.explicit,
        record.uri.clone(),
    ))
}
