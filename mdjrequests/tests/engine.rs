use async_trait::async_trait;
use mdjcatalog::{
    ArtistRef, CatalogError, CatalogTrack, PlayableItem, TrackCatalog, TrackUri,
};
use mdjrequests::{Error, RequestEngine, SubmitOutcome};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Catalogue en mémoire avec injection de pannes
#[derive(Debug, Default)]
struct FakeCatalog {
    tracks: Mutex<HashMap<String, PlayableItem>>,
    genres: Mutex<HashMap<String, Vec<String>>>,
    failing_tracks: Mutex<HashSet<String>>,
    failing_artists: Mutex<HashSet<String>>,
    artist_calls: AtomicUsize,
}

impl FakeCatalog {
    fn new() -> Self {
        Self::default()
    }

    fn with_track(
        self,
        id: &str,
        title: &str,
        explicit: bool,
        artists: &[(&str, &str)],
    ) -> Self {
        let track = CatalogTrack {
            uri: TrackUri::canonicalize(id),
            title: title.to_string(),
            explicit,
            artists: artists
                .iter()
                .map(|(id, name)| ArtistRef::new(*id, *name))
                .collect(),
        };
        self.tracks
            .lock()
            .unwrap()
            .insert(id.to_string(), PlayableItem::Track(track));
        self
    }

    fn with_other(self, id: &str, kind: &str) -> Self {
        self.tracks.lock().unwrap().insert(
            id.to_string(),
            PlayableItem::Other {
                kind: kind.to_string(),
            },
        );
        self
    }

    fn with_genres(self, artist_id: &str, genres: &[&str]) -> Self {
        self.genres.lock().unwrap().insert(
            artist_id.to_string(),
            genres.iter().map(|g| g.to_string()).collect(),
        );
        self
    }

    fn fail_track(&self, id: &str) {
        self.failing_tracks.lock().unwrap().insert(id.to_string());
    }

    fn restore_track(&self, id: &str) {
        self.failing_tracks.lock().unwrap().remove(id);
    }

    fn fail_artist(&self, id: &str) {
        self.failing_artists.lock().unwrap().insert(id.to_string());
    }
}

#[async_trait]
impl TrackCatalog for FakeCatalog {
    async fn get_track(&self, uri: &TrackUri) -> mdjcatalog::Result<PlayableItem> {
        let id = uri.track_id();
        if self.failing_tracks.lock().unwrap().contains(id) {
            return Err(CatalogError::Transport("injected failure".to_string()));
        }
        self.tracks
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    async fn get_artist_genres(&self, artist_id: &str) -> mdjcatalog::Result<Vec<String>> {
        self.artist_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_artists.lock().unwrap().contains(artist_id) {
            return Err(CatalogError::Transport("injected failure".to_string()));
        }
        Ok(self
            .genres
            .lock()
            .unwrap()
            .get(artist_id)
            .cloned()
            .unwrap_or_default())
    }
}

fn engine_with(catalog: FakeCatalog) -> (Arc<FakeCatalog>, RequestEngine) {
    let catalog = Arc::new(catalog);
    let engine = RequestEngine::new(catalog.clone() as Arc<dyn TrackCatalog>);
    (catalog, engine)
}

fn genres(list: &[&str]) -> Vec<String> {
    list.iter().map(|g| g.to_string()).collect()
}

#[tokio::test]
async fn submission_routes_on_genre_filter() -> anyhow::Result<()> {
    let (_catalog, engine) = engine_with(
        FakeCatalog::new()
            .with_track("t1", "Rock Song", false, &[("a1", "Rocker")])
            .with_genres("a1", &["hard rock"])
            .with_track("t2", "Jazz Song", false, &[("a2", "Jazzer")])
            .with_genres("a2", &["cool jazz"]),
    );

    engine.set_allowed_genres("owner", &genres(&["rock"]));

    let first = engine.submit_request("owner", "t1").await?;
    let second = engine.submit_request("owner", "t2").await?;

    match first {
        SubmitOutcome::Queued(record) => {
            assert!(record.valid);
            assert_eq!(record.genre, "hard rock");
            assert_eq!(record.artist, "Rocker");
        }
        SubmitOutcome::AlreadyQueued => panic!("expected Queued"),
    }
    match second {
        SubmitOutcome::Queued(record) => assert!(!record.valid),
        SubmitOutcome::AlreadyQueued => panic!("expected Queued"),
    }

    let lists = engine.list_requests("owner");
    assert_eq!(lists.valid.len(), 1);
    assert_eq!(lists.invalid.len(), 1);
    Ok(())
}

#[tokio::test]
async fn resubmission_is_idempotent_across_identifier_forms() -> anyhow::Result<()> {
    let (_catalog, engine) = engine_with(
        FakeCatalog::new()
            .with_track("abc123", "Song", false, &[("a1", "Artist")])
            .with_genres("a1", &["pop"]),
    );

    engine.submit_request("owner", "spotify:track:abc123").await?;
    let before = engine.list_requests("owner");

    // même piste sous trois formes différentes
    for raw in [
        "spotify:track:abc123",
        "https://open.spotify.com/track/abc123?si=xyz",
        "abc123",
    ] {
        let outcome = engine.submit_request("owner", raw).await?;
        assert_eq!(outcome, SubmitOutcome::AlreadyQueued);
    }

    assert_eq!(engine.list_requests("owner"), before);
    Ok(())
}

#[tokio::test]
async fn blank_identifier_is_rejected() {
    let (_catalog, engine) = engine_with(FakeCatalog::new());

    let result = engine.submit_request("owner", "   ").await;
    assert!(matches!(result, Err(Error::MissingUri)));
}

#[tokio::test]
async fn lookup_failure_fails_the_submission() {
    let (catalog, engine) = engine_with(
        FakeCatalog::new().with_track("t1", "Song", false, &[("a1", "Artist")]),
    );
    catalog.fail_track("t1");

    let result = engine.submit_request("owner", "t1").await;
    assert!(matches!(result, Err(Error::Lookup(_))));

    // rien n'a été mis en file
    let lists = engine.list_requests("owner");
    assert!(lists.valid.is_empty() && lists.invalid.is_empty());
}

#[tokio::test]
async fn explicit_content_blocked_by_default() -> anyhow::Result<()> {
    let (_catalog, engine) = engine_with(
        FakeCatalog::new()
            .with_track("t1", "Explicit Song", true, &[("a1", "Artist")])
            .with_genres("a1", &["rock"]),
    );

    // filtre de genre satisfait, mais explicit refusé par défaut
    engine.set_allowed_genres("owner", &genres(&["rock"]));

    match engine.submit_request("owner", "t1").await? {
        SubmitOutcome::Queued(record) => {
            assert!(!record.valid);
            assert_eq!(record.genre, "rock");
        }
        SubmitOutcome::AlreadyQueued => panic!("expected Queued"),
    }
    Ok(())
}

#[tokio::test]
async fn empty_allow_list_never_blocks_on_genre() -> anyhow::Result<()> {
    let (_catalog, engine) = engine_with(
        FakeCatalog::new()
            .with_track("t1", "Anything", false, &[("a1", "Artist")])
            .with_genres("a1", &["obscure microgenre"]),
    );

    match engine.submit_request("owner", "t1").await? {
        SubmitOutcome::Queued(record) => {
            assert!(record.valid);
            assert_eq!(record.genre, "obscure microgenre");
        }
        SubmitOutcome::AlreadyQueued => panic!("expected Queued"),
    }
    Ok(())
}

#[tokio::test]
async fn substring_match_keeps_candidate_genre() -> anyhow::Result<()> {
    let (_catalog, engine) = engine_with(
        FakeCatalog::new()
            .with_track("t1", "Song", false, &[("a1", "Artist")])
            .with_genres("a1", &["pop", "classic rock"]),
    );

    engine.set_allowed_genres("owner", &genres(&["rock"]));

    match engine.submit_request("owner", "t1").await? {
        SubmitOutcome::Queued(record) => {
            assert!(record.valid);
            assert_eq!(record.genre, "classic rock");
        }
        SubmitOutcome::AlreadyQueued => panic!("expected Queued"),
    }
    Ok(())
}

#[tokio::test]
async fn non_track_item_is_invalid_under_active_filter() -> anyhow::Result<()> {
    let (_catalog, engine) =
        engine_with(FakeCatalog::new().with_other("e1", "episode"));

    engine.set_allowed_genres("owner", &genres(&["rock"]));

    match engine.submit_request("owner", "e1").await? {
        SubmitOutcome::Queued(record) => {
            assert!(!record.valid);
            assert_eq!(record.genre, "unknown");
        }
        SubmitOutcome::AlreadyQueued => panic!("expected Queued"),
    }
    Ok(())
}

#[tokio::test]
async fn reclassification_moves_explicit_track_to_invalid() -> anyhow::Result<()> {
    let (_catalog, engine) = engine_with(
        FakeCatalog::new()
            .with_track("t1", "Explicit Song", true, &[("a1", "Artist")])
            .with_genres("a1", &["rock"]),
    );

    engine.set_allow_explicit("owner", true);
    engine.submit_request("owner", "t1").await?;
    assert_eq!(engine.list_requests("owner").valid.len(), 1);

    engine.set_allow_explicit("owner", false);
    engine.reclassify_all("owner").await;

    let lists = engine.list_requests("owner");
    assert!(lists.valid.is_empty());
    assert_eq!(lists.invalid.len(), 1);

    // titre, artiste et genre inchangés, seul le verdict a bougé
    let moved = &lists.invalid[0];
    assert_eq!(moved.title, "Explicit Song");
    assert_eq!(moved.artist, "Artist");
    assert_eq!(moved.genre, "rock");
    assert!(!moved.valid);
    Ok(())
}

#[tokio::test]
async fn reclassification_retains_failing_record_verbatim() -> anyhow::Result<()> {
    let (catalog, engine) = engine_with(
        FakeCatalog::new()
            .with_track("t1", "One", false, &[("a1", "A1")])
            .with_genres("a1", &["rock"])
            .with_track("t2", "Two", false, &[("a2", "A2")])
            .with_genres("a2", &["rock"])
            .with_track("t3", "Three", false, &[("a3", "A3")])
            .with_genres("a3", &["rock"]),
    );

    for id in ["t1", "t2", "t3"] {
        engine.submit_request("owner", id).await?;
    }
    assert_eq!(engine.list_requests("owner").valid.len(), 3);

    // politique restrictive + panne sur la piste du milieu
    engine.set_allowed_genres("owner", &genres(&["jazz"]));
    catalog.fail_track("t2");
    engine.reclassify_all("owner").await;

    let lists = engine.list_requests("owner");

    // t1 et t3 recalculés sous la nouvelle politique : invalides
    let invalid_ids: Vec<&str> = lists.invalid.iter().map(|r| r.uri.track_id()).collect();
    assert_eq!(invalid_ids, vec!["t1", "t3"]);

    // t2 conservé tel quel, dans sa file d'origine
    assert_eq!(lists.valid.len(), 1);
    let retained = &lists.valid[0];
    assert_eq!(retained.uri.track_id(), "t2");
    assert_eq!(retained.title, "Two");
    assert!(retained.valid);
    Ok(())
}

#[tokio::test]
async fn reclassification_is_idempotent() -> anyhow::Result<()> {
    let (_catalog, engine) = engine_with(
        FakeCatalog::new()
            .with_track("t1", "One", false, &[("a1", "A1")])
            .with_genres("a1", &["rock"])
            .with_track("t2", "Two", true, &[("a2", "A2")])
            .with_genres("a2", &["jazz"]),
    );

    engine.submit_request("owner", "t1").await?;
    engine.submit_request("owner", "t2").await?;

    engine.set_allowed_genres("owner", &genres(&["rock"]));
    engine.reclassify_all("owner").await;
    let first = engine.list_requests("owner");

    engine.reclassify_all("owner").await;
    let second = engine.list_requests("owner");

    assert_eq!(first, second);
    Ok(())
}

#[tokio::test]
async fn reclassification_aggregates_all_artists_genres() -> anyhow::Result<()> {
    // l'artiste principal n'a aucun genre accepté, le second si
    let (_catalog, engine) = engine_with(
        FakeCatalog::new()
            .with_track("t1", "Duet", false, &[("lead", "Lead"), ("feat", "Feat")])
            .with_genres("lead", &["pop"])
            .with_genres("feat", &["rock"]),
    );

    engine.set_allowed_genres("owner", &genres(&["rock"]));

    // à la soumission, seuls les genres de l'artiste principal comptent
    match engine.submit_request("owner", "t1").await? {
        SubmitOutcome::Queued(record) => assert!(!record.valid),
        SubmitOutcome::AlreadyQueued => panic!("expected Queued"),
    }

    // la reclassification agrège les genres de tous les artistes
    engine.reclassify_all("owner").await;

    let lists = engine.list_requests("owner");
    assert_eq!(lists.valid.len(), 1);
    assert_eq!(lists.valid[0].genre, "rock");
    Ok(())
}

#[tokio::test]
async fn reclassification_fetches_each_artist_once() -> anyhow::Result<()> {
    // deux pistes du même artiste
    let (catalog, engine) = engine_with(
        FakeCatalog::new()
            .with_track("t1", "One", false, &[("a1", "Artist")])
            .with_track("t2", "Two", false, &[("a1", "Artist")])
            .with_genres("a1", &["rock"]),
    );

    engine.submit_request("owner", "t1").await?;
    engine.submit_request("owner", "t2").await?;

    catalog.artist_calls.store(0, Ordering::SeqCst);
    engine.reclassify_all("owner").await;

    assert_eq!(catalog.artist_calls.load(Ordering::SeqCst), 1);
    Ok(())
}

#[tokio::test]
async fn artist_fetch_failure_is_also_fail_open() -> anyhow::Result<()> {
    let (catalog, engine) = engine_with(
        FakeCatalog::new()
            .with_track("t1", "Song", false, &[("a1", "Artist")])
            .with_genres("a1", &["rock"]),
    );

    engine.set_allowed_genres("owner", &genres(&["rock"]));
    engine.submit_request("owner", "t1").await?;

    catalog.fail_artist("a1");
    engine.set_allowed_genres("owner", &genres(&["jazz"]));
    engine.reclassify_all("owner").await;

    // l'enregistrement est conservé tel quel malgré la nouvelle politique
    let lists = engine.list_requests("owner");
    assert_eq!(lists.valid.len(), 1);
    assert_eq!(lists.valid[0].genre, "rock");
    Ok(())
}

#[tokio::test]
async fn identifier_never_appears_twice_across_queues() -> anyhow::Result<()> {
    let (catalog, engine) = engine_with(
        FakeCatalog::new()
            .with_track("t1", "Song", true, &[("a1", "Artist")])
            .with_genres("a1", &["rock"]),
    );

    engine.set_allow_explicit("owner", true);
    engine.submit_request("owner", "t1").await?;

    // plusieurs bascules de politique et de reclassification
    for allow in [false, true, false] {
        engine.set_allow_explicit("owner", allow);
        engine.reclassify_all("owner").await;

        let lists = engine.list_requests("owner");
        let total = lists.valid.len() + lists.invalid.len();
        assert_eq!(total, 1);

        let in_valid = lists.valid.iter().any(|r| r.uri.track_id() == "t1");
        let in_invalid = lists.invalid.iter().any(|r| r.uri.track_id() == "t1");
        assert!(in_valid != in_invalid);
    }

    // une panne réparée ne réintroduit pas de doublon
    catalog.fail_track("t1");
    engine.reclassify_all("owner").await;
    catalog.restore_track("t1");
    engine.reclassify_all("owner").await;

    let lists = engine.list_requests("owner");
    assert_eq!(lists.valid.len() + lists.invalid.len(), 1);
    Ok(())
}

#[tokio::test]
async fn remove_by_uri_accepts_any_identifier_form() -> anyhow::Result<()> {
    let (_catalog, engine) = engine_with(
        FakeCatalog::new()
            .with_track("abc123", "Song", false, &[("a1", "Artist")])
            .with_genres("a1", &["pop"]),
    );

    engine.submit_request("owner", "spotify:track:abc123").await?;

    let removed = engine.remove_by_uri("owner", "https://open.spotify.com/track/abc123?si=x");
    assert!(removed.is_some());
    assert!(engine.list_requests("owner").valid.is_empty());

    // une fois retirée, la piste peut être resoumise
    let outcome = engine.submit_request("owner", "abc123").await?;
    assert!(matches!(outcome, SubmitOutcome::Queued(_)));
    Ok(())
}

#[tokio::test]
async fn owners_are_fully_isolated() -> anyhow::Result<()> {
    let (_catalog, engine) = engine_with(
        FakeCatalog::new()
            .with_track("t1", "Song", false, &[("a1", "Artist")])
            .with_genres("a1", &["metal"]),
    );

    engine.set_allowed_genres("strict", &genres(&["jazz"]));

    engine.submit_request("strict", "t1").await?;
    engine.submit_request("open", "t1").await?;

    assert!(engine.list_requests("strict").valid.is_empty());
    assert_eq!(engine.list_requests("strict").invalid.len(), 1);
    assert_eq!(engine.list_requests("open").valid.len(), 1);

    engine.clear_all("strict");
    assert!(engine.list_requests("strict").invalid.is_empty());
    assert_eq!(engine.list_requests("open").valid.len(), 1);
    Ok(())
}
