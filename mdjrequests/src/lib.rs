//! # mdjrequests - Moteur de demandes de morceaux multi-propriétaires
//!
//! Cette crate est le cœur de MDJMusic : chaque propriétaire (un DJ, une
//! soirée) configure sa politique de filtrage — genres autorisés et
//! acceptation du contenu explicite — et les demandes soumises par les
//! invités sont classifiées en deux files, valides et invalides,
//! dédupliquées par identifiant canonique de piste.
//!
//! - `policy` : politiques par propriétaire, créées paresseusement
//! - `classify` : classification pure (verdict + genre d'affichage)
//! - `queue` : paires de files ordonnées, remplaçables en bloc
//! - `reclassify` : réévaluation en lot après un changement de politique
//! - `engine` : la façade [`RequestEngine`] exposée aux couches externes
//!
//! Le moteur ne connaît le catalogue musical qu'à travers le trait
//! [`mdjcatalog::TrackCatalog`].
//!
//! # Exemple d'utilisation
//!
//! ```rust,ignore
//! use mdjrequests::{RequestEngine, SubmitOutcome};
//! use std::sync::Arc;
//!
//! let engine = RequestEngine::new(Arc::new(catalog));
//!
//! engine.set_allowed_genres("party-42", &["rock".to_string()]);
//! match engine.submit_request("party-42", "spotify:track:abc").await? {
//!     SubmitOutcome::Queued(record) => println!("queued, valid={}", record.valid),
//!     SubmitOutcome::AlreadyQueued => println!("already queued"),
//! }
//! ```

mod classify;
mod engine;
mod error;
mod normalize;
mod policy;
mod queue;
mod reclassify;
mod record;

// Réexports publics
pub use classify::{classify, UNKNOWN_GENRE};
pub use engine::{RequestEngine, RequestLists, SubmitOutcome};
pub use error::{Error, Result};
pub use normalize::normalize_genre;
pub use policy::{OwnerPolicy, PolicyStore};
pub use queue::QueueStore;
pub use record::RequestRecord;
