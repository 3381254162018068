//! Exemple de recherche de pistes avec résumés d'affichage
//!
//! Les credentials Spotify sont lus dans la configuration mdjconfig
//! (fichier config.yaml ou variables d'environnement
//! `MDJMUSIC_CONFIG__SPOTIFY__CLIENT_ID` / `__CLIENT_SECRET`).
//!
//! Usage:
//! ```bash
//! cargo run --example search -- "daft punk"
//! ```

use mdjspotify::SpotifyClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialiser le logging
    tracing_subscriber::fmt::init();

    let query = std::env::args().nth(1).unwrap_or_else(|| "daft punk".to_string());

    let client = SpotifyClient::from_config()?;

    println!("=== Recherche: {} ===\n", query);

    let summaries = client.search_track_summaries(&query, 10).await?;
    if summaries.is_empty() {
        println!("Aucun résultat.");
        return Ok(());
    }

    for summary in summaries {
        println!(
            "{} — {} [{}]\n  {}",
            summary.name, summary.artist, summary.genre, summary.uri
        );
    }

    Ok(())
}
