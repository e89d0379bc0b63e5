//! Drill command handler: list due cards and apply recall ratings

use chrono::Utc;
use std::path::Path;
use study_tools::core::files;
use study_tools::core::models::Rating;
use study_tools::core::srs::{apply_rating, format_interval, preview_intervals};
use study_tools::{error, info};

/// Run the drill command
///
/// Without a card id, lists the deck's due cards with per-rating interval
/// previews. With a card and rating, applies the rating, reschedules the
/// card, and saves the deck back to disk.
///
/// # Arguments
/// * `deck_path` - Deck TOML file
/// * `card_id` - Card to rate
/// * `rating` - Recall rating to apply
pub fn run(deck_path: &Path, card_id: Option<&str>, rating: Option<Rating>) {
    let mut deck = match files::load_deck(deck_path) {
        Ok(deck) => deck,
        Err(e) => {
            error!("Failed to load deck: {e}");
            eprintln!("✗ {e}");
            return;
        }
    };

    let now = Utc::now();
    let migrated = deck.migrate(now);
    if migrated > 0 {
        info!("Initialized scheduling data on {migrated} cards");
        if let Err(e) = files::save_deck(deck_path, &deck) {
            error!("Failed to save migrated deck: {e}");
            eprintln!("✗ {e}");
            return;
        }
    }

    match (card_id, rating) {
        (Some(card_id), Some(rating)) => {
            let Some(card) = deck.get_card_mut(card_id) else {
                eprintln!("✗ No card '{card_id}' in deck '{}'", deck.name);
                return;
            };
            apply_rating(card, rating, now);
            let next = format_interval(card.interval * 24.0 * 60.0);
            if let Err(e) = files::save_deck(deck_path, &deck) {
                error!("Failed to save deck: {e}");
                eprintln!("✗ {e}");
                return;
            }
            println!("✓ Rated {card_id} {rating}; next review in {next}");
        }
        _ => list_due(&deck, now),
    }
}

fn list_due(deck: &study_tools::core::models::Deck, now: chrono::DateTime<Utc>) {
    let due = deck.due_cards(now);
    println!(
        "{}: {} of {} cards due",
        deck.name,
        due.len(),
        deck.card_count()
    );
    for card in due {
        let preview = preview_intervals(card);
        println!(
            "  {}: again {} / hard {} / good {} / easy {}",
            card.id,
            format_interval(preview.again),
            format_interval(preview.hard),
            format_interval(preview.good),
            format_interval(preview.easy)
        );
    }
}
