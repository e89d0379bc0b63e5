//! Deck model: a named collection of flashcards

use super::Card;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named collection of flashcards
///
/// The deck owns its cards; the scheduler only ever operates on one card at a
/// time. Persistence is the caller's concern, but the load-time migration rule
/// for cards that predate scheduling data lives here so it runs exactly once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    /// Unique deck identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Optional description
    #[serde(default)]
    pub description: String,

    /// Cards owned by this deck
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl Deck {
    /// Create a new empty deck
    #[must_use]
    pub const fn new(id: String, name: String, description: String) -> Self {
        Self {
            id,
            name,
            description,
            cards: Vec::new(),
        }
    }

    /// Initialize scheduling state on cards that lack it
    ///
    /// Cards imported from older files carry no due date; they become due at
    /// `now` with fresh scheduling state. Cards with existing state are left
    /// untouched.
    ///
    /// # Returns
    /// The number of cards that were initialized
    pub fn migrate(&mut self, now: DateTime<Utc>) -> usize {
        let mut migrated = 0;
        for card in &mut self.cards {
            if !card.has_srs_state() {
                card.initialize_srs(now);
                migrated += 1;
            }
        }
        migrated
    }

    /// Look up a card by id
    #[must_use]
    pub fn get_card(&self, card_id: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == card_id)
    }

    /// Look up a card by id, mutably
    pub fn get_card_mut(&mut self, card_id: &str) -> Option<&mut Card> {
        self.cards.iter_mut().find(|c| c.id == card_id)
    }

    /// Cards eligible for review at `now`, in deck order
    #[must_use]
    pub fn due_cards(&self, now: DateTime<Utc>) -> Vec<&Card> {
        self.cards.iter().filter(|c| c.is_due(now)).collect()
    }

    /// Number of cards eligible for review at `now`
    #[must_use]
    pub fn due_count(&self, now: DateTime<Utc>) -> usize {
        self.cards.iter().filter(|c| c.is_due(now)).count()
    }

    /// Total number of cards
    #[must_use]
    pub const fn card_count(&self) -> usize {
        self.cards.len()
    }
}
