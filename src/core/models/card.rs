//! Flashcard model and review ratings

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ease factor assigned to a freshly created card
pub const INITIAL_EASE_FACTOR: f64 = 2.5;

/// Hard floor for the ease factor; no rating sequence can push it lower
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// Recall-quality rating given to a card during review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    /// Failed to recall; the card drops back to the learning phase
    Again,
    /// Recalled with difficulty
    Hard,
    /// Recalled correctly
    Good,
    /// Recalled effortlessly
    Easy,
}

impl Rating {
    /// Convert a numeric recall score into a rating
    ///
    /// # Arguments
    /// * `score` - Numeric score, 1 (Again) through 4 (Easy)
    ///
    /// # Returns
    /// `None` when the score is outside 1..=4. Callers must treat that as a
    /// contract violation and refuse the input; it is never coerced.
    #[must_use]
    pub const fn from_score(score: u8) -> Option<Self> {
        match score {
            1 => Some(Self::Again),
            2 => Some(Self::Hard),
            3 => Some(Self::Good),
            4 => Some(Self::Easy),
            _ => None,
        }
    }

    /// Numeric score for this rating (1 through 4)
    #[must_use]
    pub const fn score(self) -> u8 {
        match self {
            Self::Again => 1,
            Self::Hard => 2,
            Self::Good => 3,
            Self::Easy => 4,
        }
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Again => "again",
            Self::Hard => "hard",
            Self::Good => "good",
            Self::Easy => "easy",
        };
        write!(f, "{as_str}")
    }
}

/// A flashcard together with its scheduling state
///
/// The content fields are opaque to the scheduler; only the scheduling fields
/// are ever read or written by rating updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Unique card identifier
    pub id: String,

    /// Prompt-side content
    pub front: String,

    /// Answer-side content
    pub back: String,

    /// When the card next becomes eligible for review. `None` only for cards
    /// imported from files that predate scheduling data; deck migration
    /// initializes those once at load time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,

    /// Current scheduling interval in days (fractional while learning)
    #[serde(default)]
    pub interval: f64,

    /// Multiplier controlling interval growth; never below [`MIN_EASE_FACTOR`]
    #[serde(default = "default_ease_factor")]
    pub ease_factor: f64,

    /// Whether the card is still in the short-cycle learning phase
    #[serde(default = "default_is_learning")]
    pub is_learning: bool,
}

const fn default_ease_factor() -> f64 {
    INITIAL_EASE_FACTOR
}

const fn default_is_learning() -> bool {
    true
}

impl Card {
    /// Create a card with fresh scheduling state, due immediately
    ///
    /// # Arguments
    /// * `id` - Unique card identifier
    /// * `front` - Prompt-side content
    /// * `back` - Answer-side content
    /// * `now` - Creation time; the card is due from this instant
    #[must_use]
    pub fn new(id: String, front: String, back: String, now: DateTime<Utc>) -> Self {
        let mut card = Self {
            id,
            front,
            back,
            due_date: None,
            interval: 0.0,
            ease_factor: INITIAL_EASE_FACTOR,
            is_learning: true,
        };
        card.initialize_srs(now);
        card
    }

    /// Reset the scheduling state: due now, zero interval, base ease, learning
    pub fn initialize_srs(&mut self, now: DateTime<Utc>) {
        self.due_date = Some(now);
        self.interval = 0.0;
        self.ease_factor = INITIAL_EASE_FACTOR;
        self.is_learning = true;
    }

    /// Whether the card carries scheduling state at all
    #[must_use]
    pub const fn has_srs_state(&self) -> bool {
        self.due_date.is_some()
    }

    /// Whether the card is eligible for review at `now`
    #[must_use]
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.due_date.is_some_and(|due| due <= now)
    }
}
