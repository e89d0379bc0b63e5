//! Spaced-repetition scheduler
//!
//! Advances a card's scheduling state in response to a recall rating, and
//! reports what interval each rating would produce so the review UI can label
//! its buttons. Two phases: a short-cycle learning phase with fixed steps, and
//! a review phase where the interval grows by the card's ease factor. All
//! operations take the current time as an argument and never read the clock.

use crate::core::models::card::MIN_EASE_FACTOR;
use crate::core::models::{Card, Rating};
use chrono::{DateTime, Duration, Utc};

/// Learning step for Again, in minutes
pub const AGAIN_STEP_MINUTES: f64 = 1.0;

/// Learning step for Good, in minutes
pub const GOOD_STEP_MINUTES: f64 = 10.0;

/// Learning step for Easy, in minutes (four days)
pub const EASY_STEP_MINUTES: f64 = 4.0 * 24.0 * 60.0;

/// Interval multiplier applied on a Hard review
pub const HARD_INTERVAL_MODIFIER: f64 = 0.8;

/// Extra multiplier shown on the Easy preview (not applied to the stored interval)
pub const EASY_PREVIEW_BONUS: f64 = 1.3;

/// Ease penalty on a lapse (Again while reviewing)
const LAPSE_EASE_PENALTY: f64 = 0.2;

/// Ease penalty on a Hard review
const HARD_EASE_PENALTY: f64 = 0.15;

/// Ease bonus on an Easy review
const EASY_EASE_BONUS: f64 = 0.15;

const MINUTES_PER_DAY: f64 = 24.0 * 60.0;

/// Next-interval preview for each possible rating, in minutes
///
/// Pure function of the card's scheduling state; safe to recompute on every
/// render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalPreview {
    /// Interval if the card is rated Again
    pub again: f64,
    /// Interval if the card is rated Hard
    pub hard: f64,
    /// Interval if the card is rated Good
    pub good: f64,
    /// Interval if the card is rated Easy
    pub easy: f64,
}

impl IntervalPreview {
    /// The preview for a specific rating
    #[must_use]
    pub const fn for_rating(&self, rating: Rating) -> f64 {
        match rating {
            Rating::Again => self.again,
            Rating::Hard => self.hard,
            Rating::Good => self.good,
            Rating::Easy => self.easy,
        }
    }
}

/// Compute the interval each rating would produce for a card
///
/// During learning the steps are fixed. During review they derive from the
/// last interval: Again always resets, Hard shrinks by
/// [`HARD_INTERVAL_MODIFIER`], Good grows by the ease factor, and the Easy
/// preview additionally shows the [`EASY_PREVIEW_BONUS`].
#[must_use]
pub fn preview_intervals(card: &Card) -> IntervalPreview {
    if card.is_learning {
        return IntervalPreview {
            again: AGAIN_STEP_MINUTES,
            hard: (GOOD_STEP_MINUTES / 2.0).round(),
            good: GOOD_STEP_MINUTES,
            easy: EASY_STEP_MINUTES,
        };
    }
    let last_interval = card.interval * MINUTES_PER_DAY;
    IntervalPreview {
        again: AGAIN_STEP_MINUTES,
        hard: last_interval * HARD_INTERVAL_MODIFIER,
        good: last_interval * card.ease_factor,
        easy: last_interval * card.ease_factor * EASY_PREVIEW_BONUS,
    }
}

/// Apply a recall rating to a card, advancing its scheduling state
///
/// The two-phase transition:
///
/// - Learning + Again repeats the short step. Any passing rating graduates
///   the card to review: Good with a one-day interval, Easy with the Easy
///   step. Hard is not offered by the learning phase and graduates with the
///   Good step; that quirk is a deliberate simplification kept from the
///   original scheduler, so preserve it.
/// - Review + Again lapses the card back to learning and docks the ease
///   factor. Hard docks ease and shrinks the interval; Easy raises ease. The
///   first review after graduation (`interval == 0`) always gets one day.
///
/// The ease factor never drops below the 1.3 floor, and the new due date is
/// `now` plus the new interval.
pub fn apply_rating(card: &mut Card, rating: Rating, now: DateTime<Utc>) {
    let new_interval = if card.is_learning {
        match rating {
            Rating::Again => AGAIN_STEP_MINUTES / MINUTES_PER_DAY,
            Rating::Good => {
                card.is_learning = false;
                1.0
            }
            Rating::Easy => {
                card.is_learning = false;
                EASY_STEP_MINUTES / MINUTES_PER_DAY
            }
            Rating::Hard => {
                card.is_learning = false;
                GOOD_STEP_MINUTES / MINUTES_PER_DAY
            }
        }
    } else if rating == Rating::Again {
        card.ease_factor = (card.ease_factor - LAPSE_EASE_PENALTY).max(MIN_EASE_FACTOR);
        card.is_learning = true;
        AGAIN_STEP_MINUTES / MINUTES_PER_DAY
    } else {
        if rating == Rating::Hard {
            card.ease_factor = (card.ease_factor - HARD_EASE_PENALTY).max(MIN_EASE_FACTOR);
        }
        if rating == Rating::Easy {
            card.ease_factor += EASY_EASE_BONUS;
        }
        if card.interval == 0.0 {
            1.0
        } else {
            let modifier = if rating == Rating::Hard {
                HARD_INTERVAL_MODIFIER
            } else {
                1.0
            };
            card.interval * card.ease_factor * modifier
        }
    };

    card.interval = new_interval;
    card.due_date = Some(now + duration_from_days(new_interval));
}

/// Format a minute count for interval labels
///
/// Buckets: under an hour shows minutes (ceiling), under a day hours, under
/// thirty days whole days, under a year months, then years. Display only;
/// scheduling decisions never read these strings.
#[must_use]
pub fn format_interval(minutes: f64) -> String {
    if minutes < 60.0 {
        return format!("<{}m", minutes.ceil());
    }
    if minutes < MINUTES_PER_DAY {
        return format!("~{}h", (minutes / 60.0).round());
    }
    let days = minutes / MINUTES_PER_DAY;
    if days < 30.0 {
        return format!("~{}d", days.round());
    }
    if days < 365.0 {
        return format!("~{}mo", (days / 30.0).round());
    }
    format!("~{}y", (days / 365.0).round())
}

#[allow(clippy::cast_possible_truncation)]
fn duration_from_days(days: f64) -> Duration {
    Duration::milliseconds((days * MINUTES_PER_DAY * 60.0 * 1000.0).round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::card::INITIAL_EASE_FACTOR;

    fn now() -> DateTime<Utc> {
        "2024-09-01T08:00:00Z".parse().unwrap()
    }

    fn new_card() -> Card {
        Card::new("c1".to_string(), "Q".to_string(), "A".to_string(), now())
    }

    fn reviewing_card(interval: f64, ease_factor: f64) -> Card {
        let mut card = new_card();
        card.is_learning = false;
        card.interval = interval;
        card.ease_factor = ease_factor;
        card
    }

    #[test]
    fn test_learning_preview_uses_fixed_steps() {
        let preview = preview_intervals(&new_card());
        assert!((preview.again - 1.0).abs() < f64::EPSILON);
        assert!((preview.hard - 5.0).abs() < f64::EPSILON);
        assert!((preview.good - 10.0).abs() < f64::EPSILON);
        assert!((preview.easy - 5760.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_review_preview_scales_last_interval() {
        let preview = preview_intervals(&reviewing_card(10.0, 2.0));
        let last = 10.0 * 1440.0;
        assert!((preview.again - 1.0).abs() < f64::EPSILON);
        assert!((preview.hard - last * 0.8).abs() < 1e-9);
        assert!((preview.good - last * 2.0).abs() < 1e-9);
        assert!((preview.easy - last * 2.0 * 1.3).abs() < 1e-9);
    }

    #[test]
    fn test_good_graduates_new_card() {
        let mut card = new_card();
        apply_rating(&mut card, Rating::Good, now());

        assert!(!card.is_learning);
        assert!((card.interval - 1.0).abs() < f64::EPSILON);
        assert!((card.ease_factor - INITIAL_EASE_FACTOR).abs() < f64::EPSILON);
        assert_eq!(card.due_date, Some(now() + Duration::days(1)));
    }

    #[test]
    fn test_easy_graduates_with_easy_step() {
        let mut card = new_card();
        apply_rating(&mut card, Rating::Easy, now());

        assert!(!card.is_learning);
        assert!((card.interval - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hard_in_learning_graduates_with_good_step() {
        // Hard is not offered while learning; if it arrives anyway the card
        // graduates with the Good step.
        let mut card = new_card();
        apply_rating(&mut card, Rating::Hard, now());

        assert!(!card.is_learning);
        assert!((card.interval - 10.0 / 1440.0).abs() < 1e-12);
        assert!((card.ease_factor - INITIAL_EASE_FACTOR).abs() < f64::EPSILON);
    }

    #[test]
    fn test_again_in_learning_repeats_step() {
        let mut card = new_card();
        apply_rating(&mut card, Rating::Again, now());

        assert!(card.is_learning);
        assert!((card.interval - 1.0 / 1440.0).abs() < 1e-12);
    }

    #[test]
    fn test_lapse_resets_and_docks_ease() {
        let mut card = reviewing_card(10.0, 2.0);
        apply_rating(&mut card, Rating::Again, now());

        assert!(card.is_learning);
        assert!((card.interval - 1.0 / 1440.0).abs() < 1e-12);
        assert!((card.ease_factor - 1.8).abs() < 1e-9);
    }

    #[test]
    fn test_hard_review_shrinks_interval_with_updated_ease() {
        let mut card = reviewing_card(10.0, 2.0);
        apply_rating(&mut card, Rating::Hard, now());

        // Ease drops first, then the interval uses the new value.
        assert!((card.ease_factor - 1.85).abs() < 1e-9);
        assert!((card.interval - 10.0 * 1.85 * 0.8).abs() < 1e-9);
        assert!(!card.is_learning);
    }

    #[test]
    fn test_good_review_multiplies_by_ease() {
        let mut card = reviewing_card(10.0, 2.0);
        apply_rating(&mut card, Rating::Good, now());

        assert!((card.interval - 20.0).abs() < 1e-9);
        assert!((card.ease_factor - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_easy_review_raises_ease_without_preview_bonus() {
        let mut card = reviewing_card(10.0, 2.0);
        let preview_easy = preview_intervals(&card).easy;
        apply_rating(&mut card, Rating::Easy, now());

        assert!((card.ease_factor - 2.15).abs() < 1e-9);
        // The stored interval grows by the new ease only; the 1.3 bonus
        // appears in the preview alone.
        assert!((card.interval - 10.0 * 2.15).abs() < 1e-9);
        assert!(card.interval * 1440.0 < preview_easy);
    }

    #[test]
    fn test_first_review_after_graduation_gets_one_day() {
        let mut card = reviewing_card(0.0, 2.5);
        apply_rating(&mut card, Rating::Good, now());
        assert!((card.interval - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_ease_never_drops_below_floor() {
        let mut card = reviewing_card(10.0, MIN_EASE_FACTOR);
        apply_rating(&mut card, Rating::Again, now());
        assert!((card.ease_factor - MIN_EASE_FACTOR).abs() < f64::EPSILON);

        let mut card = reviewing_card(10.0, 1.4);
        apply_rating(&mut card, Rating::Hard, now());
        assert!((card.ease_factor - MIN_EASE_FACTOR).abs() < f64::EPSILON);
    }

    #[test]
    fn test_interval_stays_non_negative_across_sequences() {
        let ratings = [
            Rating::Again,
            Rating::Good,
            Rating::Hard,
            Rating::Again,
            Rating::Easy,
            Rating::Good,
            Rating::Again,
            Rating::Hard,
        ];
        let mut card = new_card();
        for rating in ratings {
            apply_rating(&mut card, rating, now());
            assert!(card.interval >= 0.0);
            assert!(card.ease_factor >= MIN_EASE_FACTOR);
        }
    }

    #[test]
    fn test_format_interval_buckets() {
        assert_eq!(format_interval(30.0), "<30m");
        assert_eq!(format_interval(90.0), "~2h");
        assert_eq!(format_interval(1500.0), "~1d");
        assert_eq!(format_interval(43200.0), "~1mo");
        assert_eq!(format_interval(525_600.0), "~1y");
    }

    #[test]
    fn test_preview_for_rating() {
        let preview = preview_intervals(&new_card());
        assert!((preview.for_rating(Rating::Hard) - preview.hard).abs() < f64::EPSILON);
    }
}
