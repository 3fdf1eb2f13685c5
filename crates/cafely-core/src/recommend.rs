//! Drink recommendation scoring.
//!
//! Each drink earns one point per preference it matches. Drinks with no
//! points are dropped; the rest are ranked by score with catalog order as
//! the tie-break.

use crate::catalog::Drink;
use crate::preferences::{PreferenceSet, QuestionKey};

/// Maximum number of names returned by [`recommend_drinks`].
pub const MAX_RECOMMENDATIONS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredDrink<'a> {
    pub drink: &'a Drink,
    pub score: usize,
}

/// Number of preference fields `drink` matches.
#[must_use]
pub fn score_drink(drink: &Drink, preferences: &PreferenceSet) -> usize {
    QuestionKey::ALL
        .iter()
        .filter(|key| {
            preferences
                .get(**key)
                .is_some_and(|answer| field_matches(drink, **key, answer))
        })
        .count()
}

/// Every drink with a non-zero score, best first.
///
/// The sort is stable, so drinks with equal scores keep catalog order.
#[must_use]
pub fn rank_drinks<'a>(drinks: &'a [Drink], preferences: &PreferenceSet) -> Vec<ScoredDrink<'a>> {
    let mut ranked: Vec<ScoredDrink<'a>> = drinks
        .iter()
        .map(|drink| ScoredDrink {
            drink,
            score: score_drink(drink, preferences),
        })
        .filter(|scored| scored.score > 0)
        .collect();

    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}

/// Names of the top [`MAX_RECOMMENDATIONS`] drinks for `preferences`.
///
/// An empty result means nothing matched; it is not an error.
#[must_use]
pub fn recommend_drinks(drinks: &[Drink], preferences: &PreferenceSet) -> Vec<String> {
    let names: Vec<String> = rank_drinks(drinks, preferences)
        .into_iter()
        .take(MAX_RECOMMENDATIONS)
        .map(|scored| scored.drink.name.clone())
        .collect();

    tracing::debug!(
        answered = preferences.answered_count(),
        matches = names.len(),
        "scored drink catalog"
    );
    names
}

fn field_matches(drink: &Drink, key: QuestionKey, answer: &str) -> bool {
    let wanted = normalise(answer);
    match key {
        QuestionKey::Caffeine => {
            if wanted == "none" {
                drink.has_no_measured_caffeine()
                    || normalise(drink.caffeine_category()) == "none"
            } else {
                normalise(drink.caffeine_category()) == wanted
            }
        }
        QuestionKey::Temp => wanted == "either" || normalise(&drink.temp) == wanted,
        QuestionKey::Flavor => normalise(&drink.flavor) == wanted,
        QuestionKey::Strength => normalise(&drink.strength) == wanted,
        QuestionKey::Category => normalise(&drink.category) == wanted,
    }
}

fn normalise(value: &str) -> String {
    value.trim().to_lowercase()
}

#[cfg(test)]
#[path = "recommend_test.rs"]
mod tests;
