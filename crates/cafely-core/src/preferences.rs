//! Quiz answers keyed by question.

use serde::{Deserialize, Serialize};

/// Quiz question keys, in the fixed order the quiz asks them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKey {
    Caffeine,
    Temp,
    Flavor,
    Strength,
    Category,
}

impl QuestionKey {
    pub const ALL: [QuestionKey; 5] = [
        QuestionKey::Caffeine,
        QuestionKey::Temp,
        QuestionKey::Flavor,
        QuestionKey::Strength,
        QuestionKey::Category,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionKey::Caffeine => "caffeine",
            QuestionKey::Temp => "temp",
            QuestionKey::Flavor => "flavor",
            QuestionKey::Strength => "strength",
            QuestionKey::Category => "category",
        }
    }
}

impl std::fmt::Display for QuestionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One answer per question, each possibly unset.
///
/// Blank answers are treated as unset, so a form that submits `""` for a
/// skipped question scores the same as one that omits the field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceSet {
    #[serde(default)]
    pub caffeine: Option<String>,
    #[serde(default)]
    pub temp: Option<String>,
    #[serde(default)]
    pub flavor: Option<String>,
    #[serde(default)]
    pub strength: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl PreferenceSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `value` for `key`, replacing any earlier answer.
    pub fn set(&mut self, key: QuestionKey, value: impl Into<String>) {
        *self.slot_mut(key) = Some(value.into());
    }

    /// Clears the answer for `key`.
    pub fn unset(&mut self, key: QuestionKey) {
        *self.slot_mut(key) = None;
    }

    /// The answer for `key`, or `None` when unset or blank.
    #[must_use]
    pub fn get(&self, key: QuestionKey) -> Option<&str> {
        let slot = match key {
            QuestionKey::Caffeine => &self.caffeine,
            QuestionKey::Temp => &self.temp,
            QuestionKey::Flavor => &self.flavor,
            QuestionKey::Strength => &self.strength,
            QuestionKey::Category => &self.category,
        };
        slot.as_deref().filter(|v| !v.trim().is_empty())
    }

    /// Resets every answer to unset.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        QuestionKey::ALL
            .iter()
            .filter(|key| self.get(**key).is_some())
            .count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.answered_count() == 0
    }

    fn slot_mut(&mut self, key: QuestionKey) -> &mut Option<String> {
        match key {
            QuestionKey::Caffeine => &mut self.caffeine,
            QuestionKey::Temp => &mut self.temp,
            QuestionKey::Flavor => &mut self.flavor,
            QuestionKey::Strength => &mut self.strength,
            QuestionKey::Category => &mut self.category,
        }
    }
}
