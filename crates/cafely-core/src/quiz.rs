//! Quiz definition and per-user quiz state.

use serde::Serialize;
use thiserror::Error;

use crate::preferences::{PreferenceSet, QuestionKey};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub key: QuestionKey,
    pub title: &'static str,
    pub options: &'static [&'static str],
}

/// The quiz, in the order questions are asked.
pub static QUESTIONS: [Question; 5] = [
    Question {
        key: QuestionKey::Caffeine,
        title: "How much caffeine do you want?",
        options: &["High", "Medium", "Low", "None"],
    },
    Question {
        key: QuestionKey::Temp,
        title: "What temperature do you prefer?",
        options: &["Hot", "Cold", "Either"],
    },
    Question {
        key: QuestionKey::Flavor,
        title: "What flavor profile appeals to you?",
        options: &[
            "Bitter",
            "Sweet",
            "Creamy",
            "Fruity",
            "Nutty",
            "Chocolatey",
            "Spicy",
            "Earthy",
        ],
    },
    Question {
        key: QuestionKey::Strength,
        title: "How strong do you like your drink?",
        options: &["Light", "Medium", "Strong"],
    },
    Question {
        key: QuestionKey::Category,
        title: "What type of drink?",
        options: &["Coffee", "Non-coffee"],
    },
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    #[error("\"{value}\" is not an option for {key}; expected one of: {options}")]
    InvalidAnswer {
        key: QuestionKey,
        value: String,
        options: String,
    },

    #[error("the quiz is already complete")]
    AlreadyComplete,
}

/// State of one quiz run: which question is current and the answers so far.
///
/// Created at quiz start and reset on restart; answers accumulate in
/// question order.
#[derive(Debug, Clone, Default)]
pub struct QuizSession {
    step: usize,
    preferences: PreferenceSet,
}

impl QuizSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The question awaiting an answer, or `None` once all are answered.
    #[must_use]
    pub fn current_question(&self) -> Option<&'static Question> {
        QUESTIONS.get(self.step)
    }

    /// Answers the current question and advances.
    ///
    /// The value is matched case-insensitively against the question's options
    /// and stored in its canonical spelling. Returns the next question, or
    /// `None` when the quiz is complete.
    ///
    /// # Errors
    ///
    /// - [`QuizError::InvalidAnswer`] if `value` is not one of the options.
    /// - [`QuizError::AlreadyComplete`] if every question is already answered.
    pub fn answer(&mut self, value: &str) -> Result<Option<&'static Question>, QuizError> {
        let question = self.current_question().ok_or(QuizError::AlreadyComplete)?;

        let wanted = value.trim();
        let option = question
            .options
            .iter()
            .find(|opt| opt.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| QuizError::InvalidAnswer {
                key: question.key,
                value: value.to_string(),
                options: question.options.join(", "),
            })?;

        self.preferences.set(question.key, *option);
        self.step += 1;
        Ok(self.current_question())
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.step >= QUESTIONS.len()
    }

    /// Progress label, e.g. `"Question 2 of 5"`.
    #[must_use]
    pub fn progress_label(&self) -> String {
        let total = QUESTIONS.len();
        format!("Question {} of {total}", (self.step + 1).min(total))
    }

    #[must_use]
    pub fn preferences(&self) -> &PreferenceSet {
        &self.preferences
    }

    /// Back to the first question with every answer unset.
    pub fn reset(&mut self) {
        self.step = 0;
        self.preferences.clear();
    }
}
