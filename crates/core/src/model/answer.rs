use serde::{Deserialize, Serialize};

use crate::model::{QuestionId, QuestionKind};

/// Literal token submitted for a true answer on a true/false question.
pub const TRUE_TOKEN: &str = "O";
/// Literal token submitted for a false answer on a true/false question.
pub const FALSE_TOKEN: &str = "X";

/// The answer a user is composing for the current question, before it has
/// been submitted. One draft exists per question at a time; it is cleared
/// when the review advances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerDraft {
    /// Selected option index for a multiple choice question.
    Choice(usize),
    /// Free text for a short answer question.
    Text(String),
    /// O/X selection for a true/false question.
    Truth(bool),
}

impl AnswerDraft {
    /// Whether this draft can be submitted for a question of the given kind.
    ///
    /// The rule is the same across kinds: a non-empty answer matching the
    /// question's type. Mismatched pairings are never ready.
    #[must_use]
    pub fn is_ready_for(&self, kind: &QuestionKind) -> bool {
        self.submission_text(kind).is_some()
    }

    /// The literal text submitted to the backend: the selected option string
    /// for multiple choice, [`TRUE_TOKEN`]/[`FALSE_TOKEN`] for true/false,
    /// trimmed free text for short answer.
    ///
    /// Returns `None` exactly when the draft is not ready for `kind`,
    /// including an out-of-range option index and whitespace-only text.
    #[must_use]
    pub fn submission_text(&self, kind: &QuestionKind) -> Option<String> {
        match (kind, self) {
            (QuestionKind::MultipleChoice { options }, AnswerDraft::Choice(index)) => {
                options.get(*index).cloned()
            }
            (QuestionKind::ShortAnswer, AnswerDraft::Text(text)) => {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_owned())
            }
            (QuestionKind::TrueFalse, AnswerDraft::Truth(value)) => {
                Some(if *value { TRUE_TOKEN } else { FALSE_TOKEN }.to_owned())
            }
            _ => None,
        }
    }
}

/// A committed (question, submitted text) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: QuestionId,
    pub text: String,
}

impl Answer {
    #[must_use]
    pub fn new(question_id: QuestionId, text: impl Into<String>) -> Self {
        Self {
            question_id,
            text: text.into(),
        }
    }
}

/// Backend-graded outcome for one submitted answer. Never constructed from
/// client-side grading; `correct_answer` carries the canonical answer text
/// when the submission was wrong.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionResult {
    pub correct: bool,
    pub correct_answer: Option<String>,
}
