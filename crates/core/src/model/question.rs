use serde::{Deserialize, Serialize};

use crate::model::QuestionId;

/// The kind of a quiz question, as generated by the backend.
///
/// Option strings exist only for multiple choice; the other kinds carry no
/// payload. Matching on this enum is exhaustive everywhere so an unrecognized
/// wire type can never silently fall through to a default rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionKind {
    MultipleChoice { options: Vec<String> },
    ShortAnswer,
    TrueFalse,
}

impl QuestionKind {
    /// Ordered option strings, present only for multiple choice.
    #[must_use]
    pub fn options(&self) -> Option<&[String]> {
        match self {
            QuestionKind::MultipleChoice { options } => Some(options),
            QuestionKind::ShortAnswer | QuestionKind::TrueFalse => None,
        }
    }
}

/// One quiz item belonging to a session. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    id: QuestionId,
    order: u32,
    prompt: String,
    #[serde(flatten)]
    kind: QuestionKind,
}

impl Question {
    #[must_use]
    pub fn new(id: QuestionId, order: u32, prompt: impl Into<String>, kind: QuestionKind) -> Self {
        Self {
            id,
            order,
            prompt: prompt.into(),
            kind,
        }
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    /// Position of this question within its session's review order.
    #[must_use]
    pub fn order(&self) -> u32 {
        self.order
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn kind(&self) -> &QuestionKind {
        &self.kind
    }
}
