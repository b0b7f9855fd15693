use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{CourseId, Question, SessionId};

/// Lifecycle status of a review session. Owned by the backend; the client
/// only reads it and updates it indirectly through submissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl SessionStatus {
    #[must_use]
    pub fn is_completed(self) -> bool {
        matches!(self, SessionStatus::Completed)
    }
}

/// One review attempt against a course, with its ordered questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    id: SessionId,
    course_id: CourseId,
    status: SessionStatus,
    questions: Vec<Question>,
}

impl Session {
    /// Build a session. Questions are sorted by their order index so the
    /// review order is stable regardless of wire ordering.
    #[must_use]
    pub fn new(
        id: SessionId,
        course_id: CourseId,
        status: SessionStatus,
        mut questions: Vec<Question>,
    ) -> Self {
        questions.sort_by_key(Question::order);
        Self {
            id,
            course_id,
            status,
            questions,
        }
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn course_id(&self) -> CourseId {
        self.course_id
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Summary of one historical session, as returned by the session list
/// endpoint. Input to the study statistics in [`crate::stats`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: SessionId,
    pub status: SessionStatus,
    pub score: Option<u32>,
    pub created_at: DateTime<Utc>,
}

impl SessionSummary {
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status.is_completed()
    }
}
