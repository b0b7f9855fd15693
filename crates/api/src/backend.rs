use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::StatusCode;

use study_core::model::{
    CourseId, QuestionId, QuestionResult, Session, SessionId, SessionSummary, UserContext, UserId,
};

use crate::error::ApiError;
use crate::sessions::SessionsApi;

/// The backend operations the review and statistics services depend on.
///
/// Implemented by [`SessionsApi`] against the real backend and by
/// [`InMemoryBackend`] for tests and offline prototyping.
#[async_trait]
pub trait StudyBackend: Send + Sync {
    /// Fetch a session with its ordered questions.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on any transport or HTTP failure.
    async fn fetch_session(&self, session_id: SessionId) -> Result<Session, ApiError>;

    /// Submit one answer for grading.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on any transport or HTTP failure.
    async fn submit_answer(
        &self,
        session_id: SessionId,
        question_id: QuestionId,
        answer_text: &str,
    ) -> Result<QuestionResult, ApiError>;

    /// List session summaries for one course of one user.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on any transport or HTTP failure.
    async fn fetch_history(
        &self,
        ctx: &UserContext,
        course_id: CourseId,
    ) -> Result<Vec<SessionSummary>, ApiError>;
}

#[async_trait]
impl StudyBackend for SessionsApi {
    async fn fetch_session(&self, session_id: SessionId) -> Result<Session, ApiError> {
        self.session(session_id).await
    }

    async fn submit_answer(
        &self,
        session_id: SessionId,
        question_id: QuestionId,
        answer_text: &str,
    ) -> Result<QuestionResult, ApiError> {
        self.submit_answer(session_id, question_id, answer_text)
            .await
    }

    async fn fetch_history(
        &self,
        ctx: &UserContext,
        course_id: CourseId,
    ) -> Result<Vec<SessionSummary>, ApiError> {
        self.history(ctx, course_id).await
    }
}

/// In-memory backend that grades by comparing against stored canonical
/// answers. Useful for tests and prototyping without a server.
#[derive(Clone, Default)]
pub struct InMemoryBackend {
    sessions: Arc<Mutex<HashMap<SessionId, Session>>>,
    answers: Arc<Mutex<HashMap<(SessionId, QuestionId), String>>>,
    history: Arc<Mutex<HashMap<(UserId, CourseId), Vec<SessionSummary>>>>,
}

impl InMemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a session to be served by `fetch_session`.
    pub fn put_session(&self, session: Session) {
        if let Ok(mut guard) = self.sessions.lock() {
            guard.insert(session.id(), session);
        }
    }

    /// Set the canonical answer used to grade a question.
    pub fn set_canonical_answer(
        &self,
        session_id: SessionId,
        question_id: QuestionId,
        answer: impl Into<String>,
    ) {
        if let Ok(mut guard) = self.answers.lock() {
            guard.insert((session_id, question_id), answer.into());
        }
    }

    /// Append a summary to one user/course history.
    pub fn push_history(&self, user_id: UserId, course_id: CourseId, summary: SessionSummary) {
        if let Ok(mut guard) = self.history.lock() {
            guard.entry((user_id, course_id)).or_default().push(summary);
        }
    }

    fn not_found(what: &str) -> ApiError {
        ApiError::Status {
            status: StatusCode::NOT_FOUND,
            message: format!("{what} not found"),
            body: None,
        }
    }

    fn poisoned() -> ApiError {
        ApiError::Contract("in-memory backend state poisoned".into())
    }
}

#[async_trait]
impl StudyBackend for InMemoryBackend {
    async fn fetch_session(&self, session_id: SessionId) -> Result<Session, ApiError> {
        let guard = self.sessions.lock().map_err(|_| Self::poisoned())?;
        guard
            .get(&session_id)
            .cloned()
            .ok_or_else(|| Self::not_found("session"))
    }

    async fn submit_answer(
        &self,
        session_id: SessionId,
        question_id: QuestionId,
        answer_text: &str,
    ) -> Result<QuestionResult, ApiError> {
        let guard = self.answers.lock().map_err(|_| Self::poisoned())?;
        let canonical = guard
            .get(&(session_id, question_id))
            .ok_or_else(|| Self::not_found("question"))?;

        let correct = canonical == answer_text;
        Ok(QuestionResult {
            correct,
            correct_answer: (!correct).then(|| canonical.clone()),
        })
    }

    async fn fetch_history(
        &self,
        ctx: &UserContext,
        course_id: CourseId,
    ) -> Result<Vec<SessionSummary>, ApiError> {
        let guard = self.history.lock().map_err(|_| Self::poisoned())?;
        Ok(guard
            .get(&(ctx.user_id, course_id))
            .cloned()
            .unwrap_or_default())
    }
}
