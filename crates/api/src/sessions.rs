use serde::{Deserialize, Serialize};

use study_core::model::{
    Answer, CourseId, QuestionId, QuestionResult, Session, SessionId, SessionSummary, UserContext,
};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::mapping::{QuestionResultDto, SessionDetailDto};

/// Backend-graded outcome of a whole-session batch submission.
///
/// The live review flow grades per question and never uses this; it exists
/// because the backend contract supports the batch form as well.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SessionGrade {
    pub session_id: SessionId,
    pub score: u32,
    pub completed: bool,
    pub results: Vec<GradedAnswer>,
}

/// One graded answer inside a [`SessionGrade`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GradedAnswer {
    pub question_id: QuestionId,
    pub correct: bool,
    #[serde(default)]
    pub real_answer: Option<String>,
}

#[derive(Serialize)]
struct SubmitAnswerRequest<'a> {
    #[serde(rename = "userAnswer")]
    user_answer: &'a str,
}

#[derive(Serialize)]
struct SubmitSessionRequest {
    answers: Vec<SubmitSessionAnswer>,
}

#[derive(Serialize)]
struct SubmitSessionAnswer {
    session_question_id: QuestionId,
    user_answer: String,
}

/// Typed accessors for the session resource.
#[derive(Clone)]
pub struct SessionsApi {
    client: ApiClient,
}

impl SessionsApi {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Fetch a session with its ordered questions.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on any transport/HTTP failure or when the payload
    /// violates the question contract. The caller decides whether to retry.
    pub async fn session(&self, session_id: SessionId) -> Result<Session, ApiError> {
        let dto: SessionDetailDto = self
            .client
            .get(&format!("/api/sessions/{session_id}"))
            .await?;
        dto.into_session()
    }

    /// Submit one answer for grading. One call per question; no client-side
    /// retry — a failed submission leaves the answer uncommitted.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on any transport or HTTP failure.
    pub async fn submit_answer(
        &self,
        session_id: SessionId,
        question_id: QuestionId,
        answer_text: &str,
    ) -> Result<QuestionResult, ApiError> {
        let dto: QuestionResultDto = self
            .client
            .post(
                &format!("/api/sessions/{session_id}/questions/{question_id}/submit"),
                &SubmitAnswerRequest {
                    user_answer: answer_text,
                },
            )
            .await?;
        Ok(dto.into_result())
    }

    /// Submit every answer of a session in one batch.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on any transport or HTTP failure.
    pub async fn submit_session(
        &self,
        session_id: SessionId,
        answers: &[Answer],
    ) -> Result<SessionGrade, ApiError> {
        let request = SubmitSessionRequest {
            answers: answers
                .iter()
                .map(|answer| SubmitSessionAnswer {
                    session_question_id: answer.question_id,
                    user_answer: answer.text.clone(),
                })
                .collect(),
        };
        self.client
            .post(&format!("/api/sessions/{session_id}/submit"), &request)
            .await
    }

    /// List session summaries for one course of one user. Used by the study
    /// statistics, not by the live review flow.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on any transport or HTTP failure.
    pub async fn history(
        &self,
        ctx: &UserContext,
        course_id: CourseId,
    ) -> Result<Vec<SessionSummary>, ApiError> {
        self.client
            .get(&format!(
                "/api/sessions?user_id={}&course_id={course_id}",
                ctx.user_id
            ))
            .await
    }
}
