//! Wire DTOs and their conversion into domain types.
//!
//! The backend tags questions with a string type field; mapping is the one
//! place that string is interpreted, and anything unrecognized is a
//! [`ApiError::Contract`] instead of a silent default.

use serde::Deserialize;

use study_core::model::{
    CourseId, Question, QuestionId, QuestionKind, QuestionResult, Session, SessionId,
    SessionStatus,
};

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub(crate) struct SessionDetailDto {
    pub session_id: u64,
    pub course_id: u64,
    pub status: SessionStatus,
    pub questions: Vec<SessionQuestionDto>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SessionQuestionDto {
    pub id: u64,
    pub item_order: u32,
    #[serde(rename = "type")]
    pub kind: String,
    pub question_text: String,
    #[serde(default)]
    pub options: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct QuestionResultDto {
    pub correct: bool,
    #[serde(rename = "realAnswer")]
    pub real_answer: Option<String>,
}

impl SessionDetailDto {
    pub(crate) fn into_session(self) -> Result<Session, ApiError> {
        let questions = self
            .questions
            .into_iter()
            .map(SessionQuestionDto::into_question)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Session::new(
            SessionId::new(self.session_id),
            CourseId::new(self.course_id),
            self.status,
            questions,
        ))
    }
}

impl SessionQuestionDto {
    pub(crate) fn into_question(self) -> Result<Question, ApiError> {
        let kind = match self.kind.as_str() {
            "multiple_choice" => {
                let options = self
                    .options
                    .filter(|options| !options.is_empty())
                    .ok_or_else(|| {
                        ApiError::Contract(format!(
                            "multiple choice question {} has no options",
                            self.id
                        ))
                    })?;
                QuestionKind::MultipleChoice { options }
            }
            "short_answer" => QuestionKind::ShortAnswer,
            "true_false" => QuestionKind::TrueFalse,
            other => {
                return Err(ApiError::Contract(format!(
                    "unrecognized question type `{other}` on question {}",
                    self.id
                )));
            }
        };

        Ok(Question::new(
            QuestionId::new(self.id),
            self.item_order,
            self.question_text,
            kind,
        ))
    }
}

impl QuestionResultDto {
    pub(crate) fn into_result(self) -> QuestionResult {
        QuestionResult {
            correct: self.correct,
            correct_answer: self.real_answer,
        }
    }
}
