use std::sync::Arc;

use api::StudyBackend;
use study_core::model::{
    AnswerDraft, Question, QuestionId, QuestionKind, QuestionResult, Session, SessionId,
};
use study_core::stats::accuracy_rate;

use crate::error::ReviewError;
use crate::review::progress::ReviewProgress;

/// Where a review currently stands.
///
/// Phases advance in one direction only: a question is answered, its result
/// acknowledged, then the next question comes up. The sole backward edge is
/// a failed submission, which returns to [`ReviewPhase::AwaitingAnswer`]
/// with the draft intact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewPhase {
    /// A question is on screen and the user is composing an answer.
    AwaitingAnswer,
    /// A submission is in flight; no second submission may start.
    Submitting,
    /// The graded outcome of the current question is on display.
    ShowingResult,
    /// Every question has been answered and acknowledged. Terminal.
    Finished,
    /// The session arrived with zero questions. Terminal.
    Empty,
}

/// One answered question, in review order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewedQuestion {
    pub question_id: QuestionId,
    pub submitted_text: String,
    pub result: QuestionResult,
}

/// The state of one review: the session's questions, the cursor, the draft
/// for the question on screen, and the results collected so far.
///
/// All mutation goes through the methods here and on [`ReviewFlowService`];
/// there is no way to skip a question or revisit an answered one.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewFlow {
    session_id: SessionId,
    questions: Vec<Question>,
    current: usize,
    draft: Option<AnswerDraft>,
    results: Vec<ReviewedQuestion>,
    phase: ReviewPhase,
}

impl ReviewFlow {
    /// Build a flow from a fetched session. An empty session lands directly
    /// in [`ReviewPhase::Empty`].
    #[must_use]
    pub fn from_session(session: Session) -> Self {
        let phase = if session.is_empty() {
            ReviewPhase::Empty
        } else {
            ReviewPhase::AwaitingAnswer
        };
        Self {
            session_id: session.id(),
            questions: session.questions().to_vec(),
            current: 0,
            draft: None,
            results: Vec::new(),
            phase,
        }
    }

    #[must_use]
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    #[must_use]
    pub fn phase(&self) -> ReviewPhase {
        self.phase
    }

    /// The question on screen, `None` once the flow is terminal.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    #[must_use]
    pub fn draft(&self) -> Option<&AnswerDraft> {
        self.draft.as_ref()
    }

    /// Pick an option of the current multiple choice question. Ignored in
    /// any other phase or for any other question kind.
    pub fn select_option(&mut self, index: usize) {
        if self.accepts(|kind| matches!(kind, QuestionKind::MultipleChoice { .. })) {
            self.draft = Some(AnswerDraft::Choice(index));
        }
    }

    /// Replace the free-text draft of the current short answer question.
    pub fn set_text(&mut self, text: impl Into<String>) {
        if self.accepts(|kind| matches!(kind, QuestionKind::ShortAnswer)) {
            self.draft = Some(AnswerDraft::Text(text.into()));
        }
    }

    /// Pick true or false for the current true/false question.
    pub fn set_truth(&mut self, value: bool) {
        if self.accepts(|kind| matches!(kind, QuestionKind::TrueFalse)) {
            self.draft = Some(AnswerDraft::Truth(value));
        }
    }

    pub fn clear_draft(&mut self) {
        if self.phase == ReviewPhase::AwaitingAnswer {
            self.draft = None;
        }
    }

    /// Whether the draft can be submitted right now.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.phase == ReviewPhase::AwaitingAnswer
            && match (self.current_question(), &self.draft) {
                (Some(question), Some(draft)) => draft.is_ready_for(question.kind()),
                _ => false,
            }
    }

    /// Acknowledge the result on display and move on. From the last question
    /// this finishes the review; outside [`ReviewPhase::ShowingResult`] it
    /// does nothing.
    pub fn advance(&mut self) -> ReviewPhase {
        if self.phase == ReviewPhase::ShowingResult {
            self.draft = None;
            if self.current + 1 < self.questions.len() {
                self.current += 1;
                self.phase = ReviewPhase::AwaitingAnswer;
            } else {
                self.phase = ReviewPhase::Finished;
            }
        }
        self.phase
    }

    /// Progress through the session, `None` for an empty session.
    #[must_use]
    pub fn progress(&self) -> Option<ReviewProgress> {
        let total = self.questions.len();
        (total > 0).then(|| ReviewProgress {
            index: self.current.min(total - 1),
            total,
        })
    }

    #[must_use]
    pub fn results(&self) -> &[ReviewedQuestion] {
        &self.results
    }

    /// The result on display, `None` before the first submission.
    #[must_use]
    pub fn last_result(&self) -> Option<&QuestionResult> {
        self.results.last().map(|answered| &answered.result)
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.results
            .iter()
            .filter(|answered| answered.result.correct)
            .count()
    }

    /// Rounded percentage of correct answers so far.
    #[must_use]
    pub fn accuracy(&self) -> u32 {
        accuracy_rate(self.correct_count(), self.results.len())
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, ReviewPhase::Finished | ReviewPhase::Empty)
    }

    fn accepts(&self, wants: impl Fn(&QuestionKind) -> bool) -> bool {
        self.phase == ReviewPhase::AwaitingAnswer
            && self.current_question().is_some_and(|q| wants(q.kind()))
    }
}

/// Drives [`ReviewFlow`] against a backend: fetches the session to start
/// and submits drafts for grading.
#[derive(Clone)]
pub struct ReviewFlowService {
    backend: Arc<dyn StudyBackend>,
}

impl ReviewFlowService {
    #[must_use]
    pub fn new(backend: Arc<dyn StudyBackend>) -> Self {
        Self { backend }
    }

    /// Fetch the session and begin reviewing it.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError::Api` when the session cannot be fetched.
    pub async fn start(&self, session_id: SessionId) -> Result<ReviewFlow, ReviewError> {
        let session = self.backend.fetch_session(session_id).await?;
        Ok(ReviewFlow::from_session(session))
    }

    /// Submit the draft for the question on screen and record its result.
    ///
    /// While the request is in flight the flow sits in
    /// [`ReviewPhase::Submitting`]. On failure the flow returns to
    /// [`ReviewPhase::AwaitingAnswer`] with the draft untouched, so a retry
    /// needs no retyping.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError::NotAwaitingAnswer` outside the awaiting phase,
    /// `ReviewError::NotReady` when the draft is absent or not submittable,
    /// and `ReviewError::Api` when the backend rejects the submission.
    pub async fn submit_current<'a>(
        &self,
        flow: &'a mut ReviewFlow,
    ) -> Result<&'a ReviewedQuestion, ReviewError> {
        if flow.phase != ReviewPhase::AwaitingAnswer {
            return Err(ReviewError::NotAwaitingAnswer);
        }

        let (question_id, text) = {
            let question = flow.current_question().ok_or(ReviewError::NotAwaitingAnswer)?;
            let draft = flow.draft.as_ref().ok_or(ReviewError::NotReady)?;
            let text = draft
                .submission_text(question.kind())
                .ok_or(ReviewError::NotReady)?;
            (question.id(), text)
        };

        flow.phase = ReviewPhase::Submitting;
        match self
            .backend
            .submit_answer(flow.session_id, question_id, &text)
            .await
        {
            Ok(result) => {
                flow.results.push(ReviewedQuestion {
                    question_id,
                    submitted_text: text,
                    result,
                });
                flow.phase = ReviewPhase::ShowingResult;
                flow.results.last().ok_or(ReviewError::NotAwaitingAnswer)
            }
            Err(err) => {
                flow.phase = ReviewPhase::AwaitingAnswer;
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use api::{ApiError, InMemoryBackend, StatusCode};
    use study_core::model::{CourseId, SessionStatus, SessionSummary, UserContext};

    use super::*;

    fn three_question_session() -> (InMemoryBackend, SessionId) {
        let backend = InMemoryBackend::new();
        let session_id = SessionId::new(1);
        let questions = vec![
            Question::new(
                QuestionId::new(10),
                0,
                "2 + 2 = ?",
                QuestionKind::MultipleChoice {
                    options: vec!["3".into(), "4".into()],
                },
            ),
            Question::new(QuestionId::new(11), 1, "Capital of France?", QuestionKind::ShortAnswer),
            Question::new(QuestionId::new(12), 2, "Water is wet.", QuestionKind::TrueFalse),
        ];
        backend.put_session(Session::new(
            session_id,
            CourseId::new(1),
            SessionStatus::NotStarted,
            questions,
        ));
        backend.set_canonical_answer(session_id, QuestionId::new(10), "4");
        backend.set_canonical_answer(session_id, QuestionId::new(11), "Paris");
        backend.set_canonical_answer(session_id, QuestionId::new(12), "O");
        (backend, session_id)
    }

    fn service(backend: InMemoryBackend) -> ReviewFlowService {
        ReviewFlowService::new(Arc::new(backend))
    }

    /// Fails the next `failures` submissions, then delegates.
    struct FlakyBackend {
        inner: InMemoryBackend,
        failures_left: AtomicUsize,
    }

    #[async_trait]
    impl StudyBackend for FlakyBackend {
        async fn fetch_session(&self, session_id: SessionId) -> Result<Session, ApiError> {
            self.inner.fetch_session(session_id).await
        }

        async fn submit_answer(
            &self,
            session_id: SessionId,
            question_id: QuestionId,
            answer_text: &str,
        ) -> Result<QuestionResult, ApiError> {
            if self.failures_left.load(Ordering::SeqCst) > 0 {
                self.failures_left.fetch_sub(1, Ordering::SeqCst);
                return Err(ApiError::Status {
                    status: StatusCode::SERVICE_UNAVAILABLE,
                    message: "try again".into(),
                    body: None,
                });
            }
            self.inner
                .submit_answer(session_id, question_id, answer_text)
                .await
        }

        async fn fetch_history(
            &self,
            ctx: &UserContext,
            course_id: CourseId,
        ) -> Result<Vec<SessionSummary>, ApiError> {
            self.inner.fetch_history(ctx, course_id).await
        }
    }

    #[tokio::test]
    async fn empty_session_is_terminal_from_the_start() {
        let backend = InMemoryBackend::new();
        let session_id = SessionId::new(7);
        backend.put_session(Session::new(
            session_id,
            CourseId::new(1),
            SessionStatus::NotStarted,
            vec![],
        ));

        let flow = service(backend).start(session_id).await.unwrap();

        assert_eq!(flow.phase(), ReviewPhase::Empty);
        assert!(flow.is_finished());
        assert!(flow.current_question().is_none());
        assert_eq!(flow.progress(), None);
        assert!(!flow.can_submit());
    }

    #[tokio::test]
    async fn happy_path_walks_every_question() {
        let (backend, session_id) = three_question_session();
        let svc = service(backend);
        let mut flow = svc.start(session_id).await.unwrap();

        assert_eq!(flow.phase(), ReviewPhase::AwaitingAnswer);
        assert_eq!(flow.progress().unwrap().fraction(), 1.0 / 3.0);

        flow.select_option(1);
        assert!(flow.can_submit());
        let answered = svc.submit_current(&mut flow).await.unwrap();
        assert!(answered.result.correct);
        assert_eq!(flow.phase(), ReviewPhase::ShowingResult);
        assert_eq!(flow.advance(), ReviewPhase::AwaitingAnswer);

        flow.set_text("  Paris  ");
        svc.submit_current(&mut flow).await.unwrap();
        flow.advance();

        flow.set_truth(true);
        assert_eq!(flow.progress().unwrap().fraction(), 1.0);
        svc.submit_current(&mut flow).await.unwrap();
        assert_eq!(flow.advance(), ReviewPhase::Finished);

        assert!(flow.is_finished());
        assert!(flow.current_question().is_none());
        assert_eq!(flow.results().len(), 3);
        assert_eq!(flow.correct_count(), 3);
        assert_eq!(flow.accuracy(), 100);
    }

    #[tokio::test]
    async fn wrong_answer_carries_the_canonical_text() {
        let (backend, session_id) = three_question_session();
        let svc = service(backend);
        let mut flow = svc.start(session_id).await.unwrap();

        flow.select_option(0);
        let answered = svc.submit_current(&mut flow).await.unwrap();

        assert!(!answered.result.correct);
        assert_eq!(answered.result.correct_answer.as_deref(), Some("4"));
        assert_eq!(flow.accuracy(), 0);
    }

    #[tokio::test]
    async fn submit_without_a_ready_draft_is_rejected() {
        let (backend, session_id) = three_question_session();
        let svc = service(backend);
        let mut flow = svc.start(session_id).await.unwrap();

        let err = svc.submit_current(&mut flow).await.unwrap_err();
        assert!(matches!(err, ReviewError::NotReady));
        assert_eq!(flow.phase(), ReviewPhase::AwaitingAnswer);

        // Out-of-range option index is not submittable either.
        flow.select_option(9);
        assert!(!flow.can_submit());
        let err = svc.submit_current(&mut flow).await.unwrap_err();
        assert!(matches!(err, ReviewError::NotReady));
        assert!(flow.results().is_empty());
    }

    #[tokio::test]
    async fn submit_outside_awaiting_answer_is_rejected() {
        let (backend, session_id) = three_question_session();
        let svc = service(backend);
        let mut flow = svc.start(session_id).await.unwrap();

        flow.select_option(1);
        svc.submit_current(&mut flow).await.unwrap();

        let err = svc.submit_current(&mut flow).await.unwrap_err();
        assert!(matches!(err, ReviewError::NotAwaitingAnswer));
        assert_eq!(flow.results().len(), 1);
    }

    #[tokio::test]
    async fn failed_submission_keeps_the_draft_for_retry() {
        let (inner, session_id) = three_question_session();
        let backend = FlakyBackend {
            inner,
            failures_left: AtomicUsize::new(1),
        };
        let svc = ReviewFlowService::new(Arc::new(backend));
        let mut flow = svc.start(session_id).await.unwrap();

        flow.select_option(1);
        let err = svc.submit_current(&mut flow).await.unwrap_err();
        assert!(matches!(err, ReviewError::Api(_)));

        // Back where we were, draft intact.
        assert_eq!(flow.phase(), ReviewPhase::AwaitingAnswer);
        assert_eq!(flow.draft(), Some(&AnswerDraft::Choice(1)));
        assert!(flow.results().is_empty());

        let answered = svc.submit_current(&mut flow).await.unwrap();
        assert!(answered.result.correct);
        assert_eq!(flow.phase(), ReviewPhase::ShowingResult);
    }

    #[tokio::test]
    async fn setters_ignore_mismatched_kinds() {
        let (backend, session_id) = three_question_session();
        let svc = service(backend);
        let mut flow = svc.start(session_id).await.unwrap();

        // First question is multiple choice; text and truth do not apply.
        flow.set_text("4");
        flow.set_truth(true);
        assert_eq!(flow.draft(), None);

        flow.select_option(1);
        svc.submit_current(&mut flow).await.unwrap();
        flow.advance();

        // Second question is short answer.
        flow.select_option(0);
        assert_eq!(flow.draft(), None);
        flow.set_text("Paris");
        assert!(flow.can_submit());
    }

    #[tokio::test]
    async fn advance_outside_showing_result_is_a_no_op() {
        let (backend, session_id) = three_question_session();
        let svc = service(backend);
        let mut flow = svc.start(session_id).await.unwrap();

        flow.select_option(1);
        assert_eq!(flow.advance(), ReviewPhase::AwaitingAnswer);
        assert_eq!(flow.draft(), Some(&AnswerDraft::Choice(1)));
        assert_eq!(flow.progress().unwrap().index, 0);
    }

    #[tokio::test]
    async fn start_failure_surfaces_the_api_error() {
        let svc = service(InMemoryBackend::new());
        let err = svc.start(SessionId::new(99)).await.unwrap_err();
        match err {
            ReviewError::Api(api_err) => assert_eq!(api_err.status_u16(), 404),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn clear_draft_resets_only_while_awaiting() {
        let (backend, session_id) = three_question_session();
        let svc = service(backend);
        let mut flow = svc.start(session_id).await.unwrap();

        flow.select_option(1);
        flow.clear_draft();
        assert_eq!(flow.draft(), None);
        assert!(!flow.can_submit());
    }
}
