mod answer;
mod context;
mod ids;
mod question;
mod session;

pub use answer::{Answer, AnswerDraft, QuestionResult, FALSE_TOKEN, TRUE_TOKEN};
pub use context::UserContext;
pub use ids::{CourseId, DocumentId, ParseIdError, QuestionId, SessionId, UserId};
pub use question::{Question, QuestionKind};
pub use session::{Session, SessionStatus, SessionSummary};
