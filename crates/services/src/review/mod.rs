//! The review flow: one session walked question by question.

mod flow;
mod progress;

pub use flow::{ReviewFlow, ReviewFlowService, ReviewPhase, ReviewedQuestion};
pub use progress::ReviewProgress;
