use api::ApiError;
use storage::StoreError;
use thiserror::Error;

/// Errors from driving a review flow.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReviewError {
    /// An action that needs a question on screen arrived in another phase.
    #[error("review is not awaiting an answer")]
    NotAwaitingAnswer,

    /// The draft is missing or not submittable for the current question.
    #[error("no submittable answer for the current question")]
    NotReady,

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors from loading study history.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StudyRecordsError {
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors from the persisted profile.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProfileError {
    #[error(transparent)]
    Store(#[from] StoreError),
}
