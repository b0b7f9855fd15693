#![forbid(unsafe_code)]

//! Application services over the API and storage layers.
//!
//! The review flow lives here: a small state machine that walks a session's
//! questions, submits answers through a [`api::StudyBackend`], and exposes
//! the graded outcomes. Study statistics and the persisted profile sit
//! alongside it.

pub mod error;
pub mod profile;
pub mod review;
pub mod study_records;

pub use study_core::Clock;

pub use error::{ProfileError, ReviewError, StudyRecordsError};
pub use profile::ProfileService;
pub use review::{ReviewFlow, ReviewFlowService, ReviewPhase, ReviewProgress, ReviewedQuestion};
pub use study_records::StudyRecordsService;
