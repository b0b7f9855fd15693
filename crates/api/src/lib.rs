#![forbid(unsafe_code)]

//! HTTP access to the study backend.
//!
//! Wire DTOs stay private to this crate; accessors hand out domain types
//! from `study-core`. The services layer consumes the [`StudyBackend`]
//! trait rather than the concrete accessors.

pub mod auth;
pub mod backend;
pub mod cache;
pub mod client;
pub mod courses;
pub mod documents;
pub mod error;
pub mod sessions;

mod mapping;

pub use reqwest::StatusCode;

pub use backend::{InMemoryBackend, StudyBackend};
pub use cache::TtlCache;
pub use client::{ApiClient, ApiConfig};
pub use error::ApiError;
pub use sessions::{GradedAnswer, SessionGrade, SessionsApi};
