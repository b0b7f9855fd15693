use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use study_core::model::{CourseId, UserContext, UserId};

use crate::client::ApiClient;
use crate::error::ApiError;

/// A course as owned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub title: String,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize)]
struct CreateCourseRequest<'a> {
    user_id: UserId,
    title: &'a str,
}

/// Typed accessors for the course resource (external collaborator).
#[derive(Clone)]
pub struct CoursesApi {
    client: ApiClient,
}

impl CoursesApi {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// List the user's courses.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on any transport or HTTP failure.
    pub async fn list(&self, ctx: &UserContext) -> Result<Vec<Course>, ApiError> {
        self.client
            .get(&format!("/courses?user_id={}", ctx.user_id))
            .await
    }

    /// Create a course for the user.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on any transport or HTTP failure.
    pub async fn create(&self, ctx: &UserContext, title: &str) -> Result<Course, ApiError> {
        self.client
            .post(
                "/courses",
                &CreateCourseRequest {
                    user_id: ctx.user_id,
                    title,
                },
            )
            .await
    }
}
