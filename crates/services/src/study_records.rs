use std::sync::Arc;

use futures::future::try_join_all;

use api::StudyBackend;
use study_core::Clock;
use study_core::model::{CourseId, SessionSummary, UserContext};
use study_core::stats::{self, StudyRecord, TodayProgress};

use crate::error::StudyRecordsError;

/// Study statistics assembled from per-course session history.
///
/// History is fetched for every course concurrently and merged before
/// aggregation. One failing course fails the whole load; there are no
/// partial results.
#[derive(Clone)]
pub struct StudyRecordsService {
    clock: Clock,
    backend: Arc<dyn StudyBackend>,
}

impl StudyRecordsService {
    #[must_use]
    pub fn new(clock: Clock, backend: Arc<dyn StudyBackend>) -> Self {
        Self { clock, backend }
    }

    /// Daily completed-session histogram across the given courses.
    ///
    /// # Errors
    ///
    /// Returns `StudyRecordsError` when any course history cannot be
    /// fetched.
    pub async fn study_records(
        &self,
        ctx: &UserContext,
        course_ids: &[CourseId],
    ) -> Result<Vec<StudyRecord>, StudyRecordsError> {
        let history = self.all_history(ctx, course_ids).await?;
        Ok(stats::daily_histogram(&history))
    }

    /// Completed/total counts for sessions created today, by this service's
    /// clock.
    ///
    /// # Errors
    ///
    /// Returns `StudyRecordsError` when any course history cannot be
    /// fetched.
    pub async fn today_progress(
        &self,
        ctx: &UserContext,
        course_ids: &[CourseId],
    ) -> Result<TodayProgress, StudyRecordsError> {
        let history = self.all_history(ctx, course_ids).await?;
        Ok(stats::today_progress(&history, self.clock.today()))
    }

    async fn all_history(
        &self,
        ctx: &UserContext,
        course_ids: &[CourseId],
    ) -> Result<Vec<SessionSummary>, StudyRecordsError> {
        if course_ids.is_empty() {
            return Ok(Vec::new());
        }
        let fetches = course_ids
            .iter()
            .map(|course_id| self.backend.fetch_history(ctx, *course_id));
        let per_course = try_join_all(fetches).await?;
        Ok(per_course.into_iter().flatten().collect())
    }
}
