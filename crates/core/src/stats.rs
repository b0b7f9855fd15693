//! Pure aggregation over session history.
//!
//! Every function here is stateless and total on valid input: empty input
//! yields empty or zero output, never an error.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::SessionSummary;

/// Completed-session count for one calendar date. Derived, read-only;
/// recomputed from the full history on every load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyRecord {
    pub date: NaiveDate,
    pub sessions_completed: u32,
}

/// Today's completed/total session counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodayProgress {
    pub completed: u32,
    pub total: u32,
}

impl TodayProgress {
    /// Fraction of today's sessions completed, `0.0` when none exist.
    #[must_use]
    pub fn fraction(&self) -> f64 {
        progress_fraction(self.completed as usize, self.total as usize)
    }
}

/// Ordinal bucket summarizing session-count intensity for display.
///
/// The thresholds (3 and 5) are fixed product constants shared by every
/// surface that renders activity, so weekly and monthly views always agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum ActivityLevel {
    None = 0,
    Light = 1,
    Moderate = 2,
    Intense = 3,
}

impl ActivityLevel {
    const MODERATE_THRESHOLD: u32 = 3;
    const INTENSE_THRESHOLD: u32 = 5;

    /// Bucket a completed-session count into an activity level.
    #[must_use]
    pub fn for_count(sessions_completed: u32) -> Self {
        if sessions_completed == 0 {
            ActivityLevel::None
        } else if sessions_completed < Self::MODERATE_THRESHOLD {
            ActivityLevel::Light
        } else if sessions_completed < Self::INTENSE_THRESHOLD {
            ActivityLevel::Moderate
        } else {
            ActivityLevel::Intense
        }
    }
}

/// Group completed sessions by the UTC calendar date of their creation.
///
/// Dates with zero completed sessions are absent from the output; callers
/// needing a continuous range must zero-fill themselves. The output is
/// sorted ascending by date, so the result is independent of input order.
#[must_use]
pub fn daily_histogram(sessions: &[SessionSummary]) -> Vec<StudyRecord> {
    let mut by_date: BTreeMap<NaiveDate, u32> = BTreeMap::new();
    for session in sessions {
        if session.is_completed() {
            *by_date.entry(session.created_at.date_naive()).or_insert(0) += 1;
        }
    }

    by_date
        .into_iter()
        .map(|(date, sessions_completed)| StudyRecord {
            date,
            sessions_completed,
        })
        .collect()
}

/// Completed/total counts for sessions created on `today`.
#[must_use]
pub fn today_progress(sessions: &[SessionSummary], today: NaiveDate) -> TodayProgress {
    let mut progress = TodayProgress::default();
    for session in sessions {
        if session.created_at.date_naive() == today {
            progress.total += 1;
            if session.is_completed() {
                progress.completed += 1;
            }
        }
    }
    progress
}

/// `completed / total` as a fraction, `0.0` when `total` is zero.
#[must_use]
pub fn progress_fraction(completed: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        completed as f64 / total as f64
    }
}

/// Rounded percentage of correct answers, `0` when nothing was answered.
#[must_use]
pub fn accuracy_rate(correct: usize, total: usize) -> u32 {
    if total == 0 {
        0
    } else {
        (progress_fraction(correct, total) * 100.0).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SessionId, SessionStatus};
    use chrono::{DateTime, Utc};

    fn summary(id: u64, status: SessionStatus, created_at: &str) -> SessionSummary {
        SessionSummary {
            id: SessionId::new(id),
            status,
            score: None,
            created_at: created_at.parse::<DateTime<Utc>>().unwrap(),
        }
    }

    #[test]
    fn histogram_merges_same_day_and_skips_incomplete() {
        let sessions = vec![
            summary(1, SessionStatus::Completed, "2025-11-10T09:00:00Z"),
            summary(2, SessionStatus::Completed, "2025-11-10T23:00:00Z"),
            summary(3, SessionStatus::InProgress, "2025-11-11T08:00:00Z"),
        ];

        let records = daily_histogram(&sessions);

        assert_eq!(
            records,
            vec![StudyRecord {
                date: "2025-11-10".parse().unwrap(),
                sessions_completed: 2,
            }]
        );
    }

    #[test]
    fn histogram_is_idempotent_and_order_independent() {
        let mut sessions = vec![
            summary(1, SessionStatus::Completed, "2025-11-10T09:00:00Z"),
            summary(2, SessionStatus::Completed, "2025-11-12T10:00:00Z"),
            summary(3, SessionStatus::Completed, "2025-11-10T23:00:00Z"),
        ];

        let first = daily_histogram(&sessions);
        let second = daily_histogram(&sessions);
        assert_eq!(first, second);

        sessions.reverse();
        assert_eq!(daily_histogram(&sessions), first);
    }

    #[test]
    fn histogram_of_nothing_is_empty() {
        assert!(daily_histogram(&[]).is_empty());
    }

    #[test]
    fn today_progress_counts_only_todays_sessions() {
        let today: NaiveDate = "2025-11-13".parse().unwrap();
        let sessions = vec![
            summary(1, SessionStatus::Completed, "2025-11-13T02:00:00Z"),
            summary(2, SessionStatus::InProgress, "2025-11-13T08:00:00Z"),
            summary(3, SessionStatus::Completed, "2025-11-12T08:00:00Z"),
        ];

        let progress = today_progress(&sessions, today);
        assert_eq!(progress, TodayProgress { completed: 1, total: 2 });
    }

    #[test]
    fn today_progress_on_empty_history_is_zero() {
        let today: NaiveDate = "2025-11-13".parse().unwrap();
        assert_eq!(today_progress(&[], today), TodayProgress::default());
    }

    #[test]
    fn activity_level_buckets_at_fixed_thresholds() {
        assert_eq!(ActivityLevel::for_count(0), ActivityLevel::None);
        assert_eq!(ActivityLevel::for_count(1), ActivityLevel::Light);
        assert_eq!(ActivityLevel::for_count(2), ActivityLevel::Light);
        assert_eq!(ActivityLevel::for_count(3), ActivityLevel::Moderate);
        assert_eq!(ActivityLevel::for_count(4), ActivityLevel::Moderate);
        assert_eq!(ActivityLevel::for_count(5), ActivityLevel::Intense);
        assert_eq!(ActivityLevel::for_count(100), ActivityLevel::Intense);
    }

    #[test]
    fn progress_fraction_handles_zero_total() {
        assert_eq!(progress_fraction(0, 0), 0.0);
        assert_eq!(progress_fraction(1, 4), 0.25);
    }

    #[test]
    fn accuracy_rate_rounds_to_percent() {
        assert_eq!(accuracy_rate(0, 0), 0);
        assert_eq!(accuracy_rate(2, 3), 67);
        assert_eq!(accuracy_rate(3, 3), 100);
    }
}
