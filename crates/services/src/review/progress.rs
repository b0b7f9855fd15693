use study_core::stats::progress_fraction;

/// Position within a review, for progress displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewProgress {
    /// Zero-based index of the question on screen.
    pub index: usize,
    /// Total questions in the session.
    pub total: usize,
}

impl ReviewProgress {
    /// Fraction of the session reached, counting the question on screen.
    ///
    /// Strictly increasing across the questions of one session, and exactly
    /// `1.0` on the last question.
    #[must_use]
    pub fn fraction(&self) -> f64 {
        progress_fraction(self.index + 1, self.total)
    }
}
