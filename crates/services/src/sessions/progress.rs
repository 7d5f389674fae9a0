/// Aggregated view of session progress, useful for a progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: u32,
    pub completed: u32,
    pub remaining: u32,
    pub is_complete: bool,
}

impl SessionProgress {
    /// Completed share in `[0, 1]`.
    #[must_use]
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        f64::from(self.completed) / f64::from(self.total)
    }
}
