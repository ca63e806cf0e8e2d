use serde::Serialize;

/// Aggregated view of session progress, useful for UI collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    /// Questions issued so far.
    pub current: u32,
    /// The configured question cap.
    pub total: u32,
    /// `current` over `total`, rounded to the nearest percent.
    pub percentage: u8,
}

impl Progress {
    #[must_use]
    pub fn new(current: u32, total: u32) -> Self {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let percentage = if total == 0 {
            0
        } else {
            ((f64::from(current) / f64::from(total)) * 100.0).round() as u8
        };
        Self {
            current,
            total,
            percentage,
        }
    }
}
