use thiserror::Error;

/// Default quiz length offered on the setup screen.
pub const DEFAULT_DURATION_MINUTES: u32 = 50;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum DurationError {
    #[error("quiz duration must be between {min} and {max} minutes, got {got}")]
    OutOfRange { got: i64, min: u32, max: u32 },
}

/// Validated quiz length in whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QuizDuration(u32);

impl QuizDuration {
    pub const MIN_MINUTES: u32 = 1;
    pub const MAX_MINUTES: u32 = 300;

    /// # Errors
    ///
    /// Returns `DurationError::OutOfRange` outside `MIN_MINUTES..=MAX_MINUTES`.
    pub fn from_minutes(minutes: i64) -> Result<Self, DurationError> {
        let err = DurationError::OutOfRange {
            got: minutes,
            min: Self::MIN_MINUTES,
            max: Self::MAX_MINUTES,
        };
        let value = u32::try_from(minutes).map_err(|_| err)?;
        if !(Self::MIN_MINUTES..=Self::MAX_MINUTES).contains(&value) {
            return Err(err);
        }
        Ok(Self(value))
    }

    #[must_use]
    pub fn minutes(self) -> u32 {
        self.0
    }

    #[must_use]
    pub fn total_secs(self) -> u32 {
        self.0 * 60
    }
}

impl Default for QuizDuration {
    fn default() -> Self {
        Self(DEFAULT_DURATION_MINUTES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_and_negative() {
        assert!(QuizDuration::from_minutes(0).is_err());
        assert!(QuizDuration::from_minutes(-5).is_err());
    }

    #[test]
    fn rejects_above_max() {
        let err = QuizDuration::from_minutes(301).unwrap_err();
        assert_eq!(
            err,
            DurationError::OutOfRange {
                got: 301,
                min: 1,
                max: 300
            }
        );
    }

    #[test]
    fn accepts_bounds() {
        assert_eq!(QuizDuration::from_minutes(1).unwrap().total_secs(), 60);
        assert_eq!(QuizDuration::from_minutes(300).unwrap().minutes(), 300);
    }
}
