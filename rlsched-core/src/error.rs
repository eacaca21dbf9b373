//! Error taxonomy for schedule queries and updates

use thiserror::Error;

/// Coarse classification used by transports to pick a status code
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unknown day or missing data
    NotFound,
    /// Malformed update payload, rejected before any state changes
    InvalidInput,
    /// Unexpected failure during computation
    Internal,
}

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("unknown day: {0}")]
    UnknownDay(String),

    #[error("invalid time {value:?}: expected HH:MM (24-hour) or H:MMAM/PM")]
    InvalidTime { value: String },

    #[error("invalid week label {0:?}: expected \"A\" or \"B\"")]
    InvalidLabel(String),

    #[error("{pattern} does not accept day {day:?}")]
    UnknownPatternDay { pattern: &'static str, day: String },

    #[error("{pattern} lists day {day:?} more than once")]
    DuplicatePatternDay { pattern: &'static str, day: String },

    #[error("tournament at {time} has mode \"varies\" but no week{missing} variant")]
    MissingRotation { time: String, missing: char },

    #[error("invalid schedule document: {0}")]
    InvalidDocument(#[from] serde_json::Error),

    #[error("schedule state lock poisoned")]
    LockPoisoned,
}

impl ScheduleError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScheduleError::UnknownDay(_) => ErrorKind::NotFound,
            ScheduleError::InvalidTime { .. }
            | ScheduleError::InvalidLabel(_)
            | ScheduleError::UnknownPatternDay { .. }
            | ScheduleError::DuplicatePatternDay { .. }
            | ScheduleError::MissingRotation { .. }
            | ScheduleError::InvalidDocument(_) => ErrorKind::InvalidInput,
            ScheduleError::LockPoisoned => ErrorKind::Internal,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScheduleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(ScheduleError::UnknownDay("funday".into()).kind(), ErrorKind::NotFound);
        assert_eq!(
            ScheduleError::InvalidTime { value: "25:00".into() }.kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(ScheduleError::LockPoisoned.kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_missing_rotation_message() {
        let err = ScheduleError::MissingRotation { time: "18:00".into(), missing: 'B' };
        assert_eq!(
            err.to_string(),
            "tournament at 18:00 has mode \"varies\" but no weekB variant"
        );
    }
}
