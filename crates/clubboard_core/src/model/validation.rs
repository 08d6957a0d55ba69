//! Shared validation error for club records.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Reason a record was rejected before persistence.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordValidationError {
    /// A required text field is empty or whitespace only.
    BlankField {
        record: &'static str,
        field: &'static str,
    },
    /// Attendance rate is NaN, infinite or outside `0..=100`.
    AttendanceRateOutOfRange(f64),
}

impl Display for RecordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField { record, field } => {
                write!(f, "{record}.{field} must not be blank")
            }
            Self::AttendanceRateOutOfRange(value) => {
                write!(f, "attendance_rate ({value}) must be within 0..=100")
            }
        }
    }
}

impl Error for RecordValidationError {}

pub(crate) fn require_text(
    record: &'static str,
    field: &'static str,
    value: &str,
) -> Result<(), RecordValidationError> {
    if value.trim().is_empty() {
        return Err(RecordValidationError::BlankField { record, field });
    }
    Ok(())
}
