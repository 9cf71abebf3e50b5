// Error module
// Validation reasons (value state) and picker faults (contract violations)

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::value::DateRange;

/// Why a date failed validation. Carried as UI state, never raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationReason {
    InvalidDate,
    MinDate,
    MaxDate,
    DisablePast,
    DisableFuture,
    /// Range start falls after its end.
    InvalidRange,
}

/// Validation state of a single-date picker.
pub type SingleError = Option<ValidationReason>;

/// Validation state of a range picker, one slot per end.
pub type RangeError = DateRange<Option<ValidationReason>>;

/// Faults raised to the caller. Invalid dates are not faults.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PickerError {
    #[error("range start is in timezone {start} but range end is in {end}")]
    MixedRangeTimezones { start: Tz, end: Tz },

    #[error("unknown timezone '{0}'")]
    UnknownTimezone(String),

    #[error("invalid year range {min}..={max}")]
    InvalidYearRange { min: i32, max: i32 },

    /// A callback tried to reach the picker that invoked it. Reads are
    /// refused as well as dispatches while an action is running.
    #[error("picker is borrowed by the action being processed")]
    ReentrantDispatch,
}
