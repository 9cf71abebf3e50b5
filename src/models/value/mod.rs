// Value module
// Value shapes handled by pickers and the knobs that describe them

use std::fmt;
use std::str::FromStr;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::models::error::PickerError;
use crate::utils::date::PickerDate;

/// Value of a single-date picker. `None` is the empty value.
pub type SingleValue = Option<PickerDate>;

/// Value of a date-range picker.
pub type RangeValue = DateRange<Option<PickerDate>>;

/// Fixed-size pair used for range values and range errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange<T> {
    pub start: T,
    pub end: T,
}

impl<T> DateRange<T> {
    pub fn new(start: T, end: T) -> Self {
        Self { start, end }
    }

    /// Apply `f` to both ends.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> DateRange<U> {
        DateRange {
            start: f(self.start),
            end: f(self.end),
        }
    }

    pub fn as_ref(&self) -> DateRange<&T> {
        DateRange {
            start: &self.start,
            end: &self.end,
        }
    }

    pub fn get(&self, position: RangePosition) -> &T {
        match position {
            RangePosition::Start => &self.start,
            RangePosition::End => &self.end,
        }
    }

    /// Copy of the range with the end at `position` replaced.
    pub fn with(mut self, position: RangePosition, value: T) -> Self {
        match position {
            RangePosition::Start => self.start = value,
            RangePosition::End => self.end = value,
        }
        self
    }

    pub fn both(&self, mut f: impl FnMut(&T) -> bool) -> bool {
        f(&self.start) && f(&self.end)
    }

    pub fn either(&self, mut f: impl FnMut(&T) -> bool) -> bool {
        f(&self.start) || f(&self.end)
    }
}

impl<T> From<(T, T)> for DateRange<T> {
    fn from((start, end): (T, T)) -> Self {
        Self { start, end }
    }
}

/// Which end of a range a view is editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangePosition {
    Start,
    End,
}

/// What part of a date the picker edits. Drives "today" and reference rounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PickerValueType {
    #[default]
    Date,
    Time,
    DateTime,
}

/// Presentation variant. Only affects defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PickerVariant {
    #[default]
    Desktop,
    Mobile,
}

impl PickerVariant {
    /// Desktop pickers close once a view selection finishes; mobile ones wait
    /// for an explicit accept.
    pub fn default_close_on_select(self) -> bool {
        matches!(self, PickerVariant::Desktop)
    }
}

/// Zone the picker renders its draft in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimezoneSetting {
    /// The zone of the incoming value, else the system zone.
    #[default]
    Default,
    /// The adapter's system zone.
    System,
    Named(Tz),
}

impl TimezoneSetting {
    /// Zone to render in, given the zone carried by the incoming value.
    pub fn resolve(self, input: Option<Tz>, system: Tz) -> Tz {
        match self {
            TimezoneSetting::Default => input.unwrap_or(system),
            TimezoneSetting::System => system,
            TimezoneSetting::Named(tz) => tz,
        }
    }
}

impl FromStr for TimezoneSetting {
    type Err = PickerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "default" => Ok(TimezoneSetting::Default),
            "system" => Ok(TimezoneSetting::System),
            name => name
                .parse::<Tz>()
                .map(TimezoneSetting::Named)
                .map_err(|_| PickerError::UnknownTimezone(name.to_string())),
        }
    }
}

impl fmt::Display for TimezoneSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimezoneSetting::Default => f.write_str("default"),
            TimezoneSetting::System => f.write_str("system"),
            TimezoneSetting::Named(tz) => f.write_str(tz.name()),
        }
    }
}
