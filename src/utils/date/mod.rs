// Date adapter
// The arithmetic and timezone capability the picker core delegates to

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

use crate::models::error::PickerError;
use crate::models::value::PickerValueType;

/// Date type handled by every picker value.
pub type PickerDate = DateTime<Tz>;

/// Date arithmetic and timezone operations used by value managers and validators.
///
/// The core never inspects dates directly; everything goes through this trait
/// so tests can pin the clock and callers can narrow the supported window.
pub trait DateAdapter {
    /// Current instant expressed in `timezone`.
    fn now(&self, timezone: Tz) -> PickerDate;

    /// Zone used when neither the value nor the caller names one.
    fn system_timezone(&self) -> Tz;

    /// Whether the date lies inside the supported window.
    fn is_valid(&self, date: &PickerDate) -> bool;

    /// Same instant, regardless of zone.
    fn is_equal(&self, a: &PickerDate, b: &PickerDate) -> bool {
        a == b
    }

    /// Same calendar day, evaluated in `a`'s zone.
    fn is_same_day(&self, a: &PickerDate, b: &PickerDate) -> bool {
        a.date_naive() == b.with_timezone(&a.timezone()).date_naive()
    }

    /// Calendar day of `date` is before the day of `reference`, in `date`'s zone.
    fn is_before_day(&self, date: &PickerDate, reference: &PickerDate) -> bool {
        date.date_naive() < reference.with_timezone(&date.timezone()).date_naive()
    }

    /// Calendar day of `date` is after the day of `reference`, in `date`'s zone.
    fn is_after_day(&self, date: &PickerDate, reference: &PickerDate) -> bool {
        date.date_naive() > reference.with_timezone(&date.timezone()).date_naive()
    }

    fn get_timezone(&self, date: &PickerDate) -> Tz {
        date.timezone()
    }

    /// Same instant viewed from another zone.
    fn set_timezone(&self, date: &PickerDate, timezone: Tz) -> PickerDate {
        date.with_timezone(&timezone)
    }

    fn start_of_day(&self, date: &PickerDate) -> PickerDate;

    /// Truncates to the precision the value type edits at.
    fn round_to_granularity(&self, date: &PickerDate, value_type: PickerValueType) -> PickerDate;
}

/// Default adapter backed by chrono and chrono-tz.
#[derive(Debug, Clone, PartialEq)]
pub struct ChronoAdapter {
    system_timezone: Tz,
    min_year: i32,
    max_year: i32,
    fixed_now: Option<DateTime<Utc>>,
}

impl ChronoAdapter {
    pub const DEFAULT_MIN_YEAR: i32 = 1900;
    pub const DEFAULT_MAX_YEAR: i32 = 2099;

    pub fn new(system_timezone: Tz) -> Self {
        Self {
            system_timezone,
            min_year: Self::DEFAULT_MIN_YEAR,
            max_year: Self::DEFAULT_MAX_YEAR,
            fixed_now: None,
        }
    }

    /// Restrict the supported window to `min_year..=max_year`.
    pub fn with_year_range(mut self, min_year: i32, max_year: i32) -> Result<Self, PickerError> {
        if min_year > max_year {
            return Err(PickerError::InvalidYearRange {
                min: min_year,
                max: max_year,
            });
        }
        self.min_year = min_year;
        self.max_year = max_year;
        Ok(self)
    }

    /// Pin the clock; `now` always returns this instant.
    pub fn with_fixed_now(mut self, now: DateTime<Utc>) -> Self {
        self.fixed_now = Some(now);
        self
    }

    pub fn year_range(&self) -> (i32, i32) {
        (self.min_year, self.max_year)
    }

    /// Midnight of `day` in `timezone`, skipping forward over a DST gap.
    pub fn date_at_midnight(&self, day: NaiveDate, timezone: Tz) -> Option<PickerDate> {
        local_to_zoned(day.and_hms_opt(0, 0, 0)?, timezone)
    }
}

impl Default for ChronoAdapter {
    fn default() -> Self {
        Self::new(Tz::UTC)
    }
}

impl DateAdapter for ChronoAdapter {
    fn now(&self, timezone: Tz) -> PickerDate {
        self.fixed_now
            .unwrap_or_else(Utc::now)
            .with_timezone(&timezone)
    }

    fn system_timezone(&self) -> Tz {
        self.system_timezone
    }

    fn is_valid(&self, date: &PickerDate) -> bool {
        (self.min_year..=self.max_year).contains(&date.year())
    }

    fn start_of_day(&self, date: &PickerDate) -> PickerDate {
        self.date_at_midnight(date.date_naive(), date.timezone())
            .unwrap_or(*date)
    }

    fn round_to_granularity(&self, date: &PickerDate, value_type: PickerValueType) -> PickerDate {
        match value_type {
            PickerValueType::Date => self.start_of_day(date),
            PickerValueType::Time | PickerValueType::DateTime => date
                .with_second(0)
                .and_then(|d| d.with_nanosecond(0))
                .unwrap_or(*date),
        }
    }
}

// Local wall-clock time to a zoned instant. A time inside a DST gap moves
// forward one hour.
fn local_to_zoned(naive: NaiveDateTime, timezone: Tz) -> Option<PickerDate> {
    timezone
        .from_local_datetime(&naive)
        .earliest()
        .or_else(|| {
            timezone
                .from_local_datetime(&(naive + chrono::Duration::hours(1)))
                .earliest()
        })
}
