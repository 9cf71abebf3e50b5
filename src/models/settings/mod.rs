// Settings module
// Picker defaults loaded from the user's configuration file

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::models::error::PickerError;
use crate::models::value::{PickerValueType, PickerVariant, TimezoneSetting};
use crate::utils::date::ChronoAdapter;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerSettings {
    pub variant: PickerVariant,
    pub value_type: PickerValueType,
    /// Overrides the variant's close-on-select default when set.
    pub close_on_select: Option<bool>,
    /// "default", "system" or an IANA zone name.
    pub timezone: String,
    /// IANA zone used as the adapter's system zone.
    pub system_timezone: String,
    pub min_year: i32,
    pub max_year: i32,
}

impl Default for PickerSettings {
    fn default() -> Self {
        Self {
            variant: PickerVariant::Desktop,
            value_type: PickerValueType::Date,
            close_on_select: None,
            timezone: "default".to_string(),
            system_timezone: "UTC".to_string(),
            min_year: ChronoAdapter::DEFAULT_MIN_YEAR,
            max_year: ChronoAdapter::DEFAULT_MAX_YEAR,
        }
    }
}

impl PickerSettings {
    pub fn close_on_select(&self) -> bool {
        self.close_on_select
            .unwrap_or_else(|| self.variant.default_close_on_select())
    }

    pub fn timezone_setting(&self) -> Result<TimezoneSetting, PickerError> {
        self.timezone.parse()
    }

    pub fn system_timezone(&self) -> Result<Tz, PickerError> {
        self.system_timezone
            .parse::<Tz>()
            .map_err(|_| PickerError::UnknownTimezone(self.system_timezone.clone()))
    }

    /// Check every field that can be wrong.
    pub fn validate(&self) -> Result<(), PickerError> {
        self.timezone_setting()?;
        self.system_timezone()?;
        if self.min_year > self.max_year {
            return Err(PickerError::InvalidYearRange {
                min: self.min_year,
                max: self.max_year,
            });
        }
        Ok(())
    }

    /// Adapter configured with this file's system zone and year window.
    pub fn adapter(&self) -> Result<ChronoAdapter, PickerError> {
        ChronoAdapter::new(self.system_timezone()?).with_year_range(self.min_year, self.max_year)
    }
}
