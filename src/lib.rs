// Rust Picker Library
// Value and open-state management for date and date-range pickers

pub mod models;
pub mod services;
pub mod utils;

pub use models::action::{
    ChangeContext, ChangeImportance, FieldChangeContext, PickerAction, PickerActionKind,
    PickerShortcut, SelectionState,
};
pub use models::error::{PickerError, ValidationReason};
pub use models::value::{DateRange, PickerValueType, PickerVariant, TimezoneSetting};
pub use services::controller::{DispatchOutcome, PickerBuilder, PickerValueController};
pub use services::surface::{PickerHandle, PublicSurfaceBuilder};
pub use services::value_manager::{RangeValueManager, SingleValueManager, ValueManager};
pub use utils::date::{ChronoAdapter, DateAdapter, PickerDate};
