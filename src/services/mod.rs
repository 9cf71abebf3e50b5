// Service module exports
// Picker behaviour: value policy, validation, reduction and the controller shell

pub mod controller;
pub mod open_state;
pub mod reducer;
pub mod settings;
pub mod store;
pub mod surface;
pub mod validation;
pub mod value_manager;
