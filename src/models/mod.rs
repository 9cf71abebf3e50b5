// Module exports for models
// Plain data shared by the reducer, the controller and the public surface

pub mod action;
pub mod error;
pub mod settings;
pub mod state;
pub mod value;
