//! Controller input: the gamepad event source and pressed-button tracking

pub mod gamepad;
pub mod tracker;

pub use gamepad::GamepadEvent;
pub use tracker::InputTracker;
