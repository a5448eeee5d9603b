//! Bigscreen Launcher
//!
//! Drives a big-screen launcher window and an emulator process from a gamepad:
//! a button combo opens the window or makes it fullscreen, single buttons
//! launch, kill or inspect the configured application.

pub mod app;
pub mod config;
pub mod input;
pub mod launcher;
pub mod paths;
pub mod tray;
pub mod ui;
