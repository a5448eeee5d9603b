//! System tray: "Open App" and "Quit"
//!
//! The tray icon itself lives on the UI thread; menu clicks are forwarded to
//! the dispatcher queue from a small background thread.

pub mod icons;
pub mod manager;

pub use manager::{build_tray, MenuForwarder};

/// Commands sent from the tray menu to the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayCommand {
    /// Create (show) the launcher window
    OpenApp,
    /// Shut the application down
    Quit,
}

impl TrayCommand {
    pub(crate) const OPEN_APP_ID: &'static str = "open_app";
    pub(crate) const QUIT_ID: &'static str = "quit";

    /// Map a menu item id to its command
    pub fn from_menu_id(id: &str) -> Option<Self> {
        match id {
            Self::OPEN_APP_ID => Some(Self::OpenApp),
            Self::QUIT_ID => Some(Self::Quit),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_ids_map_to_commands() {
        assert_eq!(TrayCommand::from_menu_id("open_app"), Some(TrayCommand::OpenApp));
        assert_eq!(TrayCommand::from_menu_id("quit"), Some(TrayCommand::Quit));
        assert_eq!(TrayCommand::from_menu_id("about"), None);
    }
}
