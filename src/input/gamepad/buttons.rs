//! Button naming for gilrs controllers
//!
//! Buttons are identified by SDL game-controller names (`a`, `b`, `back`,
//! `start`, `dpup`, ...), which is what the config file refers to.
//!
//! gilrs reports face buttons by physical position; SDL names follow the
//! Xbox layout:
//!
//! ```text
//!       [Y/North]           (top)
//!   [X/West] [B/East]       (left/right)
//!       [A/South]           (bottom)
//! ```

use gilrs::Button;
use tracing::warn;

/// Map a gilrs button to its SDL game-controller name.
///
/// Returns `None` for buttons with no SDL counterpart.
pub fn gilrs_button_to_name(button: Button) -> Option<&'static str> {
    match button {
        // Face buttons
        Button::South => Some("a"),
        Button::East => Some("b"),
        Button::West => Some("x"),
        Button::North => Some("y"),

        // Shoulder buttons
        Button::LeftTrigger => Some("leftshoulder"),
        Button::RightTrigger => Some("rightshoulder"),
        Button::LeftTrigger2 => Some("lefttrigger"),
        Button::RightTrigger2 => Some("righttrigger"),

        // Menu buttons
        Button::Select => Some("back"),
        Button::Start => Some("start"),
        Button::Mode => Some("guide"),

        // Stick clicks
        Button::LeftThumb => Some("leftstick"),
        Button::RightThumb => Some("rightstick"),

        Button::DPadUp => Some("dpup"),
        Button::DPadDown => Some("dpdown"),
        Button::DPadLeft => Some("dpleft"),
        Button::DPadRight => Some("dpright"),

        Button::C => Some("misc1"),

        _ => {
            warn!("Unknown gilrs button: {:?}", button);
            None
        },
    }
}
