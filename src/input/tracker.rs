//! Pressed-button tracking and shortcut combo detection

use std::collections::HashSet;
use tracing::trace;

/// Tracks which controller buttons are currently held.
///
/// A button is in the set iff the last event seen for it was a press.
/// Events are applied in delivery order with no debounce.
#[derive(Debug, Clone)]
pub struct InputTracker {
    pressed: HashSet<String>,
    combo: Vec<String>,
}

impl InputTracker {
    /// Create a tracker firing when every button in `combo` is held.
    pub fn new<I, S>(combo: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pressed: HashSet::new(),
            combo: combo.into_iter().map(Into::into).collect(),
        }
    }

    /// Record a press. Returns `true` when the shortcut combo is now held.
    ///
    /// Any press while the combo is held fires again, including re-pressing
    /// one of the combo buttons.
    pub fn button_down(&mut self, button: &str) -> bool {
        self.pressed.insert(button.to_string());
        trace!(button, pressed = ?self.pressed, "button down");
        self.combo_held()
    }

    /// Record a release. Releasing a button that is not held is a no-op.
    pub fn button_up(&mut self, button: &str) {
        self.pressed.remove(button);
        trace!(button, pressed = ?self.pressed, "button up");
    }

    /// Forget all held buttons.
    pub fn reset(&mut self) {
        self.pressed.clear();
    }

    pub fn is_pressed(&self, button: &str) -> bool {
        self.pressed.contains(button)
    }

    pub fn pressed(&self) -> &HashSet<String> {
        &self.pressed
    }

    pub fn combo(&self) -> &[String] {
        &self.combo
    }

    fn combo_held(&self) -> bool {
        !self.combo.is_empty() && self.combo.iter().all(|b| self.pressed.contains(b))
    }
}
