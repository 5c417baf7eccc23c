use crate::frame::{InputFrame, Key};

/// A high-level intent derived from raw input.
///
/// Controllers consume actions, never key codes, so bindings can change
/// without touching transition logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Switch the camera to first-person control.
    SelectFirstPerson,
    /// Switch the camera to orbit its target automatically.
    SelectAutoOrbit,
    /// Show or hide the help overlay.
    ToggleHelp,
}

/// Map this frame's key presses to actions, in press order.
pub fn actions(input: &InputFrame) -> Vec<Action> {
    input
        .keys_pressed
        .iter()
        .map(|key| match key {
            Key::Digit1 => Action::SelectFirstPerson,
            Key::Digit2 => Action::SelectAutoOrbit,
            Key::H => Action::ToggleHelp,
        })
        .collect()
}
