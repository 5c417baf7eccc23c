use crate::action::{Action, actions};
use crate::frame::InputFrame;

/// Help overlay visibility, toggled by [`Action::ToggleHelp`]. Starts hidden.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HelpToggle {
    visible: bool,
}

impl HelpToggle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn update(&mut self, input: &InputFrame) -> bool {
        for action in actions(input) {
            if action == Action::ToggleHelp {
                self.visible = !self.visible;
            }
        }
        self.visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Key;

    #[test]
    fn toggles_on_each_press() {
        let mut help = HelpToggle::new();
        assert!(!help.visible());
        assert!(help.update(&InputFrame::default().with_key(Key::H)));
        assert!(help.update(&InputFrame::default()));
        assert!(!help.update(&InputFrame::default().with_key(Key::H)));
    }
}
