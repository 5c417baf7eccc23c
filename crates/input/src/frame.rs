use glam::Vec2;

/// Keys the scene reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Digit1,
    Digit2,
    H,
}

/// Edge and level state of one button for a single frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonState {
    /// Went down this frame.
    pub pressed: bool,
    /// Down at any point this frame.
    pub held: bool,
    /// Went up this frame.
    pub released: bool,
}

impl ButtonState {
    pub fn press() -> Self {
        Self {
            pressed: true,
            held: true,
            released: false,
        }
    }

    pub fn hold() -> Self {
        Self {
            held: true,
            ..Self::default()
        }
    }

    pub fn release() -> Self {
        Self {
            released: true,
            ..Self::default()
        }
    }
}

/// Snapshot of user input for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputFrame {
    /// Keys that went down this frame.
    pub keys_pressed: Vec<Key>,
    /// Primary pointer button.
    pub primary: ButtonState,
    /// Pointer position in pixels, origin at the top-left of the viewport.
    pub pointer: Vec2,
    /// Look axes (x: right, y: up), in device units this frame.
    pub look: Vec2,
    /// Movement axes (x: strafe right, y: forward), each in [-1, 1].
    pub movement: Vec2,
}

impl InputFrame {
    pub fn key_pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }

    pub fn with_key(mut self, key: Key) -> Self {
        self.keys_pressed.push(key);
        self
    }

    pub fn with_pointer(mut self, pointer: Vec2, primary: ButtonState) -> Self {
        self.pointer = pointer;
        self.primary = primary;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_compose() {
        let f = InputFrame::default()
            .with_key(Key::H)
            .with_pointer(Vec2::new(10.0, 20.0), ButtonState::press());
        assert!(f.key_pressed(Key::H));
        assert!(!f.key_pressed(Key::Digit1));
        assert!(f.primary.pressed && f.primary.held);
        assert_eq!(f.pointer, Vec2::new(10.0, 20.0));
    }
}
