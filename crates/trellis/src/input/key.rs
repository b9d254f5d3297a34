//! Key codes, mouse buttons and modifier state.
use std::ops::Add;

/// Modifier key state.
#[derive(Default, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Mods {
    /// Shift is active.
    pub shift: bool,
    /// Control is active.
    pub ctrl: bool,
    /// Alt is active.
    pub alt: bool,
    /// Command/super is active.
    pub cmd: bool,
}

impl Mods {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        cmd: false,
    };

    /// Shift only.
    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };

    /// Control only.
    pub const CTRL: Self = Self {
        ctrl: true,
        ..Self::NONE
    };

    /// Alt only.
    pub const ALT: Self = Self {
        alt: true,
        ..Self::NONE
    };

    /// Command only.
    pub const CMD: Self = Self {
        cmd: true,
        ..Self::NONE
    };

    /// True if no modifier is held.
    pub fn is_empty(&self) -> bool {
        !(self.shift || self.ctrl || self.alt || self.cmd)
    }

    /// The platform's shortcut modifier: command on macOS, control
    /// elsewhere.
    pub fn shortcut(&self) -> bool {
        if cfg!(target_os = "macos") {
            self.cmd
        } else {
            self.ctrl
        }
    }
}

impl Add<Self> for Mods {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self {
            shift: self.shift || other.shift,
            ctrl: self.ctrl || other.ctrl,
            alt: self.alt || other.alt,
            cmd: self.cmd || other.cmd,
        }
    }
}

/// What happened to a key or button.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Action {
    /// The key went down.
    Press,
    /// The key went up.
    Release,
    /// The platform auto-repeated a held key.
    Repeat,
}

/// Physical key codes. The discriminant indexes the key state table.
#[derive(Debug, PartialOrd, Ord, PartialEq, Hash, Eq, Clone, Copy)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum KeyCode {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    Num0,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,
    Space,
    Enter,
    Escape,
    Backspace,
    Delete,
    Tab,
    Insert,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    LeftShift,
    RightShift,
    LeftControl,
    RightControl,
    LeftAlt,
    RightAlt,
    LeftSuper,
    RightSuper,
}

impl KeyCode {
    /// Number of key codes.
    pub const COUNT: usize = Self::RightSuper as usize + 1;

    /// Index into a key state table.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Mouse buttons. The discriminant indexes the button state table.
#[derive(Debug, PartialOrd, Ord, PartialEq, Eq, Clone, Copy, Hash)]
#[repr(u8)]
pub enum MouseButton {
    /// Left button.
    Left,
    /// Right button.
    Right,
    /// Middle button.
    Middle,
    /// First extra button.
    Ext1,
    /// Second extra button.
    Ext2,
}

impl MouseButton {
    /// Number of mouse buttons.
    pub const COUNT: usize = Self::Ext2 as usize + 1;

    /// Index into a button state table.
    pub fn index(self) -> usize {
        self as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mods_combine() {
        let m = Mods::SHIFT + Mods::CTRL;
        assert!(m.shift && m.ctrl && !m.alt);
        assert!(Mods::NONE.is_empty());
        assert!(!m.is_empty());
    }

    #[test]
    fn code_indices() {
        assert_eq!(KeyCode::A.index(), 0);
        assert_eq!(KeyCode::RightSuper.index(), KeyCode::COUNT - 1);
        assert_eq!(MouseButton::COUNT, 5);
    }
}
