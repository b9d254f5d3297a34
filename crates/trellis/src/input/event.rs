use std::{path::PathBuf, time::Duration};

use geom::{Point, Rect};

use super::key::{Action, KeyCode, Mods, MouseButton};

/// Events delivered by the host platform layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The modifier state changed.
    KeyboardMods(Mods),
    /// A key was pressed, released or repeated.
    Key {
        /// Physical key.
        code: KeyCode,
        /// What happened.
        action: Action,
        /// Modifiers at the time of the event.
        mods: Mods,
    },
    /// A character was typed.
    Char(char),
    /// A mouse button was pressed or released at the current pointer
    /// position.
    MouseButton {
        /// Which button.
        button: MouseButton,
        /// Press or release.
        action: Action,
        /// Modifiers at the time of the event.
        mods: Mods,
    },
    /// The pointer moved.
    MouseMove {
        /// New position in window coordinates.
        pos: Point,
        /// Movement since the last move event.
        delta: Point,
    },
    /// The wheel or trackpad scrolled.
    MouseWheel(Point),
    /// The pointer entered the window.
    MouseEnter,
    /// The pointer left the window.
    MouseLeave,
    /// The user pasted text.
    ClipboardPaste(String),
    /// The window was resized.
    WindowResize {
        /// Outer window frame.
        frame: Rect,
        /// Content area.
        content: Rect,
    },
    /// The window was moved.
    WindowMove {
        /// Outer window frame.
        frame: Rect,
        /// Content area.
        content: Rect,
    },
    /// The window gained focus.
    WindowFocus,
    /// The window lost focus.
    WindowUnfocus,
    /// The window was shown.
    WindowShow,
    /// The window was hidden.
    WindowHide,
    /// Files were dropped onto the window.
    PathDrop(Vec<PathBuf>),
    /// A new frame begins at the given clock time.
    Frame(Duration),
    /// The user asked to close the application.
    Quit,
}
