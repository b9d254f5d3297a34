use std::{path::PathBuf, time::Duration};

use geom::{Point, Rect};

use super::{
    InputConfig,
    event::Event,
    key::{Action, KeyCode, Mods, MouseButton},
};

/// Level and edge state for one key or button.
///
/// `transitions` counts every down/up flip since the last frame boundary and
/// `repeats` counts auto-repeats. Press and release counts are derived from
/// the flip count and the current level.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct KeyState {
    /// Current level.
    pub down: bool,
    /// Level flips this frame.
    pub transitions: u32,
    /// Auto-repeats this frame.
    pub repeats: u32,
}

impl KeyState {
    /// Apply a press, release or repeat.
    pub fn update(&mut self, action: Action) {
        match action {
            Action::Press => {
                if !self.down {
                    self.down = true;
                    self.transitions += 1;
                }
            }
            Action::Release => {
                if self.down {
                    self.down = false;
                    self.transitions += 1;
                }
            }
            Action::Repeat => {
                self.repeats += 1;
                if !self.down {
                    self.down = true;
                    self.transitions += 1;
                }
            }
        }
    }

    /// Presses since the last frame boundary.
    pub fn presses(&self) -> u32 {
        (self.transitions + u32::from(self.down)) / 2
    }

    /// Releases since the last frame boundary.
    pub fn releases(&self) -> u32 {
        (self.transitions + u32::from(!self.down)) / 2
    }

    /// Zero the edge counters, keeping the level.
    fn next_frame(&mut self) {
        self.transitions = 0;
        self.repeats = 0;
    }
}

/// A mouse button with click detection.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ButtonState {
    /// Level and edge counters.
    pub key: KeyState,
    /// Clock time of the last press.
    last_press: Option<Duration>,
    /// Pointer position at the last press.
    press_pos: Point,
    /// Presses in the current multi-click run.
    click_count: u32,
    /// A release completed a click this frame.
    clicked: bool,
    /// The click completed a double click.
    double_clicked: bool,
    /// The click completed a triple click.
    triple_clicked: bool,
}

impl ButtonState {
    /// Where the button was last pressed.
    pub fn press_position(&self) -> Point {
        self.press_pos
    }

    /// Clear per-frame click flags and edge counters.
    fn next_frame(&mut self) {
        self.key.next_frame();
        self.clicked = false;
        self.double_clicked = false;
        self.triple_clicked = false;
    }
}

/// Window-level state.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct WindowState {
    /// The window has keyboard focus.
    pub focused: bool,
    /// The window is shown.
    pub visible: bool,
    /// The pointer is inside the window.
    pub mouse_inside: bool,
    /// Last reported outer frame.
    pub frame: Rect,
    /// Last reported content area.
    pub content: Rect,
    /// Paths dropped this frame.
    pub dropped: Vec<PathBuf>,
    /// The user asked to quit.
    pub quit_requested: bool,
}

/// Keyboard, mouse, text and clipboard state for the current frame.
#[derive(Debug, Clone)]
pub struct InputState {
    /// Thresholds.
    config: InputConfig,
    /// Per-key state, indexed by [`KeyCode::index`].
    keys: [KeyState; KeyCode::COUNT],
    /// Current modifiers.
    mods: Mods,
    /// Pointer position.
    mouse_pos: Point,
    /// Pointer movement this frame.
    mouse_delta: Point,
    /// Wheel movement this frame.
    wheel: Point,
    /// Per-button state, indexed by [`MouseButton::index`].
    buttons: [ButtonState; MouseButton::COUNT],
    /// Characters typed this frame.
    text: Vec<char>,
    /// Set once text overflow has been reported this frame.
    text_overflowed: bool,
    /// Text pasted this frame.
    paste: Option<String>,
    /// Window substate.
    window: WindowState,
    /// Clock time of the current frame.
    time: Duration,
    /// Clock time of the previous frame.
    last_time: Duration,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new(InputConfig::default())
    }
}

impl InputState {
    /// Empty input state with the given thresholds.
    pub fn new(config: InputConfig) -> Self {
        Self {
            config,
            keys: [KeyState::default(); KeyCode::COUNT],
            mods: Mods::NONE,
            mouse_pos: Point::zero(),
            mouse_delta: Point::zero(),
            wheel: Point::zero(),
            buttons: [ButtonState::default(); MouseButton::COUNT],
            text: Vec::new(),
            text_overflowed: false,
            paste: None,
            window: WindowState {
                focused: true,
                visible: true,
                mouse_inside: true,
                ..WindowState::default()
            },
            time: Duration::ZERO,
            last_time: Duration::ZERO,
        }
    }

    /// The thresholds in use.
    pub fn config(&self) -> &InputConfig {
        &self.config
    }

    /// Fold one event into the state. Only the substate the event concerns
    /// is touched.
    pub fn process_event(&mut self, event: &Event) {
        match event {
            Event::KeyboardMods(mods) => self.mods = *mods,
            Event::Key { code, action, mods } => {
                self.mods = *mods;
                self.keys[code.index()].update(*action);
            }
            Event::Char(c) => self.push_char(*c),
            Event::MouseButton {
                button,
                action,
                mods,
            } => {
                self.mods = *mods;
                self.button_event(*button, *action);
            }
            Event::MouseMove { pos, delta } => {
                self.mouse_pos = *pos;
                self.mouse_delta = self.mouse_delta + *delta;
            }
            Event::MouseWheel(delta) => self.wheel = self.wheel + *delta,
            Event::MouseEnter => self.window.mouse_inside = true,
            Event::MouseLeave => self.window.mouse_inside = false,
            Event::ClipboardPaste(s) => self.paste = Some(s.clone()),
            Event::WindowResize { frame, content } | Event::WindowMove { frame, content } => {
                self.window.frame = *frame;
                self.window.content = *content;
            }
            Event::WindowFocus => self.window.focused = true,
            Event::WindowUnfocus => self.window.focused = false,
            Event::WindowShow => self.window.visible = true,
            Event::WindowHide => self.window.visible = false,
            Event::PathDrop(paths) => self.window.dropped.extend(paths.iter().cloned()),
            Event::Frame(time) => {
                self.last_time = self.time;
                self.time = *time;
            }
            Event::Quit => self.window.quit_requested = true,
        }
    }

    /// Record typed text, dropping codepoints past the per-frame limit.
    fn push_char(&mut self, c: char) {
        if self.text.len() < self.config.max_text_codepoints {
            self.text.push(c);
        } else if !self.text_overflowed {
            self.text_overflowed = true;
            tracing::warn!(
                limit = self.config.max_text_codepoints,
                "text input overflow, dropping codepoints"
            );
        }
    }

    /// Update a button and its click tracking.
    fn button_event(&mut self, button: MouseButton, action: Action) {
        let now = self.time;
        let pos = self.mouse_pos;
        let cfg = self.config;
        let b = &mut self.buttons[button.index()];
        let was_down = b.key.down;
        b.key.update(action);
        match action {
            Action::Press | Action::Repeat if !was_down => {
                let continues = b.last_press.is_some_and(|t| {
                    now.saturating_sub(t).as_secs_f32() <= cfg.multi_click_time
                        && pos.distance(b.press_pos) <= cfg.multi_click_distance
                });
                b.click_count = if continues { b.click_count + 1 } else { 1 };
                b.last_press = Some(now);
                b.press_pos = pos;
            }
            Action::Release if was_down => {
                let quick = b
                    .last_press
                    .is_some_and(|t| now.saturating_sub(t).as_secs_f32() <= cfg.click_time);
                if quick && pos.distance(b.press_pos) <= cfg.click_distance {
                    b.clicked = true;
                    b.double_clicked = b.click_count == 2;
                    b.triple_clicked = b.click_count == 3;
                }
            }
            _ => {}
        }
    }

    /// Frame boundary: zero edge counters, motion, text and paste. Level
    /// state, pointer position and the clock are kept; a frame that brings
    /// no clock event sees a zero `dt`.
    pub fn next_frame(&mut self) {
        for k in &mut self.keys {
            k.next_frame();
        }
        for b in &mut self.buttons {
            b.next_frame();
        }
        self.mouse_delta = Point::zero();
        self.wheel = Point::zero();
        self.text.clear();
        self.text_overflowed = false;
        self.paste = None;
        self.window.dropped.clear();
        self.last_time = self.time;
    }

    /// State of one key.
    pub fn key(&self, code: KeyCode) -> KeyState {
        self.keys[code.index()]
    }

    /// Is the key held?
    pub fn key_down(&self, code: KeyCode) -> bool {
        self.keys[code.index()].down
    }

    /// Presses of the key this frame.
    pub fn key_pressed(&self, code: KeyCode) -> u32 {
        self.keys[code.index()].presses()
    }

    /// Releases of the key this frame.
    pub fn key_released(&self, code: KeyCode) -> u32 {
        self.keys[code.index()].releases()
    }

    /// Auto-repeats of the key this frame.
    pub fn key_repeated(&self, code: KeyCode) -> u32 {
        self.keys[code.index()].repeats
    }

    /// Presses plus repeats, the count a text editor acts on.
    pub fn key_pressed_or_repeated(&self, code: KeyCode) -> u32 {
        let k = self.keys[code.index()];
        k.presses() + k.repeats
    }

    /// Current modifiers.
    pub fn mods(&self) -> Mods {
        self.mods
    }

    /// Pointer position in window coordinates.
    pub fn mouse_position(&self) -> Point {
        self.mouse_pos
    }

    /// Pointer movement this frame.
    pub fn mouse_delta(&self) -> Point {
        self.mouse_delta
    }

    /// Wheel movement this frame.
    pub fn mouse_wheel(&self) -> Point {
        self.wheel
    }

    /// State of a mouse button.
    pub fn button(&self, button: MouseButton) -> &ButtonState {
        &self.buttons[button.index()]
    }

    /// Is the button held?
    pub fn mouse_down(&self, button: MouseButton) -> bool {
        self.buttons[button.index()].key.down
    }

    /// Was the button pressed this frame?
    pub fn mouse_pressed(&self, button: MouseButton) -> bool {
        self.buttons[button.index()].key.presses() > 0
    }

    /// Was the button released this frame?
    pub fn mouse_released(&self, button: MouseButton) -> bool {
        self.buttons[button.index()].key.releases() > 0
    }

    /// Did a release complete a click this frame?
    pub fn mouse_clicked(&self, button: MouseButton) -> bool {
        self.buttons[button.index()].clicked
    }

    /// Did a click complete a double click this frame?
    pub fn mouse_double_clicked(&self, button: MouseButton) -> bool {
        self.buttons[button.index()].double_clicked
    }

    /// Did a click complete a triple click this frame?
    pub fn mouse_triple_clicked(&self, button: MouseButton) -> bool {
        self.buttons[button.index()].triple_clicked
    }

    /// Characters typed this frame.
    pub fn text(&self) -> &[char] {
        &self.text
    }

    /// Text pasted this frame.
    pub fn clipboard_pasted(&self) -> Option<&str> {
        self.paste.as_deref()
    }

    /// Window substate.
    pub fn window(&self) -> &WindowState {
        &self.window
    }

    /// Clock time of the current frame.
    pub fn time(&self) -> Duration {
        self.time
    }

    /// Clock time elapsed since the previous frame.
    pub fn dt(&self) -> Duration {
        self.time.saturating_sub(self.last_time)
    }
}
