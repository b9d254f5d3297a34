use std::time::Duration;

use geom::{Expanse, Point};

use super::{FixedMetrics, RecordingCanvas};
use crate::{
    canvas::DrawCmd,
    config::Config,
    error::Result,
    input::{Action, Event, KeyCode, Mods, MouseButton},
    style::{Style, StyleMask},
    theme::Theme,
    ui::Ui,
};

/// Drives a [`Ui`] through frames with synthetic input and a clock that
/// advances a fixed step per frame. Text is measured with
/// [`FixedMetrics`].
pub struct Harness {
    /// The UI under test.
    ui: Ui,
    /// Window size passed to every frame.
    size: Expanse,
    /// Frame default style.
    style: Style,
    /// Fields of the default style that apply.
    mask: StyleMask,
    /// Current clock time.
    clock: Duration,
    /// Clock step per frame.
    step: Duration,
}

impl Harness {
    /// An 800x600 harness with default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(Config::default())
    }

    /// An 800x600 harness with the given configuration. The pointer starts
    /// inside the window at the origin.
    pub fn with_config(config: Config) -> Result<Self> {
        let mut ui = Ui::new(Box::new(FixedMetrics), config)?;
        ui.process_event(&Event::MouseEnter);
        Ok(Self {
            ui,
            size: Expanse::new(800.0, 600.0),
            style: Style::default(),
            mask: StyleMask::empty(),
            clock: Duration::ZERO,
            step: Duration::from_millis(16),
        })
    }

    /// Install a theme's rules and default style.
    pub fn with_theme(mut self, theme: &Theme) -> Result<Self> {
        self.ui.set_theme(theme)?;
        (self.style, self.mask) = theme.default_style();
        Ok(self)
    }

    /// Change the window size for subsequent frames.
    pub fn set_size(&mut self, size: Expanse) {
        self.size = size;
    }

    /// Change the clock step per frame.
    pub fn set_step(&mut self, step: Duration) {
        self.step = step;
    }

    /// Deliver a raw event.
    pub fn event(&mut self, event: Event) {
        self.ui.process_event(&event);
    }

    /// Move the pointer to `(x, y)`.
    pub fn mouse_move(&mut self, x: f32, y: f32) {
        let pos = Point::new(x, y);
        let delta = pos - self.ui.input().mouse_position();
        self.event(Event::MouseMove { pos, delta });
    }

    /// Press a mouse button at the current position.
    pub fn press(&mut self, button: MouseButton) {
        self.event(Event::MouseButton {
            button,
            action: Action::Press,
            mods: Mods::NONE,
        });
    }

    /// Release a mouse button at the current position.
    pub fn release(&mut self, button: MouseButton) {
        self.event(Event::MouseButton {
            button,
            action: Action::Release,
            mods: Mods::NONE,
        });
    }

    /// Move to `(x, y)` and click the left button there.
    pub fn click(&mut self, x: f32, y: f32) {
        self.mouse_move(x, y);
        self.press(MouseButton::Left);
        self.release(MouseButton::Left);
    }

    /// Press and release a key.
    pub fn key(&mut self, code: KeyCode, mods: Mods) {
        for action in [Action::Press, Action::Release] {
            self.event(Event::Key { code, action, mods });
        }
    }

    /// Type a string, one character event per char.
    pub fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.event(Event::Char(c));
        }
    }

    /// Paste a string.
    pub fn paste(&mut self, text: &str) {
        self.event(Event::ClipboardPaste(text.to_string()));
    }

    /// Scroll the wheel.
    pub fn wheel(&mut self, dx: f32, dy: f32) {
        self.event(Event::MouseWheel(Point::new(dx, dy)));
    }

    /// Move the clock forward without running a frame.
    pub fn advance(&mut self, d: Duration) {
        self.clock += d;
    }

    /// Run one frame: tick the clock, build with `build`, end the frame.
    pub fn frame<R>(&mut self, build: impl FnOnce(&mut Ui) -> R) -> R {
        self.clock += self.step;
        self.ui.process_event(&Event::Frame(self.clock));
        self.ui.begin_frame(self.size, &self.style, self.mask);
        let out = build(&mut self.ui);
        self.ui.end_frame();
        out
    }

    /// Paint the last frame into a fresh recording canvas.
    pub fn draw(&self) -> Vec<DrawCmd> {
        let mut canvas = RecordingCanvas::default();
        self.ui.draw(&mut canvas);
        canvas.cmds
    }

    /// The UI under test.
    pub fn ui(&self) -> &Ui {
        &self.ui
    }

    /// Mutable access to the UI under test.
    pub fn ui_mut(&mut self) -> &mut Ui {
        &mut self.ui
    }
}
