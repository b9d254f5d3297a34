//! Trellis: an immediate-mode UI engine.
//!
//! Each frame the application describes its interface by making boxes
//! under a [`Ui`]. Boxes are identified by hashed labels, so state such as
//! scroll offsets, animation and focus survives from one frame to the next
//! while boxes that were not described are pruned. At the end of a frame
//! the tree is styled by tag rules, laid out per axis and made ready to
//! paint through a host-supplied [`Canvas`](canvas::Canvas). Text
//! measurement is likewise supplied by the host through
//! [`TextMeasure`](text::TextMeasure).
//!
//! ```
//! use trellis::{
//!     Config, Expanse, Point, Rect, Style, StyleMask, Ui,
//!     text::{FontId, TextMeasure, TextMetrics},
//!     widgets,
//! };
//!
//! struct Mono;
//!
//! impl TextMeasure for Mono {
//!     fn text_metrics(&self, _font: FontId, size: f32, text: &str) -> TextMetrics {
//!         let logical = Rect::new(0.0, 0.0, text.len() as f32 * size * 0.5, size);
//!         TextMetrics { ink: logical, logical, advance: Point::new(logical.w, 0.0) }
//!     }
//! }
//!
//! let mut ui = Ui::new(Box::new(Mono), Config::default())?;
//! ui.begin_frame(Expanse::new(640.0, 480.0), &Style::default(), StyleMask::empty());
//! let clicked = widgets::button(&mut ui, "OK").clicked;
//! ui.end_frame();
//! assert!(!clicked);
//! # Ok::<(), trellis::Error>(())
//! ```

pub mod arena;
pub mod canvas;
pub mod config;
pub mod context;
pub mod error;
pub mod input;
pub mod list;
pub mod style;
pub mod text;
pub mod theme;
pub mod ui;
pub mod widgets;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use config::Config;
pub use error::{Error, Result};
pub use geom;
pub use geom::{Axis, Expanse, Point, Rect};
pub use style::{Color, PartialStyle, Style, StyleMask};
pub use theme::Theme;
pub use ui::{BoxFlags, BoxId, Signal, Ui};
