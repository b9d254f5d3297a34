//! Demonstration UIs built from the trellis widgets.

/// The widget gallery.
pub mod gallery;
