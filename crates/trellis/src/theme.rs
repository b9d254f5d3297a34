//! Palettes and the default widget rules built from them.

use geom::Axis;

use crate::{
    error::Result,
    rgb,
    style::{Color, PartialStyle, RuleSet, Style, StyleMask},
    text::FontId,
};

/// Colors a theme is built from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Window background.
    pub background: Color,
    /// Panels and menus.
    pub surface: Color,
    /// Buttons and fields at rest.
    pub raised: Color,
    /// Controls under the pointer.
    pub hover: Color,
    /// Controls being pressed.
    pub pressed: Color,
    /// Body text.
    pub text: Color,
    /// Secondary text.
    pub muted: Color,
    /// Highlights, checks and slider thumbs.
    pub accent: Color,
    /// Outlines.
    pub border: Color,
    /// Selected text background.
    pub selection: Color,
}

/// A palette plus shape and type settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    /// Colors.
    pub palette: Palette,
    /// Corner radius of controls.
    pub radius: f32,
    /// Body font.
    pub font: FontId,
    /// Body font size.
    pub font_size: f32,
    /// Seconds hover and press colors take to settle.
    pub transition: f32,
}

impl Theme {
    /// Light text on dark surfaces.
    pub fn dark() -> Self {
        Self {
            palette: Palette {
                background: rgb!("#1e1f22"),
                surface: rgb!("#2b2d31"),
                raised: rgb!("#3a3c42"),
                hover: rgb!("#4a4d55"),
                pressed: rgb!("#5a5e68"),
                text: rgb!("#e6e6e6"),
                muted: rgb!("#9a9ca3"),
                accent: rgb!("#4c8dff"),
                border: rgb!("#55585f"),
                selection: rgb!("#4c8dff").with_alpha(0.4),
            },
            radius: 4.0,
            font: FontId::NIL,
            font_size: 14.0,
            transition: 0.08,
        }
    }

    /// Dark text on light surfaces.
    pub fn light() -> Self {
        Self {
            palette: Palette {
                background: rgb!("#f5f5f5"),
                surface: rgb!("#ffffff"),
                raised: rgb!("#e4e4e7"),
                hover: rgb!("#d4d4d8"),
                pressed: rgb!("#c4c4ca"),
                text: rgb!("#1f1f23"),
                muted: rgb!("#6b6b73"),
                accent: rgb!("#2563eb"),
                border: rgb!("#b4b4bb"),
                selection: rgb!("#2563eb").with_alpha(0.3),
            },
            ..Self::dark()
        }
    }

    /// Frame default style for `Ui::begin_frame`, with the mask of fields it
    /// sets.
    pub fn default_style(&self) -> (Style, StyleMask) {
        let style = Style {
            color: self.palette.text,
            font: self.font,
            font_size: self.font_size,
            ..Style::default()
        };
        (style, StyleMask::COLOR | StyleMask::FONT | StyleMask::FONT_SIZE)
    }

    /// Rules styling the built-in widgets by tag.
    pub fn rules(&self) -> Result<RuleSet> {
        let p = &self.palette;
        let control = PartialStyle::new()
            .bg(p.raised)
            .border_color(p.border)
            .border_size(1.0)
            .roundness(self.radius)
            .animate(self.transition, StyleMask::BG_COLOR);
        let mut set = RuleSet::new();
        set.rules()
            .style(".label", PartialStyle::new().color(p.text))
            .style(
                ".button",
                control.margin(Axis::X, 8.0).margin(Axis::Y, 4.0),
            )
            .style(".button:hot", PartialStyle::new().bg(p.hover))
            .style(".button:active", PartialStyle::new().bg(p.pressed))
            .style(".checkbox", control)
            .style(".checkbox-row:hot .checkbox", PartialStyle::new().bg(p.hover))
            .style(".checkbox-mark", PartialStyle::new().bg(p.accent).roundness(2.0))
            .style(".slider", control.bg(p.surface))
            .style(".slider-thumb", PartialStyle::new().bg(p.accent).roundness(self.radius))
            .style(".slider:active .slider-thumb", PartialStyle::new().bg(p.text))
            .style(".text-box", control.bg(p.surface).margins(4.0))
            .style(".text-box:focused", PartialStyle::new().border_color(p.accent))
            .style(".text-box-caret", PartialStyle::new().bg(p.text))
            .style(".text-box-selection", PartialStyle::new().bg(p.selection))
            .style(".menu-bar", PartialStyle::new().bg(p.surface).spacing(2.0))
            .style(".menu", PartialStyle::new().margins(4.0).roundness(self.radius))
            .style(".menu:hot", PartialStyle::new().bg(p.hover))
            .style(
                ".menu-panel",
                PartialStyle::new()
                    .bg(p.surface)
                    .border_color(p.border)
                    .border_size(1.0)
                    .roundness(self.radius)
                    .margins(2.0),
            )
            .style(".menu-item", PartialStyle::new().margins(4.0).roundness(self.radius))
            .style(".menu-item:hot", PartialStyle::new().bg(p.hover))
            .style(
                ".panel",
                PartialStyle::new()
                    .bg(p.surface)
                    .border_color(p.border)
                    .border_size(1.0)
                    .margins(6.0)
                    .spacing(4.0),
            )
            .apply()?;
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Pattern;

    #[test]
    fn themes_build() -> Result<()> {
        for theme in [Theme::dark(), Theme::light()] {
            let rules = theme.rules()?;
            assert!(rules.len() > 10);
            let hot = Pattern::parse(".button:hot")?;
            assert!(rules.iter().any(|r| r.pattern == hot));
        }
        Ok(())
    }

    #[test]
    fn light_and_dark_differ() {
        assert_ne!(Theme::dark().palette, Theme::light().palette);
        assert_eq!(Theme::dark().radius, Theme::light().radius);
    }
}
