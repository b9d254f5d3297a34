//! Integration tests for style cascade, rule scoping and animation.

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use trellis::{
        BoxFlags, Color, PartialStyle, Result, Style, StyleMask,
        style::{Pattern, StyleRule},
        testing::Harness,
    };

    const RED: Color = Color::rgba(1.0, 0.0, 0.0, 1.0);
    const BLUE: Color = Color::rgba(0.0, 0.0, 1.0, 1.0);

    fn bg(h: &Harness, id: trellis::BoxId) -> Option<Color> {
        h.ui().box_view(id).map(|v| v.style.bg_color)
    }

    #[test]
    fn queued_tags_apply_to_one_box() -> Result<()> {
        let mut h = Harness::new()?;
        h.ui_mut()
            .rules_mut()
            .push(StyleRule::new(Pattern::parse(".hl")?, PartialStyle::new().bg(RED)));
        let (a, b) = h.frame(|ui| {
            ui.tag_next("hl");
            let a = ui.box_make("a", BoxFlags::empty());
            let b = ui.box_make("b", BoxFlags::empty());
            (a, b)
        });
        assert_eq!(bg(&h, a), Some(RED));
        assert_eq!(bg(&h, b), Some(Color::TRANSPARENT));
        Ok(())
    }

    #[test]
    fn queued_style_applies_to_one_box() -> Result<()> {
        let mut h = Harness::new()?;
        let (a, b) = h.frame(|ui| {
            ui.style_next(PartialStyle::new().bg(RED));
            ui.style_next(PartialStyle::new().border_size(2.0));
            let a = ui.box_make("a", BoxFlags::empty());
            let b = ui.box_make("b", BoxFlags::empty());
            (a, b)
        });
        assert_eq!(bg(&h, a), Some(RED));
        assert_eq!(h.ui().box_view(a).map(|v| v.style.border_size), Some(2.0));
        assert_eq!(bg(&h, b), Some(Color::TRANSPARENT));
        Ok(())
    }

    #[test]
    fn explicit_style_sits_between_before_and_after_rules() -> Result<()> {
        let mut h = Harness::new()?;
        let (before, after) = h.frame(|ui| {
            ui.tag_next("x");
            ui.style_next(PartialStyle::new().bg(RED));
            ui.style_match_before(Pattern::parse(".x")?, PartialStyle::new().bg(BLUE));
            let before = ui.box_make("before", BoxFlags::empty());

            ui.tag_next("x");
            ui.style_next(PartialStyle::new().bg(RED));
            ui.style_match_after(Pattern::parse(".x")?, PartialStyle::new().bg(BLUE));
            let after = ui.box_make("after", BoxFlags::empty());
            Ok::<_, trellis::Error>((before, after))
        })?;
        assert_eq!(bg(&h, before), Some(RED));
        assert_eq!(bg(&h, after), Some(BLUE));
        Ok(())
    }

    #[test]
    fn rules_reach_only_descendants_of_their_owner() -> Result<()> {
        let mut h = Harness::new()?;
        let (inside, outside) = h.frame(|ui| {
            ui.style_match_before(Pattern::parse(".item")?, PartialStyle::new().bg(RED));
            let owner = ui.box_make("owner", BoxFlags::empty());
            let other = ui.box_make("other", BoxFlags::empty());
            ui.box_begin(owner);
            ui.tag_next("item");
            let inside = ui.box_make("item", BoxFlags::empty());
            ui.box_end();
            ui.box_begin(other);
            ui.tag_next("item");
            let outside = ui.box_make("item", BoxFlags::empty());
            ui.box_end();
            Ok::<_, trellis::Error>((inside, outside))
        })?;
        assert_eq!(bg(&h, inside), Some(RED));
        assert_eq!(bg(&h, outside), Some(Color::TRANSPARENT));
        Ok(())
    }

    #[test]
    fn text_properties_inherit() -> Result<()> {
        let mut h = Harness::new()?;
        let (child, sibling) = h.frame(|ui| {
            ui.style_next(PartialStyle::new().color(RED).font_size(20.0).bg(BLUE));
            let parent = ui.box_make("parent", BoxFlags::empty());
            ui.box_begin(parent);
            let child = ui.box_make("child", BoxFlags::empty());
            ui.box_end();
            let sibling = ui.box_make("sibling", BoxFlags::empty());
            (child, sibling)
        });
        let view = h.ui().box_view(child);
        assert_eq!(view.as_ref().map(|v| v.style.color), Some(RED));
        assert_eq!(view.as_ref().map(|v| v.style.font_size), Some(20.0));
        assert_eq!(view.as_ref().map(|v| v.style.bg_color), Some(Color::TRANSPARENT));
        assert_eq!(h.ui().box_view(sibling).map(|v| v.style.color), Some(Color::BLACK));
        Ok(())
    }

    #[test]
    fn frame_default_applies_by_mask() -> Result<()> {
        let mut h = Harness::new()?;
        h.ui_mut().begin_frame(
            trellis::Expanse::new(100.0, 100.0),
            &Style {
                color: RED,
                bg_color: BLUE,
                ..Style::default()
            },
            StyleMask::COLOR,
        );
        let id = h.ui_mut().box_make("a", BoxFlags::empty());
        h.ui_mut().end_frame();
        let view = h.ui().box_view(id);
        assert_eq!(view.as_ref().map(|v| v.style.color), Some(RED));
        assert_eq!(view.as_ref().map(|v| v.style.bg_color), Some(Color::TRANSPARENT));
        Ok(())
    }

    #[test]
    fn animated_fields_ease_towards_their_target() -> Result<()> {
        let mut h = Harness::new()?;
        h.set_step(Duration::from_millis(20));
        let build = |color: Color| {
            move |ui: &mut trellis::Ui| {
                ui.style_next(PartialStyle::new().bg(color).animate(0.1, StyleMask::BG_COLOR));
                ui.box_make("a", BoxFlags::empty())
            }
        };
        let id = h.frame(build(RED));
        assert_eq!(bg(&h, id), Some(RED));

        h.frame(build(BLUE));
        let mid = bg(&h, id).unwrap_or(RED);
        assert!(mid.r < 1.0 && mid.r > 0.0);
        assert!(mid.b > 0.0 && mid.b < 1.0);

        for _ in 0..60 {
            h.frame(build(BLUE));
        }
        let end = bg(&h, id).unwrap_or(RED);
        assert!(end.r < 0.01);
        assert!(end.b > 0.99);
        Ok(())
    }

    #[test]
    fn unanimated_fields_snap() -> Result<()> {
        let mut h = Harness::new()?;
        let build = |size: f32| {
            move |ui: &mut trellis::Ui| {
                ui.style_next(
                    PartialStyle::new()
                        .border_size(size)
                        .animate(1.0, StyleMask::BG_COLOR),
                );
                ui.box_make("a", BoxFlags::empty())
            }
        };
        let id = h.frame(build(1.0));
        h.frame(build(4.0));
        assert_eq!(h.ui().box_view(id).map(|v| v.style.border_size), Some(4.0));
        Ok(())
    }
}
