//! Integration tests for sizing, alignment, overflow and clipping.

#[cfg(test)]
mod tests {
    use trellis::{
        Axis, BoxFlags, Expanse, PartialStyle, Rect, Result,
        style::{Align, Size},
        testing::Harness,
    };

    fn fixed(w: f32, h: f32) -> PartialStyle {
        PartialStyle::new()
            .width(Size::pixels(w))
            .height(Size::pixels(h))
    }

    #[test]
    fn default_layout_stacks_from_top_left() -> Result<()> {
        let mut h = Harness::new()?;
        let (a, b) = h.frame(|ui| {
            ui.style_next(fixed(50.0, 50.0));
            let a = ui.box_make("child", BoxFlags::empty());
            ui.style_next(fixed(20.0, 10.0));
            let b = ui.box_make("next", BoxFlags::empty());
            (a, b)
        });
        assert_eq!(h.ui().box_rect(a), Some(Rect::new(0.0, 0.0, 50.0, 50.0)));
        assert_eq!(h.ui().box_rect(b), Some(Rect::new(0.0, 50.0, 20.0, 10.0)));
        assert_eq!(h.ui().window(), Rect::new(0.0, 0.0, 800.0, 600.0));
        Ok(())
    }

    #[test]
    fn parent_sizes_follow_the_parent() -> Result<()> {
        let mut h = Harness::new()?;
        let (full, rest) = h.frame(|ui| {
            ui.style_next(fixed(200.0, 100.0).margins(10.0));
            let outer = ui.box_make("outer", BoxFlags::empty());
            ui.box_begin(outer);
            ui.style_next(
                PartialStyle::new()
                    .width(Size::parent(1.0))
                    .height(Size::parent(0.5)),
            );
            let full = ui.box_make("full", BoxFlags::empty());
            ui.style_next(
                PartialStyle::new()
                    .width(Size::parent_minus(30.0))
                    .height(Size::pixels(5.0)),
            );
            let rest = ui.box_make("rest", BoxFlags::empty());
            ui.box_end();
            (full, rest)
        });
        assert_eq!(h.ui().box_rect(full), Some(Rect::new(10.0, 10.0, 180.0, 40.0)));
        assert_eq!(h.ui().box_rect(rest), Some(Rect::new(10.0, 50.0, 150.0, 5.0)));
        Ok(())
    }

    #[test]
    fn children_sizes_sum_along_the_axis() -> Result<()> {
        let mut h = Harness::new()?;
        let (row, col) = h.frame(|ui| {
            ui.style_next(
                PartialStyle::new()
                    .width(Size::children())
                    .height(Size::children())
                    .spacing(5.0),
            );
            let col = ui.box_make("col", BoxFlags::empty());
            ui.box_begin(col);
            ui.style_next(fixed(30.0, 10.0));
            ui.box_make("a", BoxFlags::empty());
            ui.style_next(fixed(40.0, 20.0));
            ui.box_make("b", BoxFlags::empty());
            ui.box_end();

            ui.style_next(
                PartialStyle::new()
                    .width(Size::children())
                    .height(Size::children())
                    .axis(Axis::X)
                    .margins(2.0),
            );
            let row = ui.box_make("row", BoxFlags::empty());
            ui.box_begin(row);
            ui.style_next(fixed(30.0, 10.0));
            ui.box_make("a", BoxFlags::empty());
            ui.style_next(fixed(40.0, 20.0));
            ui.box_make("b", BoxFlags::empty());
            ui.box_end();
            (row, col)
        });
        assert_eq!(h.ui().box_rect(col), Some(Rect::new(0.0, 0.0, 40.0, 35.0)));
        assert_eq!(h.ui().box_rect(row), Some(Rect::new(0.0, 35.0, 74.0, 24.0)));
        Ok(())
    }

    #[test]
    fn text_size_measures_display_text() -> Result<()> {
        let mut h = Harness::new()?;
        let id = h.frame(|ui| {
            ui.style_next(PartialStyle::new().margins(3.0));
            ui.box_make("hello##greeting", BoxFlags::DRAW_TEXT)
        });
        // Five graphemes at half of the default 16px font.
        assert_eq!(h.ui().box_rect(id), Some(Rect::new(0.0, 0.0, 46.0, 22.0)));
        Ok(())
    }

    #[test]
    fn alignment_places_children_in_free_space() -> Result<()> {
        let mut h = Harness::new()?;
        let (centered, end) = h.frame(|ui| {
            ui.style_next(
                fixed(100.0, 100.0)
                    .align(Axis::X, Align::Center)
                    .align(Axis::Y, Align::End),
            );
            let outer = ui.box_make("outer", BoxFlags::empty());
            ui.box_begin(outer);
            ui.style_next(fixed(20.0, 10.0));
            let centered = ui.box_make("a", BoxFlags::empty());
            ui.style_next(fixed(40.0, 10.0));
            let end = ui.box_make("b", BoxFlags::empty());
            ui.box_end();
            (centered, end)
        });
        assert_eq!(h.ui().box_rect(centered), Some(Rect::new(40.0, 80.0, 20.0, 10.0)));
        assert_eq!(h.ui().box_rect(end), Some(Rect::new(30.0, 90.0, 40.0, 10.0)));
        Ok(())
    }

    #[test]
    fn floating_children_leave_the_flow() -> Result<()> {
        let mut h = Harness::new()?;
        let (float, flow) = h.frame(|ui| {
            ui.style_next(fixed(100.0, 100.0).margins(5.0));
            let outer = ui.box_make("outer", BoxFlags::empty());
            ui.box_begin(outer);
            ui.style_next(fixed(10.0, 10.0).float(Axis::X, 60.0).float(Axis::Y, 70.0));
            let float = ui.box_make("float", BoxFlags::empty());
            ui.style_next(fixed(10.0, 10.0));
            let flow = ui.box_make("flow", BoxFlags::empty());
            ui.box_end();
            (float, flow)
        });
        assert_eq!(h.ui().box_rect(float), Some(Rect::new(60.0, 70.0, 10.0, 10.0)));
        assert_eq!(h.ui().box_rect(flow), Some(Rect::new(5.0, 5.0, 10.0, 10.0)));
        Ok(())
    }

    #[test]
    fn overflow_shrinks_by_relax_budget() -> Result<()> {
        let mut h = Harness::new()?;
        let kids = h.frame(|ui| {
            ui.style_next(fixed(100.0, 20.0).axis(Axis::X));
            let row = ui.box_make("row", BoxFlags::empty());
            ui.box_begin(row);
            let mut kids = Vec::new();
            for label in ["a", "b"] {
                ui.style_next(
                    PartialStyle::new()
                        .width(Size::pixels(80.0).relaxed(0.5, 0.0))
                        .height(Size::pixels(20.0)),
                );
                kids.push(ui.box_make(label, BoxFlags::empty()));
            }
            ui.box_end();
            kids
        });
        assert_eq!(h.ui().box_rect(kids[0]), Some(Rect::new(0.0, 0.0, 50.0, 20.0)));
        assert_eq!(h.ui().box_rect(kids[1]), Some(Rect::new(50.0, 0.0, 50.0, 20.0)));
        Ok(())
    }

    #[test]
    fn relaxing_stops_at_min_size() -> Result<()> {
        let mut h = Harness::new()?;
        let kids = h.frame(|ui| {
            ui.style_next(fixed(100.0, 20.0).axis(Axis::X));
            let row = ui.box_make("row", BoxFlags::empty());
            ui.box_begin(row);
            let mut kids = Vec::new();
            for label in ["a", "b"] {
                ui.style_next(
                    PartialStyle::new()
                        .width(Size::pixels(80.0).relaxed(1.0, 60.0))
                        .height(Size::pixels(20.0)),
                );
                kids.push(ui.box_make(label, BoxFlags::empty()));
            }
            ui.box_end();
            kids
        });
        for id in kids {
            assert_eq!(h.ui().box_rect(id).map(|r| r.w), Some(60.0));
        }
        Ok(())
    }

    #[test]
    fn allowed_overflow_keeps_sizes() -> Result<()> {
        let mut h = Harness::new()?;
        let (row, kid) = h.frame(|ui| {
            ui.style_next(fixed(100.0, 20.0).axis(Axis::X));
            let row = ui.box_make("row", BoxFlags::OVERFLOW_ALLOW_X);
            ui.box_begin(row);
            ui.style_next(
                PartialStyle::new()
                    .width(Size::pixels(150.0).relaxed(1.0, 0.0))
                    .height(Size::pixels(20.0)),
            );
            let kid = ui.box_make("a", BoxFlags::empty());
            ui.box_end();
            (row, kid)
        });
        assert_eq!(h.ui().box_rect(kid).map(|r| r.w), Some(150.0));
        assert_eq!(h.ui().box_view(row).map(|v| v.content), Some(Expanse::new(150.0, 20.0)));
        Ok(())
    }

    #[test]
    fn clip_nests_through_clipping_boxes() -> Result<()> {
        let mut h = Harness::new()?;
        let inner = h.frame(|ui| {
            ui.style_next(fixed(50.0, 50.0));
            let outer = ui.box_make("outer", BoxFlags::CLIP);
            ui.box_begin(outer);
            ui.style_next(fixed(80.0, 30.0));
            let inner = ui.box_make("inner", BoxFlags::empty());
            ui.box_end();
            inner
        });
        let view = h.ui().box_view(inner);
        assert_eq!(view.as_ref().map(|v| v.clip), Some(Rect::new(0.0, 0.0, 50.0, 50.0)));
        assert_eq!(view.as_ref().map(|v| v.rect), Some(Rect::new(0.0, 0.0, 80.0, 30.0)));
        Ok(())
    }

    #[test]
    fn resizing_the_window_resizes_the_root() -> Result<()> {
        let mut h = Harness::new()?;
        h.set_size(Expanse::new(320.0, 200.0));
        let id = h.frame(|ui| {
            ui.style_next(
                PartialStyle::new()
                    .width(Size::parent(0.5))
                    .height(Size::parent(1.0)),
            );
            ui.box_make("half", BoxFlags::empty())
        });
        assert_eq!(h.ui().box_rect(id), Some(Rect::new(0.0, 0.0, 160.0, 200.0)));
        Ok(())
    }
}
