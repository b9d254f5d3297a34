//! Integration tests for interaction signals, scrolling and focus.

#[cfg(test)]
mod tests {
    use trellis::{
        BoxFlags, Expanse, PartialStyle, Point, Result, Ui,
        input::MouseButton,
        style::Size,
        testing::Harness,
        widgets,
    };

    fn square(ui: &mut Ui, label: &str, flags: BoxFlags) -> trellis::BoxId {
        ui.style_next(
            PartialStyle::new()
                .width(Size::pixels(100.0))
                .height(Size::pixels(100.0)),
        );
        ui.box_make(label, flags)
    }

    fn target(ui: &mut Ui) -> trellis::Signal {
        let id = square(ui, "target", BoxFlags::CLICKABLE);
        ui.box_sig(id)
    }

    #[test]
    fn press_and_release_in_place_clicks() -> Result<()> {
        let mut h = Harness::new()?;
        h.frame(target);
        h.click(50.0, 50.0);
        let sig = h.frame(target);
        assert!(sig.hovering);
        assert!(sig.pressed);
        assert!(sig.released);
        assert!(sig.clicked);
        assert_eq!(sig.mouse, Point::new(50.0, 50.0));
        assert_eq!(h.ui().active(), None);
        Ok(())
    }

    #[test]
    fn press_across_frames_then_release_clicks() -> Result<()> {
        let mut h = Harness::new()?;
        h.frame(target);
        h.mouse_move(50.0, 50.0);
        h.press(MouseButton::Left);
        let sig = h.frame(target);
        assert!(sig.pressed && !sig.clicked);
        assert!(h.ui().active().is_some());
        h.release(MouseButton::Left);
        let sig = h.frame(target);
        assert!(sig.released && sig.clicked);
        assert!(!sig.pressed);
        assert_eq!(h.ui().active(), None);
        Ok(())
    }

    #[test]
    fn dragging_outlives_hover() -> Result<()> {
        let mut h = Harness::new()?;
        h.frame(target);
        h.mouse_move(50.0, 50.0);
        h.press(MouseButton::Left);
        let sig = h.frame(target);
        assert!(!sig.dragging);

        h.mouse_move(500.0, 500.0);
        let sig = h.frame(target);
        assert!(sig.dragging);
        assert!(!sig.hovering);
        assert_eq!(sig.delta, Point::new(450.0, 450.0));

        h.release(MouseButton::Left);
        let sig = h.frame(target);
        assert!(sig.released);
        assert!(!sig.clicked);
        let sig = h.frame(target);
        assert!(!sig.dragging);
        Ok(())
    }

    #[test]
    fn quick_second_click_is_a_double_click() -> Result<()> {
        let mut h = Harness::new()?;
        h.frame(target);
        h.click(50.0, 50.0);
        let first = h.frame(target);
        h.click(50.0, 50.0);
        let second = h.frame(target);
        assert!(first.clicked && !first.double_clicked);
        assert!(second.clicked && second.double_clicked);
        Ok(())
    }

    #[test]
    fn press_elsewhere_does_not_activate() -> Result<()> {
        let mut h = Harness::new()?;
        h.frame(target);
        h.click(300.0, 300.0);
        let sig = h.frame(target);
        assert!(!sig.hovering && !sig.pressed && !sig.clicked);
        Ok(())
    }

    #[test]
    fn leaving_the_window_stops_hover() -> Result<()> {
        let mut h = Harness::new()?;
        h.frame(target);
        h.mouse_move(10.0, 10.0);
        assert!(h.frame(target).hovering);
        h.event(trellis::input::Event::MouseLeave);
        assert!(!h.frame(target).hovering);
        Ok(())
    }

    #[test]
    fn hot_follows_hover_until_another_box_is_active() -> Result<()> {
        let mut h = Harness::new()?;
        let build = |ui: &mut Ui| {
            let a = square(ui, "a", BoxFlags::CLICKABLE);
            let b = square(ui, "b", BoxFlags::CLICKABLE);
            (a, ui.box_sig(a), b, ui.box_sig(b))
        };
        h.frame(build);
        h.mouse_move(50.0, 50.0);
        let (a, _, _, _) = h.frame(build);
        assert_eq!(h.ui().box_view(a).map(|v| v.hot), Some(true));

        h.press(MouseButton::Left);
        h.frame(build);
        h.mouse_move(50.0, 150.0);
        let (_, _, b, sig) = h.frame(build);
        assert!(sig.hovering);
        assert_eq!(h.ui().box_view(b).map(|v| v.hot), Some(false));
        h.release(MouseButton::Left);
        h.frame(build);
        Ok(())
    }

    #[test]
    fn blocking_boxes_hide_what_lies_beneath() -> Result<()> {
        let mut h = Harness::new()?;
        let build = |ui: &mut Ui| {
            let below = square(ui, "below", BoxFlags::CLICKABLE);
            ui.style_next(
                PartialStyle::new()
                    .width(Size::pixels(100.0))
                    .height(Size::pixels(100.0))
                    .float(trellis::Axis::X, 0.0)
                    .float(trellis::Axis::Y, 0.0),
            );
            let cover = ui.box_make("cover", BoxFlags::BLOCK_MOUSE | BoxFlags::OVERLAY);
            ui.box_begin(cover);
            let inner = square(ui, "inner", BoxFlags::CLICKABLE);
            ui.box_end();
            (ui.box_sig(below), ui.box_sig(inner))
        };
        h.frame(build);
        h.mouse_move(50.0, 50.0);
        h.frame(build);
        let (below, inner) = h.frame(build);
        assert!(!below.hovering);
        assert!(inner.hovering);
        Ok(())
    }

    #[test]
    fn wheel_scrolls_within_content() -> Result<()> {
        let mut h = Harness::new()?;
        let build = |ui: &mut Ui| {
            let panel = widgets::panel_begin(ui, "list", Expanse::new(100.0, 100.0));
            for i in 0..10 {
                widgets::label(ui, &format!("row {i}"));
            }
            widgets::panel_end(ui);
            panel
        };
        let panel = h.frame(build);
        assert_eq!(h.ui().box_view(panel).map(|v| v.content.h), Some(160.0));

        h.mouse_move(50.0, 50.0);
        h.wheel(0.0, -25.0);
        h.frame(build);
        assert_eq!(h.ui().box_scroll(panel), Some(Point::new(0.0, 25.0)));

        h.wheel(0.0, -500.0);
        h.frame(build);
        assert_eq!(h.ui().box_scroll(panel), Some(Point::new(0.0, 60.0)));
        let first = h.ui().box_children(panel)[0];
        assert_eq!(h.ui().box_rect(first).map(|r| r.tl.y), Some(-60.0));

        h.wheel(0.0, 500.0);
        h.frame(build);
        assert_eq!(h.ui().box_scroll(panel), Some(Point::zero()));
        Ok(())
    }

    #[test]
    fn only_the_innermost_scroller_takes_the_wheel() -> Result<()> {
        let mut h = Harness::new()?;
        let build = |ui: &mut Ui| {
            let outer = widgets::panel_begin(ui, "outer", Expanse::new(200.0, 100.0));
            let inner = widgets::panel_begin(ui, "inner", Expanse::new(100.0, 50.0));
            for i in 0..10 {
                widgets::label(ui, &format!("row {i}"));
            }
            widgets::panel_end(ui);
            for i in 0..10 {
                widgets::label(ui, &format!("more {i}"));
            }
            widgets::panel_end(ui);
            (outer, inner)
        };
        h.frame(build);
        h.mouse_move(20.0, 20.0);
        h.wheel(0.0, -10.0);
        let (outer, inner) = h.frame(build);
        assert_eq!(h.ui().box_scroll(inner), Some(Point::new(0.0, 10.0)));
        assert_eq!(h.ui().box_scroll(outer), Some(Point::zero()));
        Ok(())
    }

    #[test]
    fn focus_moves_reset_editing() -> Result<()> {
        let mut h = Harness::new()?;
        let (a, b) = h.frame(|ui| {
            (
                ui.box_make("a", BoxFlags::empty()),
                ui.box_make("b", BoxFlags::empty()),
            )
        });
        h.ui_mut().set_focus(Some(a));
        h.ui_mut().edit_state_mut().set_cursor(3);
        h.ui_mut().set_focus(Some(a));
        assert_eq!(h.ui().edit_state().cursor, 3);
        h.ui_mut().set_focus(Some(b));
        assert_eq!(h.ui().edit_state().cursor, 0);
        h.frame(|ui| {
            ui.box_make("a", BoxFlags::empty());
        });
        assert_eq!(h.ui().focus(), None);
        Ok(())
    }

    #[test]
    fn paste_reaches_the_focused_box() -> Result<()> {
        let mut h = Harness::new()?;
        let id = h.frame(|ui| ui.box_make("a", BoxFlags::empty()));
        h.ui_mut().set_focus(Some(id));
        h.paste("clip");
        let sig = h.frame(|ui| {
            let id = ui.box_make("a", BoxFlags::empty());
            ui.box_sig(id)
        });
        assert!(sig.pasted);
        Ok(())
    }
}
