//! Integration tests for the built-in widgets.

#[cfg(test)]
mod tests {
    use trellis::{
        Rect, Result, Theme, Ui,
        input::{KeyCode, Mods, MouseButton},
        testing::{Harness, RecordingCanvas},
        widgets,
    };

    #[test]
    fn themed_button_clicks() -> Result<()> {
        let mut h = Harness::new()?.with_theme(&Theme::dark())?;
        let build = |ui: &mut Ui| widgets::button(ui, "OK");
        h.frame(build);
        let id = h.ui().box_lookup_label("OK");
        // Two graphemes at the theme's 14px, plus the button margins.
        assert_eq!(
            id.and_then(|id| h.ui().box_rect(id)),
            Some(Rect::new(0.0, 0.0, 30.0, 22.0))
        );
        h.click(10.0, 10.0);
        assert!(h.frame(build).clicked);
        assert!(!h.frame(build).clicked);
        Ok(())
    }

    #[test]
    fn checkbox_toggles_on_click() -> Result<()> {
        let mut h = Harness::new()?;
        let mut value = false;
        h.frame(|ui| widgets::checkbox(ui, "Check", &mut value));
        let row = h.ui().box_lookup_label("Check");
        assert_eq!(
            row.and_then(|id| h.ui().box_rect(id)),
            Some(Rect::new(0.0, 0.0, 62.0, 16.0))
        );
        h.click(5.0, 5.0);
        h.frame(|ui| widgets::checkbox(ui, "Check", &mut value));
        assert!(value);
        let square = row.map(|id| h.ui().box_children(id)[0]);
        assert_eq!(square.map(|id| h.ui().box_children(id).len()), Some(1));

        h.click(50.0, 5.0);
        h.frame(|ui| widgets::checkbox(ui, "Check", &mut value));
        assert!(!value);
        Ok(())
    }

    #[test]
    fn slider_follows_press_and_drag() -> Result<()> {
        let mut h = Harness::new()?;
        let mut value = 0.0;
        h.frame(|ui| widgets::slider(ui, "volume", &mut value));
        h.mouse_move(80.0, 10.0);
        h.press(MouseButton::Left);
        h.frame(|ui| widgets::slider(ui, "volume", &mut value));
        assert_eq!(value, 0.5);
        let track = h.ui().box_lookup_label("volume");
        let thumb = track.map(|id| h.ui().box_children(id)[0]);
        assert_eq!(thumb.and_then(|id| h.ui().box_rect(id)).map(|r| r.tl.x), Some(74.0));

        h.mouse_move(400.0, 300.0);
        let sig = h.frame(|ui| widgets::slider(ui, "volume", &mut value));
        assert!(sig.dragging && !sig.hovering);
        assert_eq!(value, 1.0);
        h.release(MouseButton::Left);
        h.frame(|ui| widgets::slider(ui, "volume", &mut value));
        assert_eq!(value, 1.0);
        Ok(())
    }

    #[test]
    fn text_box_edits_while_focused() -> Result<()> {
        let mut h = Harness::new()?;
        let mut text = String::new();
        h.type_text("ignored");
        h.frame(|ui| widgets::text_box(ui, "name", 200.0, &mut text));
        assert_eq!(text, "");
        let id = h.ui().box_lookup_label("name");
        assert_eq!(
            id.and_then(|id| h.ui().box_rect(id)),
            Some(Rect::new(0.0, 0.0, 200.0, 16.0))
        );

        h.click(10.0, 8.0);
        h.frame(|ui| widgets::text_box(ui, "name", 200.0, &mut text));
        assert_eq!(h.ui().focus(), id);

        h.type_text("hello");
        let resp = h.frame(|ui| widgets::text_box(ui, "name", 200.0, &mut text));
        assert!(resp.edit.changed);
        assert_eq!(text, "hello");
        let caret = id.map(|id| h.ui().box_children(id)[1]);
        assert_eq!(
            caret.and_then(|c| h.ui().box_rect(c)),
            Some(Rect::new(40.0, 0.0, 1.0, 16.0))
        );

        h.key(KeyCode::Left, Mods::NONE);
        h.key(KeyCode::Backspace, Mods::NONE);
        h.frame(|ui| widgets::text_box(ui, "name", 200.0, &mut text));
        assert_eq!(text, "helo");
        assert_eq!(h.ui().edit_state().cursor, 3);

        h.key(KeyCode::Enter, Mods::NONE);
        let resp = h.frame(|ui| widgets::text_box(ui, "name", 200.0, &mut text));
        assert!(resp.edit.accepted);
        assert_eq!(h.ui().focus(), None);
        Ok(())
    }

    #[test]
    fn text_box_click_elsewhere_drops_focus() -> Result<()> {
        let mut h = Harness::new()?;
        let mut text = String::from("abc");
        h.frame(|ui| widgets::text_box(ui, "name", 200.0, &mut text));
        // The cursor lands on the nearest boundary to the pointer.
        h.click(17.0, 8.0);
        h.frame(|ui| widgets::text_box(ui, "name", 200.0, &mut text));
        assert_eq!(h.ui().edit_state().cursor, 2);
        h.click(500.0, 500.0);
        h.frame(|ui| widgets::text_box(ui, "name", 200.0, &mut text));
        assert_eq!(h.ui().focus(), None);
        assert_eq!(h.ui().edit_state().cursor, 0);
        Ok(())
    }

    #[test]
    fn text_box_scrolls_to_the_cursor() -> Result<()> {
        let mut h = Harness::new()?;
        let mut text = String::new();
        h.frame(|ui| widgets::text_box(ui, "narrow", 40.0, &mut text));
        h.click(5.0, 5.0);
        h.frame(|ui| widgets::text_box(ui, "narrow", 40.0, &mut text));
        h.type_text("abcdefghij");
        h.frame(|ui| widgets::text_box(ui, "narrow", 40.0, &mut text));
        assert_eq!(h.ui().edit_state().first_displayed, 5);
        let id = h.ui().box_lookup_label("narrow");
        let shown = id.map(|id| h.ui().box_children(id)[0]);
        assert_eq!(shown.and_then(|s| h.ui().box_text(s)), Some("fghij"));
        Ok(())
    }

    /// A menu bar with one menu and a button beneath it. Returns whether the
    /// item and the button were clicked.
    fn menus(ui: &mut Ui) -> (bool, bool, bool) {
        let mut item = false;
        widgets::menu_bar_begin(ui);
        let open = widgets::menu_begin(ui, "File");
        if open {
            item = widgets::menu_item(ui, "Open").clicked;
            widgets::menu_end(ui);
        }
        widgets::menu_bar_end(ui);
        let below = widgets::button(ui, "Below").clicked;
        (open, item, below)
    }

    #[test]
    fn menu_opens_and_item_click_closes_it() -> Result<()> {
        let mut h = Harness::new()?;
        assert_eq!(h.frame(menus), (false, false, false));
        h.click(10.0, 8.0);
        assert_eq!(h.frame(menus), (true, false, false));

        h.mouse_move(10.0, 20.0);
        assert_eq!(h.frame(menus), (true, false, false));
        let below = h.ui().box_lookup_label("Below");
        assert_eq!(below.and_then(|id| h.ui().box_view(id)).map(|v| v.hovering), Some(false));

        h.click(10.0, 20.0);
        assert_eq!(h.frame(menus), (true, true, false));
        assert_eq!(h.frame(menus), (false, false, false));
        Ok(())
    }

    #[test]
    fn menu_closes_on_outside_press() -> Result<()> {
        let mut h = Harness::new()?;
        h.frame(menus);
        h.click(10.0, 8.0);
        assert!(h.frame(menus).0);
        h.click(400.0, 300.0);
        assert!(!h.frame(menus).0);
        Ok(())
    }

    #[test]
    fn menu_panels_paint_over_later_siblings() -> Result<()> {
        let mut h = Harness::new()?;
        h.frame(menus);
        h.click(10.0, 8.0);
        h.frame(menus);
        let canvas = RecordingCanvas { cmds: h.draw() };
        assert_eq!(canvas.texts(), vec!["File", "Below", "Open"]);
        Ok(())
    }

    #[test]
    fn labels_show_display_text() -> Result<()> {
        let mut h = Harness::new()?;
        let id = h.frame(|ui| widgets::label(ui, "Name###name-label"));
        assert_eq!(h.ui().box_text(id), Some("Name"));
        let canvas = RecordingCanvas { cmds: h.draw() };
        assert_eq!(canvas.texts(), vec!["Name"]);
        Ok(())
    }
}
