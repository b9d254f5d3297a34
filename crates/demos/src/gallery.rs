use tracing::info;
use trellis::{Expanse, Ui, widgets};

/// Items in the File menu.
const FILE_ITEMS: [&str; 3] = ["New", "Open", "Quit"];

/// State edited through the gallery.
#[derive(Debug, Clone, PartialEq)]
pub struct Gallery {
    /// Contents of the name field.
    pub name: String,
    /// Slider position in `0..=1`.
    pub volume: f32,
    /// Checkbox state.
    pub enabled: bool,
    /// Times the button was clicked.
    pub clicks: u32,
    /// Menu items chosen, oldest first.
    pub log: Vec<String>,
}

impl Default for Gallery {
    fn default() -> Self {
        Self {
            name: "trellis".into(),
            volume: 0.5,
            enabled: false,
            clicks: 0,
            log: Vec::new(),
        }
    }
}

impl Gallery {
    /// Describe one frame: a menu bar above a panel of controls.
    pub fn build(&mut self, ui: &mut Ui) {
        widgets::menu_bar_begin(ui);
        if widgets::menu_begin(ui, "File") {
            for item in FILE_ITEMS {
                if widgets::menu_item(ui, item).clicked {
                    info!(item, "menu item chosen");
                    self.log.push(item.to_string());
                }
            }
            widgets::menu_end(ui);
        }
        widgets::menu_bar_end(ui);

        widgets::panel_begin(ui, "controls", Expanse::new(320.0, 240.0));
        if widgets::button(ui, "Click me").clicked {
            self.clicks += 1;
            info!(clicks = self.clicks, "button clicked");
        }
        let count = widgets::label(ui, "###clicks");
        ui.box_set_text(count, &format!("Clicked {} times", self.clicks));
        widgets::checkbox(ui, "Enabled", &mut self.enabled);
        widgets::slider(ui, "Volume", &mut self.volume);
        let volume = widgets::label(ui, "###volume");
        ui.box_set_text(volume, &format!("Volume {:.0}%", self.volume * 100.0));
        widgets::text_box(ui, "Name", 200.0, &mut self.name);
        let greeting = widgets::label(ui, "###greeting");
        ui.box_set_text(greeting, &format!("Hello, {}", self.name));
        widgets::panel_end(ui);
    }
}
