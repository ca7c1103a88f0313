use crate::config::{ColorConfig, ColorSpec};
use gtk::gdk;
use gtk4 as gtk;
use palette::{Srgb, Srgba, WithAlpha};

pub const SHADOW_ALPHA: f64 = 0.35;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DockColors {
    pub background: Srgba<f64>,
    pub container: Srgba<f64>,
    pub even: Srgba<f64>,
    pub odd: Srgba<f64>,
    pub shadow: Srgba<f64>,
}

impl DockColors {
    pub fn from_config(colors: &ColorConfig) -> Self {
        Self {
            background: Self::opaque(colors.background),
            container: Self::opaque(colors.container),
            even: Self::opaque(colors.even),
            odd: Self::opaque(colors.odd),
            shadow: Self::opaque(colors.shadow).with_alpha(SHADOW_ALPHA),
        }
    }

    fn opaque(color: ColorSpec) -> Srgba<f64> {
        let rgb: Srgb<u8> = color.into();
        Srgba::from(rgb.into_format::<f64>())
    }

    pub fn for_box(&self, index: usize) -> Srgba<f64> {
        if index % 2 == 1 { self.odd } else { self.even }
    }
}

impl Default for DockColors {
    fn default() -> Self {
        Self::from_config(&ColorConfig::default())
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.magdock-window, .magdock-drawing-area {
    background: none;
    background-color: transparent;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
