use crate::config::Placement;
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use gtk4_layer_shell::{Edge, Layer, LayerShell};

pub fn init_placement(window: &gtk::ApplicationWindow, placement: Placement) {
    let layer = match placement {
        Placement::Overlay => Layer::Overlay,
        Placement::Top => Layer::Top,
        Placement::Window => {
            window.fullscreen();
            return;
        }
    };

    if !gtk4_layer_shell::is_supported() {
        log::warn!("Compositor has no layer-shell support, using a fullscreen window");
        window.fullscreen();
        return;
    }

    window.init_layer_shell();
    window.set_layer(layer);
    window.set_namespace(Some("magdock"));
    window.set_exclusive_zone(-1);
    for edge in [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom] {
        window.set_anchor(edge, true);
    }
    window.set_keyboard_mode(gtk4_layer_shell::KeyboardMode::OnDemand);
}

/// Width of the monitor showing `window`, or of the first monitor before the
/// window is mapped.
pub fn monitor_width(window: &gtk::ApplicationWindow) -> Option<f64> {
    let display = gdk::Display::default()?;
    window
        .surface()
        .and_then(|s| display.monitor_at_surface(&s))
        .or_else(|| {
            let monitors = display.monitors();
            (0..monitors.n_items()).find_map(|i| {
                monitors
                    .item(i)
                    .and_then(|item| item.downcast::<gdk::Monitor>().ok())
            })
        })
        .map(|m| m.geometry().width() as f64)
}
