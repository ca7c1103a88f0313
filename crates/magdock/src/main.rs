use dockfx::Dock;
use magdock::config::{self, Config};
use magdock::gui::app::AppModel;
use magdock::sys::runtime;
use relm4::prelude::*;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = config::load_or_default();
    let (config, dock) = match Dock::new(&config.dock_settings(config.screen_width(None))) {
        Ok(dock) => (config, dock),
        Err(e) => {
            log::error!("Invalid dock configuration, using defaults: {}", e);
            let config = Config::default();
            let dock = Dock::new(&config.dock_settings(config.screen_width(None)))?;
            (config, dock)
        }
    };

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx);

    let app = RelmApp::new("org.magdock.Dock");

    app.run::<AppModel>((config, dock, rx));
    Ok(())
}
