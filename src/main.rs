mod app;
use flashcards_app::*;

use app::MyApp;
use log::{error, info};

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("invalid configuration: {e}");
            std::process::exit(2);
        }
    };

    let store = match CardStore::open(&config) {
        Ok(store) => store,
        Err(e) => {
            error!("failed to open card store: {e}");
            std::process::exit(1);
        }
    };

    match store.load_all() {
        Ok(cards) => info!("loaded {} flashcards", cards.len()),
        Err(e) => error!("stored flashcards are unreadable: {e}"),
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([500.0, 700.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Flashcards App",
        options,
        Box::new(|_cc| Ok(Box::new(MyApp::new(store)))),
    )
}
