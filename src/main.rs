mod app;

use app::VocabApp;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use vocab_app::config::AppConfig;
use vocab_app::database::{VocabStore, db};

const SAMPLE_WORDS: &str = "hello  xin chào\nthank you  cảm ơn\nplease  làm ơn";

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(AppConfig::default_path);
    let config = AppConfig::load_or_default(&config_path);

    if let Err(err) = config.prepare_data_dir() {
        error!(path = %config.database_path.display(), error = %err, "cannot create data directory");
        std::process::exit(1);
    }

    let conn = match db::open_database(&config.database_path) {
        Ok(conn) => conn,
        Err(err) => {
            error!(path = %config.database_path.display(), error = %err, "failed to open database");
            std::process::exit(1);
        }
    };
    let mut store = VocabStore::new(conn);

    if store.lists(&config.owner_id).unwrap_or_default().is_empty() {
        let seeded = store
            .create_list(&config.owner_id, "Sample words", None)
            .and_then(|list| store.add_words_bulk(&config.owner_id, list.id, SAMPLE_WORDS));
        match seeded {
            Ok(words) => info!(words = words.len(), "sample list created"),
            Err(err) => error!(error = %err, "failed to create sample list"),
        }
    }

    let lists = store.lists(&config.owner_id).unwrap_or_default();
    info!(lists = lists.len(), "loaded vocabulary lists");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([640.0, 760.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Vocabulary Trainer",
        options,
        Box::new(|_cc| Ok(Box::new(VocabApp::new(store, config)))),
    )
}
