use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

use service::{Collection, RecordStore};

fn main() -> std::process::ExitCode {
    // .env first so RUST_LOG / CONFIG_PATH / CHOCAN_DATA_DIR apply
    dotenv().ok();

    let cfg = match configs::AppConfig::load_or_default() {
        Ok(cfg) => cfg,
        Err(e) => {
            common::utils::logging::init_logging_default();
            error!(service = "chocan", event = "config_invalid", error = %e, "failed to load configuration");
            return std::process::ExitCode::FAILURE;
        }
    };
    common::utils::logging::init_logging(&cfg.logging.format);

    let run_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");
    info!(service = "chocan", event = "startup", %run_id, pid, version, data_dir = %cfg.storage.data_dir, "starting");

    std::panic::set_hook(Box::new(move |info| {
        error!(service = "chocan", event = "panic", %run_id, pid, message = %info, "unhandled panic occurred");
    }));

    match run(&cfg) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            error!(service = "chocan", event = "bootstrap_failed", %run_id, error = %e, "bootstrap failed");
            std::process::ExitCode::FAILURE
        }
    }
}

fn run(cfg: &configs::AppConfig) -> anyhow::Result<()> {
    let store = RecordStore::open(&cfg.storage)?;
    for collection in Collection::ALL {
        info!(%collection, rows = store.len(collection), "collection ready");
    }

    if std::env::var("CHOCAN_BACKUP").is_ok_and(|v| v == "1") {
        let path = store.backup(&cfg.storage.backup_dir)?;
        info!(backup = %path.display(), "backup complete");
    }
    Ok(())
}
