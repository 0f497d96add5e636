
use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

use service::{
    db::{DbMessageStore, DbUserStore},
    export::export_to_files,
    runtime,
};

async fn migrate(cfg: &configs::AppConfig) -> anyhow::Result<()> {
    cfg.database.validate()?;
    let db_cfg = models::db::DatabaseConfig::from(&cfg.database);
    let db = models::db::connect_and_migrate(&db_cfg).await?;

    let data_dir = runtime::ensure_env(&cfg.storage.frontend_dir, &cfg.storage.data_dir).await?;
    let messages = DbMessageStore::new(db.clone());
    let users = DbUserStore::new(db);
    let report = export_to_files(messages.as_ref(), users.as_ref(), &data_dir).await?;

    info!(
        service = "migrate_to_files",
        event = "export_report",
        messages = report.messages,
        users = report.users,
        data_dir = %data_dir.display(),
        "database exported to files"
    );
    Ok(())
}

fn main() -> std::process::ExitCode {
    dotenv().ok();
    common::utils::logging::init_logging_from_env();

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    std::panic::set_hook(Box::new(move |info| {
        error!(service = "migrate_to_files", event = "panic", %service_id, pid, message = %info, "unhandled panic occurred");
    }));

    let cfg = match configs::AppConfig::load_or_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = "migrate_to_files", event = "config_invalid", error = %e, "failed to load configuration");
            return std::process::ExitCode::FAILURE;
        }
    };

    let rt = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "migrate_to_files", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(service = "migrate_to_files", event = "start", %service_id, pid, version = env!("CARGO_PKG_VERSION"), "export starting");
    match rt.block_on(migrate(&cfg)) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            error!(service = "migrate_to_files", event = "run_failed", error = %e, "export failed");
            std::process::ExitCode::FAILURE
        }
    }
}
