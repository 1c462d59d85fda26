mod config;
mod dates;
mod import;
mod logging;
mod models;
mod run;
mod selector;
mod store;
mod ui;

use anyhow::Result;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let dirs = config::AppDirs::locate()?;
    let settings = config::Settings::load(&dirs.settings_path())?;
    logging::init(&dirs.log_path()?, &settings.log_filter)?;
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        settings = %dirs.settings_path().display(),
        "billtrack starting"
    );

    match args.len() {
        1 => run::as_tui(
            store::BillStore::with_sample_bills(settings.monthly_budget),
            &settings,
        ),
        2.. => run::as_cli(&args, &settings),
        _ => {
            eprintln!("Usage: billtrack [command]");
            Ok(())
        }
    }
}
