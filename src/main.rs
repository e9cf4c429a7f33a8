use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use ocr_watchdog::Watchdog;
use ocr_watchdog::cli::Cli;

fn load_env() {
    dotenvy::dotenv().ok();
}

fn main() -> Result<()> {
    load_env();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    let config = cli.to_config();
    config.log_summary();

    let watchdog = Watchdog::new(config);
    if cli.once {
        let summary = watchdog.run_pass().context("scan of input folder failed")?;
        info!("Single pass done: {} converted", summary.converted);
        return Ok(());
    }

    watchdog.run().context("watchdog stopped")
}
