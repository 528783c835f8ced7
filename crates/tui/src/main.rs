mod app;
mod config;
mod error;
mod form;
mod ui;

use std::{fs::OpenOptions, sync::Mutex};

use crate::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load()?;

    // The terminal belongs to the UI, so logs go to a file in the data dir.
    std::fs::create_dir_all(&config.data_dir)?;
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(config.log_path())?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .with_env_filter(config.log_filter())
        .init();

    let mut app = app::App::new(config)?;
    app.run().await?;
    Ok(())
}
