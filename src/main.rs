mod chart;
mod color;
mod config;
mod controls;
mod data;
mod error;
mod page;
mod reactive;
mod render;
mod server;
mod state;

use std::sync::Arc;

use anyhow::{Context, Result};

use config::DashConfig;
use state::AppContext;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = DashConfig::load().context("loading configuration")?;

    // No data, no dashboard: loading errors abort startup.
    let dataset = data::loader::load_file(&config.data_path)?;
    log::info!("Launch sites: {}", dataset.distinct_sites().join(", "));

    let ctx = Arc::new(AppContext::new(dataset));
    server::serve(config.bind_addr, ctx).await
}
