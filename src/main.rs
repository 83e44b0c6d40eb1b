mod app;
mod config;
mod domain;
mod infra;
mod platform;
mod ui;
mod usecase;


use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::app::{App, AppServices};
use crate::config::{Config, LoggingConfig};
use crate::platform::desktop::paths::default_webview_data_dir;

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("datalens={}", logging.level)));
    let registry = tracing_subscriber::registry().with(filter);

    if logging.json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn main() -> anyhow::Result<()> {
    let loaded = Config::resolve_path().and_then(|path| Config::load(&path));
    let config = match &loaded {
        Ok(config) => config.clone(),
        Err(_) => Config::default(),
    };
    init_tracing(&config.logging);
    if let Err(err) = loaded {
        tracing::warn!("using default configuration: {err:#}");
    }

    tracing::info!("Starting DataLens v{}", env!("CARGO_PKG_VERSION"));
    let services = AppServices::from_config(&config)?;
    let webview_data_dir = default_webview_data_dir()?;

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(dioxus::desktop::WindowBuilder::new().with_title("DataLens"))
                .with_data_directory(webview_data_dir),
        )
        .with_context(services)
        .launch(App);

    Ok(())
}
