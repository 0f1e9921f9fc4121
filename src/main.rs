//! Wayne Enterprises BI Dashboard
//!
//! A GUI application that loads company metrics and renders them as cards
//! and charts.

use anyhow::Context as _;
use eframe::egui;
use std::sync::{Arc, Mutex};
use tokio::runtime::Runtime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use bi_dashboard::api::ApiClient;
use bi_dashboard::app::{App, AppWrapper, Loader};
use bi_dashboard::config::DashboardConfig;

const DEFAULT_LOG_FILTER: &str = if cfg!(feature = "dev") {
    "bi_dashboard=debug"
} else {
    "bi_dashboard=info"
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = DashboardConfig::from_env()?;
    let client = ApiClient::new(&config)?;
    tracing::info!(base_url = %config.base_url, "Starting dashboard");

    // Batches run here while eframe owns the main thread
    let rt = Runtime::new().context("Failed to start tokio runtime")?;

    let app = Arc::new(Mutex::new(App::default()));
    let loader = Loader::new(client, Arc::clone(&app), rt.handle().clone());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("Wayne Enterprises"),
        ..Default::default()
    };

    eframe::run_native(
        "Wayne Enterprises BI Dashboard",
        options,
        Box::new(move |cc| {
            let ctx = cc.egui_ctx.clone();
            let loader = loader.with_notify(move || ctx.request_repaint());
            loader.load();
            Ok(Box::new(AppWrapper::new(app, loader)) as Box<dyn eframe::App>)
        }),
    )
    .map_err(|e| anyhow::anyhow!("Error running application: {e}"))?;

    Ok(())
}
