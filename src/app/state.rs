use eframe::App as EApp;
use egui::TextureHandle;
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;

use super::loader::{lock_app, Loader};
use super::ui::{draw_ui, UiAction};
use crate::analysis::DashboardView;
use crate::api::ApiError;
use crate::plotting::ChartCache;
use crate::types::Snapshot;

/// Rendered chart textures kept around between frames.
const CHART_CACHE_CAPACITY: usize = 16;

/// A successfully loaded snapshot together with its derived view.
#[derive(Debug, PartialEq)]
pub struct Loaded {
    pub snapshot: Snapshot,
    pub view: DashboardView,
    /// Generation of the batch that produced this snapshot
    pub generation: u64,
}

/// Page-level load state. There is no partial success: a snapshot is either
/// complete or absent.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Loading,
    Success(Arc<Loaded>),
    Error(String),
}

/// Proof that a batch was started; only the newest ticket may settle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// The dashboard's loading / success / error state machine.
///
/// Every batch is tagged with a generation number. Results carrying an older
/// generation are dropped, so a slow abandoned batch can never overwrite the
/// outcome of a newer one.
#[derive(Debug)]
pub struct Dashboard {
    state: LoadState,
    generation: u64,
}

impl Dashboard {
    pub fn new() -> Self {
        Self {
            state: LoadState::Loading,
            generation: 0,
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading)
    }

    pub fn loaded(&self) -> Option<&Arc<Loaded>> {
        match &self.state {
            LoadState::Success(loaded) => Some(loaded),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            LoadState::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Enter `Loading` for a new batch, discarding whatever was shown.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.state = LoadState::Loading;
        LoadTicket {
            generation: self.generation,
        }
    }

    /// Start a new batch, but only from the error state.
    pub fn retry(&mut self) -> Option<LoadTicket> {
        match self.state {
            LoadState::Error(_) => Some(self.begin_load()),
            _ => None,
        }
    }

    /// Settle the batch identified by `ticket`.
    ///
    /// Returns `false` and leaves the state untouched when the ticket is
    /// stale or its batch already settled.
    pub fn complete(&mut self, ticket: LoadTicket, result: Result<Snapshot, ApiError>) -> bool {
        if ticket.generation != self.generation || !self.is_loading() {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                "Ignoring result from superseded batch"
            );
            return false;
        }

        self.state = match result {
            Ok(snapshot) => {
                let view = DashboardView::from_snapshot(&snapshot);
                LoadState::Success(Arc::new(Loaded {
                    snapshot,
                    view,
                    generation: ticket.generation,
                }))
            }
            Err(e) => LoadState::Error(e.to_string()),
        };
        true
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

/// Dashboard tabs below the executive summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Financial,
    Security,
    Research,
    SupplyChain,
    Hr,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Financial,
        Tab::Security,
        Tab::Research,
        Tab::SupplyChain,
        Tab::Hr,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Financial => "Financial",
            Tab::Security => "Security",
            Tab::Research => "R&D",
            Tab::SupplyChain => "Supply Chain",
            Tab::Hr => "HR",
        }
    }
}

/// Main application state
pub struct App {
    pub dashboard: Dashboard,
    pub selected_tab: Tab,
    /// Cancels the batch currently in flight, if any
    pub in_flight: Option<CancellationToken>,
}

impl Default for App {
    fn default() -> Self {
        Self {
            dashboard: Dashboard::new(),
            selected_tab: Tab::Financial,
            in_flight: None,
        }
    }
}

/// Thread-safe wrapper around App for use with eframe
pub struct AppWrapper {
    pub app: Arc<Mutex<App>>,
    loader: Loader,
    charts: ChartCache<TextureHandle>,
}

impl AppWrapper {
    pub fn new(app: Arc<Mutex<App>>, loader: Loader) -> Self {
        Self {
            app,
            loader,
            charts: ChartCache::new(CHART_CACHE_CAPACITY),
        }
    }
}

impl EApp for AppWrapper {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // The loader takes the same lock, so act on the UI only after
        // releasing it.
        let action = draw_ui(&mut lock_app(&self.app), ctx, &mut self.charts);

        if let Some(UiAction::Retry) = action {
            self.loader.retry();
        }
    }
}
