use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::state::{App, LoadTicket};
use crate::api::ApiClient;

type Notify = Arc<dyn Fn() + Send + Sync>;

/// What happened to a batch once its task finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The result settled the dashboard
    Applied,
    /// A newer batch had started; the result was dropped
    Stale,
    /// The batch was cancelled before it resolved
    Cancelled,
}

/// Runs snapshot batches on the tokio runtime and feeds the results back
/// into the shared [`App`].
#[derive(Clone)]
pub struct Loader {
    client: ApiClient,
    app: Arc<Mutex<App>>,
    runtime: Handle,
    notify: Notify,
}

impl Loader {
    pub fn new(client: ApiClient, app: Arc<Mutex<App>>, runtime: Handle) -> Self {
        Self {
            client,
            app,
            runtime,
            notify: Arc::new(|| {}),
        }
    }

    /// Call `notify` whenever a batch settles, e.g. to request a repaint.
    pub fn with_notify(mut self, notify: impl Fn() + Send + Sync + 'static) -> Self {
        self.notify = Arc::new(notify);
        self
    }

    /// Start a fresh batch unconditionally, superseding any batch in flight.
    pub fn load(&self) -> JoinHandle<LoadOutcome> {
        let (ticket, token) = {
            let mut app = lock_app(&self.app);
            let ticket = app.dashboard.begin_load();
            (ticket, replace_token(&mut app))
        };
        self.spawn_batch(ticket, token)
    }

    /// Start a new batch if the dashboard is showing an error.
    ///
    /// Returns `None` when there is nothing to retry.
    pub fn retry(&self) -> Option<JoinHandle<LoadOutcome>> {
        let (ticket, token) = {
            let mut app = lock_app(&self.app);
            let ticket = app.dashboard.retry()?;
            (ticket, replace_token(&mut app))
        };
        tracing::info!(generation = ticket.generation(), "Retrying dashboard load");
        Some(self.spawn_batch(ticket, token))
    }

    fn spawn_batch(&self, ticket: LoadTicket, token: CancellationToken) -> JoinHandle<LoadOutcome> {
        let client = self.client.clone();
        let app = Arc::clone(&self.app);
        let notify = Arc::clone(&self.notify);
        let generation = ticket.generation();

        tracing::info!(generation, base_url = client.base_url(), "Loading dashboard snapshot");

        self.runtime.spawn(async move {
            let start_time = Instant::now();

            let result = tokio::select! {
                _ = token.cancelled() => {
                    tracing::debug!(generation, "Dashboard batch cancelled");
                    return LoadOutcome::Cancelled
                }
                result = client.fetch_snapshot() => result,
            };

            let elapsed_ms = start_time.elapsed().as_millis() as u64;
            match &result {
                Ok(_) => tracing::info!(generation, elapsed_ms, "Dashboard snapshot loaded"),
                Err(e) => {
                    tracing::warn!(generation, elapsed_ms, error = %e, "Dashboard load failed")
                }
            }

            let applied = {
                let mut app = lock_app(&app);
                let applied = app.dashboard.complete(ticket, result);
                if applied {
                    app.in_flight = None;
                }
                applied
            };
            notify();

            if applied {
                LoadOutcome::Applied
            } else {
                LoadOutcome::Stale
            }
        })
    }
}

/// Cancel the batch in flight and install a token for the next one.
fn replace_token(app: &mut App) -> CancellationToken {
    let token = CancellationToken::new();
    if let Some(previous) = app.in_flight.replace(token.clone()) {
        previous.cancel();
    }
    token
}

/// Lock the shared state, recovering it if a holder panicked.
///
/// The dashboard state is only ever replaced whole, so a poisoned guard
/// still holds a consistent value.
pub(super) fn lock_app(app: &Mutex<App>) -> MutexGuard<'_, App> {
    app.lock().unwrap_or_else(|poisoned: PoisonError<_>| {
        tracing::error!("App state lock was poisoned; recovering");
        poisoned.into_inner()
    })
}
