//! Application shell: the load state machine, the background loader and
//! the egui view.

mod loader;
mod state;
mod ui;

pub use loader::{LoadOutcome, Loader};
pub use state::{App, AppWrapper, Dashboard, LoadState, LoadTicket, Loaded, Tab};
pub use ui::{draw_ui, UiAction};
