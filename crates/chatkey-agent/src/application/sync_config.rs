//! Keeps a page's [`ConfigCell`] in step with the settings store.
//!
//! The cell is replaced wholesale on every refresh (last writer wins) and
//! cleared — not left stale — when a load fails or times out: a page with
//! unknown configuration must behave as if the engine were absent.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

use crate::infrastructure::settings::{resolve_domain_config, SettingsStore};

use super::page_agent::ConfigCell;

/// Upper bound on a settings load.  A store that cannot answer within this
/// window is treated as "no configuration" for the page.
pub const CONFIG_LOAD_TIMEOUT: Duration = Duration::from_secs(5);

/// Single-writer refresher for one page's configuration.
pub struct ConfigSync {
    store: Arc<dyn SettingsStore>,
    cell: ConfigCell,
    origin: String,
}

impl ConfigSync {
    pub fn new(store: Arc<dyn SettingsStore>, cell: ConfigCell, origin: impl Into<String>) -> Self {
        Self {
            store,
            cell,
            origin: origin.into(),
        }
    }

    /// Loads the schema once and replaces the cell contents.
    ///
    /// Failures and timeouts clear the cell (fail closed); they are logged
    /// and never propagated — a broken settings store must not surface as
    /// an error anywhere near the keystroke path.
    pub async fn refresh(&self) {
        match tokio::time::timeout(CONFIG_LOAD_TIMEOUT, self.store.load()).await {
            Ok(Ok(schema)) => {
                let config = resolve_domain_config(&schema, &self.origin);
                debug!(origin = %self.origin, enabled = config.enabled, "configuration refreshed");
                self.cell.replace(Some(config));
            }
            Ok(Err(error)) => {
                warn!(origin = %self.origin, %error, "settings load failed; interception disabled");
                self.cell.replace(None);
            }
            Err(_) => {
                warn!(origin = %self.origin, "settings load timed out; interception disabled");
                self.cell.replace(None);
            }
        }
    }

    /// Performs the initial load, then refreshes on every change
    /// notification until the store's change channel closes.
    pub async fn run(self) {
        let mut changes = self.store.changes();
        self.refresh().await;
        loop {
            match changes.recv().await {
                // A lagged receiver just missed intermediate states; the
                // latest schema is all that matters.
                Ok(_) | Err(RecvError::Lagged(_)) => self.refresh().await,
                Err(RecvError::Closed) => break,
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
