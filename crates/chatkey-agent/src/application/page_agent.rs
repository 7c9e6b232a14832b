//! The per-page dispatch controller.
//!
//! One [`PageAgent`] exists per page.  The embedding host owns the real
//! listener registration; it consults [`PageAgent::listener_spec`] once at
//! startup, then forwards every native keydown through
//! [`PageAgent::on_keydown`] and honors the returned [`Disposition`]
//! (suppress the native event, or leave it alone).
//!
//! The agent itself is synchronous and never blocks: the only asynchronous
//! collaborator, the settings store, feeds it through the [`ConfigCell`]
//! that [`ConfigSync`](super::sync_config::ConfigSync) refreshes wholesale.

use std::sync::{Arc, RwLock};

use tracing::{debug, trace};

use chatkey_core::{resolve_key_action, DomainConfig, KeyAction, KeyPress, NativeSendKey, Phase};

use crate::adapters::{AdapterRegistry, ListenerTarget, SiteAdapter};
use crate::dom::DomNode;

/// Last-known per-origin configuration for one page.
///
/// Single-writer: only the config sync task calls [`ConfigCell::replace`],
/// and it always swaps the whole value (last writer wins).  Readers take a
/// snapshot per keystroke, so an in-flight decision is never affected by a
/// concurrent refresh.  `None` means "not loaded yet" and suppresses all
/// interception (fail closed).
#[derive(Clone, Default)]
pub struct ConfigCell {
    inner: Arc<RwLock<Option<DomainConfig>>>,
}

impl ConfigCell {
    /// An empty cell: interception stays off until the first load lands.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the cached configuration wholesale.
    pub fn replace(&self, config: Option<DomainConfig>) {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *guard = config;
    }

    /// Snapshot of the current configuration.
    pub fn snapshot(&self) -> Option<DomainConfig> {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

/// What the host must do with the native event it just delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Prevent default and stop immediate propagation; the adapter action
    /// for the given [`KeyAction`] has already run.
    Intercepted(KeyAction),
    /// Leave the native event alone.
    Ignored,
}

/// Listener wiring the host must perform for this page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerSpec {
    /// Where the capture-phase keydown listener belongs.
    pub capture_target: ListenerTarget,
    /// Whether a bubble-phase keydown listener on the document is needed.
    /// Only Ctrl+Enter-convention sites use the bubble phase.
    pub bubble_listener: bool,
}

/// Detects macOS from a `navigator.platform`-style string.
pub fn is_mac_platform(platform: &str) -> bool {
    platform.to_uppercase().contains("MAC")
}

/// The per-page dispatch controller.
pub struct PageAgent<D: DomNode> {
    adapter: Arc<dyn SiteAdapter<D>>,
    config: ConfigCell,
    is_mac: bool,
}

impl<D: DomNode + 'static> PageAgent<D> {
    /// Resolves the adapter for `hostname` and wires an empty config cell.
    pub fn new(registry: &AdapterRegistry<D>, hostname: &str, is_mac: bool) -> Self {
        let adapter = registry.get(hostname);
        debug!(site = adapter.name(), hostname, "page agent ready");
        Self {
            adapter,
            config: ConfigCell::new(),
            is_mac,
        }
    }

    /// Name of the adapter serving this page.
    pub fn adapter_name(&self) -> &'static str {
        self.adapter.name()
    }

    /// Handle to the config cell, for the config sync task.
    pub fn config(&self) -> ConfigCell {
        self.config.clone()
    }

    /// The listener wiring this page needs.
    pub fn listener_spec(&self) -> ListenerSpec {
        ListenerSpec {
            capture_target: self.adapter.listener_target(),
            bubble_listener: self.adapter.convention() == NativeSendKey::CtrlEnter,
        }
    }

    /// Processes one native keydown.
    ///
    /// Runs the full decision chain — enablement, editable classification,
    /// key-action resolution — and performs the adapter action for Send and
    /// Newline outcomes exactly once before returning.  Never panics and
    /// never re-enters: adapter effects are synthetic (untrusted) events,
    /// which the resolver's trust gate discards if they come back around.
    pub fn on_keydown(
        &self,
        event: &KeyPress,
        target: Option<&D>,
        phase: Phase,
        default_prevented: bool,
    ) -> Disposition {
        let Some(config) = self.config.snapshot() else {
            // No configuration yet: behave as if the engine were absent.
            return Disposition::Ignored;
        };
        if !config.enabled {
            return Disposition::Ignored;
        }

        let Some(element) = target else {
            return Disposition::Ignored;
        };
        if !self.adapter.is_editable(Some(element), Some(&config)) {
            trace!(site = self.adapter.name(), "target not a composition surface");
            return Disposition::Ignored;
        }

        let action = resolve_key_action(
            event,
            self.adapter.convention(),
            self.is_mac,
            phase,
            default_prevented,
        );
        match action {
            KeyAction::Send => {
                debug!(site = self.adapter.name(), ?phase, "triggering native send");
                self.adapter.trigger_send(element);
                Disposition::Intercepted(action)
            }
            KeyAction::Newline => {
                debug!(site = self.adapter.name(), ?phase, "inserting soft break");
                self.adapter.insert_newline(element);
                Disposition::Intercepted(action)
            }
            KeyAction::Pass => Disposition::Ignored,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
