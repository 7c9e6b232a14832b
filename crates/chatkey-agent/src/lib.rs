//! # chatkey-agent
//!
//! The page-side engine of ChatKey: per-site adapters, the adapter registry,
//! and the keystroke dispatch controller, together with the settings store
//! they read their per-origin configuration from.
//!
//! # Architecture
//!
//! ```text
//! host glue (listeners, native events)
//!  └─ application::PageAgent        -- decision chain per keydown
//!       ├─ chatkey_core::resolve_key_action
//!       ├─ adapters::AdapterRegistry / SiteAdapter  -- site knowledge
//!       └─ application::ConfigCell  -- last-known DomainConfig (fail closed)
//!            ▲ wholesale replacement
//!  application::ConfigSync          -- async refresh task
//!       └─ infrastructure::settings::SettingsStore  -- TOML file / memory
//! ```
//!
//! Everything DOM-shaped goes through the [`dom::DomNode`] trait; the
//! in-memory [`dom::mock::MockDom`] backs the test suites, and an embedding
//! host supplies the real implementation.  Frame adoption
//! ([`application::FrameWatcher`]) and the main-world soft-break bridge
//! ([`infrastructure::page_bridge`]) round out the boundary pieces.

pub mod adapters;
pub mod application;
pub mod dom;
pub mod infrastructure;

pub use adapters::{AdapterRegistry, ListenerTarget, SiteAdapter};
pub use application::{
    is_mac_platform, ConfigCell, ConfigSync, Disposition, FrameAccess, FrameWatcher, ListenerSpec,
    PageAgent,
};
pub use dom::{DomNode, MouseEventKind, SyntheticKey, SyntheticKeyKind};
pub use infrastructure::page_bridge::{EditorApi, SoftBreakResponder, SOFT_BREAK_SIGNAL};
pub use infrastructure::settings::{
    domain_config, resolve_domain_config, FileSettingsStore, MemorySettingsStore, SettingsChange,
    SettingsError, SettingsStore, StorageSchema,
};
