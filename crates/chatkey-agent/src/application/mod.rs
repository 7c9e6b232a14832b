//! Application-layer use cases.
//!
//! These depend only on traits and core domain types; infrastructure
//! implementations (settings store, page bridge, host listener wiring) are
//! injected at construction time, which keeps every use case unit-testable
//! against the mock DOM.

pub mod frame_watcher;
pub mod page_agent;
pub mod sync_config;

pub use frame_watcher::{FrameAccess, FrameWatcher};
pub use page_agent::{is_mac_platform, ConfigCell, Disposition, ListenerSpec, PageAgent};
pub use sync_config::ConfigSync;
