//! # chatkey-core
//!
//! Shared library for ChatKey containing the key-action resolution policy,
//! the per-domain configuration model, and origin/hostname helpers.
//!
//! This crate is used by the page agent and by any embedding host. It has
//! zero dependencies on DOM types, browser APIs, or async runtimes.
//!
//! # Architecture overview (for beginners)
//!
//! ChatKey rebinds the Enter key on chat-style web inputs: on sites where
//! Enter submits the message, plain Enter becomes "insert a newline" and
//! Ctrl+Enter (Cmd+Enter on macOS) becomes "send"; on everything else, plain
//! Enter is normalized to a soft break ahead of the site's own Ctrl+Enter
//! handling.
//!
//! This crate is the decision core.  It defines:
//!
//! - **`domain::key_event`** – [`KeyPress`], an immutable snapshot of one
//!   physical keystroke, and [`Phase`], which of the two DOM propagation
//!   stages delivered it.  DOM events travel the tree twice: *capture* runs
//!   from the root down to the target before the page's own handlers see the
//!   key, *bubble* runs back up afterwards.  The policy exploits exactly that
//!   ordering.
//!
//! - **`domain::policy`** – [`resolve_key_action`], the pure function that
//!   maps a keystroke + site convention + phase to one of
//!   [`KeyAction::Send`], [`KeyAction::Newline`], or [`KeyAction::Pass`].
//!
//! - **`domain::config`** – [`DomainConfig`], the per-origin enablement
//!   record owned by the settings store, and [`ActivationMode`], the global
//!   blacklist/whitelist default policy.
//!
//! - **`domain::hostname`** – boundary-correct hostname/domain matching and
//!   origin normalization shared by the adapter registry and the settings
//!   layer.

// Declare the top-level module.  Rust will look for it in a subdirectory
// with the same name (src/domain/mod.rs).
pub mod domain;

// Re-export the most-used types at the crate root so callers can write
// `chatkey_core::KeyAction` instead of `chatkey_core::domain::policy::KeyAction`.
pub use domain::config::{ActivationMode, DomainConfig};
pub use domain::hostname::{
    hostname_matches_domain, hostname_of_origin, normalize_origin, www_variants, OriginError,
};
pub use domain::key_event::{KeyPress, Phase};
pub use domain::policy::{resolve_key_action, KeyAction, NativeSendKey};
