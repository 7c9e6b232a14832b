//! Per-origin enablement configuration.
//!
//! A [`DomainConfig`] is owned by the settings store; the dispatch layer only
//! ever reads it, and a whole record is swapped in atomically whenever the
//! store notifies a change.  Absence of a record means "do not intercept"
//! (fail closed).

use serde::{Deserialize, Serialize};

/// Global default policy for origins that have no explicit entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivationMode {
    /// Intercept everywhere except a built-in list of problem domains.
    #[default]
    Blacklist,
    /// Intercept only on a built-in list of known chat hosts.
    Whitelist,
}

/// Per-origin interception settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainConfig {
    /// Master switch for this origin.
    pub enabled: bool,
    /// Extra selectors the user wants treated as composition surfaces.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_targets: Option<Vec<String>>,
    /// Selectors that must never be intercepted, checked before anything
    /// else (a match on the element or any ancestor wins).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_excludes: Option<Vec<String>>,
}

impl DomainConfig {
    /// An enabled record with no custom selectors.
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            custom_targets: None,
            custom_excludes: None,
        }
    }

    /// A disabled record with no custom selectors.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            custom_targets: None,
            custom_excludes: None,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
