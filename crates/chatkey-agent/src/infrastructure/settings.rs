//! Settings persistence and per-origin configuration resolution.
//!
//! The persisted document is a [`StorageSchema`]: a global activation mode
//! plus explicit per-origin records.  [`resolve_domain_config`] folds the
//! built-in default domain lists into that document to answer "what applies
//! to this origin right now" — the only question the dispatch layer ever
//! asks.
//!
//! Two stores are provided: [`FileSettingsStore`] persists the schema as
//! TOML in the platform config directory
//! (`%APPDATA%\ChatKey`, `~/.config/chatkey`, or
//! `~/Library/Application Support/ChatKey`), and [`MemorySettingsStore`]
//! keeps it in memory for tests and embeddings without disk access.  Both
//! broadcast a [`SettingsChange`] on every save so page agents can refresh
//! their cached config.

use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::broadcast;

use chatkey_core::{
    hostname_matches_domain, hostname_of_origin, normalize_origin, www_variants, ActivationMode,
    DomainConfig,
};

/// Capacity of the change-notification channel.  Laggards just reload.
const CHANGE_CHANNEL_CAPACITY: usize = 16;

/// Domains where interception is off by default in blacklist mode.
/// `google.com` is matched exactly (subdomains like `gemini.google.com` are
/// legitimate chat surfaces); the others cover their subdomains too.
const DEFAULT_DISABLED_DOMAINS: [&str; 4] = ["x.com", "twitter.com", "google.com", "docs.google.com"];

/// Known chat hosts enabled by default in whitelist mode.
const DEFAULT_WHITELIST_DOMAINS: [&str; 13] = [
    "chatgpt.com",
    "claude.ai",
    "gemini.google.com",
    "grok.com",
    "chat.deepseek.com",
    "z.ai",
    "chat.z.ai",
    "perplexity.ai",
    "web.telegram.org",
    "app.slack.com",
    "discord.com",
    "teams.live.com",
    "wechat.com",
];

/// Error type for settings store operations.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing settings at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse settings TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The schema could not be serialized to TOML.
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Notification that the persisted settings changed.  Consumers re-query
/// whatever origin they care about rather than diffing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsChange;

// ── Schema ────────────────────────────────────────────────────────────────────

/// The persisted settings document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StorageSchema {
    /// Global default policy for origins without an explicit record.
    #[serde(default)]
    pub activation_mode: ActivationMode,
    /// Explicit per-origin records, keyed by origin string.
    #[serde(default)]
    pub domains: BTreeMap<String, DomainConfig>,
}

// ── Store trait ───────────────────────────────────────────────────────────────

/// Asynchronous settings persistence.
///
/// The dispatch path never calls this directly; only the config sync task
/// does, so a slow or failing store degrades to "disabled" rather than
/// stalling a keystroke.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Loads the current schema.  A store with nothing persisted yet
    /// returns the default schema, not an error.
    async fn load(&self) -> Result<StorageSchema, SettingsError>;

    /// Persists `schema` wholesale and notifies subscribers.
    async fn save(&self, schema: &StorageSchema) -> Result<(), SettingsError>;

    /// Subscribes to change notifications.
    fn changes(&self) -> broadcast::Receiver<SettingsChange>;
}

/// Loads and resolves the effective configuration for one origin.
pub async fn domain_config(
    store: &dyn SettingsStore,
    origin: &str,
) -> Result<DomainConfig, SettingsError> {
    Ok(resolve_domain_config(&store.load().await?, origin))
}

/// Writes `config` for `origin`, fanning out to the www/non-www twin so the
/// user's toggle covers both spellings.
pub async fn set_domain_config(
    store: &dyn SettingsStore,
    origin: &str,
    config: DomainConfig,
) -> Result<(), SettingsError> {
    let mut schema = store.load().await?;
    for variant in www_variants(&normalize_origin(origin)) {
        schema.domains.insert(variant, config.clone());
    }
    store.save(&schema).await
}

/// Reads the global activation mode.
pub async fn activation_mode(store: &dyn SettingsStore) -> Result<ActivationMode, SettingsError> {
    Ok(store.load().await?.activation_mode)
}

/// Sets the global activation mode, preserving per-origin records.
pub async fn set_activation_mode(
    store: &dyn SettingsStore,
    mode: ActivationMode,
) -> Result<(), SettingsError> {
    let mut schema = store.load().await?;
    schema.activation_mode = mode;
    store.save(&schema).await
}

/// Drops every stored setting back to defaults.
pub async fn reset_all_settings(store: &dyn SettingsStore) -> Result<(), SettingsError> {
    store.save(&StorageSchema::default()).await
}

// ── Resolution ────────────────────────────────────────────────────────────────

/// Whether interception is off by default for `origin` in blacklist mode.
pub fn is_default_disabled_origin(origin: &str) -> bool {
    let Ok(hostname) = hostname_of_origin(origin) else {
        return false;
    };
    let hostname = hostname.strip_prefix("www.").unwrap_or(&hostname);
    DEFAULT_DISABLED_DOMAINS.iter().any(|domain| {
        if *domain == "google.com" {
            hostname == *domain
        } else {
            hostname_matches_domain(hostname, domain)
        }
    })
}

/// Whether interception is on by default for `origin` in whitelist mode.
pub fn is_default_whitelisted_origin(origin: &str) -> bool {
    let Ok(hostname) = hostname_of_origin(origin) else {
        return false;
    };
    let hostname = hostname.strip_prefix("www.").unwrap_or(&hostname);
    DEFAULT_WHITELIST_DOMAINS
        .iter()
        .any(|domain| hostname_matches_domain(hostname, domain))
}

/// Resolves the effective [`DomainConfig`] for one origin.
///
/// An explicit record always wins; otherwise the activation mode and the
/// built-in default domain lists decide.
pub fn resolve_domain_config(schema: &StorageSchema, origin: &str) -> DomainConfig {
    if let Some(saved) = schema.domains.get(origin) {
        return saved.clone();
    }

    match schema.activation_mode {
        ActivationMode::Whitelist => {
            if is_default_whitelisted_origin(origin) {
                DomainConfig::enabled()
            } else {
                DomainConfig::disabled()
            }
        }
        ActivationMode::Blacklist => {
            if is_default_disabled_origin(origin) {
                DomainConfig::disabled()
            } else {
                DomainConfig::enabled()
            }
        }
    }
}

// ── File store ────────────────────────────────────────────────────────────────

/// TOML-file-backed settings store.
pub struct FileSettingsStore {
    path: PathBuf,
    changes: broadcast::Sender<SettingsChange>,
}

impl FileSettingsStore {
    /// Opens the store at the platform-appropriate settings path.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::NoPlatformConfigDir`] when the platform
    /// config base directory cannot be determined from the environment.
    pub fn open_default() -> Result<Self, SettingsError> {
        Ok(Self::with_path(settings_file_path()?))
    }

    /// Opens the store at an explicit path.
    pub fn with_path(path: PathBuf) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self { path, changes }
    }

    /// The file this store reads and writes.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[async_trait]
impl SettingsStore for FileSettingsStore {
    async fn load(&self) -> Result<StorageSchema, SettingsError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(toml::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(StorageSchema::default()),
            Err(e) => Err(SettingsError::Io {
                path: self.path.clone(),
                source: e,
            }),
        }
    }

    async fn save(&self, schema: &StorageSchema) -> Result<(), SettingsError> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir).map_err(|source| SettingsError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        let content = toml::to_string_pretty(schema)?;
        std::fs::write(&self.path, content).map_err(|source| SettingsError::Io {
            path: self.path.clone(),
            source,
        })?;
        // No receivers is fine; nobody is listening yet.
        let _ = self.changes.send(SettingsChange);
        Ok(())
    }

    fn changes(&self) -> broadcast::Receiver<SettingsChange> {
        self.changes.subscribe()
    }
}

/// Resolves the platform settings directory.
///
/// # Errors
///
/// Returns [`SettingsError::NoPlatformConfigDir`] when the relevant
/// environment variables are unset.
pub fn config_dir() -> Result<PathBuf, SettingsError> {
    platform_config_dir().ok_or(SettingsError::NoPlatformConfigDir)
}

/// Resolves the full path to the settings file.
///
/// # Errors
///
/// Returns [`SettingsError::NoPlatformConfigDir`] if the base directory
/// cannot be determined.
pub fn settings_file_path() -> Result<PathBuf, SettingsError> {
    Ok(config_dir()?.join("settings.toml"))
}

fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        // %APPDATA% e.g. C:\Users\<user>\AppData\Roaming
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("ChatKey"))
    }

    #[cfg(target_os = "linux")]
    {
        // XDG_CONFIG_HOME or ~/.config
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("chatkey"))
    }

    #[cfg(target_os = "macos")]
    {
        // ~/Library/Application Support/ChatKey
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("ChatKey")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Memory store ──────────────────────────────────────────────────────────────

/// In-memory settings store for tests and disk-free embeddings.
pub struct MemorySettingsStore {
    schema: std::sync::Mutex<StorageSchema>,
    changes: broadcast::Sender<SettingsChange>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::with_schema(StorageSchema::default())
    }

    pub fn with_schema(schema: StorageSchema) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            schema: std::sync::Mutex::new(schema),
            changes,
        }
    }
}

impl Default for MemorySettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn load(&self) -> Result<StorageSchema, SettingsError> {
        Ok(self
            .schema
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone())
    }

    async fn save(&self, schema: &StorageSchema) -> Result<(), SettingsError> {
        *self.schema.lock().unwrap_or_else(|e| e.into_inner()) = schema.clone();
        let _ = self.changes.send(SettingsChange);
        Ok(())
    }

    fn changes(&self) -> broadcast::Receiver<SettingsChange> {
        self.changes.subscribe()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn unique_temp_path() -> PathBuf {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir().join(format!(
            "chatkey_test_{}_{n}",
            std::process::id()
        ))
    }

    // ── Schema defaults and round-trips ───────────────────────────────────────

    #[test]
    fn test_default_schema_is_blacklist_with_no_domains() {
        let schema = StorageSchema::default();
        assert_eq!(schema.activation_mode, ActivationMode::Blacklist);
        assert!(schema.domains.is_empty());
    }

    #[test]
    fn test_schema_round_trips_through_toml() {
        // Arrange
        let mut schema = StorageSchema::default();
        schema.activation_mode = ActivationMode::Whitelist;
        schema.domains.insert(
            "https://example.com".to_string(),
            DomainConfig {
                enabled: false,
                custom_targets: Some(vec![".my-editor".to_string()]),
                custom_excludes: None,
            },
        );

        // Act
        let toml_str = toml::to_string_pretty(&schema).expect("serialize");
        let restored: StorageSchema = toml::from_str(&toml_str).expect("deserialize");

        // Assert
        assert_eq!(schema, restored);
    }

    #[test]
    fn test_empty_toml_deserializes_to_defaults() {
        let schema: StorageSchema = toml::from_str("").expect("deserialize empty");
        assert_eq!(schema, StorageSchema::default());
    }

    // ── Default domain lists ──────────────────────────────────────────────────

    #[test]
    fn test_x_com_is_default_disabled() {
        assert!(is_default_disabled_origin("https://x.com"));
    }

    #[test]
    fn test_google_com_is_disabled_by_exact_match_only() {
        assert!(is_default_disabled_origin("https://google.com"));
        assert!(!is_default_disabled_origin("https://gemini.google.com"));
        assert!(is_default_disabled_origin("https://docs.google.com"));
    }

    #[test]
    fn test_chatgpt_is_default_whitelisted() {
        assert!(is_default_whitelisted_origin("https://chatgpt.com"));
        assert!(!is_default_whitelisted_origin("https://random.com"));
    }

    #[test]
    fn test_unparseable_origin_is_in_neither_list() {
        assert!(!is_default_disabled_origin("not an origin"));
        assert!(!is_default_whitelisted_origin("not an origin"));
    }

    // ── resolve_domain_config ─────────────────────────────────────────────────

    #[test]
    fn test_blacklist_mode_enables_normal_sites() {
        let schema = StorageSchema::default();
        assert!(resolve_domain_config(&schema, "https://example.com").enabled);
    }

    #[test]
    fn test_blacklist_mode_disables_default_disabled_domains() {
        let schema = StorageSchema::default();
        assert!(!resolve_domain_config(&schema, "https://x.com").enabled);
    }

    #[test]
    fn test_whitelist_mode_disables_unknown_sites() {
        let schema = StorageSchema {
            activation_mode: ActivationMode::Whitelist,
            domains: BTreeMap::new(),
        };
        assert!(!resolve_domain_config(&schema, "https://example.com").enabled);
    }

    #[test]
    fn test_whitelist_mode_enables_default_whitelisted_domains() {
        let schema = StorageSchema {
            activation_mode: ActivationMode::Whitelist,
            domains: BTreeMap::new(),
        };
        assert!(resolve_domain_config(&schema, "https://chatgpt.com").enabled);
    }

    #[test]
    fn test_saved_record_outranks_default_lists() {
        let mut schema = StorageSchema::default();
        schema
            .domains
            .insert("https://example.com".to_string(), DomainConfig::disabled());
        assert!(!resolve_domain_config(&schema, "https://example.com").enabled);

        schema
            .domains
            .insert("https://x.com".to_string(), DomainConfig::enabled());
        assert!(resolve_domain_config(&schema, "https://x.com").enabled);
    }

    // ── Store helpers ─────────────────────────────────────────────────────────

    #[test]
    fn test_set_domain_config_fans_out_to_www_twin() {
        let store = MemorySettingsStore::new();
        tokio_test::block_on(async {
            set_domain_config(&store, "https://example.com", DomainConfig::disabled())
                .await
                .expect("save");
            let schema = store.load().await.expect("load");
            assert_eq!(
                schema.domains.get("https://example.com"),
                Some(&DomainConfig::disabled())
            );
            assert_eq!(
                schema.domains.get("https://www.example.com"),
                Some(&DomainConfig::disabled())
            );
        });
    }

    #[test]
    fn test_activation_mode_round_trips_through_store() {
        let store = MemorySettingsStore::new();
        tokio_test::block_on(async {
            assert_eq!(
                activation_mode(&store).await.expect("read"),
                ActivationMode::Blacklist
            );
            set_activation_mode(&store, ActivationMode::Whitelist)
                .await
                .expect("write");
            assert_eq!(
                activation_mode(&store).await.expect("read"),
                ActivationMode::Whitelist
            );
        });
    }

    #[test]
    fn test_reset_all_settings_restores_defaults() {
        let store = MemorySettingsStore::new();
        tokio_test::block_on(async {
            set_domain_config(&store, "https://x.com", DomainConfig::enabled())
                .await
                .expect("save");
            reset_all_settings(&store).await.expect("reset");
            assert_eq!(store.load().await.expect("load"), StorageSchema::default());
        });
    }

    #[test]
    fn test_domain_config_helper_resolves_through_the_store() {
        let store = MemorySettingsStore::new();
        tokio_test::block_on(async {
            let config = domain_config(&store, "https://x.com").await.expect("resolve");
            assert!(!config.enabled);
        });
    }

    // ── Change notifications ──────────────────────────────────────────────────

    #[test]
    fn test_save_notifies_subscribers() {
        let store = MemorySettingsStore::new();
        tokio_test::block_on(async {
            let mut changes = store.changes();
            store
                .save(&StorageSchema::default())
                .await
                .expect("save");
            assert_eq!(changes.recv().await.expect("notified"), SettingsChange);
        });
    }

    // ── File store ────────────────────────────────────────────────────────────

    #[test]
    fn test_file_store_returns_defaults_when_file_is_absent() {
        let store = FileSettingsStore::with_path(unique_temp_path().join("settings.toml"));
        tokio_test::block_on(async {
            assert_eq!(store.load().await.expect("load"), StorageSchema::default());
        });
    }

    #[test]
    fn test_file_store_save_and_load_round_trip() {
        let dir = unique_temp_path();
        let store = FileSettingsStore::with_path(dir.join("settings.toml"));

        let mut schema = StorageSchema::default();
        schema
            .domains
            .insert("https://example.com".to_string(), DomainConfig::disabled());

        tokio_test::block_on(async {
            store.save(&schema).await.expect("save");
            assert_eq!(store.load().await.expect("load"), schema);
        });

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_file_store_rejects_malformed_toml() {
        let dir = unique_temp_path();
        std::fs::create_dir_all(&dir).expect("mkdir");
        let path = dir.join("settings.toml");
        std::fs::write(&path, "[[[ not valid toml").expect("write");

        let store = FileSettingsStore::with_path(path);
        tokio_test::block_on(async {
            assert!(matches!(
                store.load().await,
                Err(SettingsError::Parse(_))
            ));
        });

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_settings_file_path_ends_with_settings_toml() {
        if let Ok(path) = settings_file_path() {
            assert!(path.ends_with("settings.toml"));
        }
        // NoPlatformConfigDir in a stripped CI environment is also acceptable.
    }
}
