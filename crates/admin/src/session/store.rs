//! Durable storage for the bearer token.
//!
//! The token lives in a small JSON key/value file under [`TOKEN_KEY`], so a
//! restart of the console does not force a new login. Other keys in the same
//! file are preserved.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Key the bearer token is stored under.
pub const TOKEN_KEY: &str = "adminToken";

/// Errors from reading or writing the token file.
#[derive(Debug, Error)]
pub enum TokenStoreError {
    #[error("token file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("token file is not valid JSON: {0}")]
    Format(#[from] serde_json::Error),
}

/// Where the session manager persists its token.
pub trait TokenStore: Send + Sync {
    /// Load the persisted token. Blank values count as absent.
    ///
    /// # Errors
    ///
    /// Returns `TokenStoreError` if the backing storage cannot be read.
    fn load(&self) -> Result<Option<SecretString>, TokenStoreError>;

    /// Persist a token, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `TokenStoreError` if the backing storage cannot be written.
    fn save(&self, token: &SecretString) -> Result<(), TokenStoreError>;

    /// Forget the persisted token.
    ///
    /// # Errors
    ///
    /// Returns `TokenStoreError` if the backing storage cannot be written.
    fn clear(&self) -> Result<(), TokenStoreError>;
}

/// Token store backed by a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, TokenStoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), TokenStoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(map)?;
        std::fs::write(&self.path, text)?;
        restrict_permissions(&self.path)?;
        Ok(())
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
#[allow(clippy::unnecessary_wraps)]
const fn restrict_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<SecretString>, TokenStoreError> {
        let mut map = self.read_map()?;
        Ok(map
            .remove(TOKEN_KEY)
            .filter(|token| !token.trim().is_empty())
            .map(SecretString::from))
    }

    fn save(&self, token: &SecretString) -> Result<(), TokenStoreError> {
        let mut map = self.read_map()?;
        map.insert(TOKEN_KEY.to_string(), token.expose_secret().to_string());
        self.write_map(&map)
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        let mut map = self.read_map()?;
        if map.remove(TOKEN_KEY).is_none() {
            return Ok(());
        }
        self.write_map(&map)
    }
}

/// In-process token store for tests and one-shot runs.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<SecretString>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a token.
    #[must_use]
    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(SecretString::from(token.to_string()))),
        }
    }
}

impl std::fmt::Debug for MemoryTokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryTokenStore")
            .field("has_token", &self.token.lock().is_some())
            .finish()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<SecretString>, TokenStoreError> {
        Ok(self.token.lock().clone())
    }

    fn save(&self, token: &SecretString) -> Result<(), TokenStoreError> {
        *self.token.lock() = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        *self.token.lock() = None;
        Ok(())
    }
}
