//! Durable storage for the session token.
//!
//! Only the token is persisted. Everything else in the session is fetched
//! again from the backend after a restart.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use keyring::credential::CredentialPersistence;
use keyring::Entry;
use serde::{Deserialize, Serialize};

/// Fixed key the token is stored under (file stem / keychain service name)
pub const STORAGE_KEY: &str = "shopfront";

/// Keychain user name for the token entry
const KEYRING_USER: &str = "token";

pub trait TokenStore {
    fn load(&self) -> Result<Option<String>>;
    fn save(&self, token: &str) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

#[derive(Debug, Serialize, Deserialize)]
struct PersistedToken {
    token: String,
    saved_at: DateTime<Utc>,
}

/// Token kept as JSON in `<dir>/<key>.json`
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(dir: &Path) -> Self {
        Self::with_key(dir, STORAGE_KEY)
    }

    pub fn with_key(dir: &Path, key: &str) -> Self {
        Self {
            path: dir.join(format!("{}.json", key)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&self.path)
            .context("Failed to read session file")?;
        let persisted: PersistedToken = serde_json::from_str(&contents)
            .context("Failed to parse session file")?;

        if persisted.token.is_empty() {
            return Ok(None);
        }
        tracing::debug!(saved_at = %persisted.saved_at, "Loaded persisted token");
        Ok(Some(persisted.token))
    }

    fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let persisted = PersistedToken {
            token: token.to_string(),
            saved_at: Utc::now(),
        };
        let contents = serde_json::to_string_pretty(&persisted)?;
        std::fs::write(&self.path, contents).context("Failed to write session file")?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path).context("Failed to remove session file")?;
        }
        Ok(())
    }
}

/// Token kept in the OS keychain
pub struct KeyringTokenStore {
    entry: Entry,
}

impl KeyringTokenStore {
    pub fn new() -> Result<Self> {
        Self::with_key(STORAGE_KEY)
    }

    /// Entry `<key>`/`token` in the platform keychain. Fails when the
    /// platform has no keychain that outlives the process, since a token
    /// saved there would be gone on the next start.
    pub fn with_key(key: &str) -> Result<Self> {
        let persistence = keyring::default::default_credential_builder().persistence();
        if matches!(
            persistence,
            CredentialPersistence::EntryOnly | CredentialPersistence::ProcessOnly
        ) {
            bail!("No OS keychain available on this platform; use the file token store");
        }

        let entry = Entry::new(key, KEYRING_USER).context("Failed to create keyring entry")?;
        Ok(Self::from_entry(entry))
    }

    pub fn from_entry(entry: Entry) -> Self {
        Self { entry }
    }
}

impl TokenStore for KeyringTokenStore {
    fn load(&self) -> Result<Option<String>> {
        match self.entry.get_password() {
            Ok(token) if !token.is_empty() => Ok(Some(token)),
            Ok(_) | Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e).context("Failed to retrieve token from keychain"),
        }
    }

    fn save(&self, token: &str) -> Result<()> {
        self.entry
            .set_password(token)
            .context("Failed to store token in keychain")
    }

    fn clear(&self) -> Result<()> {
        match self.entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e).context("Failed to delete token from keychain"),
        }
    }
}
