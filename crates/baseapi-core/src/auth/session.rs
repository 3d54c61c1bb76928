//! File-backed session cache.
//!
//! Saves a client's `jwt` and `auth` to one JSON file and restores them on
//! the next run. Intended for development, where fetching fresh
//! credentials before every call is slow.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::credentials::present;
use super::{CredentialHolder, Credentials, SessionError};
use crate::config::Config;

/// Session file name in cache directory
pub const SESSION_FILE: &str = "session.json";

/// How `save` lays the two fields out on disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveMode {
    /// Each field is written on its own, `jwt` first and then `auth`.
    ///
    /// Every write replaces the whole file, so when both fields are set
    /// only `auth` survives on disk. An unset field deletes its own key,
    /// and the file goes away once no key is left.
    #[default]
    Overwrite,
    /// Both present fields are written as one object in a single write.
    Merge,
}

/// Why a `load` found nothing usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheMiss {
    /// No session file at the cache path
    NotFound,
    /// The file exists but is not a JSON object of credential strings
    Malformed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The holder's fields were replaced from the file
    Loaded,
    /// The holder was left untouched
    Miss(CacheMiss),
}

impl LoadOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded)
    }
}

/// A place credentials can be cached between runs.
pub trait SessionStore {
    fn save(&self, client: &dyn CredentialHolder) -> Result<(), SessionError>;

    fn load(&self, client: &mut dyn CredentialHolder) -> Result<LoadOutcome, SessionError>;
}

#[derive(Debug, Clone, Copy)]
enum Field {
    Jwt,
    Auth,
}

#[derive(Debug, Clone)]
pub struct FileSession {
    path: PathBuf,
    mode: SaveMode,
}

impl FileSession {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            mode: SaveMode::default(),
        }
    }

    /// Session stored as `session.json` inside `cache_dir`
    pub fn in_dir(cache_dir: impl AsRef<Path>) -> Self {
        Self::new(cache_dir.as_ref().join(SESSION_FILE))
    }

    /// Session at the configured path, written in the configured mode
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self::new(config.session_path()?).with_save_mode(config.save_mode))
    }

    pub fn with_save_mode(mut self, mode: SaveMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save_mode(&self) -> SaveMode {
        self.mode
    }

    /// Save the client's credentials to disk.
    ///
    /// Unset (or empty) fields are removed from the file rather than
    /// written. A missing file is never an error here.
    pub fn save<C: CredentialHolder + ?Sized>(&self, client: &C) -> Result<(), SessionError> {
        match self.mode {
            SaveMode::Overwrite => self.save_overwrite(client),
            SaveMode::Merge => self.save_merged(client),
        }
    }

    /// Load cached credentials into the client.
    ///
    /// On success both fields are replaced, so a key missing from the file
    /// clears the matching field. On a cache miss the client is left as is.
    pub fn load<C: CredentialHolder + ?Sized>(
        &self,
        client: &mut C,
    ) -> Result<LoadOutcome, SessionError> {
        let data = match self.read()? {
            Ok(data) => data,
            Err(miss) => {
                debug!(path = %self.path.display(), ?miss, "No cached session");
                return Ok(LoadOutcome::Miss(miss));
            }
        };

        debug!(
            path = %self.path.display(),
            jwt = data.jwt.is_some(),
            auth = data.auth.is_some(),
            "Session loaded"
        );
        client.set_jwt(data.jwt);
        client.set_auth(data.auth);
        Ok(LoadOutcome::Loaded)
    }

    /// Delete the session file
    pub fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "Session file removed");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::io("remove session file", &self.path, e)),
        }
    }

    fn save_overwrite<C: CredentialHolder + ?Sized>(&self, client: &C) -> Result<(), SessionError> {
        match present(client.jwt()) {
            Some(jwt) => self.write(&Credentials::new().with_jwt(jwt))?,
            None => self.delete_entry(Field::Jwt)?,
        }
        match present(client.auth()) {
            Some(auth) => self.write(&Credentials::new().with_auth(auth))?,
            None => self.delete_entry(Field::Auth)?,
        }
        Ok(())
    }

    fn save_merged<C: CredentialHolder + ?Sized>(&self, client: &C) -> Result<(), SessionError> {
        let data = Credentials {
            jwt: present(client.jwt()).map(str::to_owned),
            auth: present(client.auth()).map(str::to_owned),
        };
        if data.is_empty() {
            self.clear()
        } else {
            self.write(&data)
        }
    }

    /// Remove one key from the file, deleting the file once it holds none
    fn delete_entry(&self, field: Field) -> Result<(), SessionError> {
        let mut data = match self.read()? {
            Ok(data) => data,
            Err(CacheMiss::NotFound) => return Ok(()),
            Err(CacheMiss::Malformed) => return self.clear(),
        };

        let removed = match field {
            Field::Jwt => data.jwt.take(),
            Field::Auth => data.auth.take(),
        };

        if data.is_empty() {
            self.clear()
        } else if removed.is_some() {
            debug!(path = %self.path.display(), ?field, "Session entry removed");
            self.write(&data)
        } else {
            Ok(())
        }
    }

    /// Read the session file, mapping a missing or unparsable file to a miss
    fn read(&self) -> Result<Result<Credentials, CacheMiss>, SessionError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Err(CacheMiss::NotFound)),
            // Not UTF-8, so it cannot be JSON either
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                warn!(path = %self.path.display(), error = %e, "Ignoring unreadable session file");
                return Ok(Err(CacheMiss::Malformed));
            }
            Err(e) => return Err(SessionError::io("read session file", &self.path, e)),
        };

        // Decode through a map first: a derived struct decoder also takes arrays
        let decoded = serde_json::from_str::<Map<String, Value>>(&contents)
            .and_then(|map| serde_json::from_value::<Credentials>(Value::Object(map)));
        match decoded {
            Ok(data) => Ok(Ok(data)),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring malformed session file");
                Ok(Err(CacheMiss::Malformed))
            }
        }
    }

    fn write(&self, data: &Credentials) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| SessionError::io("create session directory", parent, e))?;
        }
        let contents = serde_json::to_string(data)?;
        fs::write(&self.path, contents)
            .map_err(|e| SessionError::io("write session file", &self.path, e))?;
        debug!(
            path = %self.path.display(),
            jwt = data.jwt.is_some(),
            auth = data.auth.is_some(),
            "Session saved"
        );
        Ok(())
    }
}

impl SessionStore for FileSession {
    fn save(&self, client: &dyn CredentialHolder) -> Result<(), SessionError> {
        FileSession::save(self, client)
    }

    fn load(&self, client: &mut dyn CredentialHolder) -> Result<LoadOutcome, SessionError> {
        FileSession::load(self, client)
    }
}

// ============================================================================
// Tests
// ============================================================================
