//! Authentication module for caching client credentials between runs.
//!
//! This module provides:
//! - `CredentialHolder`: the `jwt` / `auth` pair a client exposes
//! - `FileSession`: save/load of those fields to a single JSON file
//! - `SessionError`: failures that are not a plain cache miss
//!
//! A missing or unparsable session file is a cache miss, never an error.

pub mod credentials;
pub mod error;
pub mod session;

pub use credentials::{CredentialHolder, Credentials};
pub use error::SessionError;
pub use session::{CacheMiss, FileSession, LoadOutcome, SaveMode, SessionStore, SESSION_FILE};
