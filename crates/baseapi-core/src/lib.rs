//! Core library for baseapi.
//!
//! This crate provides:
//! - `CredentialHolder`: the two credential fields (`jwt`, `auth`) an API
//!   client exposes, plus a plain `Credentials` implementation
//! - `FileSession`: a file-backed session cache so development runs can
//!   reuse credentials instead of re-authenticating on every invocation
//! - `Config`: where the session file lives and how it is written

pub mod auth;
pub mod config;

#[cfg(test)]
mod test_support;

pub use auth::{
    CacheMiss, CredentialHolder, Credentials, FileSession, LoadOutcome, SaveMode, SessionError,
    SessionStore,
};
pub use config::Config;
