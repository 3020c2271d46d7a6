//! Persisted bearer token.
//!
//! The token file is the only durable client-side state. It holds exactly
//! one opaque bearer token; claims are never persisted - they are re-derived
//! from `/validate-token` at startup.

use std::io;
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

/// File-backed store for the single bearer token.
#[derive(Debug, Clone)]
pub struct TokenCache {
    path: PathBuf,
}

impl TokenCache {
    /// Create a token cache at the given path.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The path of the token file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted token, if one exists.
    ///
    /// A missing or empty file means no token; read failures are treated the
    /// same way (the caller will simply be unauthenticated).
    #[must_use]
    pub fn load(&self) -> Option<SecretString> {
        let contents = std::fs::read_to_string(&self.path).ok()?;
        let trimmed = contents.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(SecretString::from(trimmed.to_owned()))
    }

    /// Persist a token, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the file cannot be written.
    pub fn save(&self, token: &SecretString) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, token.expose_secret())?;
        debug!(path = %self.path.display(), "Persisted bearer token");
        Ok(())
    }

    /// Remove the persisted token. A missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error for failures other than `NotFound`.
    pub fn clear(&self) -> io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "Cleared persisted bearer token");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}
