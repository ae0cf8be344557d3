//! Mailbox reader for the local mail bot.
//!
//! The mail bot drops each message addressed to `local@domain` into a file
//! named after the lower-cased local part inside a shared directory. Reading
//! a message consumes it.

use crate::config::SuiteConfig;
use crate::result::{E2eError, E2eResult};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File-backed mailbox directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mailbox {
    dir: PathBuf,
    attempts: u32,
    retry_delay: Duration,
}

impl Mailbox {
    /// Mailbox over `dir` with 5 attempts one second apart
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            attempts: 5,
            retry_delay: Duration::from_secs(1),
        }
    }

    /// Mailbox configured from the suite settings
    #[must_use]
    pub fn from_config(config: &SuiteConfig) -> Self {
        Self::new(&config.mailbox_dir)
            .with_attempts(config.mailbox_attempts)
            .with_retry_delay(config.mailbox_retry_delay())
    }

    /// Set number of read attempts
    #[must_use]
    pub fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts.max(1);
        self
    }

    /// Set delay between read attempts
    #[must_use]
    pub const fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Directory holding the mailbox files
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File that receives mail for `address`
    pub fn path_for(&self, address: &str) -> E2eResult<PathBuf> {
        let local = address
            .split_once('@')
            .map(|(local, _)| local)
            .filter(|local| !local.is_empty())
            .ok_or_else(|| E2eError::Mailbox {
                path: self.dir.display().to_string(),
                message: format!("{address:?} is not an email address"),
            })?;
        Ok(self.dir.join(local.to_lowercase()))
    }

    /// Read and delete the message waiting for `address`.
    ///
    /// Only a missing file is retried. Bodies that are not valid UTF-8 are
    /// decoded lossily.
    pub async fn take(&self, address: &str) -> E2eResult<String> {
        let path = self.path_for(address)?;
        let mut attempt = 1;
        let body = loop {
            match tokio::fs::read(&path).await {
                Ok(bytes) => break String::from_utf8_lossy(&bytes).into_owned(),
                Err(err) if err.kind() == ErrorKind::NotFound && attempt < self.attempts => {
                    tracing::info!(
                        path = %path.display(),
                        attempt,
                        "waiting for email to show up"
                    );
                    attempt += 1;
                    tokio::time::sleep(self.retry_delay).await;
                }
                Err(err) if err.kind() == ErrorKind::NotFound => {
                    return Err(E2eError::Mailbox {
                        path: path.display().to_string(),
                        message: format!("no email after {} attempts: {err}", self.attempts),
                    });
                }
                Err(err) => {
                    return Err(E2eError::Mailbox {
                        path: path.display().to_string(),
                        message: format!("cannot read email: {err}"),
                    });
                }
            }
        };

        tokio::fs::remove_file(&path)
            .await
            .map_err(|e| E2eError::Mailbox {
                path: path.display().to_string(),
                message: format!("cannot remove after reading: {e}"),
            })?;
        tracing::debug!(path = %path.display(), bytes = body.len(), "email consumed");
        Ok(body)
    }
}
