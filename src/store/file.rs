// SPDX-License-Identifier: MIT
// Copyright 2026 Eventure Dev Team <dev@eventure.app>

//! On-disk session file.

use std::io::ErrorKind;
use std::path::PathBuf;

use crate::error::{AppError, Result};
use crate::models::UserRecord;

/// Reads and writes the persisted session record.
///
/// Writes go through a sibling temp file and a rename so a crash mid-write
/// never leaves a truncated session behind.
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load the saved session, `None` when no session file exists.
    pub async fn load(&self) -> Result<Option<UserRecord>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(AppError::Storage(format!(
                    "reading {}: {err}",
                    self.path.display()
                )))
            }
        };
        let user = serde_json::from_slice(&bytes).map_err(|err| {
            AppError::Storage(format!("corrupt session file {}: {err}", self.path.display()))
        })?;
        Ok(Some(user))
    }

    /// Persist the session record, replacing any previous one.
    pub async fn save(&self, user: &UserRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|err| {
                    AppError::Storage(format!("creating {}: {err}", parent.display()))
                })?;
            }
        }

        let bytes = serde_json::to_vec_pretty(user)
            .map_err(|err| AppError::Storage(format!("encoding session: {err}")))?;

        let mut tmp = self.path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, &bytes)
            .await
            .map_err(|err| AppError::Storage(format!("writing {}: {err}", tmp.display())))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|err| AppError::Storage(format!("replacing {}: {err}", self.path.display())))
    }

    /// Delete the session file. Missing file is fine.
    pub async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(AppError::Storage(format!(
                "removing {}: {err}",
                self.path.display()
            ))),
        }
    }
}
