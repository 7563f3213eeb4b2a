// SPDX-License-Identifier: MIT
// Copyright 2026 Eventure Dev Team <dev@eventure.app>

//! In-memory session state backed by the session file.

use tokio::sync::{watch, RwLock};

use crate::error::{AppError, Result};
use crate::models::UserRecord;
use crate::store::SessionFile;

/// Holds the logged-in user and broadcasts list-refresh signals.
///
/// The disk copy is written before memory is updated, so an interrupted
/// write never leaves memory claiming a session the disk does not have.
pub struct SessionStore {
    file: SessionFile,
    user: RwLock<Option<UserRecord>>,
    refresh_tx: watch::Sender<u64>,
}

impl SessionStore {
    pub fn new(file: SessionFile) -> Self {
        let (refresh_tx, _) = watch::channel(0);
        Self {
            file,
            user: RwLock::new(None),
            refresh_tx,
        }
    }

    /// Restore the persisted session, if any. Called once at startup,
    /// before any screen renders.
    pub async fn load(&self) -> Result<()> {
        let restored = self.file.load().await?;
        if let Some(user) = &restored {
            tracing::info!(email = %user.email, "Restored session");
        }
        *self.user.write().await = restored;
        Ok(())
    }

    /// Current user, `None` when logged out.
    pub async fn current(&self) -> Option<UserRecord> {
        self.user.read().await.clone()
    }

    /// Current user, or `Unauthorized` when logged out.
    pub async fn require_user(&self) -> Result<UserRecord> {
        self.current().await.ok_or(AppError::Unauthorized)
    }

    /// Store a freshly authenticated user.
    pub async fn login(&self, user: UserRecord) -> Result<()> {
        self.replace(user).await
    }

    /// Replace the stored user wholesale, persisting first.
    pub async fn replace(&self, user: UserRecord) -> Result<()> {
        self.file.save(&user).await?;
        *self.user.write().await = Some(user);
        Ok(())
    }

    /// Drop the session and tell event lists to reset.
    pub async fn logout(&self) -> Result<()> {
        self.file.clear().await?;
        *self.user.write().await = None;
        self.signal_refresh();
        Ok(())
    }

    /// Tell subscribed lists that server-side state changed.
    pub fn signal_refresh(&self) {
        self.refresh_tx.send_modify(|n| *n += 1);
    }

    /// Subscribe to refresh signals.
    pub fn subscribe_refresh(&self) -> watch::Receiver<u64> {
        self.refresh_tx.subscribe()
    }
}
