// SPDX-License-Identifier: MIT
// Copyright 2026 Eventure Dev Team <dev@eventure.app>

//! Stale-reference cleanup.
//!
//! Events can be deleted server-side while the user record still points
//! at them. When a list load discovers such a dangling ID it is scrubbed
//! from the participate and commented lists. Each scrub write is
//! best-effort: a failure is logged and the reference stays for the next
//! pass to retry.

use std::sync::Arc;

use crate::api::ApiClient;
use crate::error::Result;
use crate::store::SessionStore;

#[derive(Clone)]
pub struct CleanupService {
    client: ApiClient,
    session: Arc<SessionStore>,
}

impl CleanupService {
    pub fn new(client: ApiClient, session: Arc<SessionStore>) -> Self {
        Self { client, session }
    }

    /// Drop a deleted event from both user-side lists.
    pub async fn forget_event(&self, event_id: &str) -> Result<()> {
        let mut user = self.session.require_user().await?;

        match self.client.remove_user_event(&user.token, event_id).await {
            Ok(updated) => user.participate = updated.participate.into_iter().collect(),
            Err(err) => {
                tracing::warn!(event_id, error = %err, "Could not scrub participate entry")
            }
        }

        match self.client.remove_user_comment(&user.token, event_id).await {
            Ok(updated) => user.commented = updated.commented.into_iter().collect(),
            Err(err) => tracing::warn!(event_id, error = %err, "Could not scrub commented entry"),
        }

        self.session.replace(user).await
    }

    /// Drop a deleted event from the commented list only.
    pub async fn forget_comment(&self, event_id: &str) -> Result<()> {
        let mut user = self.session.require_user().await?;

        match self.client.remove_user_comment(&user.token, event_id).await {
            Ok(updated) => user.commented = updated.commented.into_iter().collect(),
            Err(err) => tracing::warn!(event_id, error = %err, "Could not scrub commented entry"),
        }

        self.session.replace(user).await
    }
}
