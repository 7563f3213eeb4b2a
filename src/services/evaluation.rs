// SPDX-License-Identifier: MIT
// Copyright 2026 Eventure Dev Team <dev@eventure.app>

//! Event evaluation protocol.
//!
//! Submitting an evaluation is a two-step write: the rating-and-comment
//! pair is appended to the event, then the event is marked evaluated on
//! the user record. There is no compensating delete if the second step
//! fails; the event keeps the comment while the user record does not,
//! and the next attempt will be accepted again server-side.

use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use crate::api::ApiClient;
use crate::error::{AppError, Result};
use crate::models::Event;
use crate::store::SessionStore;

/// Rating-and-comment pair entered by the user.
#[derive(Debug, Clone, Validate)]
pub struct EvaluationInput {
    #[validate(range(min = 1, max = 5, message = "must be between 1 and 5"))]
    pub rating: u8,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub comment: String,
}

#[derive(Clone)]
pub struct EvaluationService {
    client: ApiClient,
    session: Arc<SessionStore>,
}

impl EvaluationService {
    pub fn new(client: ApiClient, session: Arc<SessionStore>) -> Self {
        Self { client, session }
    }

    /// Submit an evaluation for a passed event.
    ///
    /// All preconditions are checked before anything goes on the wire:
    /// the rating range, a non-empty comment, the event being over, and
    /// the user not having evaluated it already.
    pub async fn evaluate(&self, event: &Event, input: &EvaluationInput) -> Result<()> {
        input.validate()?;
        let mut user = self.session.require_user().await?;

        if !event.is_past(Utc::now()) {
            return Err(AppError::Validation(
                "this event has not taken place yet".to_string(),
            ));
        }
        if user.commented.contains(&event.id) {
            return Err(AppError::Validation(
                "you have already evaluated this event".to_string(),
            ));
        }

        self.client
            .evaluate_event(&user.token, &event.id, input.rating, &input.comment)
            .await?;

        let updated = match self.client.add_user_comment(&user.token, &event.id).await {
            Ok(updated) => updated,
            Err(err) => {
                tracing::warn!(
                    event_id = %event.id,
                    error = %err,
                    "Evaluation stored on event but not marked on user record"
                );
                return Err(err);
            }
        };

        user.commented = updated.commented.into_iter().collect();
        self.session.replace(user).await?;
        self.session.signal_refresh();
        Ok(())
    }

    /// Remove the user's evaluation from an event.
    ///
    /// The event may have been deleted since the evaluation was written;
    /// in that case the event-side delete is skipped and only the user
    /// record is cleaned up.
    pub async fn remove(&self, event_id: &str) -> Result<()> {
        let mut user = self.session.require_user().await?;

        match self.client.get_event(&user.token, event_id).await {
            Ok(_) => {
                self.client
                    .remove_evaluation(&user.token, event_id)
                    .await?;
            }
            Err(err) if err.is_not_found() => {
                tracing::info!(event_id, "Event gone, clearing evaluated mark only");
            }
            Err(err) => return Err(err),
        }

        let updated = self.client.remove_user_comment(&user.token, event_id).await?;
        user.commented = updated.commented.into_iter().collect();
        self.session.replace(user).await?;
        self.session.signal_refresh();
        Ok(())
    }
}
