// SPDX-License-Identifier: MIT
// Copyright 2026 Eventure Dev Team <dev@eventure.app>

//! Event detail view-model.

use std::sync::Arc;

use chrono::Utc;

use crate::api::ApiClient;
use crate::error::Result;
use crate::models::{Event, Registration};
use crate::store::SessionStore;
use crate::token::user_id_from_token;

/// Everything the detail screen needs to render one event.
#[derive(Debug, Clone)]
pub struct EventDetail {
    pub event: Event,
    /// Whether the logged-in user is attending
    pub joined: bool,
    /// Whether the scheduled start is in the past
    pub passed: bool,
    /// Whether the evaluation form should be offered
    pub can_evaluate: bool,
}

#[derive(Clone)]
pub struct DetailService {
    client: ApiClient,
    session: Arc<SessionStore>,
}

impl DetailService {
    pub fn new(client: ApiClient, session: Arc<SessionStore>) -> Self {
        Self { client, session }
    }

    /// Load an event and derive its membership and evaluation state.
    ///
    /// Membership is read from different places depending on who manages
    /// the event: partner-synced events keep it in the user's participate
    /// list, locally-created events keep it in the event's attendee list.
    /// A missing event is terminal; the caller should leave the screen.
    pub async fn load(&self, event_id: &str) -> Result<EventDetail> {
        let user = self.session.require_user().await?;

        let (event, participate) = tokio::join!(
            self.client.get_event(&user.token, event_id),
            self.client.get_participations(&user.token),
        );
        let event = event?;
        let participate = participate?;

        let joined = match event.registration() {
            Registration::External => participate.contains(&event.id),
            Registration::Local => {
                let user_id = user_id_from_token(&user.token)?;
                event.attendees.contains(&user_id)
            }
        };

        let passed = event.is_past(Utc::now());
        let can_evaluate = passed && !user.commented.contains(&event.id);

        Ok(EventDetail {
            event,
            joined,
            passed,
            can_evaluate,
        })
    }
}
