// SPDX-License-Identifier: MIT
// Copyright 2026 Eventure Dev Team <dev@eventure.app>

//! Optimistic join/leave with dual-write reconciliation.
//!
//! A participation change touches two documents: the user's participate
//! list and the event's attendee list. Both writes go out in parallel;
//! if either fails the optimistic attendee update is rolled back and
//! neither side is considered applied.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::api::ApiClient;
use crate::error::{AppError, Result};
use crate::models::Event;
use crate::store::SessionStore;
use crate::token::user_id_from_token;

#[derive(Clone)]
pub struct ParticipationService {
    client: ApiClient,
    session: Arc<SessionStore>,
    in_flight: Arc<DashMap<String, ()>>,
}

/// Removes the in-flight marker when the request settles, on every path.
struct PendingGuard {
    in_flight: Arc<DashMap<String, ()>>,
    event_id: String,
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.in_flight.remove(&self.event_id);
    }
}

impl ParticipationService {
    pub fn new(client: ApiClient, session: Arc<SessionStore>) -> Self {
        Self {
            client,
            session,
            in_flight: Arc::new(DashMap::new()),
        }
    }

    /// Join an event. The attendee list on `event` is updated optimistically
    /// and restored verbatim if either write fails.
    pub async fn join(&self, event: &mut Event) -> Result<()> {
        let _guard = self.begin(&event.id)?;
        let mut user = self.session.require_user().await?;
        let user_id = user_id_from_token(&user.token)?;

        let snapshot = event.attendees.clone();
        event.attendees.insert(user_id);

        let (user_side, event_side) = tokio::join!(
            self.client.add_user_event(&user.token, &event.id),
            self.client.attend_event(&user.token, &event.id),
        );

        match (user_side, event_side) {
            (Ok(updated), Ok(())) => {
                user.participate = updated.participate.into_iter().collect();
                self.session.replace(user).await?;
                self.session.signal_refresh();
                Ok(())
            }
            (Err(err), _) | (_, Err(err)) => {
                event.attendees = snapshot;
                tracing::warn!(event_id = %event.id, error = %err, "Join failed, attendees rolled back");
                Err(err)
            }
        }
    }

    /// Leave an event, with the same rollback contract as `join`.
    pub async fn leave(&self, event: &mut Event) -> Result<()> {
        let _guard = self.begin(&event.id)?;
        let mut user = self.session.require_user().await?;
        let user_id = user_id_from_token(&user.token)?;

        let snapshot = event.attendees.clone();
        event.attendees.remove(&user_id);

        let (user_side, event_side) = tokio::join!(
            self.client.remove_user_event(&user.token, &event.id),
            self.client.remove_attendee(&user.token, &event.id),
        );

        match (user_side, event_side) {
            (Ok(updated), Ok(())) => {
                user.participate = updated.participate.into_iter().collect();
                self.session.replace(user).await?;
                self.session.signal_refresh();
                Ok(())
            }
            (Err(err), _) | (_, Err(err)) => {
                event.attendees = snapshot;
                tracing::warn!(event_id = %event.id, error = %err, "Leave failed, attendees rolled back");
                Err(err)
            }
        }
    }

    /// True while a join or leave for this event has not settled.
    pub fn is_pending(&self, event_id: &str) -> bool {
        self.in_flight.contains_key(event_id)
    }

    fn begin(&self, event_id: &str) -> Result<PendingGuard> {
        match self.in_flight.entry(event_id.to_string()) {
            Entry::Occupied(_) => Err(AppError::RequestInFlight),
            Entry::Vacant(vacant) => {
                vacant.insert(());
                Ok(PendingGuard {
                    in_flight: Arc::clone(&self.in_flight),
                    event_id: event_id.to_string(),
                })
            }
        }
    }
}
