// SPDX-License-Identifier: MIT
// Copyright 2026 Eventure Dev Team <dev@eventure.app>

//! Event list assembly: browse, participations, own events, related rail.

use std::cmp::Reverse;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures_util::stream::{self, StreamExt};
use rand::seq::SliceRandom;

use crate::api::{ApiClient, CommentedEventSummary};
use crate::error::{AppError, Result};
use crate::models::{Category, Event};
use crate::services::CleanupService;
use crate::store::SessionStore;

/// Cap on concurrent per-event fetches when resolving participations.
const MAX_PARALLEL_EVENT_FETCHES: usize = 8;

/// How many events the related rail shows.
const RELATED_EVENTS_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOrder {
    Ascending,
    Descending,
}

/// Filter for the user's own events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnedFilter {
    All,
    Upcoming,
    Past,
}

/// The participations screen, split around now.
#[derive(Debug, Default)]
pub struct Participations {
    /// Soonest first
    pub upcoming: Vec<Event>,
    /// Most recent first
    pub past: Vec<Event>,
}

/// Outcome of resolving one participate entry.
enum Resolved {
    Live(Event),
    Deleted(String),
}

#[derive(Clone)]
pub struct ListingService {
    client: ApiClient,
    session: Arc<SessionStore>,
    cleanup: CleanupService,
}

impl ListingService {
    pub fn new(client: ApiClient, session: Arc<SessionStore>, cleanup: CleanupService) -> Self {
        Self {
            client,
            session,
            cleanup,
        }
    }

    /// Upcoming events across all creators, optionally narrowed to a category.
    pub async fn upcoming(
        &self,
        category: Option<Category>,
        order: DateOrder,
    ) -> Result<Vec<Event>> {
        let user = self.session.require_user().await?;
        let now = Utc::now();

        let mut events: Vec<Event> = self
            .client
            .list_all_events(&user.token)
            .await?
            .into_iter()
            .filter(|e| !e.is_past(now))
            .filter(|e| category.map_or(true, |c| e.category == c))
            .collect();

        match order {
            DateOrder::Ascending => events.sort_by_key(|e| e.date),
            DateOrder::Descending => events.sort_by_key(|e| Reverse(e.date)),
        }
        Ok(events)
    }

    /// Resolve the user's participate list into live events, scrubbing
    /// entries whose event no longer exists.
    pub async fn participations(&self) -> Result<Participations> {
        let user = self.session.require_user().await?;
        let ids: Vec<String> = user.participate.iter().cloned().collect();

        let resolved = stream::iter(ids)
            .map(|event_id| {
                let client = self.client.clone();
                let token = user.token.clone();
                async move {
                    match client.get_event(&token, &event_id).await {
                        Ok(event) => Ok(Resolved::Live(event)),
                        Err(err) if err.is_not_found() => Ok(Resolved::Deleted(event_id)),
                        Err(err) => Err(err),
                    }
                }
            })
            .buffer_unordered(MAX_PARALLEL_EVENT_FETCHES)
            .collect::<Vec<Result<Resolved>>>()
            .await
            .into_iter()
            .collect::<std::result::Result<Vec<_>, AppError>>()?;

        let mut live = Vec::new();
        for item in resolved {
            match item {
                Resolved::Live(event) => live.push(event),
                Resolved::Deleted(event_id) => {
                    tracing::info!(event_id = %event_id, "Participation points at a deleted event, scrubbing");
                    self.cleanup.forget_event(&event_id).await?;
                }
            }
        }

        Ok(split_for_display(live, Utc::now()))
    }

    /// Events created by the logged-in user.
    pub async fn mine(&self, filter: OwnedFilter) -> Result<Vec<Event>> {
        let user = self.session.require_user().await?;
        let now = Utc::now();

        let mut events: Vec<Event> = self
            .client
            .list_my_events(&user.token)
            .await?
            .into_iter()
            .filter(|e| match filter {
                OwnedFilter::All => true,
                OwnedFilter::Upcoming => !e.is_past(now),
                OwnedFilter::Past => e.is_past(now),
            })
            .collect();

        events.sort_by_key(|e| e.date);
        Ok(events)
    }

    /// A shuffled sample of other upcoming events in the same category.
    pub async fn related(&self, category: Category, exclude_id: &str) -> Result<Vec<Event>> {
        let user = self.session.require_user().await?;
        let now = Utc::now();

        let mut events: Vec<Event> = self
            .client
            .list_all_events(&user.token)
            .await?
            .into_iter()
            .filter(|e| e.category == category && e.id != exclude_id && !e.is_past(now))
            .collect();

        events.shuffle(&mut rand::rng());
        events.truncate(RELATED_EVENTS_LIMIT);
        Ok(events)
    }

    /// The user's comments grouped by event, with dangling entries scrubbed.
    pub async fn my_comments(&self) -> Result<Vec<CommentedEventSummary>> {
        let user = self.session.require_user().await?;
        let summaries = self.client.get_user_comments(&user.token).await?;

        let mut live = Vec::new();
        for summary in summaries {
            match self.client.get_event(&user.token, &summary.event_id).await {
                Ok(_) => live.push(summary),
                Err(err) if err.is_not_found() => {
                    tracing::info!(event_id = %summary.event_id, "Comment points at a deleted event, scrubbing");
                    self.cleanup.forget_comment(&summary.event_id).await?;
                }
                Err(err) => return Err(err),
            }
        }
        Ok(live)
    }
}

/// Split events into upcoming and past halves, each sorted for display.
pub fn split_for_display(events: Vec<Event>, now: DateTime<Utc>) -> Participations {
    let (mut upcoming, mut past): (Vec<Event>, Vec<Event>) =
        events.into_iter().partition(|e| !e.is_past(now));
    upcoming.sort_by_key(|e| e.date);
    past.sort_by_key(|e| Reverse(e.date));
    Participations { upcoming, past }
}
