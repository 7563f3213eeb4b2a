// SPDX-License-Identifier: MIT
// Copyright 2026 Eventure Dev Team <dev@eventure.app>

//! Event authoring: create, edit, remake, delete.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use validator::Validate;

use crate::api::{ApiClient, EventPayload};
use crate::error::{AppError, Result};
use crate::models::{Category, Event};
use crate::store::SessionStore;

/// What the event editor screen was opened for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    /// Blank form
    Create,
    /// Form prefilled from the event, submit updates it in place
    Edit(String),
    /// Read-only form with a delete confirmation
    Delete(String),
    /// Form prefilled from a past event, submit creates a new one
    Remake(String),
}

impl EditorMode {
    /// The form fields cannot be changed in this mode.
    pub fn read_only(&self) -> bool {
        matches!(self, EditorMode::Delete(_))
    }
}

/// Cover image chosen in the editor.
#[derive(Debug, Clone)]
pub enum CoverSource {
    /// Already hosted, reused as-is
    Url(String),
    /// Local file to upload before the event is written
    File(PathBuf),
}

/// Editable event fields, validated before anything goes on the wire.
#[derive(Debug, Clone, Validate)]
pub struct EventDraft {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub description: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub address: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub postal_code: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub city: String,
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub max_attendees: u32,
    pub date: DateTime<Utc>,
    pub category: Category,
    pub cover: Option<CoverSource>,
}

impl EventDraft {
    /// Prefill a draft from an existing event, for edit and remake.
    pub fn from_event(event: &Event) -> Self {
        let cover = if event.cover_url.is_empty() {
            None
        } else {
            Some(CoverSource::Url(event.cover_url.clone()))
        };
        Self {
            title: event.title.clone(),
            description: event.description.clone(),
            address: event.address.clone(),
            postal_code: event.postal_code.clone(),
            city: event.city.clone(),
            max_attendees: event.max_attendees,
            date: event.date,
            category: event.category,
            cover,
        }
    }
}

#[derive(Clone)]
pub struct AuthoringService {
    client: ApiClient,
    session: Arc<SessionStore>,
}

impl AuthoringService {
    pub fn new(client: ApiClient, session: Arc<SessionStore>) -> Self {
        Self { client, session }
    }

    /// Fetch an event and build the prefilled draft for it.
    pub async fn draft_from(&self, event_id: &str) -> Result<(Event, EventDraft)> {
        let user = self.session.require_user().await?;
        let event = self.client.get_event(&user.token, event_id).await?;
        let draft = EventDraft::from_event(&event);
        Ok((event, draft))
    }

    /// Write a draft: update in place for `Edit`, create a fresh event
    /// for `Create` and `Remake`. A local cover file is uploaded first
    /// and only the hosted URL goes into the event document.
    pub async fn submit(&self, mode: &EditorMode, draft: &EventDraft) -> Result<Event> {
        if mode.read_only() {
            return Err(AppError::Validation(
                "this form is read-only, use delete instead".to_string(),
            ));
        }
        draft.validate()?;
        let user = self.session.require_user().await?;

        let cover_url = match &draft.cover {
            None => String::new(),
            Some(CoverSource::Url(url)) => url.clone(),
            Some(CoverSource::File(path)) => {
                let bytes = tokio::fs::read(path).await.map_err(|err| {
                    AppError::Storage(format!("reading {}: {err}", path.display()))
                })?;
                let file_name = path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .unwrap_or("image.jpg");
                self.client
                    .upload_cover(&user.token, bytes, file_name)
                    .await?
            }
        };

        let payload = EventPayload {
            title: draft.title.clone(),
            description: draft.description.clone(),
            address: draft.address.clone(),
            postal_code: draft.postal_code.clone(),
            city: draft.city.clone(),
            date: draft.date,
            max_attendees: draft.max_attendees,
            category: draft.category,
            cover_url,
        };

        let event = match mode {
            EditorMode::Edit(event_id) => {
                self.client
                    .update_event(&user.token, event_id, &payload)
                    .await?
            }
            _ => self.client.create_event(&user.token, &payload).await?,
        };

        self.session.signal_refresh();
        Ok(event)
    }

    /// Delete the event this mode was opened on, then drop it from the
    /// user's participate list. The event-side delete is authoritative;
    /// a failed participate scrub is picked up by list cleanup later.
    pub async fn delete(&self, mode: &EditorMode) -> Result<()> {
        let event_id = match mode {
            EditorMode::Delete(event_id) => event_id,
            _ => {
                return Err(AppError::Validation(
                    "open the form in delete mode to delete".to_string(),
                ))
            }
        };
        let mut user = self.session.require_user().await?;

        self.client.delete_event(&user.token, event_id).await?;

        match self.client.remove_user_event(&user.token, event_id).await {
            Ok(updated) => {
                user.participate = updated.participate.into_iter().collect();
                self.session.replace(user).await?;
            }
            Err(err) => {
                tracing::warn!(event_id, error = %err, "Deleted event still on participate list")
            }
        }

        self.session.signal_refresh();
        Ok(())
    }
}
