// SPDX-License-Identifier: MIT
// Copyright 2026 Eventure Dev Team <dev@eventure.app>

//! Eventure API client.
//!
//! Handles:
//! - Account endpoints (login, signup, profile updates)
//! - Event CRUD and the per-event membership endpoints
//! - Evaluation endpoints
//! - Cover image upload
//!
//! Server errors arrive as `{"error": "..."}` bodies; status codes are
//! mapped onto the crate error taxonomy here so callers never look at
//! HTTP statuses themselves.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{Category, Evaluation, Event, UserRecord};

/// Eventure API client.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    upload_platform: String,
}

impl ApiClient {
    /// Create a client from the loaded configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.api_url.clone(),
            upload_platform: config.upload_platform.clone(),
        })
    }

    // ─── Account ───

    /// Authenticate and return the full user record.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserRecord> {
        let url = format!("{}/api/user/login", self.base_url);
        let body = serde_json::json!({
            "email": email,
            "password": password,
        });

        let response = self.http.post(&url).json(&body).send().await?;
        self.check_response_json(response).await
    }

    /// Create an account and return the full user record.
    pub async fn signup(&self, name: &str, email: &str, password: &str) -> Result<UserRecord> {
        let url = format!("{}/api/user/signup", self.base_url);
        let body = serde_json::json!({
            "nom": name,
            "email": email,
            "password": password,
            "participate": [],
            "commented": [],
        });

        let response = self.http.post(&url).json(&body).send().await?;
        self.check_response_json(response).await
    }

    /// Update the display name and email of the logged-in user.
    pub async fn update_user(&self, token: &str, name: &str, email: &str) -> Result<()> {
        let url = format!("{}/api/user/update-user", self.base_url);
        let body = serde_json::json!({
            "newNom": name,
            "newEmail": email,
        });

        let response = self
            .http
            .patch(&url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;
        self.check_response(response).await
    }

    // ─── Events ───

    /// Get a single event by ID.
    pub async fn get_event(&self, token: &str, event_id: &str) -> Result<Event> {
        let url = format!("{}/api/events/{}", self.base_url, event_id);
        self.get_json(&url, token).await
    }

    /// List every event, regardless of creator.
    pub async fn list_all_events(&self, token: &str) -> Result<Vec<Event>> {
        let url = format!("{}/api/events/all", self.base_url);
        self.get_json(&url, token).await
    }

    /// List events created by the logged-in user.
    pub async fn list_my_events(&self, token: &str) -> Result<Vec<Event>> {
        let url = format!("{}/api/events", self.base_url);
        self.get_json(&url, token).await
    }

    /// Create an event.
    pub async fn create_event(&self, token: &str, payload: &EventPayload) -> Result<Event> {
        let url = format!("{}/api/events", self.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(payload)
            .send()
            .await?;
        self.check_response_json(response).await
    }

    /// Update an event in place.
    pub async fn update_event(
        &self,
        token: &str,
        event_id: &str,
        payload: &EventPayload,
    ) -> Result<Event> {
        let url = format!("{}/api/events/{}", self.base_url, event_id);
        let response = self
            .http
            .patch(&url)
            .bearer_auth(token)
            .json(payload)
            .send()
            .await?;
        self.check_response_json(response).await
    }

    /// Delete an event.
    pub async fn delete_event(&self, token: &str, event_id: &str) -> Result<()> {
        let url = format!("{}/api/events/{}", self.base_url, event_id);
        let response = self.http.delete(&url).bearer_auth(token).send().await?;
        self.check_response(response).await
    }

    // ─── Membership ───

    /// Add the user to an event's attendee list (event side).
    pub async fn attend_event(&self, token: &str, event_id: &str) -> Result<()> {
        let url = format!("{}/api/events/attend", self.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(&event_id_body(event_id))
            .send()
            .await?;
        self.check_response(response).await
    }

    /// Remove the user from an event's attendee list (event side).
    pub async fn remove_attendee(&self, token: &str, event_id: &str) -> Result<()> {
        let url = format!("{}/api/events/remove-attendee", self.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(&event_id_body(event_id))
            .send()
            .await?;
        self.check_response(response).await
    }

    /// Record an event on the user's participate list (user side).
    /// Returns the authoritative participate list.
    pub async fn add_user_event(&self, token: &str, event_id: &str) -> Result<ParticipateResponse> {
        let url = format!("{}/api/user/add-event", self.base_url);
        let response = self
            .http
            .patch(&url)
            .bearer_auth(token)
            .json(&event_id_body(event_id))
            .send()
            .await?;
        self.check_response_json(response).await
    }

    /// Drop an event from the user's participate list (user side).
    /// Returns the authoritative participate list.
    pub async fn remove_user_event(
        &self,
        token: &str,
        event_id: &str,
    ) -> Result<ParticipateResponse> {
        let url = format!("{}/api/user/remove-event", self.base_url);
        let response = self
            .http
            .patch(&url)
            .bearer_auth(token)
            .json(&event_id_body(event_id))
            .send()
            .await?;
        self.check_response_json(response).await
    }

    /// Fetch the user's current participate list.
    pub async fn get_participations(&self, token: &str) -> Result<Vec<String>> {
        let url = format!("{}/api/user/participate", self.base_url);
        let body: ParticipateResponse = self.get_json(&url, token).await?;
        Ok(body.participate)
    }

    // ─── Evaluations ───

    /// Append a rating-and-comment pair to an event.
    pub async fn evaluate_event(
        &self,
        token: &str,
        event_id: &str,
        rating: u8,
        comment: &str,
    ) -> Result<()> {
        let url = format!("{}/api/events/evaluate", self.base_url);
        let body = serde_json::json!({
            "eventId": event_id,
            "note": rating,
            "comment": comment,
        });

        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;
        self.check_response(response).await
    }

    /// Remove the user's evaluation from an event.
    pub async fn remove_evaluation(&self, token: &str, event_id: &str) -> Result<()> {
        let url = format!("{}/api/events/remove-evaluate", self.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(&event_id_body(event_id))
            .send()
            .await?;
        self.check_response(response).await
    }

    /// Mark an event as evaluated on the user record.
    /// Returns the authoritative commented list.
    pub async fn add_user_comment(&self, token: &str, event_id: &str) -> Result<CommentedResponse> {
        let url = format!("{}/api/user/add-comment", self.base_url);
        let response = self
            .http
            .patch(&url)
            .bearer_auth(token)
            .json(&event_id_body(event_id))
            .send()
            .await?;
        self.check_response_json(response).await
    }

    /// Clear the evaluated mark for an event on the user record.
    /// Returns the authoritative commented list.
    pub async fn remove_user_comment(
        &self,
        token: &str,
        event_id: &str,
    ) -> Result<CommentedResponse> {
        let url = format!("{}/api/user/remove-comment", self.base_url);
        let response = self
            .http
            .patch(&url)
            .bearer_auth(token)
            .json(&event_id_body(event_id))
            .send()
            .await?;
        self.check_response_json(response).await
    }

    /// Fetch the user's comments grouped by event.
    pub async fn get_user_comments(&self, token: &str) -> Result<Vec<CommentedEventSummary>> {
        let url = format!("{}/api/user/user-comments", self.base_url);
        let body: UserCommentsResponse = self.get_json(&url, token).await?;
        Ok(body.events_with_user_comments)
    }

    // ─── Uploads ───

    /// Upload a cover image, returning its hosted URL.
    pub async fn upload_cover(
        &self,
        token: &str,
        bytes: Vec<u8>,
        file_name: &str,
    ) -> Result<String> {
        let url = format!("{}/api/cloudinary/upload", self.base_url);
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str("image/jpeg")
            .map_err(|e| AppError::Validation(format!("cover image: {e}")))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .query(&[("plateform", self.upload_platform.as_str())])
            .multipart(form)
            .send()
            .await?;
        let body: UploadResponse = self.check_response_json(response).await?;
        Ok(body.url)
    }

    // ─── Helpers ───

    /// Generic GET request with JSON response.
    async fn get_json<T: for<'de> Deserialize<'de>>(&self, url: &str, token: &str) -> Result<T> {
        let response = self.http.get(url).bearer_auth(token).send().await?;
        self.check_response_json(response).await
    }

    /// Check response status and return error if not successful.
    async fn check_response(&self, response: reqwest::Response) -> Result<()> {
        if response.status().is_success() {
            return Ok(());
        }
        Err(response_error(response).await)
    }

    /// Check response and parse JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        if !response.status().is_success() {
            return Err(response_error(response).await);
        }
        response
            .json()
            .await
            .map_err(|e| AppError::Api(format!("JSON parse error: {}", e)))
    }
}

fn event_id_body(event_id: &str) -> serde_json::Value {
    serde_json::json!({ "eventId": event_id })
}

/// Map a failed response onto the error taxonomy.
async fn response_error(response: reqwest::Response) -> AppError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|b| b.error)
        .unwrap_or(body);
    let message = if message.is_empty() {
        status.to_string()
    } else {
        message
    };

    match status.as_u16() {
        404 => AppError::NotFound(message),
        401 => AppError::Unauthorized,
        400 => AppError::Validation(message),
        _ => AppError::Api(format!("HTTP {}: {}", status, message)),
    }
}

/// Error body shape used by every Eventure endpoint.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Create/update body for an event.
#[derive(Debug, Clone, serde::Serialize)]
pub struct EventPayload {
    pub title: String,
    pub description: String,
    pub address: String,
    #[serde(rename = "postalCode")]
    pub postal_code: String,
    pub city: String,
    pub date: DateTime<Utc>,
    #[serde(rename = "maxAttendees")]
    pub max_attendees: u32,
    pub category: Category,
    /// Hosted cover URL, empty string when the event has no cover
    #[serde(rename = "url_cover")]
    pub cover_url: String,
}

/// User-side participate list, as returned by add-event and remove-event.
#[derive(Debug, Clone, Deserialize)]
pub struct ParticipateResponse {
    pub participate: Vec<String>,
}

/// User-side commented list, as returned by add-comment and remove-comment.
#[derive(Debug, Clone, Deserialize)]
pub struct CommentedResponse {
    pub commented: Vec<String>,
}

/// One event's worth of the user's comments.
#[derive(Debug, Clone, Deserialize)]
pub struct CommentedEventSummary {
    #[serde(rename = "eventId")]
    pub event_id: String,
    #[serde(rename = "eventTitle")]
    pub event_title: String,
    #[serde(default)]
    pub evaluations: Vec<Evaluation>,
}

#[derive(Debug, Deserialize)]
struct UserCommentsResponse {
    #[serde(rename = "eventsWithUserComments")]
    events_with_user_comments: Vec<CommentedEventSummary>,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    url: String,
}
