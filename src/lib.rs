// SPDX-License-Identifier: MIT
// Copyright 2026 Eventure Dev Team <dev@eventure.app>

//! Eventure client: browse, join, author and evaluate local events.
//!
//! This crate talks to the Eventure API, keeps the logged-in session on
//! disk, and reconciles the optimistic state the screens show with what
//! the server actually accepted.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod store;
pub mod time_utils;
pub mod token;

use std::sync::Arc;

use api::ApiClient;
use config::Config;
use error::Result;
use services::{
    AccountService, AuthoringService, CleanupService, DetailService, EvaluationService,
    ListingService, ParticipationService,
};
use store::{SessionFile, SessionStore};

/// Shared application state: one API client, one session store, and one
/// instance of each service.
pub struct App {
    pub config: Config,
    pub client: ApiClient,
    pub session: Arc<SessionStore>,
    pub account: AccountService,
    pub detail: DetailService,
    pub participation: ParticipationService,
    pub evaluation: EvaluationService,
    pub cleanup: CleanupService,
    pub listing: ListingService,
    pub authoring: AuthoringService,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let client = ApiClient::new(&config)?;
        let session = Arc::new(SessionStore::new(SessionFile::new(
            config.session_file.clone(),
        )));
        let cleanup = CleanupService::new(client.clone(), Arc::clone(&session));

        Ok(Self {
            account: AccountService::new(client.clone(), Arc::clone(&session)),
            detail: DetailService::new(client.clone(), Arc::clone(&session)),
            participation: ParticipationService::new(client.clone(), Arc::clone(&session)),
            evaluation: EvaluationService::new(client.clone(), Arc::clone(&session)),
            listing: ListingService::new(client.clone(), Arc::clone(&session), cleanup.clone()),
            authoring: AuthoringService::new(client.clone(), Arc::clone(&session)),
            cleanup,
            client,
            session,
            config,
        })
    }

    /// Restore any persisted session. Runs before the first screen.
    pub async fn load_session(&self) -> Result<()> {
        self.session.load().await
    }
}
