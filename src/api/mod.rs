// SPDX-License-Identifier: MIT
// Copyright 2026 Eventure Dev Team <dev@eventure.app>

//! HTTP layer for the Eventure API.

pub mod client;

pub use client::{
    ApiClient, CommentedEventSummary, CommentedResponse, EventPayload, ParticipateResponse,
};
