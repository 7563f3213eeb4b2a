// SPDX-License-Identifier: MIT
// Copyright 2026 Eventure Dev Team <dev@eventure.app>

//! Data models for the application.

pub mod event;
pub mod user;

pub use event::{Category, Evaluation, Event, Registration, PARTNER_CREATOR_ID};
pub use user::UserRecord;
