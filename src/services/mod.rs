// SPDX-License-Identifier: MIT
// Copyright 2026 Eventure Dev Team <dev@eventure.app>

//! Services module - business logic layer.

pub mod account;
pub mod authoring;
pub mod cleanup;
pub mod detail;
pub mod evaluation;
pub mod listing;
pub mod participation;

pub use account::{AccountService, Credentials, SignupInput, UpdateProfileInput};
pub use authoring::{AuthoringService, CoverSource, EditorMode, EventDraft};
pub use cleanup::CleanupService;
pub use detail::{DetailService, EventDetail};
pub use evaluation::{EvaluationInput, EvaluationService};
pub use listing::{split_for_display, DateOrder, ListingService, OwnedFilter, Participations};
pub use participation::ParticipationService;
