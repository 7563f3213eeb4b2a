// SPDX-License-Identifier: MIT
// Copyright 2026 Eventure Dev Team <dev@eventure.app>

//! Session persistence and in-memory session state.

pub mod file;
pub mod session;

pub use file::SessionFile;
pub use session::SessionStore;
