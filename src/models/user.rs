//! User account model mirrored from the Eventure API.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Logged-in user as returned by the login and signup endpoints.
///
/// The whole record is persisted verbatim to the session file; the server
/// copy is authoritative and every mutation replaces the stored sets
/// wholesale with what the server returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/lib/generated/")
)]
pub struct UserRecord {
    /// Display name
    #[serde(rename = "nom")]
    pub name: String,
    /// Email address (login identifier)
    pub email: String,
    /// Bearer token for authenticated requests
    pub token: String,
    /// IDs of externally-managed events the user participates in
    #[serde(default)]
    pub participate: HashSet<String>,
    /// IDs of events the user has already evaluated
    #[serde(default)]
    pub commented: HashSet<String>,
}
