// SPDX-License-Identifier: MIT
// Copyright 2026 Eventure Dev Team <dev@eventure.app>

//! Bearer token payload decoding.
//!
//! The API issues JWTs whose payload carries the Mongo user ID under `_id`.
//! Only the server verifies signatures; the client just needs the ID to
//! match itself against event attendee lists.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::Deserialize;

use crate::error::{AppError, Result};

#[derive(Debug, Deserialize)]
struct TokenClaims {
    #[serde(rename = "_id")]
    id: String,
}

/// Extract the user ID from the payload segment of a JWT, without
/// verifying the signature.
pub fn user_id_from_token(token: &str) -> Result<String> {
    let payload = token.split('.').nth(1).ok_or(AppError::InvalidToken)?;
    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| AppError::InvalidToken)?;
    let claims: TokenClaims =
        serde_json::from_slice(&bytes).map_err(|_| AppError::InvalidToken)?;
    Ok(claims.id)
}
