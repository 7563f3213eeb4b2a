// SPDX-License-Identifier: MIT
// Copyright 2026 Eventure Dev Team <dev@eventure.app>

//! Event model, categories and membership rules.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::AppError;

/// Creator ID of the partner feed. Events created under this account are
/// synced from an external system, so attendance for them is tracked on the
/// user record rather than on the event document.
pub const PARTNER_CREATOR_ID: &str = "64b8f0c2a1d3e4f5a6b7c8d9";

// ─── Event ───

/// Event document as returned by the Eventure API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/lib/generated/")
)]
pub struct Event {
    /// Mongo document ID
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub address: String,
    #[serde(rename = "postalCode")]
    pub postal_code: String,
    pub city: String,
    /// Scheduled start, UTC
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub date: DateTime<Utc>,
    #[serde(rename = "maxAttendees")]
    pub max_attendees: u32,
    pub category: Category,
    /// Cover image URL, empty string when the event has no cover
    #[serde(rename = "url_cover", default)]
    pub cover_url: String,
    /// Source URL on the partner site, only set on synced events
    #[serde(rename = "url_api", default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    /// Creator user ID, absent on some legacy documents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    /// User IDs attending, maintained only on locally-managed events
    #[serde(default)]
    pub attendees: HashSet<String>,
    #[serde(default)]
    pub evaluations: Vec<Evaluation>,
}

/// A single rating-and-comment pair left on an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/lib/generated/")
)]
pub struct Evaluation {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name of the evaluator
    pub name: String,
    /// Rating, 1 to 5
    #[serde(rename = "note")]
    pub rating: u8,
    pub comment: String,
}

/// How attendance is tracked for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// Attendance lives in the event's `attendees` set
    Local,
    /// Attendance lives in the user's `participate` set
    External,
}

impl Event {
    /// Which side of the API owns this event's attendance.
    pub fn registration(&self) -> Registration {
        match self.creator.as_deref() {
            Some(PARTNER_CREATOR_ID) => Registration::External,
            _ => Registration::Local,
        }
    }

    /// True once the scheduled start is strictly in the past.
    pub fn is_past(&self, now: DateTime<Utc>) -> bool {
        self.date < now
    }

    /// Mean rating rounded to one decimal, `None` when unrated.
    pub fn average_rating(&self) -> Option<f64> {
        if self.evaluations.is_empty() {
            return None;
        }
        let sum: u32 = self.evaluations.iter().map(|e| u32::from(e.rating)).sum();
        let mean = f64::from(sum) / self.evaluations.len() as f64;
        Some((mean * 10.0).round() / 10.0)
    }
}

// ─── Category ───

/// Fixed event categories, wire values are the French display labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/lib/generated/")
)]
pub enum Category {
    Musique,
    Gastronomie,
    Art,
    Jeux,
    Sport,
    Culture,
    #[serde(rename = "Fêtes")]
    Fetes,
    #[serde(rename = "Bien-être")]
    BienEtre,
    Autres,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Musique,
        Category::Gastronomie,
        Category::Art,
        Category::Jeux,
        Category::Sport,
        Category::Culture,
        Category::Fetes,
        Category::BienEtre,
        Category::Autres,
    ];

    /// Wire / display label.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Musique => "Musique",
            Category::Gastronomie => "Gastronomie",
            Category::Art => "Art",
            Category::Jeux => "Jeux",
            Category::Sport => "Sport",
            Category::Culture => "Culture",
            Category::Fetes => "Fêtes",
            Category::BienEtre => "Bien-être",
            Category::Autres => "Autres",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = AppError;

    /// Accepts labels case-insensitively, with or without accents.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| match c {
                'é' | 'è' | 'ê' | 'ë' => 'e',
                other => other,
            })
            .collect();
        match normalized.as_str() {
            "musique" => Ok(Category::Musique),
            "gastronomie" => Ok(Category::Gastronomie),
            "art" => Ok(Category::Art),
            "jeux" => Ok(Category::Jeux),
            "sport" => Ok(Category::Sport),
            "culture" => Ok(Category::Culture),
            "fetes" => Ok(Category::Fetes),
            "bien-etre" | "bienetre" => Ok(Category::BienEtre),
            "autres" => Ok(Category::Autres),
            _ => {
                let labels: Vec<&str> = Category::ALL.iter().map(|c| c.label()).collect();
                Err(AppError::Validation(format!(
                    "unknown category '{s}', expected one of: {}",
                    labels.join(", ")
                )))
            }
        }
    }
}
