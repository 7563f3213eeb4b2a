// SPDX-License-Identifier: MIT
// Copyright 2026 Eventure Dev Team <dev@eventure.app>

//! Shared helpers for date/time formatting and parsing.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::error::{AppError, Result};

/// Format an event schedule for display, e.g. `14/07/2026 | 19:30`.
pub fn format_schedule(date: DateTime<Utc>) -> String {
    date.format("%d/%m/%Y | %H:%M").to_string()
}

/// Parse a `dd/mm/yyyy` date and `HH:MM` time pair into a UTC timestamp.
pub fn parse_schedule(date: &str, time: &str) -> Result<DateTime<Utc>> {
    let day = NaiveDate::parse_from_str(date, "%d/%m/%Y")
        .map_err(|_| AppError::Validation(format!("date '{date}' is not in dd/mm/yyyy format")))?;
    let clock = NaiveTime::parse_from_str(time, "%H:%M")
        .map_err(|_| AppError::Validation(format!("time '{time}' is not in HH:MM format")))?;
    Ok(day.and_time(clock).and_utc())
}
