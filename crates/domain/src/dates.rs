// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar-date parsing and formatting helpers.
//!
//! Dates cross the wire and the storage layer as ISO 8601 calendar strings
//! (`YYYY-MM-DD`); timestamps as RFC 3339. Parsing happens only at the rule
//! boundaries that need real calendar arithmetic.

use crate::error::DomainError;
use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Parses an ISO 8601 calendar date (`YYYY-MM-DD`).
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid date.
pub fn parse_date(date_string: &str) -> Result<Date, DomainError> {
    Date::parse(date_string, DATE_FORMAT).map_err(|e| DomainError::DateParseError {
        date_string: date_string.to_string(),
        error: e.to_string(),
    })
}

/// Formats a calendar date as `YYYY-MM-DD`.
///
/// # Errors
///
/// Returns `DomainError::DateArithmeticOverflow` if the date cannot be
/// formatted (out-of-range component).
pub fn format_date(date: Date) -> Result<String, DomainError> {
    date.format(DATE_FORMAT)
        .map_err(|e| DomainError::DateArithmeticOverflow {
            operation: format!("formatting date: {e}"),
        })
}

/// Formats a timestamp as RFC 3339.
///
/// # Errors
///
/// Returns `DomainError::DateArithmeticOverflow` if the timestamp cannot be
/// formatted.
pub fn format_timestamp(timestamp: OffsetDateTime) -> Result<String, DomainError> {
    timestamp
        .format(&Rfc3339)
        .map_err(|e| DomainError::DateArithmeticOverflow {
            operation: format!("formatting timestamp: {e}"),
        })
}
