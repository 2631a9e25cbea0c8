// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request field parsing.
//!
//! Requests carry calendar dates and decision keywords as strings; this
//! module turns them into typed values before anything touches the core.

use thiserror::Error;
use time::Date;

use avalia_domain::parse_date;

/// Request parsing errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestParseError {
    /// A date field does not hold a valid `YYYY-MM-DD` date.
    #[error("'{value}' is not a valid date (expected YYYY-MM-DD)")]
    InvalidDate {
        /// The request field that failed to parse.
        field: &'static str,
        /// The rejected value.
        value: String,
    },

    /// A review decision keyword is not recognized.
    #[error("'{value}' is not a valid decision (expected 'approve' or 'return')")]
    InvalidDecision {
        /// The rejected value.
        value: String,
    },
}

impl RequestParseError {
    /// Returns the request field the error refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::InvalidDate { field, .. } => field,
            Self::InvalidDecision { .. } => "decision",
        }
    }
}

/// Parses a request date field.
///
/// # Errors
///
/// Returns `RequestParseError::InvalidDate` naming the field.
pub fn parse_date_field(field: &'static str, value: &str) -> Result<Date, RequestParseError> {
    parse_date(value).map_err(|_| RequestParseError::InvalidDate {
        field,
        value: value.to_string(),
    })
}
