// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod answers;
mod dates;
mod error;
mod period_rules;
mod status;
mod types;

#[cfg(test)]
mod tests;

// Re-export public types
pub use answers::{ManagerReview, ReviewDecision, SelfAssessment, SelfAssessmentDraft};
pub use dates::{format_date, format_timestamp, parse_date};
pub use error::DomainError;
pub use period_rules::{
    AUTO_CREATION_LEAD_DAYS, auto_creation_due, suggested_data_inicio, validate_period,
};
pub use status::{EvaluationStatus, PeriodStatus};
pub use types::{DirectoryUser, Evaluation, EvaluationPeriod, ManagerMapping};

/// Validates that a manager mapping is not reflexive.
///
/// A collaborator can never be assigned as their own evaluating manager.
/// This is enforced at every write path; a reflexive pair is rejected
/// before any persistence happens.
///
/// # Errors
///
/// Returns `DomainError::SelfMapping` if `colaborador_id == gerente_id`.
pub const fn validate_mapping(colaborador_id: i64, gerente_id: i64) -> Result<(), DomainError> {
    if colaborador_id == gerente_id {
        return Err(DomainError::SelfMapping { colaborador_id });
    }
    Ok(())
}
