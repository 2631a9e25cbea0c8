// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A collaborator was mapped as their own manager.
    SelfMapping {
        /// The collaborator that was also given as the manager.
        colaborador_id: i64,
    },
    /// Period name is empty or invalid.
    InvalidPeriodName(String),
    /// Period year is outside the accepted range.
    InvalidPeriodYear {
        /// The rejected year value.
        ano: i32,
    },
    /// Failed to parse a date from a string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// The period window is inverted.
    PeriodDatesOutOfOrder {
        /// The window start date.
        data_inicio: String,
        /// The window end date.
        data_fim: String,
    },
    /// A deadline falls after the end of the period window.
    DeadlineAfterPeriodEnd {
        /// The name of the deadline field.
        field: String,
        /// The deadline date.
        deadline: String,
        /// The window end date.
        data_fim: String,
    },
    /// The self-assessment deadline falls after the approval deadline.
    DeadlinesOutOfOrder {
        /// The self-assessment deadline.
        data_limite_autoavaliacao: String,
        /// The approval deadline.
        data_limite_aprovacao: String,
    },
    /// Evaluation status string is not a valid status.
    InvalidEvaluationStatus {
        /// The rejected status string.
        status: String,
    },
    /// Period status string is not a valid status.
    InvalidPeriodStatus {
        /// The rejected status string.
        status: String,
    },
    /// A lifecycle transition is not permitted from the current status.
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// Why the transition is not allowed.
        reason: String,
    },
    /// A required self-assessment answer is blank.
    IncompleteSelfAssessment {
        /// The blank answer field.
        field: String,
    },
    /// The manager review comment is blank.
    BlankReviewComment,
    /// The feedback accompanying a returned evaluation is blank.
    BlankReturnFeedback,
    /// A manager review score is outside the 1-5 range.
    ReviewScoreOutOfRange {
        /// The score field.
        field: String,
        /// The rejected value.
        value: u8,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SelfMapping { colaborador_id } => {
                write!(
                    f,
                    "Collaborator {colaborador_id} cannot be their own manager"
                )
            }
            Self::InvalidPeriodName(msg) => write!(f, "Invalid period name: {msg}"),
            Self::InvalidPeriodYear { ano } => write!(f, "Invalid period year: {ano}"),
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
            Self::PeriodDatesOutOfOrder {
                data_inicio,
                data_fim,
            } => {
                write!(
                    f,
                    "Period start {data_inicio} falls after period end {data_fim}"
                )
            }
            Self::DeadlineAfterPeriodEnd {
                field,
                deadline,
                data_fim,
            } => {
                write!(
                    f,
                    "Deadline {field} ({deadline}) falls after period end {data_fim}"
                )
            }
            Self::DeadlinesOutOfOrder {
                data_limite_autoavaliacao,
                data_limite_aprovacao,
            } => {
                write!(
                    f,
                    "Self-assessment deadline {data_limite_autoavaliacao} falls after approval deadline {data_limite_aprovacao}"
                )
            }
            Self::InvalidEvaluationStatus { status } => {
                write!(f, "Invalid evaluation status: '{status}'")
            }
            Self::InvalidPeriodStatus { status } => {
                write!(f, "Invalid period status: '{status}'")
            }
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Invalid status transition {from} -> {to}: {reason}")
            }
            Self::IncompleteSelfAssessment { field } => {
                write!(f, "Self-assessment answer '{field}' must not be blank")
            }
            Self::BlankReviewComment => {
                write!(f, "Manager review comment must not be blank")
            }
            Self::BlankReturnFeedback => {
                write!(f, "Returning an evaluation requires feedback for the collaborator")
            }
            Self::ReviewScoreOutOfRange { field, value } => {
                write!(f, "Review score '{field}' must be between 1 and 5, got {value}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
