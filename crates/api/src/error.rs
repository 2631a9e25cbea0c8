// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use avalia::CoreError;
use avalia_domain::DomainError;
use avalia_persistence::PersistenceError;

use crate::request_parse::RequestParseError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role}")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API
/// contract. Wrong-actor failures (`Unauthorized`) and wrong-state
/// failures (`InvalidTransition`) are deliberately separate variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the caller does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role or identity required for this action.
        required_role: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// A workflow transition was attempted from a status that does not
    /// permit it.
    InvalidTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// A human-readable description.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidTransition { from, to, message } => {
                write!(f, "Invalid transition {from} -> {to}: {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

impl From<RequestParseError> for ApiError {
    fn from(err: RequestParseError) -> Self {
        Self::InvalidInput {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked
/// directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::SelfMapping { colaborador_id } => ApiError::DomainRuleViolation {
            rule: String::from("no_self_mapping"),
            message: format!("Collaborator {colaborador_id} cannot be their own manager"),
        },
        DomainError::InvalidPeriodName(msg) => ApiError::InvalidInput {
            field: String::from("nome"),
            message: msg,
        },
        DomainError::InvalidPeriodYear { ano } => ApiError::InvalidInput {
            field: String::from("ano"),
            message: format!("Invalid period year: {ano}"),
        },
        DomainError::DateParseError { date_string, error } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Failed to parse date '{date_string}': {error}"),
        },
        DomainError::DateArithmeticOverflow { operation } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Date arithmetic overflow while {operation}"),
        },
        DomainError::PeriodDatesOutOfOrder {
            data_inicio,
            data_fim,
        } => ApiError::DomainRuleViolation {
            rule: String::from("period_window_order"),
            message: format!("Period start {data_inicio} falls after period end {data_fim}"),
        },
        DomainError::DeadlineAfterPeriodEnd {
            field,
            deadline,
            data_fim,
        } => ApiError::DomainRuleViolation {
            rule: String::from("deadline_within_window"),
            message: format!("Deadline {field} ({deadline}) falls after period end {data_fim}"),
        },
        DomainError::DeadlinesOutOfOrder {
            data_limite_autoavaliacao,
            data_limite_aprovacao,
        } => ApiError::DomainRuleViolation {
            rule: String::from("deadline_order"),
            message: format!(
                "Self-assessment deadline {data_limite_autoavaliacao} falls after approval deadline {data_limite_aprovacao}"
            ),
        },
        DomainError::InvalidEvaluationStatus { status } => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Invalid evaluation status: '{status}'"),
        },
        DomainError::InvalidPeriodStatus { status } => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Invalid period status: '{status}'"),
        },
        DomainError::InvalidStatusTransition { from, to, reason } => ApiError::InvalidTransition {
            from,
            to,
            message: reason,
        },
        DomainError::IncompleteSelfAssessment { field } => ApiError::InvalidInput {
            field,
            message: String::from("Answer must not be blank"),
        },
        DomainError::BlankReviewComment => ApiError::InvalidInput {
            field: String::from("questao_15_comentario_avaliador"),
            message: String::from("Manager review comment must not be blank"),
        },
        DomainError::BlankReturnFeedback => ApiError::InvalidInput {
            field: String::from("comentario_devolucao"),
            message: String::from("Returning an evaluation requires feedback"),
        },
        DomainError::ReviewScoreOutOfRange { field, value } => ApiError::InvalidInput {
            field,
            message: format!("Score must be between 1 and 5, got {value}"),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked
/// directly. Wrong-actor rejections become authorization failures; domain
/// violations are translated field by field.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::NotEvaluationSubject { .. } => ApiError::Unauthorized {
            action: String::from("submit_self_assessment"),
            required_role: String::from("the evaluation's subject"),
        },
        CoreError::NotAssignedEvaluator { .. } => ApiError::Unauthorized {
            action: String::from("submit_manager_review"),
            required_role: String::from("the evaluation's assigned evaluator"),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Infrastructure failures collapse into `Internal`; the not-found and
/// guard-rule failures keep their meaning.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Resource"),
            message,
        },
        PersistenceError::PeriodHasEvaluations { periodo_id, count } => {
            ApiError::DomainRuleViolation {
                rule: String::from("period_delete_blocked"),
                message: format!(
                    "Period {periodo_id} cannot be deleted: {count} evaluation(s) reference it"
                ),
            }
        }
        PersistenceError::AutoCreationAlreadyExecuted { periodo_id } => {
            ApiError::DomainRuleViolation {
                rule: String::from("auto_creation_once"),
                message: format!("Auto-creation already executed for period {periodo_id}"),
            }
        }
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
