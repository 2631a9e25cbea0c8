// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use avalia_domain::DomainError;

/// Errors produced by the transition engine.
///
/// Wrong-actor rejections are deliberately distinct from domain-rule
/// violations: a caller who is not the subject gets an authorization error,
/// while the subject acting in the wrong status gets an invalid-transition
/// error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated (invalid transition, blank answers, ...).
    DomainViolation(DomainError),
    /// The caller is not the evaluation's subject.
    NotEvaluationSubject {
        /// The evaluation that was targeted.
        avaliacao_id: Option<i64>,
        /// The caller's user id.
        caller: i64,
    },
    /// The caller is not the evaluation's assigned evaluator.
    NotAssignedEvaluator {
        /// The evaluation that was targeted.
        avaliacao_id: Option<i64>,
        /// The caller's user id.
        caller: i64,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "{err}"),
            Self::NotEvaluationSubject {
                avaliacao_id,
                caller,
            } => match avaliacao_id {
                Some(id) => write!(f, "User {caller} is not the subject of evaluation {id}"),
                None => write!(f, "User {caller} is not the subject of this evaluation"),
            },
            Self::NotAssignedEvaluator {
                avaliacao_id,
                caller,
            } => match avaliacao_id {
                Some(id) => write!(f, "User {caller} is not the evaluator of evaluation {id}"),
                None => write!(f, "User {caller} is not the evaluator of this evaluation"),
            },
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
