// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Evaluation and period status tracking and transition logic.
//!
//! Evaluation status transitions are actor-initiated only; the system never
//! advances an evaluation based on time alone. The auto-creation trigger
//! creates evaluations in the initial state but never transitions them.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Status of a single evaluation as it moves through the workflow.
///
/// Status is tracked per (collaborator, period) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationStatus {
    /// Created, awaiting the collaborator's self-assessment.
    Pendente,
    /// The collaborator is actively filling the self-assessment.
    EmAndamento,
    /// Self-assessment submitted, awaiting the manager's review.
    AguardandoAprovacao,
    /// Approved by the manager. Terminal.
    Concluida,
    /// Returned by the manager for rework.
    Devolvida,
}

impl EvaluationStatus {
    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pendente => "pendente",
            Self::EmAndamento => "em_andamento",
            Self::AguardandoAprovacao => "aguardando_aprovacao",
            Self::Concluida => "concluida",
            Self::Devolvida => "devolvida",
        }
    }

    /// Parses a status from its string representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidEvaluationStatus` if the string is not a
    /// valid status.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "pendente" => Ok(Self::Pendente),
            "em_andamento" => Ok(Self::EmAndamento),
            "aguardando_aprovacao" => Ok(Self::AguardandoAprovacao),
            "concluida" => Ok(Self::Concluida),
            "devolvida" => Ok(Self::Devolvida),
            _ => Err(DomainError::InvalidEvaluationStatus {
                status: s.to_string(),
            }),
        }
    }

    /// Returns true if this status is terminal (cannot transition further).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Concluida)
    }

    /// Validates if a transition from this status to another is permitted.
    ///
    /// Valid transitions are:
    /// - `pendente` → `em_andamento` | `aguardando_aprovacao`
    /// - `em_andamento` → `aguardando_aprovacao`
    /// - `aguardando_aprovacao` → `concluida` | `devolvida`
    /// - `devolvida` → `em_andamento` | `aguardando_aprovacao`
    ///
    /// # Errors
    ///
    /// Returns an error if the transition is not allowed.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        if self.is_terminal() {
            return Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "cannot transition from terminal status".to_string(),
            });
        }

        let valid = match self {
            Self::Pendente | Self::Devolvida => {
                matches!(new_status, Self::EmAndamento | Self::AguardandoAprovacao)
            }
            Self::EmAndamento => matches!(new_status, Self::AguardandoAprovacao),
            Self::AguardandoAprovacao => {
                matches!(new_status, Self::Concluida | Self::Devolvida)
            }
            Self::Concluida => false,
        };

        if valid {
            Ok(())
        } else {
            Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "transition not permitted by workflow rules".to_string(),
            })
        }
    }
}

impl FromStr for EvaluationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for EvaluationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status of an evaluation period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PeriodStatus {
    /// Created but not yet running.
    #[default]
    Planejado,
    /// The evaluation cycle is running.
    EmAndamento,
    /// The cycle is over.
    Concluido,
}

impl PeriodStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Planejado => "planejado",
            Self::EmAndamento => "em_andamento",
            Self::Concluido => "concluido",
        }
    }
}

impl FromStr for PeriodStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "planejado" => Ok(Self::Planejado),
            "em_andamento" => Ok(Self::EmAndamento),
            "concluido" => Ok(Self::Concluido),
            _ => Err(DomainError::InvalidPeriodStatus {
                status: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for PeriodStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
