// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Questionnaire answer schemas.
//!
//! Answers are fixed, typed records rather than open JSON maps so that
//! transition validation can check field completeness. The collaborator
//! fills Q11-Q14; the manager fills Q15-Q17.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// The collaborator's completed self-assessment (Q11-Q14).
///
/// All four answers are required at submission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfAssessment {
    /// Q11: strengths demonstrated during the period.
    pub questao_11_pontos_fortes: String,
    /// Q12: areas needing improvement.
    pub questao_12_areas_melhoria: String,
    /// Q13: objectives achieved.
    pub questao_13_objetivos_alcancados: String,
    /// Q14: development plans.
    pub questao_14_planos_desenvolvimento: String,
}

impl SelfAssessment {
    /// Validates that every answer is non-blank.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::IncompleteSelfAssessment` naming the first
    /// blank field.
    pub fn validate(&self) -> Result<(), DomainError> {
        let fields = [
            ("questao_11_pontos_fortes", &self.questao_11_pontos_fortes),
            ("questao_12_areas_melhoria", &self.questao_12_areas_melhoria),
            (
                "questao_13_objetivos_alcancados",
                &self.questao_13_objetivos_alcancados,
            ),
            (
                "questao_14_planos_desenvolvimento",
                &self.questao_14_planos_desenvolvimento,
            ),
        ];

        for (field, value) in fields {
            if value.trim().is_empty() {
                return Err(DomainError::IncompleteSelfAssessment {
                    field: field.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// A partially filled self-assessment, saved as a draft.
///
/// Drafts may leave any answer empty; submission requires the complete
/// `SelfAssessment` record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfAssessmentDraft {
    pub questao_11_pontos_fortes: Option<String>,
    pub questao_12_areas_melhoria: Option<String>,
    pub questao_13_objetivos_alcancados: Option<String>,
    pub questao_14_planos_desenvolvimento: Option<String>,
}

impl SelfAssessmentDraft {
    /// Returns true if no answer has been filled at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.questao_11_pontos_fortes.is_none()
            && self.questao_12_areas_melhoria.is_none()
            && self.questao_13_objetivos_alcancados.is_none()
            && self.questao_14_planos_desenvolvimento.is_none()
    }
}

impl From<SelfAssessment> for SelfAssessmentDraft {
    fn from(answers: SelfAssessment) -> Self {
        Self {
            questao_11_pontos_fortes: Some(answers.questao_11_pontos_fortes),
            questao_12_areas_melhoria: Some(answers.questao_12_areas_melhoria),
            questao_13_objetivos_alcancados: Some(answers.questao_13_objetivos_alcancados),
            questao_14_planos_desenvolvimento: Some(answers.questao_14_planos_desenvolvimento),
        }
    }
}

/// The manager's review of a submitted self-assessment (Q15-Q17).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerReview {
    /// Q15: the manager's written assessment.
    pub questao_15_comentario_avaliador: String,
    /// Q16: leadership score (1-5).
    pub questao_16_nota_lideranca: u8,
    /// Q17: results score (1-5).
    pub questao_17_nota_resultados: u8,
}

impl ManagerReview {
    /// Validates the review: non-blank comment and scores in 1-5.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::BlankReviewComment` or
    /// `DomainError::ReviewScoreOutOfRange`.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.questao_15_comentario_avaliador.trim().is_empty() {
            return Err(DomainError::BlankReviewComment);
        }
        for (field, value) in [
            ("questao_16_nota_lideranca", self.questao_16_nota_lideranca),
            ("questao_17_nota_resultados", self.questao_17_nota_resultados),
        ] {
            if !(1..=5).contains(&value) {
                return Err(DomainError::ReviewScoreOutOfRange {
                    field: field.to_string(),
                    value,
                });
            }
        }
        Ok(())
    }
}

/// The manager's decision when reviewing a submitted self-assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum ReviewDecision {
    /// Approve the evaluation, completing it.
    Approve {
        /// The manager's review answers (Q15-Q17).
        review: ManagerReview,
    },
    /// Return the evaluation to the collaborator for rework.
    Return {
        /// Feedback for the collaborator, shown alongside the returned
        /// evaluation. Required.
        comentario: String,
    },
}

impl ReviewDecision {
    /// Validates the decision payload before it is applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the review answers are incomplete or the return
    /// feedback is blank.
    pub fn validate(&self) -> Result<(), DomainError> {
        match self {
            Self::Approve { review } => review.validate(),
            Self::Return { comentario } => {
                if comentario.trim().is_empty() {
                    return Err(DomainError::BlankReturnFeedback);
                }
                Ok(())
            }
        }
    }
}
