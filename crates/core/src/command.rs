// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use avalia_domain::{ReviewDecision, SelfAssessment, SelfAssessmentDraft};

/// A command represents user or system intent as data only.
///
/// Commands are the only way to request a workflow transition on an
/// evaluation. Each command is validated against the caller's identity and
/// the evaluation's current status before any state is produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Save a partial self-assessment without submitting it.
    ///
    /// Allowed only for the evaluation's subject, from `pendente`,
    /// `em_andamento` or `devolvida`. Moves the evaluation to
    /// `em_andamento`.
    SaveSelfAssessmentDraft {
        /// The (possibly incomplete) answers to store.
        draft: SelfAssessmentDraft,
    },
    /// Submit the completed self-assessment for manager review.
    ///
    /// Allowed only for the evaluation's subject, from `pendente`,
    /// `em_andamento` or `devolvida`. All four answers must be non-blank.
    /// Moves the evaluation to `aguardando_aprovacao`.
    SubmitSelfAssessment {
        /// The completed answers (Q11-Q14).
        answers: SelfAssessment,
    },
    /// Review a submitted self-assessment.
    ///
    /// Allowed only for the assigned evaluator, from
    /// `aguardando_aprovacao`. Approving stores Q15-Q17 and completes the
    /// evaluation; returning requires feedback and hands it back to the
    /// collaborator.
    SubmitManagerReview {
        /// The manager's decision with its payload.
        decision: ReviewDecision,
    },
    /// Reassign the evaluation to a different evaluator.
    ///
    /// An explicit administrative action; the evaluator snapshot is never
    /// silently re-resolved. Rejected on completed evaluations.
    ReassignEvaluator {
        /// The new evaluator, resolved from the current manager mapping.
        novo_avaliador_id: i64,
    },
}
