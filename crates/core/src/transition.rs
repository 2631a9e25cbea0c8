// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use avalia_audit::AuditEvent;
use avalia_domain::Evaluation;

/// The result of a successful workflow transition.
///
/// Transitions are atomic: they either succeed completely or fail without
/// side effects. The caller persists the new evaluation and the audit event
/// together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The evaluation after the transition.
    pub new_evaluation: Evaluation,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}
