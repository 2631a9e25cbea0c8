// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use avalia_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use avalia_domain::{DirectoryUser, Evaluation, EvaluationPeriod};

use crate::Persistence;

pub const NOW: &str = "2026-03-01T08:00:00Z";

pub fn test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn test_user(first_name: &str, email: &str) -> DirectoryUser {
    DirectoryUser {
        user_id: None,
        first_name: first_name.to_string(),
        last_name: String::from("Silva"),
        email: email.to_string(),
        position: Some(String::from("Analista")),
        department: Some(String::from("TI")),
        role: String::from("USER"),
        is_authorized: true,
        active: true,
    }
}

/// Registers a user and returns its id.
pub fn seed_user(persistence: &mut Persistence, first_name: &str, email: &str) -> i64 {
    persistence
        .create_directory_user(&test_user(first_name, email))
        .expect("Failed to seed user")
}

pub fn test_period(nome: &str, data_fim: &str) -> EvaluationPeriod {
    let data_inicio: String =
        avalia_domain::suggested_data_inicio(data_fim).expect("Valid end date");
    EvaluationPeriod::new(
        nome.to_string(),
        None,
        2026,
        data_inicio,
        data_fim.to_string(),
        data_fim.to_string(),
        data_fim.to_string(),
    )
}

/// Creates a period ending on `data_fim` and returns it with its id set.
pub fn seed_period(persistence: &mut Persistence, nome: &str, data_fim: &str) -> EvaluationPeriod {
    let mut period: EvaluationPeriod = test_period(nome, data_fim);
    let periodo_id: i64 = persistence
        .create_period(&period)
        .expect("Failed to seed period");
    period.periodo_id = Some(periodo_id);
    period
}

pub fn test_event(periodo_id: Option<i64>, avaliacao_id: Option<i64>) -> AuditEvent {
    AuditEvent::new(
        Actor::new(String::from("1"), String::from("admin")),
        Cause::new(String::from("test-cause"), String::from("test")),
        Action::new(String::from("TestAction"), None),
        StateSnapshot::new(String::from("before")),
        StateSnapshot::new(String::from("after")),
        periodo_id,
        avaliacao_id,
    )
}

pub fn pending_evaluation(periodo_id: i64, funcionario_id: i64, avaliador_id: i64) -> Evaluation {
    Evaluation::new(periodo_id, funcionario_id, avaliador_id, NOW.to_string())
}
