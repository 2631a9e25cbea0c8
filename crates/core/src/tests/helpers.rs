// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use avalia_audit::{Actor, Cause};
use avalia_domain::{Evaluation, ManagerReview, SelfAssessment};

pub const SUBJECT: i64 = 10;
pub const EVALUATOR: i64 = 20;
pub const OUTSIDER: i64 = 99;

pub fn pending_evaluation() -> Evaluation {
    let mut evaluation = Evaluation::new(
        1,
        SUBJECT,
        EVALUATOR,
        String::from("2026-03-01T08:00:00Z"),
    );
    evaluation.avaliacao_id = Some(500);
    evaluation
}

pub fn subject_actor() -> Actor {
    Actor::new(SUBJECT.to_string(), String::from("colaborador"))
}

pub fn evaluator_actor() -> Actor {
    Actor::new(EVALUATOR.to_string(), String::from("gerente"))
}

pub fn test_cause() -> Cause {
    Cause::new(String::from("req-1"), String::from("API request"))
}

pub fn complete_answers() -> SelfAssessment {
    SelfAssessment {
        questao_11_pontos_fortes: String::from("Iniciativa"),
        questao_12_areas_melhoria: String::from("Documentação"),
        questao_13_objetivos_alcancados: String::from("Metas do trimestre"),
        questao_14_planos_desenvolvimento: String::from("Mentoria"),
    }
}

pub fn complete_review() -> ManagerReview {
    ManagerReview {
        questao_15_comentario_avaliador: String::from("Acima do esperado"),
        questao_16_nota_lideranca: 4,
        questao_17_nota_resultados: 5,
    }
}

pub const NOW: &str = "2026-03-05T12:00:00Z";
