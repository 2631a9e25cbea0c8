// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use avalia_audit::Cause;
use avalia_domain::{SelfAssessment, parse_date};
use avalia_persistence::Persistence;
use time::Date;

use crate::{
    AuthenticatedActor, CreatePeriodRequest, RegisterUserRequest, Role, SetMappingRequest,
    create_period, register_directory_user, set_mapping,
};

pub fn test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn admin() -> AuthenticatedActor {
    AuthenticatedActor::new(1, Role::Admin)
}

pub fn colaborador(user_id: i64) -> AuthenticatedActor {
    AuthenticatedActor::new(user_id, Role::Colaborador)
}

pub fn gerente(user_id: i64) -> AuthenticatedActor {
    AuthenticatedActor::new(user_id, Role::Gerente)
}

pub fn cause() -> Cause {
    Cause::new(String::from("api-req-456"), String::from("API request"))
}

/// Registers a directory user through the API and returns its id.
pub fn seed_user(persistence: &mut Persistence, first_name: &str, email: &str) -> i64 {
    register_directory_user(
        persistence,
        RegisterUserRequest {
            first_name: first_name.to_string(),
            last_name: String::from("Silva"),
            email: email.to_string(),
            position: None,
            department: None,
            role: String::from("USER"),
            is_authorized: true,
            active: true,
        },
        &admin(),
        cause(),
    )
    .expect("Failed to register user")
    .user_id
}

pub fn assign_manager(persistence: &mut Persistence, colaborador_id: i64, gerente_id: i64) {
    set_mapping(
        persistence,
        &SetMappingRequest {
            colaborador_id,
            gerente_id,
        },
        &admin(),
        cause(),
    )
    .expect("Failed to set mapping");
}

pub fn period_request(nome: &str, data_fim: &str) -> CreatePeriodRequest {
    CreatePeriodRequest {
        nome: nome.to_string(),
        descricao: None,
        ano: 2026,
        data_inicio: None,
        data_fim: data_fim.to_string(),
        data_limite_autoavaliacao: data_fim.to_string(),
        data_limite_aprovacao: data_fim.to_string(),
    }
}

/// Creates a period through the API and returns its id.
pub fn seed_period(persistence: &mut Persistence, nome: &str, data_fim: &str) -> i64 {
    create_period(persistence, period_request(nome, data_fim), &admin(), cause())
        .expect("Failed to create period")
        .periodo
        .periodo_id
}

pub fn complete_answers() -> SelfAssessment {
    SelfAssessment {
        questao_11_pontos_fortes: String::from("Iniciativa"),
        questao_12_areas_melhoria: String::from("Documentação"),
        questao_13_objetivos_alcancados: String::from("Metas do trimestre"),
        questao_14_planos_desenvolvimento: String::from("Mentoria"),
    }
}

/// A `today` for which a period ending on `data_fim` is due: ten days
/// before the end date.
pub fn ten_days_before(data_fim: &str) -> Date {
    let fim = parse_date(data_fim).expect("Valid date");
    fim.checked_sub(time::Duration::days(10)).expect("Valid date")
}
