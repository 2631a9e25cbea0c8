// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod error;
mod handlers;
mod request_parse;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthorizationService, Role, authenticate_stub};
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use handlers::{
    bulk_set_mappings, create_period, deactivate_mapping, delete_period, get_evaluation_detail,
    get_status_history, list_active_periods_for_user, list_directory_users, list_mappings,
    list_my_evaluations, list_pending_reviews, list_periods, list_upcoming_periods_for_user,
    reassign_evaluator, register_directory_user, run_auto_creation, save_self_assessment_draft,
    set_mapping, submit_manager_review, submit_self_assessment, update_period,
};
pub use request_parse::{RequestParseError, parse_date_field};
pub use request_response::{
    AutoCreationPeriodResult, AutoCreationRunResponse, BulkSetMappingsRequest,
    BulkSetMappingsResponse, CreatePeriodRequest, CreatePeriodResponse, DeactivateMappingResponse,
    DeletePeriodResponse, EvaluationInfo, ListEvaluationsResponse, ListMappingsResponse,
    ListPeriodsForUserResponse, ListPeriodsResponse, ListUsersResponse, MappingFailure,
    MappingInfo, MappingPair, PeriodInfo, PeriodWithEvaluationInfo, RegisterUserRequest,
    RegisterUserResponse, SetMappingRequest, SetMappingResponse, StatusHistoryInfo,
    StatusHistoryResponse, SubmitManagerReviewRequest, TransitionResponse, UpdatePeriodRequest,
    UpdatePeriodResponse, UserInfo,
};
