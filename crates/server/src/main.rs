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
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::{Date, OffsetDateTime};
use tokio::sync::Mutex;
use tracing::{error, info};

use avalia_api::{
    ApiError, AuthenticatedActor, AutoCreationRunResponse, BulkSetMappingsRequest,
    BulkSetMappingsResponse, CreatePeriodRequest, CreatePeriodResponse, DeactivateMappingResponse,
    DeletePeriodResponse, EvaluationInfo, ListEvaluationsResponse, ListMappingsResponse,
    ListPeriodsForUserResponse, ListPeriodsResponse, ListUsersResponse, MappingPair,
    RegisterUserRequest, RegisterUserResponse, Role, SetMappingRequest, SetMappingResponse,
    StatusHistoryResponse, SubmitManagerReviewRequest, TransitionResponse, UpdatePeriodRequest,
    UpdatePeriodResponse, authenticate_stub, bulk_set_mappings, create_period, deactivate_mapping,
    delete_period, get_evaluation_detail, get_status_history, list_active_periods_for_user,
    list_directory_users, list_mappings, list_my_evaluations, list_pending_reviews, list_periods,
    list_upcoming_periods_for_user, parse_date_field, reassign_evaluator,
    register_directory_user, run_auto_creation, save_self_assessment_draft, set_mapping,
    submit_manager_review, submit_self_assessment, update_period,
};
use avalia_audit::Cause;
use avalia_domain::{SelfAssessment, SelfAssessmentDraft};
use avalia_persistence::SqlitePersistence;

/// Avalia Server - HTTP server for the Avalia evaluation system
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
///
/// This contains the persistence layer wrapped in a Mutex to allow
/// safe concurrent access.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for the evaluation core.
    persistence: Arc<Mutex<SqlitePersistence>>,
}

/// Caller identity carried by every request (stub authentication seam).
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CallerIdentity {
    /// The caller's directory user id.
    actor_id: i64,
    /// The caller's role (`admin`, `gerente`, `colaborador`).
    actor_role: String,
}

/// Caller identity plus cause, carried by every state-changing request.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CallerContext {
    actor_id: i64,
    actor_role: String,
    /// The cause ID for this action (e.g., a request id).
    cause_id: String,
    /// The cause description.
    cause_description: String,
}

/// API request for saving a single manager mapping.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct SetMappingApiRequest {
    #[serde(flatten)]
    context: CallerContext,
    colaborador_id: i64,
    gerente_id: i64,
}

/// API request for saving several mappings at once.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct BulkSetMappingsApiRequest {
    #[serde(flatten)]
    context: CallerContext,
    mapeamentos: Vec<MappingPair>,
}

/// API request for creating a period.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreatePeriodApiRequest {
    #[serde(flatten)]
    context: CallerContext,
    #[serde(flatten)]
    periodo: CreatePeriodRequest,
}

/// API request for updating a period.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct UpdatePeriodApiRequest {
    #[serde(flatten)]
    context: CallerContext,
    #[serde(flatten)]
    patch: UpdatePeriodRequest,
}

/// API request for running the auto-creation trigger.
///
/// `data_referencia` overrides "today"; the scheduled job omits it.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct RunAutoCreationApiRequest {
    #[serde(flatten)]
    context: CallerContext,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data_referencia: Option<String>,
}

/// API request for submitting the completed self-assessment.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct SubmitSelfAssessmentApiRequest {
    #[serde(flatten)]
    context: CallerContext,
    #[serde(flatten)]
    respostas: SelfAssessment,
}

/// API request for saving a self-assessment draft.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct SaveDraftApiRequest {
    #[serde(flatten)]
    context: CallerContext,
    #[serde(flatten)]
    respostas: SelfAssessmentDraft,
}

/// API request for the manager review decision.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct SubmitManagerReviewApiRequest {
    #[serde(flatten)]
    context: CallerContext,
    #[serde(flatten)]
    review: SubmitManagerReviewRequest,
}

/// API request carrying only the caller context (reassign, deactivate).
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ContextOnlyApiRequest {
    #[serde(flatten)]
    context: CallerContext,
}

/// API request for registering a directory user.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct RegisterUserApiRequest {
    #[serde(flatten)]
    context: CallerContext,
    #[serde(flatten)]
    usuario: RegisterUserRequest,
}

/// Query parameters for period listings.
#[derive(Debug, Deserialize)]
struct ListPeriodsQuery {
    /// When true, inactive periods are filtered out.
    #[serde(default)]
    ativos: bool,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidTransition { .. } => StatusCode::CONFLICT,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { message } => {
                error!(error = %message, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Resolves the caller identity from request-supplied fields.
fn authenticate(actor_id: i64, actor_role: &str) -> Result<AuthenticatedActor, HttpError> {
    let role: Role = actor_role.parse().map_err(|e: avalia_api::AuthError| HttpError {
        status: StatusCode::BAD_REQUEST,
        message: e.to_string(),
    })?;
    authenticate_stub(actor_id, role).map_err(|e| HttpError {
        status: StatusCode::UNAUTHORIZED,
        message: e.to_string(),
    })
}

fn context_actor(context: &CallerContext) -> Result<(AuthenticatedActor, Cause), HttpError> {
    let actor: AuthenticatedActor = authenticate(context.actor_id, &context.actor_role)?;
    let cause: Cause = Cause::new(context.cause_id.clone(), context.cause_description.clone());
    Ok((actor, cause))
}

/// Today's calendar date in UTC.
fn today_utc() -> Date {
    OffsetDateTime::now_utc().date()
}

// ============================================================================
// Manager mapping handlers
// ============================================================================

/// Handler for POST `/api/admin/gerentes-avaliacao`.
async fn handle_set_mapping(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<SetMappingApiRequest>,
) -> Result<Json<SetMappingResponse>, HttpError> {
    info!(
        actor_id = req.context.actor_id,
        colaborador_id = req.colaborador_id,
        gerente_id = req.gerente_id,
        "Handling set_mapping request"
    );
    let (actor, cause) = context_actor(&req.context)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: SetMappingResponse = set_mapping(
        &mut persistence,
        &SetMappingRequest {
            colaborador_id: req.colaborador_id,
            gerente_id: req.gerente_id,
        },
        &actor,
        cause,
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/api/admin/gerentes-avaliacao/bulk`.
async fn handle_bulk_set_mappings(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<BulkSetMappingsApiRequest>,
) -> Result<Json<BulkSetMappingsResponse>, HttpError> {
    let (actor, cause) = context_actor(&req.context)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: BulkSetMappingsResponse = bulk_set_mappings(
        &mut persistence,
        &BulkSetMappingsRequest {
            mapeamentos: req.mapeamentos,
        },
        &actor,
        cause,
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/api/admin/gerentes-avaliacao`.
async fn handle_list_mappings(
    AxumState(app_state): AxumState<AppState>,
    Query(identity): Query<CallerIdentity>,
) -> Result<Json<ListMappingsResponse>, HttpError> {
    let actor: AuthenticatedActor = authenticate(identity.actor_id, &identity.actor_role)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: ListMappingsResponse = list_mappings(&mut persistence, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for DELETE `/api/admin/gerentes-avaliacao/{colaborador_id}`.
async fn handle_deactivate_mapping(
    AxumState(app_state): AxumState<AppState>,
    Path(colaborador_id): Path<i64>,
    Json(req): Json<ContextOnlyApiRequest>,
) -> Result<Json<DeactivateMappingResponse>, HttpError> {
    let (actor, cause) = context_actor(&req.context)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: DeactivateMappingResponse =
        deactivate_mapping(&mut persistence, colaborador_id, &actor, cause)?;
    drop(persistence);

    Ok(Json(response))
}

// ============================================================================
// Period handlers
// ============================================================================

/// Handler for POST `/api/avaliacao/periodos`.
async fn handle_create_period(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreatePeriodApiRequest>,
) -> Result<Json<CreatePeriodResponse>, HttpError> {
    info!(
        actor_id = req.context.actor_id,
        nome = %req.periodo.nome,
        data_fim = %req.periodo.data_fim,
        "Handling create_period request"
    );
    let (actor, cause) = context_actor(&req.context)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: CreatePeriodResponse =
        create_period(&mut persistence, req.periodo, &actor, cause)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/api/avaliacao/periodos`.
async fn handle_list_periods(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListPeriodsQuery>,
) -> Result<Json<ListPeriodsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListPeriodsResponse = list_periods(&mut persistence, query.ativos)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for PUT `/api/avaliacao/periodos/{id}`.
async fn handle_update_period(
    AxumState(app_state): AxumState<AppState>,
    Path(periodo_id): Path<i64>,
    Json(req): Json<UpdatePeriodApiRequest>,
) -> Result<Json<UpdatePeriodResponse>, HttpError> {
    let (actor, cause) = context_actor(&req.context)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: UpdatePeriodResponse =
        update_period(&mut persistence, periodo_id, req.patch, &actor, cause)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for DELETE `/api/avaliacao/periodos/{id}`.
async fn handle_delete_period(
    AxumState(app_state): AxumState<AppState>,
    Path(periodo_id): Path<i64>,
    Json(req): Json<ContextOnlyApiRequest>,
) -> Result<Json<DeletePeriodResponse>, HttpError> {
    let (actor, cause) = context_actor(&req.context)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: DeletePeriodResponse =
        delete_period(&mut persistence, periodo_id, &actor, cause)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/api/avaliacao/periodos/ativos`.
async fn handle_list_active_periods(
    AxumState(app_state): AxumState<AppState>,
    Query(identity): Query<CallerIdentity>,
) -> Result<Json<ListPeriodsForUserResponse>, HttpError> {
    let actor: AuthenticatedActor = authenticate(identity.actor_id, &identity.actor_role)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: ListPeriodsForUserResponse =
        list_active_periods_for_user(&mut persistence, today_utc(), &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/api/avaliacao/periodos/proximos`.
async fn handle_list_upcoming_periods(
    AxumState(app_state): AxumState<AppState>,
    Query(identity): Query<CallerIdentity>,
) -> Result<Json<ListPeriodsForUserResponse>, HttpError> {
    let actor: AuthenticatedActor = authenticate(identity.actor_id, &identity.actor_role)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: ListPeriodsForUserResponse =
        list_upcoming_periods_for_user(&mut persistence, today_utc(), &actor)?;
    drop(persistence);

    Ok(Json(response))
}

// ============================================================================
// Trigger handler
// ============================================================================

/// Handler for POST `/api/avaliacao/cron/criar-avaliacoes`.
///
/// Invoked by the scheduled job and by the admin "run now" button; both
/// authenticate through the same seam, and the per-period claim makes
/// concurrent invocations safe.
async fn handle_run_auto_creation(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<RunAutoCreationApiRequest>,
) -> Result<Json<AutoCreationRunResponse>, HttpError> {
    let (actor, cause) = context_actor(&req.context)?;

    let today: Date = match &req.data_referencia {
        Some(data_referencia) => parse_date_field("data_referencia", data_referencia)
            .map_err(|e| HttpError::from(ApiError::from(e)))?,
        None => today_utc(),
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: AutoCreationRunResponse =
        run_auto_creation(&mut persistence, today, &actor, &cause)?;
    drop(persistence);

    info!(
        periodos = response.periodos_processados,
        avaliacoes_criadas = response.total_avaliacoes_criadas,
        "Auto-creation run finished"
    );

    Ok(Json(response))
}

// ============================================================================
// Evaluation handlers
// ============================================================================

/// Handler for GET `/api/avaliacao/minhas`.
async fn handle_list_my_evaluations(
    AxumState(app_state): AxumState<AppState>,
    Query(identity): Query<CallerIdentity>,
) -> Result<Json<ListEvaluationsResponse>, HttpError> {
    let actor: AuthenticatedActor = authenticate(identity.actor_id, &identity.actor_role)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: ListEvaluationsResponse = list_my_evaluations(&mut persistence, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/api/avaliacao/pendentes`.
async fn handle_list_pending_reviews(
    AxumState(app_state): AxumState<AppState>,
    Query(identity): Query<CallerIdentity>,
) -> Result<Json<ListEvaluationsResponse>, HttpError> {
    let actor: AuthenticatedActor = authenticate(identity.actor_id, &identity.actor_role)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: ListEvaluationsResponse = list_pending_reviews(&mut persistence, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/api/avaliacao/{id}`.
async fn handle_get_evaluation(
    AxumState(app_state): AxumState<AppState>,
    Path(avaliacao_id): Path<i64>,
    Query(identity): Query<CallerIdentity>,
) -> Result<Json<EvaluationInfo>, HttpError> {
    let actor: AuthenticatedActor = authenticate(identity.actor_id, &identity.actor_role)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: EvaluationInfo = get_evaluation_detail(&mut persistence, avaliacao_id, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/api/avaliacao/{id}/historico`.
async fn handle_get_status_history(
    AxumState(app_state): AxumState<AppState>,
    Path(avaliacao_id): Path<i64>,
    Query(identity): Query<CallerIdentity>,
) -> Result<Json<StatusHistoryResponse>, HttpError> {
    let actor: AuthenticatedActor = authenticate(identity.actor_id, &identity.actor_role)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: StatusHistoryResponse =
        get_status_history(&mut persistence, avaliacao_id, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/api/avaliacao/{id}/autoavaliacao/rascunho`.
async fn handle_save_draft(
    AxumState(app_state): AxumState<AppState>,
    Path(avaliacao_id): Path<i64>,
    Json(req): Json<SaveDraftApiRequest>,
) -> Result<Json<TransitionResponse>, HttpError> {
    let (actor, cause) = context_actor(&req.context)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: TransitionResponse =
        save_self_assessment_draft(&mut persistence, avaliacao_id, req.respostas, &actor, cause)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/api/avaliacao/{id}/autoavaliacao`.
async fn handle_submit_self_assessment(
    AxumState(app_state): AxumState<AppState>,
    Path(avaliacao_id): Path<i64>,
    Json(req): Json<SubmitSelfAssessmentApiRequest>,
) -> Result<Json<TransitionResponse>, HttpError> {
    let (actor, cause) = context_actor(&req.context)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: TransitionResponse =
        submit_self_assessment(&mut persistence, avaliacao_id, req.respostas, &actor, cause)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/api/avaliacao/{id}/aprovacao`.
async fn handle_submit_manager_review(
    AxumState(app_state): AxumState<AppState>,
    Path(avaliacao_id): Path<i64>,
    Json(req): Json<SubmitManagerReviewApiRequest>,
) -> Result<Json<TransitionResponse>, HttpError> {
    let (actor, cause) = context_actor(&req.context)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: TransitionResponse =
        submit_manager_review(&mut persistence, avaliacao_id, req.review, &actor, cause)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/api/avaliacao/{id}/reatribuir`.
async fn handle_reassign_evaluator(
    AxumState(app_state): AxumState<AppState>,
    Path(avaliacao_id): Path<i64>,
    Json(req): Json<ContextOnlyApiRequest>,
) -> Result<Json<TransitionResponse>, HttpError> {
    let (actor, cause) = context_actor(&req.context)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: TransitionResponse =
        reassign_evaluator(&mut persistence, avaliacao_id, &actor, cause)?;
    drop(persistence);

    Ok(Json(response))
}

// ============================================================================
// Directory handlers
// ============================================================================

/// Handler for POST `/api/admin/usuarios`.
async fn handle_register_user(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<RegisterUserApiRequest>,
) -> Result<Json<RegisterUserResponse>, HttpError> {
    let (actor, cause) = context_actor(&req.context)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: RegisterUserResponse =
        register_directory_user(&mut persistence, req.usuario, &actor, cause)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/api/admin/usuarios`.
async fn handle_list_users(
    AxumState(app_state): AxumState<AppState>,
    Query(identity): Query<CallerIdentity>,
) -> Result<Json<ListUsersResponse>, HttpError> {
    let actor: AuthenticatedActor = authenticate(identity.actor_id, &identity.actor_role)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: ListUsersResponse = list_directory_users(&mut persistence, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/admin/gerentes-avaliacao", post(handle_set_mapping))
        .route("/api/admin/gerentes-avaliacao", get(handle_list_mappings))
        .route(
            "/api/admin/gerentes-avaliacao/bulk",
            post(handle_bulk_set_mappings),
        )
        .route(
            "/api/admin/gerentes-avaliacao/{colaborador_id}",
            delete(handle_deactivate_mapping),
        )
        .route("/api/avaliacao/periodos", post(handle_create_period))
        .route("/api/avaliacao/periodos", get(handle_list_periods))
        .route("/api/avaliacao/periodos/{id}", put(handle_update_period))
        .route("/api/avaliacao/periodos/{id}", delete(handle_delete_period))
        .route(
            "/api/avaliacao/periodos/ativos",
            get(handle_list_active_periods),
        )
        .route(
            "/api/avaliacao/periodos/proximos",
            get(handle_list_upcoming_periods),
        )
        .route(
            "/api/avaliacao/cron/criar-avaliacoes",
            post(handle_run_auto_creation),
        )
        .route("/api/avaliacao/minhas", get(handle_list_my_evaluations))
        .route("/api/avaliacao/pendentes", get(handle_list_pending_reviews))
        .route("/api/avaliacao/{id}", get(handle_get_evaluation))
        .route("/api/avaliacao/{id}/historico", get(handle_get_status_history))
        .route(
            "/api/avaliacao/{id}/autoavaliacao/rascunho",
            post(handle_save_draft),
        )
        .route(
            "/api/avaliacao/{id}/autoavaliacao",
            post(handle_submit_self_assessment),
        )
        .route(
            "/api/avaliacao/{id}/aprovacao",
            post(handle_submit_manager_review),
        )
        .route(
            "/api/avaliacao/{id}/reatribuir",
            post(handle_reassign_evaluator),
        )
        .route("/api/admin/usuarios", post(handle_register_user))
        .route("/api/admin/usuarios", get(handle_list_users))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Avalia Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: SqlitePersistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        SqlitePersistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        SqlitePersistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
