//! HTTP routes.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

use lootforge_domain::{
    material_label, AdventureId, MaterialsSummary, PrizeType, Rarity, User, UserId,
};
use lootforge_shared::{
    AdventureHistoryEntry, AdventureHistoryResponse, AdventureRequest, AdventureResponse,
    AwardedPrizeResponse, CreatePrizeTypeRequest, CreateUserRequest, ErrorResponse,
    ForgeLootboxRequest, ForgeLootboxResponse, MaterialsSummaryResponse, PrizeTypeResponse,
    UserIdQuery, UserResponse,
};

use crate::app::App;
use crate::infrastructure::ports::RepoError;
use crate::use_cases::adventure::AdventureError;
use crate::use_cases::lootbox::ForgeError;
use crate::use_cases::management::ManagementError;
use crate::use_cases::materials::QueryError;
use crate::use_cases::prize::PrizeOutcome;

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route("/api/adventure", post(perform_adventure))
        .route("/api/forge_lootbox", post(forge_lootbox))
        .route("/api/materials_summary", get(materials_summary))
        .route("/api/adventure_history", get(adventure_history))
        .route("/api/users", post(register_user))
        .route(
            "/api/prize_types",
            get(list_prize_types).post(add_prize_type),
        )
}

async fn health() -> &'static str {
    "OK"
}

// =============================================================================
// Economy
// =============================================================================

async fn perform_adventure(
    State(app): State<Arc<App>>,
    body: Result<Json<AdventureRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AdventureResponse>), ApiError> {
    let Json(request) = body?;
    let adventure = app
        .use_cases
        .adventure
        .perform
        .execute(UserId::from_uuid(request.user_id))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AdventureResponse {
            message: "Adventure complete".to_string(),
            material: material_label(adventure.material()).to_string(),
        }),
    ))
}

async fn forge_lootbox(
    State(app): State<Arc<App>>,
    body: Result<Json<ForgeLootboxRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ForgeLootboxResponse>), ApiError> {
    let Json(request) = body?;
    let material_ids: Vec<AdventureId> = request
        .material_ids
        .into_iter()
        .map(AdventureId::from_uuid)
        .collect();

    let forged = app
        .use_cases
        .lootbox
        .forge
        .execute(UserId::from_uuid(request.user_id), &material_ids)
        .await?;

    let prize = match forged.prize {
        PrizeOutcome::Awarded { prize, prize_type } => Some(AwardedPrizeResponse {
            id: prize.id().to_uuid(),
            prize_type_id: prize_type.id().to_uuid(),
            name: prize_type.name().to_string(),
            rarity: prize_type.rarity(),
        }),
        PrizeOutcome::Unavailable { .. } => None,
    };

    Ok((
        StatusCode::CREATED,
        Json(ForgeLootboxResponse {
            message: "New LootBox created".to_string(),
            loot_box_id: forged.loot_box.id().to_uuid(),
            rarity: forged.loot_box.rarity(),
            prize,
        }),
    ))
}

async fn materials_summary(
    State(app): State<Arc<App>>,
    Query(query): Query<UserIdQuery>,
) -> Result<Json<MaterialsSummaryResponse>, ApiError> {
    let user_id = parse_user_id(&query)?;
    let summary = app.use_cases.materials.summary.execute(user_id).await?;
    Ok(Json(summary_response(&summary)))
}

async fn adventure_history(
    State(app): State<Arc<App>>,
    Query(query): Query<UserIdQuery>,
) -> Result<Json<AdventureHistoryResponse>, ApiError> {
    let user_id = parse_user_id(&query)?;
    let adventures = app.use_cases.materials.history.execute(user_id).await?;

    Ok(Json(AdventureHistoryResponse {
        adventure_history: adventures
            .iter()
            .map(|adventure| AdventureHistoryEntry {
                id: adventure.id().to_uuid(),
                timestamp: adventure.timestamp(),
                material: material_label(adventure.material()).to_string(),
            })
            .collect(),
    }))
}

// =============================================================================
// Management
// =============================================================================

async fn register_user(
    State(app): State<Arc<App>>,
    body: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let Json(request) = body?;
    let user = app
        .use_cases
        .management
        .register_user
        .execute(&request.username)
        .await?;
    Ok((StatusCode::CREATED, Json(user_response(&user))))
}

async fn add_prize_type(
    State(app): State<Arc<App>>,
    body: Result<Json<CreatePrizeTypeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PrizeTypeResponse>), ApiError> {
    let Json(request) = body?;
    let prize_type = app
        .use_cases
        .management
        .add_prize_type
        .execute(&request.name, request.rarity, request.quantity)
        .await?;
    Ok((StatusCode::CREATED, Json(prize_type_response(&prize_type))))
}

async fn list_prize_types(
    State(app): State<Arc<App>>,
) -> Result<Json<Vec<PrizeTypeResponse>>, ApiError> {
    let catalog = app.use_cases.management.list_prize_types.execute().await?;
    Ok(Json(catalog.iter().map(prize_type_response).collect()))
}

// =============================================================================
// Conversions
// =============================================================================

fn parse_user_id(query: &UserIdQuery) -> Result<UserId, ApiError> {
    let raw = query
        .user_id
        .as_deref()
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .ok_or_else(|| ApiError::BadRequest("User ID is required".to_string()))?;
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid user ID: {}", raw)))
}

fn summary_response(summary: &MaterialsSummary) -> MaterialsSummaryResponse {
    let by_label = |counts: &std::collections::BTreeMap<Rarity, u32>| {
        counts
            .iter()
            .map(|(rarity, count)| (rarity.to_string(), *count))
            .collect()
    };
    MaterialsSummaryResponse {
        used_materials_summary: by_label(summary.used()),
        unused_materials_summary: by_label(summary.unused()),
    }
}

fn user_response(user: &User) -> UserResponse {
    UserResponse {
        id: user.id().to_uuid(),
        username: user.username().to_string(),
        current_threshold: user.current_threshold(),
        reset_threshold: user.reset_threshold(),
        created_at: user.created_at(),
    }
}

fn prize_type_response(prize_type: &PrizeType) -> PrizeTypeResponse {
    PrizeTypeResponse {
        id: prize_type.id().to_uuid(),
        name: prize_type.name().to_string(),
        rarity: prize_type.rarity(),
        quantity: prize_type.quantity(),
        number_claimed: prize_type.number_claimed(),
        remaining: prize_type.remaining(),
    }
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    Forbidden(String),
    BadRequest(String),
    Conflict(String),
    Internal(String),
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal error".to_string(),
                )
            }
        };
        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        ApiError::BadRequest(e.body_text())
    }
}

impl From<RepoError> for ApiError {
    fn from(e: RepoError) -> Self {
        if e.is_not_found() {
            ApiError::NotFound(e.to_string())
        } else {
            ApiError::Internal(e.to_string())
        }
    }
}

impl From<AdventureError> for ApiError {
    fn from(e: AdventureError) -> Self {
        match e {
            AdventureError::UserNotFound(_) => ApiError::NotFound("User not found".to_string()),
            AdventureError::NotEligible { .. } => ApiError::Forbidden(e.to_string()),
            AdventureError::Repo(repo) => repo.into(),
            AdventureError::Domain(_) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<ForgeError> for ApiError {
    fn from(e: ForgeError) -> Self {
        match e {
            ForgeError::UserNotFound(_) => ApiError::NotFound("User not found".to_string()),
            ForgeError::WrongMaterialCount { .. }
            | ForgeError::DuplicateMaterial(_)
            | ForgeError::MaterialUnavailable => ApiError::BadRequest(e.to_string()),
            ForgeError::Repo(repo) => repo.into(),
            ForgeError::Domain(_) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<QueryError> for ApiError {
    fn from(e: QueryError) -> Self {
        match e {
            QueryError::UserNotFound(_) => ApiError::NotFound("User not found".to_string()),
            QueryError::Repo(repo) => repo.into(),
        }
    }
}

impl From<ManagementError> for ApiError {
    fn from(e: ManagementError) -> Self {
        match e {
            ManagementError::DuplicateUsername(_) => ApiError::Conflict(e.to_string()),
            ManagementError::Validation(_) => ApiError::BadRequest(e.to_string()),
            ManagementError::Repo(repo) => repo.into(),
        }
    }
}
