use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::dto::{CalculationRead, CalculationRequest, Pagination, ValidationError};
use super::repo;
use super::services::{create_calculation, is_visible_to, load_owner};
use crate::{
    auth::{
        dto::PublicUser,
        services::{AuthUser, MaybeAuthUser},
    },
    error::{ApiError, ApiResult},
    state::AppState,
};

pub fn calculation_routes() -> Router<AppState> {
    Router::new()
        .route("/calculations", get(list_calculations).post(create))
        .route("/calculations/:id", get(get_calculation).delete(delete_calculation))
        .route("/calculations/:id/owner", get(get_owner))
}

#[instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    MaybeAuthUser(viewer): MaybeAuthUser,
    body: Result<Json<CalculationRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, HeaderMap, Json<CalculationRead>)> {
    let Json(request) = body.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "unreadable calculation body");
        ValidationError::InvalidBody(rejection.body_text())
    })?;

    let calc = create_calculation(&state.db, request, viewer).await?;
    info!(id = %calc.id, kind = %calc.kind, user_id = ?calc.user_id, "calculation created");

    let mut headers = HeaderMap::new();
    let location = HeaderValue::from_str(&format!("/api/v1/calculations/{}", calc.id))
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    headers.insert(header::LOCATION, location);

    Ok((
        StatusCode::CREATED,
        headers,
        Json(CalculationRead::project(&calc)),
    ))
}

#[instrument(skip(state))]
pub async fn list_calculations(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(p): Query<Pagination>,
) -> ApiResult<Json<Vec<CalculationRead>>> {
    let (limit, offset) = p.clamped();
    let rows = repo::list_by_user(&state.db, user_id, limit, offset).await?;
    Ok(Json(rows.into_iter().map(CalculationRead::from).collect()))
}

#[instrument(skip(state))]
pub async fn get_calculation(
    State(state): State<AppState>,
    MaybeAuthUser(viewer): MaybeAuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<CalculationRead>> {
    match repo::find_by_id(&state.db, id).await? {
        Some(calc) if is_visible_to(&calc, viewer) => Ok(Json(CalculationRead::project(&calc))),
        _ => Err(ApiError::NotFound("Calculation not found".into())),
    }
}

#[instrument(skip(state))]
pub async fn get_owner(
    State(state): State<AppState>,
    MaybeAuthUser(viewer): MaybeAuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<PublicUser>> {
    let calc = repo::find_by_id(&state.db, id)
        .await?
        .filter(|c| is_visible_to(c, viewer))
        .ok_or_else(|| ApiError::NotFound("Calculation not found".into()))?;

    let user = load_owner(&state.db, &calc)
        .await?
        .ok_or_else(|| ApiError::NotFound("Calculation has no owner".into()))?;

    Ok(Json(PublicUser {
        id: user.id,
        email: user.email,
    }))
}

#[instrument(skip(state))]
pub async fn delete_calculation(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    if !repo::delete_owned(&state.db, id, user_id).await? {
        warn!(%id, %user_id, "delete matched nothing");
        return Err(ApiError::NotFound("Calculation not found".into()));
    }
    info!(%id, %user_id, "calculation deleted");
    Ok(StatusCode::NO_CONTENT)
}
