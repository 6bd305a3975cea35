//! Favourites API endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;

use super::{ApiResponse, MessageResponse, PaginatedResponse};
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::{AssetFavourites, CreateFavouriteRequest, Favourite, UpdateFavouriteRequest};
use crate::pagination::PageQuery;
use crate::AppState;

/// GET /v1/user/favourites - One page of the caller's favourites, resolved
/// and grouped by asset type.
pub async fn list_favourites(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Query(query): Query<PageQuery>,
) -> Result<PaginatedResponse<AssetFavourites>, AppError> {
    let (page_size, page_number) = query.resolve()?;

    let (favourites, pagination) = state
        .favourites
        .get_paginated_for_user(user_id, page_size, page_number)
        .await?;

    Ok(PaginatedResponse::new(favourites, pagination))
}

/// POST /v1/user/favourites - Bookmark an asset for the caller.
pub async fn create_favourite(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Json(request): Json<CreateFavouriteRequest>,
) -> Result<(StatusCode, ApiResponse<Favourite>), AppError> {
    let favourite = state
        .favourites
        .create_for_user(user_id, request.asset_id, request.description)
        .await?;

    Ok((StatusCode::CREATED, ApiResponse::new(favourite)))
}

/// PATCH /v1/user/favourites/:id - Update a favourite's description.
pub async fn update_favourite(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateFavouriteRequest>,
) -> Result<ApiResponse<Favourite>, AppError> {
    let favourite = state
        .favourites
        .update(user_id, id, request.description)
        .await?;

    Ok(ApiResponse::new(favourite))
}

/// DELETE /v1/user/favourites/:id - Remove a favourite.
pub async fn delete_favourite(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<MessageResponse, AppError> {
    state.favourites.delete(user_id, id).await?;

    Ok(MessageResponse::new("Favourite deleted"))
}
