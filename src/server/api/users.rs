use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};

use crate::auth::Caller;
use crate::resolver::{SuperAdminInput, UserInput, UserLookup};
use crate::server::AppState;
use crate::server::dto::ListParams;
use crate::server::response::{ApiResponse, ApiResult, ListResponse, created, list, ok};
use crate::types::{UpdateUser, User};

pub fn users_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/admins", post(create_super_admin))
        .route("/lookup", get(lookup_user))
        .route("/{id}", get(get_user).patch(update_user).delete(delete_user))
        .route("/{id}/finalize", post(finalize_user))
        .route("/{id}/archive", post(archive_user))
        .route("/{id}/unarchive", post(unarchive_user))
}

async fn list_users(
    Caller(ctx): Caller,
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> ApiResult<ListResponse<User>> {
    list(state.resolver.users(
        &ctx,
        params.org_uid,
        &params.search(),
        &params.user_filter(),
    ))
}

async fn create_user(
    Caller(ctx): Caller,
    State(state): State<Arc<AppState>>,
    Json(input): Json<UserInput>,
) -> ApiResult<(StatusCode, ApiResponse<User>)> {
    created(state.resolver.user_create(&ctx, &input))
}

async fn create_super_admin(
    Caller(ctx): Caller,
    State(state): State<Arc<AppState>>,
    Json(input): Json<SuperAdminInput>,
) -> ApiResult<(StatusCode, ApiResponse<User>)> {
    created(state.resolver.super_admin_create(&ctx, &input))
}

async fn lookup_user(
    Caller(ctx): Caller,
    State(state): State<Arc<AppState>>,
    Query(lookup): Query<UserLookup>,
) -> ApiResult<ApiResponse<User>> {
    ok(state.resolver.user(&ctx, &lookup))
}

async fn get_user(
    Caller(ctx): Caller,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<User>> {
    let lookup = UserLookup {
        id: Some(id),
        ..UserLookup::default()
    };
    ok(state.resolver.user(&ctx, &lookup))
}

async fn update_user(
    Caller(ctx): Caller,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateUser>,
) -> ApiResult<ApiResponse<User>> {
    ok(state.resolver.user_update(&ctx, id, &req))
}

async fn finalize_user(
    Caller(ctx): Caller,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<User>> {
    ok(state.resolver.user_finalize(&ctx, id))
}

async fn archive_user(
    Caller(ctx): Caller,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<User>> {
    ok(state.resolver.user_archive(&ctx, id))
}

async fn unarchive_user(
    Caller(ctx): Caller,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<User>> {
    ok(state.resolver.user_unarchive(&ctx, id))
}

async fn delete_user(
    Caller(ctx): Caller,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<User>> {
    ok(state.resolver.user_delete(&ctx, id))
}
