use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};

use crate::auth::Caller;
use crate::resolver::{LookupQuery, RoleInput};
use crate::server::AppState;
use crate::server::dto::ListParams;
use crate::server::response::{ApiResponse, ApiResult, ListResponse, created, list, ok};
use crate::service::loader::RoleDetails;
use crate::types::{Role, UpdateRole};

pub fn roles_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_roles).post(create_role))
        .route("/lookup", get(lookup_role))
        .route("/{id}", get(get_role).patch(update_role).delete(delete_role))
        .route("/{id}/finalize", post(finalize_role))
        .route("/{id}/archive", post(archive_role))
        .route("/{id}/unarchive", post(unarchive_role))
}

async fn list_roles(
    Caller(ctx): Caller,
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> ApiResult<ListResponse<RoleDetails>> {
    list(state.resolver.roles_detailed(
        &ctx,
        params.org_uid,
        &params.search(),
        &params.role_filter(),
    ))
}

async fn create_role(
    Caller(ctx): Caller,
    State(state): State<Arc<AppState>>,
    Json(input): Json<RoleInput>,
) -> ApiResult<(StatusCode, ApiResponse<Role>)> {
    created(state.resolver.role_create(&ctx, &input))
}

async fn lookup_role(
    Caller(ctx): Caller,
    State(state): State<Arc<AppState>>,
    Query(lookup): Query<LookupQuery>,
) -> ApiResult<ApiResponse<Role>> {
    ok(state.resolver.role(&ctx, &lookup))
}

async fn get_role(
    Caller(ctx): Caller,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<Role>> {
    let lookup = LookupQuery {
        id: Some(id),
        code: None,
    };
    ok(state.resolver.role(&ctx, &lookup))
}

async fn update_role(
    Caller(ctx): Caller,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateRole>,
) -> ApiResult<ApiResponse<Role>> {
    ok(state.resolver.role_update(&ctx, id, &req))
}

async fn finalize_role(
    Caller(ctx): Caller,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<Role>> {
    ok(state.resolver.role_finalize(&ctx, id))
}

async fn archive_role(
    Caller(ctx): Caller,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<Role>> {
    ok(state.resolver.role_archive(&ctx, id))
}

async fn unarchive_role(
    Caller(ctx): Caller,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<Role>> {
    ok(state.resolver.role_unarchive(&ctx, id))
}

async fn delete_role(
    Caller(ctx): Caller,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<Role>> {
    ok(state.resolver.role_delete(&ctx, id))
}
