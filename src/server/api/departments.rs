use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};

use crate::auth::Caller;
use crate::resolver::{DepartmentInput, LookupQuery};
use crate::server::AppState;
use crate::server::dto::ListParams;
use crate::server::response::{ApiResponse, ApiResult, ListResponse, created, list, ok};
use crate::types::{Department, UpdateDepartment};

pub fn departments_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_departments).post(create_department))
        .route("/lookup", get(lookup_department))
        .route(
            "/{id}",
            get(get_department)
                .patch(update_department)
                .delete(delete_department),
        )
        .route("/{id}/finalize", post(finalize_department))
        .route("/{id}/archive", post(archive_department))
        .route("/{id}/unarchive", post(unarchive_department))
}

async fn list_departments(
    Caller(ctx): Caller,
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> ApiResult<ListResponse<Department>> {
    list(
        state
            .resolver
            .departments(&ctx, params.org_uid, &params.search()),
    )
}

async fn create_department(
    Caller(ctx): Caller,
    State(state): State<Arc<AppState>>,
    Json(input): Json<DepartmentInput>,
) -> ApiResult<(StatusCode, ApiResponse<Department>)> {
    created(state.resolver.department_create(&ctx, &input))
}

async fn lookup_department(
    Caller(ctx): Caller,
    State(state): State<Arc<AppState>>,
    Query(lookup): Query<LookupQuery>,
) -> ApiResult<ApiResponse<Department>> {
    ok(state.resolver.department(&ctx, &lookup))
}

async fn get_department(
    Caller(ctx): Caller,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<Department>> {
    let lookup = LookupQuery {
        id: Some(id),
        code: None,
    };
    ok(state.resolver.department(&ctx, &lookup))
}

async fn update_department(
    Caller(ctx): Caller,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateDepartment>,
) -> ApiResult<ApiResponse<Department>> {
    ok(state.resolver.department_update(&ctx, id, &req))
}

async fn finalize_department(
    Caller(ctx): Caller,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<Department>> {
    ok(state.resolver.department_finalize(&ctx, id))
}

async fn archive_department(
    Caller(ctx): Caller,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<Department>> {
    ok(state.resolver.department_archive(&ctx, id))
}

async fn unarchive_department(
    Caller(ctx): Caller,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<Department>> {
    ok(state.resolver.department_unarchive(&ctx, id))
}

async fn delete_department(
    Caller(ctx): Caller,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<Department>> {
    ok(state.resolver.department_delete(&ctx, id))
}
