use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use uuid::Uuid;

use crate::auth::Caller;
use crate::resolver::OrganizationLookup;
use crate::server::AppState;
use crate::server::dto::ListParams;
use crate::server::response::{ApiResponse, ApiResult, ListResponse, created, list, ok};
use crate::service::organization::Registration;
use crate::types::{CreateOrganization, Organization, RegisterOrganization, UpdateOrganization};

pub fn organizations_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_organizations).post(create_organization))
        .route("/register", post(register_organization))
        .route("/lookup", get(lookup_organization))
        .route(
            "/{uid}",
            get(get_organization)
                .patch(update_organization)
                .delete(delete_organization),
        )
        .route("/{uid}/finalize", post(finalize_organization))
        .route("/{uid}/archive", post(archive_organization))
        .route("/{uid}/unarchive", post(unarchive_organization))
}

async fn register_organization(
    Caller(ctx): Caller,
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterOrganization>,
) -> ApiResult<(StatusCode, ApiResponse<Registration>)> {
    created(state.resolver.register(&ctx, &req))
}

async fn list_organizations(
    Caller(ctx): Caller,
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> ApiResult<ListResponse<Organization>> {
    list(
        state
            .resolver
            .organizations(&ctx, &params.search(), &params.organization_filter()),
    )
}

async fn create_organization(
    Caller(ctx): Caller,
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateOrganization>,
) -> ApiResult<(StatusCode, ApiResponse<Organization>)> {
    created(state.resolver.organization_create(&ctx, &req))
}

async fn lookup_organization(
    Caller(ctx): Caller,
    State(state): State<Arc<AppState>>,
    Query(lookup): Query<OrganizationLookup>,
) -> ApiResult<ApiResponse<Organization>> {
    ok(state.resolver.organization(&ctx, &lookup))
}

async fn get_organization(
    Caller(ctx): Caller,
    State(state): State<Arc<AppState>>,
    Path(uid): Path<Uuid>,
) -> ApiResult<ApiResponse<Organization>> {
    let lookup = OrganizationLookup {
        uid: Some(uid),
        code: None,
    };
    ok(state.resolver.organization(&ctx, &lookup))
}

async fn update_organization(
    Caller(ctx): Caller,
    State(state): State<Arc<AppState>>,
    Path(uid): Path<Uuid>,
    Json(req): Json<UpdateOrganization>,
) -> ApiResult<ApiResponse<Organization>> {
    ok(state.resolver.organization_update(&ctx, uid, &req))
}

async fn finalize_organization(
    Caller(ctx): Caller,
    State(state): State<Arc<AppState>>,
    Path(uid): Path<Uuid>,
) -> ApiResult<ApiResponse<Organization>> {
    ok(state.resolver.organization_finalize(&ctx, uid))
}

async fn archive_organization(
    Caller(ctx): Caller,
    State(state): State<Arc<AppState>>,
    Path(uid): Path<Uuid>,
) -> ApiResult<ApiResponse<Organization>> {
    ok(state.resolver.organization_archive(&ctx, uid))
}

async fn unarchive_organization(
    Caller(ctx): Caller,
    State(state): State<Arc<AppState>>,
    Path(uid): Path<Uuid>,
) -> ApiResult<ApiResponse<Organization>> {
    ok(state.resolver.organization_unarchive(&ctx, uid))
}

async fn delete_organization(
    Caller(ctx): Caller,
    State(state): State<Arc<AppState>>,
    Path(uid): Path<Uuid>,
) -> ApiResult<ApiResponse<Organization>> {
    ok(state.resolver.organization_delete(&ctx, uid))
}
