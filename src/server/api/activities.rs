use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, Query, State},
    routing::get,
};

use crate::auth::Caller;
use crate::server::AppState;
use crate::server::dto::ListParams;
use crate::server::response::{ApiResponse, ApiResult, ListResponse, list, ok};
use crate::service::loader::ActivityDetails;
use crate::types::UserActivity;

pub fn activities_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_activities))
        .route("/{id}", get(get_activity))
}

async fn list_activities(
    Caller(ctx): Caller,
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> ApiResult<ListResponse<ActivityDetails>> {
    list(state.resolver.user_activities(
        &ctx,
        params.org_uid,
        &params.search(),
        &params.activity_filter(),
    ))
}

async fn get_activity(
    Caller(ctx): Caller,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<UserActivity>> {
    ok(state.resolver.user_activity(&ctx, id))
}
