use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use crate::auth::Caller;
use crate::server::AppState;
use crate::server::response::{ApiResponse, ApiResult, ok};
use crate::types::{Auther, LoginRequest, OtpRequest, OtpSession, UpdateUser, User};

pub fn auth_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/permissions", get(permissions))
        .route("/auth/otp", post(request_otp))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(me).patch(change_details))
}

async fn permissions(State(state): State<Arc<AppState>>) -> ApiResponse<Vec<&'static str>> {
    ApiResponse::success(state.resolver.permissions())
}

async fn request_otp(
    Caller(ctx): Caller,
    State(state): State<Arc<AppState>>,
    Json(req): Json<OtpRequest>,
) -> ApiResult<ApiResponse<OtpSession>> {
    ok(state.resolver.generate_otp(&ctx, &req))
}

async fn login(
    Caller(ctx): Caller,
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<ApiResponse<Auther>> {
    ok(state.resolver.login(&ctx, &req))
}

async fn logout(
    Caller(ctx): Caller,
    State(state): State<Arc<AppState>>,
) -> ApiResult<ApiResponse<()>> {
    ok(state.resolver.logout(&ctx))
}

async fn me(Caller(ctx): Caller, State(state): State<Arc<AppState>>) -> ApiResult<ApiResponse<User>> {
    ok(state.resolver.me(&ctx))
}

async fn change_details(
    Caller(ctx): Caller,
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpdateUser>,
) -> ApiResult<ApiResponse<User>> {
    ok(state.resolver.change_details(&ctx, &req))
}
