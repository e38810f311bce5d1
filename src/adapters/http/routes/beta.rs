use axum::{
    Json, Router,
    routing::{get, post},
};
use serde::Serialize;

use crate::{
    adapters::http::{
        app_state::AppState,
        extract::{ReadySignups, SignupBody},
        routes::SuccessResponse,
    },
    app_error::{AppError, AppResult},
    domain::entities::signup::SignupKind,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(request_beta))
        .route("/invite", post(accept_invite))
        .route("/spots", get(spots))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SpotsResponse {
    spots_taken: u64,
}

async fn request_beta(
    ReadySignups(signups): ReadySignups,
    SignupBody(payload): SignupBody,
) -> AppResult<Json<SuccessResponse>> {
    signups.submit(SignupKind::BetaRequest, payload).await?;
    Ok(Json(SuccessResponse::ok()))
}

async fn accept_invite(
    ReadySignups(signups): ReadySignups,
    SignupBody(payload): SignupBody,
) -> AppResult<Json<SuccessResponse>> {
    signups.submit(SignupKind::BetaInvite, payload).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// Spots are counted from beta requests, not invites.
async fn spots(ReadySignups(signups): ReadySignups) -> AppResult<Json<SpotsResponse>> {
    let spots_taken = signups
        .count_spots(SignupKind::BetaRequest)
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "Failed to count beta requests");
            AppError::StoreUnavailable("Failed to fetch beta spots count".into())
        })?;
    Ok(Json(SpotsResponse { spots_taken }))
}
