use axum::{Json, Router, routing::post};

use crate::{
    adapters::http::{
        app_state::AppState,
        extract::{ReadySignups, SignupBody},
        routes::SuccessResponse,
    },
    app_error::AppResult,
    domain::entities::signup::SignupKind,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/waitlist", post(join_waitlist))
}

async fn join_waitlist(
    ReadySignups(signups): ReadySignups,
    SignupBody(payload): SignupBody,
) -> AppResult<Json<SuccessResponse>> {
    signups.submit(SignupKind::Waitlist, payload).await?;
    Ok(Json(SuccessResponse::ok()))
}
