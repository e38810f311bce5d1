pub mod beta;
pub mod health;
pub mod waitlist;

use axum::Router;
use serde::Serialize;

use crate::adapters::http::app_state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(waitlist::router())
        .nest("/beta", beta::router())
}

#[derive(Serialize)]
pub(crate) struct SuccessResponse {
    success: bool,
}

impl SuccessResponse {
    pub(crate) fn ok() -> Self {
        Self { success: true }
    }
}
