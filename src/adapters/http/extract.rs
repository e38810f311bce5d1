//! Request extractors that reject with [`AppError`] so failures render as `{ "error": ... }`.

use std::sync::Arc;

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Request},
    http::request::Parts,
};

use crate::{
    adapters::http::app_state::AppState,
    app_error::AppError,
    use_cases::signup::{SignupPayload, SignupUseCases},
};

/// The signup service, available only once the store gate is open.
///
/// Runs before any body extractor, so a closed gate answers 503 without
/// looking at the payload.
pub struct ReadySignups(pub Arc<SignupUseCases>);

impl FromRequestParts<AppState> for ReadySignups {
    type Rejection = AppError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        state.store_gate.signups().map(ReadySignups)
    }
}

/// JSON signup body. Syntax errors and non-object bodies become `InvalidInput`.
pub struct SignupBody(pub SignupPayload);

impl<S> FromRequest<S> for SignupBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<SignupPayload>::from_request(req, state).await {
            Ok(Json(payload)) => Ok(SignupBody(payload)),
            Err(rejection) => {
                tracing::debug!(error = %rejection.body_text(), "Rejected signup body");
                Err(AppError::InvalidInput("Invalid JSON body".into()))
            }
        }
    }
}
