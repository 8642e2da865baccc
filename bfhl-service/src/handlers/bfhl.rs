use crate::dtos::Envelope;
use crate::services::{DispatchError, OperationOutput};
use crate::startup::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

/// `POST /bfhl`: run the operation named by the body's only key.
///
/// This is the single place failures become a response: every error,
/// from an unparseable body to an upstream AI outage, is answered with the
/// same 400 envelope.
pub async fn bfhl(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> (StatusCode, Json<Envelope<OperationOutput>>) {
    let official_email = state.config.official_email.clone();

    let outcome = match payload {
        Ok(Json(body)) => state.dispatcher.dispatch(body).await,
        Err(rejection) => Err(DispatchError::MalformedBody(rejection.body_text())),
    };

    match outcome {
        Ok(data) => (StatusCode::OK, Json(Envelope::success(official_email, data))),
        Err(e) => {
            tracing::warn!(error = %e, "Rejected bfhl request");
            (StatusCode::BAD_REQUEST, Json(Envelope::failure(official_email)))
        }
    }
}
