use crate::web::{
    form::FormFields,
    identity::{IdentityClient, IdentityError},
    registration::{self, ValidationIssue},
};
use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, instrument, warn};

pub const LOGIN_PATH: &str = "/login";

/// Body of a rejected signup.
#[derive(Serialize, Debug)]
pub struct SignupRejected {
    pub issues: Vec<ValidationIssue>,
}

#[derive(Debug, Error)]
pub enum SignupError {
    #[error(transparent)]
    Identity(#[from] IdentityError),
}

impl IntoResponse for SignupError {
    fn into_response(self) -> Response {
        error!("Signup failed: {}", self);

        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}

/// Handle a submitted signup form.
///
/// Invalid input is answered with `400` and the full issue list. Valid input is
/// forwarded to the identity service and the browser is sent to the login page
/// with `303 See Other`, whatever the identity service answered.
///
/// # Errors
/// Returns `SignupError` when the identity service cannot be reached or does
/// not answer with JSON.
#[instrument(skip(identity, fields))]
pub async fn signup(
    identity: Extension<Arc<IdentityClient>>,
    FormFields(fields): FormFields,
) -> Result<Response, SignupError> {
    let input = match registration::validate(&fields) {
        Ok(input) => input,
        Err(issues) => {
            debug!("signup rejected: {:?}", issues);
            return Ok((StatusCode::BAD_REQUEST, Json(SignupRejected { issues })).into_response());
        }
    };

    let reply = identity.register(&input).await?;

    // The reply status does not change the outcome; it is only recorded.
    if !reply.status.is_success() {
        warn!(
            "identity service answered {} for user {}",
            reply.status, input.username
        );
    }

    debug!("identity service reply: {}", reply.body);

    Ok(Redirect::to(LOGIN_PATH).into_response())
}
