use crate::web::gate::RequestContext;
use axum::{extract::Extension, Json};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct SessionStatus {
    pub authenticated: bool,
}

// Session state as seen by the gate; the token itself is never echoed back.
pub async fn root(Extension(context): Extension<RequestContext>) -> Json<SessionStatus> {
    Json(SessionStatus {
        authenticated: context.is_authenticated(),
    })
}
