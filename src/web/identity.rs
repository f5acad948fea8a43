use crate::{web::registration::RegistrationInput, APP_USER_AGENT};
use reqwest::{
    header::{ACCEPT, CONTENT_TYPE},
    Client, StatusCode,
};
use secrecy::ExposeSecret;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("identity service request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("identity service returned an invalid JSON body: {0}")]
    Decode(#[source] reqwest::Error),
}

/// What the identity service answered. The body is not interpreted.
#[derive(Debug, Clone)]
pub struct IdentityReply {
    pub status: StatusCode,
    pub body: Value,
}

/// HTTP client for the identity service.
#[derive(Debug, Clone)]
pub struct IdentityClient {
    client: Client,
    register_url: Url,
}

impl IdentityClient {
    /// Build a client for the identity service at `base_url`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built or the register URL is invalid.
    pub fn new(base_url: &Url) -> anyhow::Result<Self> {
        let client = Client::builder().user_agent(APP_USER_AGENT).build()?;

        Ok(Self {
            client,
            register_url: endpoint_url(base_url, "/register")?,
        })
    }

    #[must_use]
    pub fn register_url(&self) -> &Url {
        &self.register_url
    }

    /// Forward a validated registration to `POST /register`.
    ///
    /// # Errors
    /// Returns `IdentityError` when the request cannot be completed or the reply is not JSON.
    /// A non-success status is not an error.
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn register(&self, input: &RegistrationInput) -> Result<IdentityReply, IdentityError> {
        let payload = json!({
            "username": input.username,
            "password": input.password.expose_secret(),
            "email": input.email,
        });

        let response = self
            .client
            .post(self.register_url.clone())
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(IdentityError::Transport)?;

        let status = response.status();
        debug!("identity service status: {}", status);

        let body = response
            .json::<Value>()
            .await
            .map_err(IdentityError::Decode)?;

        Ok(IdentityReply { status, body })
    }
}

/// Append `endpoint` to the base URL path, keeping any prefix the base carries.
fn endpoint_url(base_url: &Url, endpoint: &str) -> anyhow::Result<Url> {
    let base = base_url.as_str().trim_end_matches('/');
    Ok(Url::parse(&format!("{base}{endpoint}"))?)
}
