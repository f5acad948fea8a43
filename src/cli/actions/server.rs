use crate::web::{self, identity::IdentityClient};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::debug;
use url::Url;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub identity_url: Url,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the identity client cannot be built or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    debug!("Server args: {:?}", args);

    let identity = IdentityClient::new(&args.identity_url)
        .context("Failed to build identity service client")?;

    web::new(args.port, Arc::new(identity)).await
}
