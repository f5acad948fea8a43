use anyhow::{Context, Result};
use clap::{builder::ValueParser, Arg, Command};
use url::Url;

pub const ARG_IDENTITY_URL: &str = "identity-url";

pub const DEFAULT_IDENTITY_URL: &str = "http://127.0.0.1:8000";

/// Accept only absolute `http`/`https` URLs that name a host.
#[must_use]
pub fn validator_identity_url() -> ValueParser {
    ValueParser::from(move |value: &str| -> std::result::Result<Url, String> {
        let url = Url::parse(value).map_err(|e| format!("invalid URL: {e}"))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(format!("unsupported scheme: {}", url.scheme()));
        }

        if url.host_str().is_none() {
            return Err("URL must include a host".to_string());
        }

        Ok(url)
    })
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_IDENTITY_URL)
            .long(ARG_IDENTITY_URL)
            .help("Identity service base URL, example: http://127.0.0.1:8000")
            .long_help(
                "Identity service base URL. Registrations are forwarded to <identity-url>/register.",
            )
            .default_value(DEFAULT_IDENTITY_URL)
            .env("BUDGETWEB_IDENTITY_URL")
            .value_parser(validator_identity_url()),
    )
}

#[derive(Debug)]
pub struct Options {
    pub url: Url,
}

impl Options {
    /// Read identity service options from the parsed matches.
    /// # Errors
    /// Returns an error if the identity URL is missing.
    pub fn parse(matches: &clap::ArgMatches) -> Result<Self> {
        let url = matches
            .get_one::<Url>(ARG_IDENTITY_URL)
            .cloned()
            .context("missing required argument: --identity-url")?;

        Ok(Self { url })
    }
}
