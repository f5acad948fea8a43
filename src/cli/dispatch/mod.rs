//! Maps validated CLI arguments to the action the binary runs.

use crate::cli::actions::{server::Args, Action};
use crate::cli::commands::identity;
use anyhow::Result;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>("port").copied().unwrap_or(8080);

    let identity_opts = identity::Options::parse(matches)?;

    Ok(Action::Server(Args {
        port,
        identity_url: identity_opts.url,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_action_from_args() {
        let matches = crate::cli::commands::new().get_matches_from(vec![
            "budgetweb",
            "--port",
            "9090",
            "--identity-url",
            "http://identity.tld:8000",
        ]);

        let result = handler(&matches);
        assert!(result.is_ok());
        if let Ok(Action::Server(args)) = result {
            assert_eq!(args.port, 9090);
            assert_eq!(args.identity_url.as_str(), "http://identity.tld:8000/");
        }
    }
}
