//! # Budgetweb (web client server)
//!
//! `budgetweb` is the server side of the budgeting web client. It sits between
//! the browser and the identity service.
//!
//! ## Session gate
//!
//! Every request passes through a gate that looks for the `jwt` session cookie
//! and attaches a [`web::gate::RequestContext`] to the request. The gate only
//! checks that the cookie is present; verifying the token is left to the
//! identity service.
//!
//! ## Signup
//!
//! `POST /signup` validates the submitted form, reports every invalid field at
//! once, and forwards valid registrations to the identity service before
//! redirecting the browser to `/login`.

pub mod cli;
pub mod web;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
