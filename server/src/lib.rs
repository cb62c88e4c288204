//! HTTP API for the secure license encryption service.
//!
//! Handlers only parse requests and format responses; every decision is made
//! by [`Vault`]. Routes live under `/sles/api/v1`:
//!
//! | Method | Path               | Operation                    |
//! |--------|--------------------|------------------------------|
//! | GET    | `/fetch-license`   | list licenses                |
//! | POST   | `/generate-license`| issue a license              |
//! | POST   | `/encrypt-file`    | encrypt a multipart upload   |
//! | GET    | `/encrypt-file`    | list artifact bindings       |
//! | GET    | `/decrypt-file`    | decrypt an artifact          |
//! | POST   | `/generate-link`   | mint a share link            |
//! | GET    | `/secure-file`     | redeem a share link          |
//!
//! Request bodies are not size-capped: uploads are spooled to disk and
//! responses are streamed from the file the vault wrote.

mod cli;
mod error;
mod routes;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use sles_vault::Vault;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub use cli::{Args, LogFormat};
pub use error::{ApiError, ApiResult};
pub use routes::{GenerateLinkRequest, GenerateLinkResponse, LicenseRequest};

/// Common prefix of every route. Share links embed
/// [`SHARE_PATH`](sles_vault::SHARE_PATH), which must sit under it.
pub const API_PREFIX: &str = "/sles/api/v1";

/// Build the HTTP API router over a shared vault.
pub fn build_router(vault: Arc<Vault>) -> Router {
    let api = Router::new()
        .route("/fetch-license", get(routes::fetch_licenses))
        .route("/generate-license", post(routes::generate_license))
        .route(
            "/encrypt-file",
            post(routes::encrypt_file).get(routes::list_encrypted_files),
        )
        .route("/decrypt-file", get(routes::decrypt_file))
        .route("/generate-link", post(routes::generate_link))
        .route("/secure-file", get(routes::secure_file))
        .layer(DefaultBodyLimit::disable());

    Router::new()
        .nest(API_PREFIX, api)
        .layer(TraceLayer::new_for_http())
        .with_state(vault)
}
