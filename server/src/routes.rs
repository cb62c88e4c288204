//! Request handlers.

use crate::error::{ApiError, ApiResult};
use axum::Json;
use axum::body::Body;
use axum::extract::{Multipart, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sles_license::{License, LicenseKind};
use sles_types::{ArtifactName, LicenseId};
use sles_vault::{ArtifactBinding, Vault, VaultError};
use std::io::{BufReader, Seek};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio_util::io::ReaderStream;
use tracing::info;

type SharedVault = State<Arc<Vault>>;

/// Body of `POST /generate-license`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LicenseRequest {
    /// `time-bound` or `usage-limited`, any case.
    #[serde(rename = "type")]
    pub kind: String,
    /// Days for time-bound licenses, uses for usage-limited ones.
    pub expiry: i64,
}

/// Body of `POST /generate-link`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateLinkRequest {
    pub licensekey: String,
    pub filepath: String,
    /// Link lifetime; the server default applies when absent.
    #[serde(default)]
    pub ttl_secs: Option<i64>,
}

/// Response of `POST /generate-link`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateLinkResponse {
    pub message: String,
    pub url: String,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DecryptQuery {
    licensekey: Option<String>,
    filepath: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SecureFileQuery {
    token: Option<String>,
}

pub(crate) async fn fetch_licenses(State(vault): SharedVault) -> Json<Vec<License>> {
    info!("Fetched licenses");
    Json(vault.list_licenses())
}

pub(crate) async fn list_encrypted_files(State(vault): SharedVault) -> Json<Vec<ArtifactBinding>> {
    info!("Fetched encrypted files");
    Json(vault.list_artifacts())
}

pub(crate) async fn generate_license(
    State(vault): SharedVault,
    Json(request): Json<LicenseRequest>,
) -> ApiResult<(StatusCode, Json<License>)> {
    let kind: LicenseKind = request.kind.parse().map_err(VaultError::from)?;
    let license = vault.create_license(kind, request.expiry)?;
    Ok((StatusCode::CREATED, Json(license)))
}

/// Spools the multipart upload to an anonymous temp file, then encrypts it
/// off the async runtime.
pub(crate) async fn encrypt_file(
    State(vault): SharedVault,
    mut multipart: Multipart,
) -> ApiResult<Response> {
    let mut upload: Option<(String, std::fs::File)> = None;
    let mut license_key: Option<String> = None;

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Couldn't parse request: {e}")))?
    {
        match field.name().map(str::to_owned).as_deref() {
            Some("file") => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let mut spool = tokio::fs::File::from_std(tempfile::tempfile()?);
                while let Some(chunk) = field
                    .chunk()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("unable to read the file: {e}")))?
                {
                    spool.write_all(&chunk).await?;
                }
                spool.flush().await?;
                let mut spool = spool.into_std().await;
                spool.rewind()?;
                upload = Some((file_name, spool));
            }
            Some("licensekey") => {
                license_key = Some(field.text().await.map_err(|e| {
                    ApiError::BadRequest(format!("unable to read licensekey: {e}"))
                })?);
            }
            _ => {}
        }
    }

    let (Some((file_name, spool)), Some(license_key)) = (upload, license_key) else {
        return Err(ApiError::BadRequest(
            "Mandatory fields are not present. licensekey, file are required".to_string(),
        ));
    };
    let license_id = LicenseId::parse(&license_key).map_err(VaultError::from)?;

    let encrypted = tokio::task::spawn_blocking(move || {
        vault.encrypt_artifact(license_id, &file_name, BufReader::new(spool))
    })
    .await??;

    Ok(attachment(encrypted.file, encrypted.size, encrypted.name.as_str()))
}

pub(crate) async fn decrypt_file(
    State(vault): SharedVault,
    Query(query): Query<DecryptQuery>,
) -> ApiResult<Response> {
    let (Some(license_key), Some(file_path)) = (query.licensekey, query.filepath) else {
        return Err(ApiError::BadRequest(
            "licensekey, filepath are required".to_string(),
        ));
    };
    let license_id = LicenseId::parse(&license_key).map_err(VaultError::from)?;
    let artifact = ArtifactName::parse(&file_path).map_err(VaultError::from)?;

    let decrypted =
        tokio::task::spawn_blocking(move || vault.decrypt_artifact(license_id, &artifact))
            .await??;

    Ok(attachment(decrypted.file, decrypted.size, &decrypted.file_name))
}

pub(crate) async fn generate_link(
    State(vault): SharedVault,
    Json(request): Json<GenerateLinkRequest>,
) -> ApiResult<(StatusCode, Json<GenerateLinkResponse>)> {
    if request.licensekey.is_empty() || request.filepath.is_empty() {
        return Err(ApiError::BadRequest(
            "Mandatory fields are not present. licensekey, filepath are required".to_string(),
        ));
    }
    let license_id = LicenseId::parse(&request.licensekey).map_err(VaultError::from)?;
    let artifact = ArtifactName::parse(&request.filepath).map_err(VaultError::from)?;
    let ttl = request
        .ttl_secs
        .map(|secs| {
            Duration::try_seconds(secs).ok_or_else(|| {
                VaultError::InvalidArgument(format!("link lifetime {secs}s is out of range"))
            })
        })
        .transpose()?;

    let share = vault.issue_share_link(license_id, artifact, ttl)?;
    Ok((
        StatusCode::CREATED,
        Json(GenerateLinkResponse {
            message: "secure link generated successfully".to_string(),
            url: share.url,
            token: share.token,
            expires_at: share.link.expires_at,
        }),
    ))
}

pub(crate) async fn secure_file(
    State(vault): SharedVault,
    Query(query): Query<SecureFileQuery>,
) -> ApiResult<Response> {
    let token = query
        .token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::BadRequest("token is required".to_string()))?;

    let decrypted = tokio::task::spawn_blocking(move || vault.redeem_share_link(&token)).await??;

    Ok(attachment(decrypted.file, decrypted.size, &decrypted.file_name))
}

/// Streams `file` as a download named `file_name`.
///
/// The handle is the one the vault wrote, so a concurrent write to the same
/// name cannot change what this response carries.
fn attachment(file: std::fs::File, size: u64, file_name: &str) -> Response {
    let body = Body::from_stream(ReaderStream::new(tokio::fs::File::from_std(file)));
    (
        [
            (header::CONTENT_TYPE, "application/octet-stream".to_string()),
            (header::CONTENT_LENGTH, size.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        body,
    )
        .into_response()
}
