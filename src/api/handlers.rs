//! API request handlers

use std::sync::Arc;

use axum::{
    extract::{Multipart, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::server::AppState;
use crate::error::SheetError;
use crate::session::resolve_filename;
use crate::types::Table;

/// Multipart field carrying the uploaded file
pub const UPLOAD_FIELD: &str = "file";

const XLSX_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const INDEX_HTML: &str = include_str!("index.html");

/// Standard API response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            request_id: Uuid::new_v4().to_string(),
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            request_id: Uuid::new_v4().to_string(),
            data: None,
            error: Some(message.into()),
        }
    }
}

/// HTTP status for a failed operation
pub fn error_status(err: &SheetError) -> StatusCode {
    match err {
        SheetError::Decode(_) | SheetError::UnsupportedUpload(_) | SheetError::Validation(_) => {
            StatusCode::BAD_REQUEST
        }
        SheetError::NoTable => StatusCode::CONFLICT,
        SheetError::Export(_) | SheetError::Import(_) | SheetError::Io(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn failure<T: Serialize>(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ApiResponse::<T>::err(message))).into_response()
}

/// GET / - Upload page
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// API info response
#[derive(Serialize)]
pub struct RootResponse {
    pub name: String,
    pub version: String,
    pub description: String,
    pub endpoints: Vec<EndpointInfo>,
}

#[derive(Serialize)]
pub struct EndpointInfo {
    pub path: String,
    pub method: String,
    pub description: String,
}

impl EndpointInfo {
    fn new(method: &str, path: &str, description: &str) -> Self {
        Self {
            path: path.to_string(),
            method: method.to_string(),
            description: description.to_string(),
        }
    }
}

/// GET /api/v1 - Endpoint listing
pub async fn api_info(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::ok(RootResponse {
        name: "Sheetdrop".to_string(),
        version: state.version.clone(),
        description: "Upload semicolon-delimited text and save it as Excel".to_string(),
        endpoints: vec![
            EndpointInfo::new("GET", "/", "Upload page"),
            EndpointInfo::new("GET", "/health", "Health check endpoint"),
            EndpointInfo::new("GET", "/version", "Get server version"),
            EndpointInfo::new("POST", "/api/v1/upload", "Upload a .txt or .csv file"),
            EndpointInfo::new("GET", "/api/v1/table", "Current parsed table"),
            EndpointInfo::new("POST", "/api/v1/save", "Save the table as .xlsx"),
            EndpointInfo::new("GET", "/api/v1/download", "Download the table as .xlsx"),
        ],
    }))
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// GET /health - Health check
pub async fn health() -> impl IntoResponse {
    Json(ApiResponse::ok(HealthResponse {
        status: "healthy".to_string(),
    }))
}

/// Version response
#[derive(Serialize)]
pub struct VersionResponse {
    pub version: String,
}

/// GET /version - Server version
pub async fn version(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::ok(VersionResponse {
        version: state.version.clone(),
    }))
}

/// Upload response: raw content plus the parsed table
#[derive(Serialize, Default)]
pub struct UploadResponse {
    pub file_name: String,
    pub content: String,
    /// `None` when the file held no non-blank line
    pub table: Option<Table>,
    /// Zero-based indices of rows whose length differs from the header
    pub ragged_rows: Vec<usize>,
}

/// POST /api/v1/upload - Upload a delimited text file (multipart field `file`)
pub async fn upload(State(state): State<Arc<AppState>>, mut multipart: Multipart) -> Response {
    let mut received: Option<(String, Vec<u8>)> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return failure::<UploadResponse>(
                    StatusCode::BAD_REQUEST,
                    format!("Malformed upload: {}", e),
                )
            }
        };

        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        match field.bytes().await {
            Ok(bytes) => received = Some((file_name, bytes.to_vec())),
            Err(e) => {
                return failure::<UploadResponse>(
                    StatusCode::BAD_REQUEST,
                    format!("Error reading file: {}", e),
                )
            }
        }
    }

    let Some((file_name, bytes)) = received else {
        return failure::<UploadResponse>(
            StatusCode::BAD_REQUEST,
            format!("No '{}' field in upload", UPLOAD_FIELD),
        );
    };

    let outcome = state.session().upload(&file_name, &bytes);
    match outcome {
        Ok(outcome) => {
            let ragged_rows = outcome
                .table
                .as_ref()
                .map(Table::ragged_rows)
                .unwrap_or_default();
            Json(ApiResponse::ok(UploadResponse {
                file_name: outcome.file_name,
                content: outcome.content,
                table: outcome.table,
                ragged_rows,
            }))
            .into_response()
        }
        Err(e) => failure::<UploadResponse>(error_status(&e), e.to_string()),
    }
}

/// Current table response
#[derive(Serialize, Default)]
pub struct TableResponse {
    pub file_name: Option<String>,
    pub table: Option<Table>,
}

/// GET /api/v1/table - Current parsed table
pub async fn table(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let session = state.session();
    Json(ApiResponse::ok(TableResponse {
        file_name: session.upload_name().map(str::to_string),
        table: session.table().cloned(),
    }))
}

/// Save request
#[derive(Deserialize, Default)]
pub struct SaveRequest {
    #[serde(default)]
    pub filename: Option<String>,
}

/// Save response
#[derive(Serialize, Default)]
pub struct SaveResponse {
    pub saved: bool,
    pub path: String,
    pub message: String,
}

/// POST /api/v1/save - Save the current table into the output directory
pub async fn save(State(state): State<Arc<AppState>>, Json(req): Json<SaveRequest>) -> Response {
    let result = state
        .session()
        .save(req.filename.as_deref(), &state.output_dir);

    match result {
        Ok(path) => {
            let path = path.display().to_string();
            Json(ApiResponse::ok(SaveResponse {
                saved: true,
                message: format!("Table saved to Excel: {}", path),
                path,
            }))
            .into_response()
        }
        Err(e) => failure::<SaveResponse>(error_status(&e), e.to_string()),
    }
}

/// GET /api/v1/download?filename=... - Current table as an .xlsx attachment
pub async fn download(
    State(state): State<Arc<AppState>>,
    Query(req): Query<SaveRequest>,
) -> Response {
    let filename = resolve_filename(req.filename.as_deref()).to_string();
    let result = state.session().download();

    match result {
        Ok(bytes) => (
            [
                (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", filename.replace('"', "")),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => failure::<SaveResponse>(error_status(&e), e.to_string()),
    }
}
