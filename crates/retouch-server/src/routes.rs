//! Request routing.
//!
//! [`route`] is plain synchronous code over a collected body, so handlers run
//! on the blocking pool and can be tested without a socket. [`handle`] is the
//! hyper-facing wrapper.

use std::convert::Infallible;
use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::Incoming;
use hyper::header::{HeaderValue, CONTENT_DISPOSITION, CONTENT_TYPE};
use hyper::{Method, Request, Response, StatusCode};
use retouch_core::{
    encode_png, EditorView, SliderAdjustments, TransformOp, BLUR_RANGE, BRIGHTNESS_RANGE,
    CONTRAST_RANGE, SATURATION_RANGE, SHARPNESS_RANGE,
};
use serde::Serialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::{AppState, Session};

const INDEX_HTML: &str = include_str!("../static/index.html");

type HttpResponse = Response<Full<Bytes>>;

/// JSON view of a session.
#[derive(Debug, Serialize)]
struct ViewBody {
    has_image: bool,
    width: Option<u32>,
    height: Option<u32>,
    adjustments: SliderAdjustments,
    download: DownloadBody,
}

#[derive(Debug, Serialize)]
struct DownloadBody {
    visible: bool,
    label: Option<String>,
}

impl<H> From<EditorView<'_, H>> for ViewBody {
    fn from(view: EditorView<'_, H>) -> Self {
        Self {
            has_image: view.has_image(),
            width: view.image.map(|image| image.width()),
            height: view.image.map(|image| image.height()),
            adjustments: view.adjustments,
            download: DownloadBody {
                visible: view.download.is_visible(),
                label: view.download.label().map(str::to_string),
            },
        }
    }
}

/// hyper service entry point.
pub async fn handle(
    state: Arc<AppState>,
    req: Request<Incoming>,
) -> Result<HttpResponse, Infallible> {
    let (parts, body) = req.into_parts();
    let limit = state.config().max_upload_bytes;

    let body = match Limited::new(body, limit).collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            let err = if e.downcast_ref::<LengthLimitError>().is_some() {
                ApiError::PayloadTooLarge { limit }
            } else {
                ApiError::BadRequest(e.to_string())
            };
            warn!(
                method = %parts.method,
                path = parts.uri.path(),
                error = %err,
                "Request body rejected"
            );
            return Ok(err.into_response());
        }
    };

    let method = parts.method.clone();
    let path = parts.uri.path().to_string();
    let result = tokio::task::spawn_blocking(move || route(&state, &method, &path, body)).await;

    let response = match result {
        Ok(Ok(response)) => response,
        Ok(Err(err)) => {
            if err.status_code().is_server_error() {
                error!(error = %err, "Request failed");
            }
            err.into_response()
        }
        Err(e) => {
            error!(error = %e, "Handler task failed");
            ApiError::Internal(e.to_string()).into_response()
        }
    };

    info!(
        method = %parts.method,
        path = parts.uri.path(),
        status = response.status().as_u16(),
        "Request handled"
    );
    Ok(response)
}

/// Dispatch one request.
pub fn route(
    state: &AppState,
    method: &Method,
    path: &str,
    body: Bytes,
) -> Result<HttpResponse, ApiError> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match (method.as_str(), segments.as_slice()) {
        ("GET", []) => Ok(respond(StatusCode::OK, "text/html; charset=utf-8", INDEX_HTML)),
        ("GET", ["api", "sliders"]) => slider_ranges(),
        ("POST", ["api", "sessions"]) => {
            let id = state.create_session();
            json(StatusCode::CREATED, &serde_json::json!({ "session_id": id }))
        }
        ("GET", ["api", "sessions", id]) => session_view(state, id, |s| s.view().into()),
        ("DELETE", ["api", "sessions", id]) => {
            let id = session_id(id)?;
            if state.remove_session(id) {
                Ok(respond(StatusCode::NO_CONTENT, "text/plain", Bytes::new()))
            } else {
                Err(ApiError::SessionNotFound(id.to_string()))
            }
        }
        ("POST", ["api", "sessions", id, "upload"]) => {
            session_view(state, id, |s| s.upload_bytes(&body).into())
        }
        ("POST", ["api", "sessions", id, "adjust"]) => {
            let adjustments: SliderAdjustments = serde_json::from_slice(&body)
                .map_err(|e| ApiError::BadRequest(format!("Invalid slider values: {e}")))?;
            session_view(state, id, |s| s.adjust(adjustments).into())
        }
        ("POST", ["api", "sessions", id, "transform", op]) => {
            let op: TransformOp = op.parse()?;
            session_view(state, id, |s| s.transform(op).into())
        }
        ("POST", ["api", "sessions", id, "reset"]) => session_view(state, id, |s| s.reset().into()),
        ("GET", ["api", "sessions", id, "image"]) => {
            let png = state
                .with_session(session_id(id)?, |s| s.displayed().map(encode_png))?
                .ok_or_else(|| ApiError::NotFound("no image uploaded".to_string()))??;
            Ok(respond(StatusCode::OK, "image/png", png))
        }
        ("GET", ["api", "sessions", id, "download"]) => {
            let path = state
                .with_session(session_id(id)?, |s| s.download().handle().cloned())?
                .ok_or_else(|| ApiError::NotFound("no download available".to_string()))?;
            download_file(&path)
        }
        _ => Err(ApiError::NotFound(format!("{method} {path}"))),
    }
}

/// Run `op` on a session and answer with the resulting view.
fn session_view(
    state: &AppState,
    id: &str,
    op: impl FnOnce(&mut Session) -> ViewBody,
) -> Result<HttpResponse, ApiError> {
    let view = state.with_session(session_id(id)?, op)?;
    json(StatusCode::OK, &view)
}

fn session_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::SessionNotFound(raw.to_string()))
}

fn slider_ranges() -> Result<HttpResponse, ApiError> {
    let ranges = serde_json::json!({
        "brightness": BRIGHTNESS_RANGE,
        "contrast": CONTRAST_RANGE,
        "saturation": SATURATION_RANGE,
        "sharpness": SHARPNESS_RANGE,
        "blur": BLUR_RANGE,
    });
    json(StatusCode::OK, &ranges)
}

fn download_file(path: &Path) -> Result<HttpResponse, ApiError> {
    let bytes = std::fs::read(path).map_err(|e| {
        warn!(path = %path.display(), error = %e, "Download file unreadable");
        ApiError::NotFound("download file is gone".to_string())
    })?;
    let mut response = respond(StatusCode::OK, "image/png", bytes);
    response.headers_mut().insert(
        CONTENT_DISPOSITION,
        HeaderValue::from_static("attachment; filename=\"download.png\""),
    );
    Ok(response)
}

fn json<T: Serialize>(status: StatusCode, value: &T) -> Result<HttpResponse, ApiError> {
    let body = serde_json::to_vec(value).map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(respond(status, "application/json", body))
}

fn respond(
    status: StatusCode,
    content_type: &'static str,
    body: impl Into<Bytes>,
) -> HttpResponse {
    let mut response = Response::new(Full::new(body.into()));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}
