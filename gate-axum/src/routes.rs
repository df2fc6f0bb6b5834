use axum::{
    body::{self, Body, Bytes},
    extract::{Path, State},
    http::{
        header::{ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_LENGTH, CONTENT_TYPE},
        HeaderMap, Method, Uri,
    },
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use gate_blob::{BlobError, BlobPut, BlobReceipt};
use gate_core::errors::GateError;
use http_body_util::LengthLimitError;
use serde::Serialize;

use crate::{cors, path::BlobPath, GateAxumError, GateState};

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub status: &'static str,
    pub data: UploadData,
}

#[derive(Debug, Serialize)]
pub struct UploadData {
    pub id: String,
    pub link: String,
}

impl UploadResponse {
    fn ok(receipt: &BlobReceipt, link: String) -> Self {
        Self {
            status: "ok",
            data: UploadData {
                id: receipt.id.to_string(),
                link,
            },
        }
    }
}

/// `PUT /`, `GET|HEAD /{id}.{ext}`, `OPTIONS` anywhere; everything else is 404.
pub fn gateway_router(state: GateState) -> Router<()> {
    Router::new()
        .route("/", routing::put(upload).options(preflight))
        .route("/{file}", routing::get(retrieve).options(preflight))
        .fallback(fallback)
        .with_state(state)
}

fn header_str<'a>(headers: &'a HeaderMap, name: &axum::http::HeaderName) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

async fn upload(
    State(state): State<GateState>,
    headers: HeaderMap,
    uri: Uri,
    body: Body,
) -> Result<Response, GateAxumError> {
    let mut put = BlobPut::new();
    if let Some(content_type) = header_str(&headers, &CONTENT_TYPE) {
        put = put.with_content_type(content_type);
    }
    if let Some(len) = header_str(&headers, &CONTENT_LENGTH).and_then(|v| v.parse::<u64>().ok()) {
        put = put.with_size_hint(len);
    }

    // Everything that can be rejected without the body is rejected first.
    state.adapter.precheck(&put)?;
    let host = state
        .links
        .host_for(&headers, &uri)
        .ok_or_else(|| GateError::bad_request("missing host header"))?;

    let bytes = read_body(body, state.adapter.config().max_blob_len()).await?;
    let receipt = state.adapter.put(put, bytes).await?;

    let link = receipt.link(&state.links.scheme, &host);
    let mut response = Json(UploadResponse::ok(&receipt, link)).into_response();

    if let Some(origin) = cors::allowed_origin(&headers, state.origins.as_ref()) {
        response.headers_mut().insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin);
    }

    Ok(response)
}

/// Buffer the whole body, failing as soon as it grows past `limit`.
async fn read_body(body: Body, limit: usize) -> Result<Bytes, GateAxumError> {
    body::to_bytes(body, limit).await.map_err(|err| -> GateAxumError {
        let inner = err.into_inner();
        if inner.is::<LengthLimitError>() {
            BlobError::TooLarge { limit: limit as u64 }.into()
        } else {
            GateError::bad_request("failed to read request body")
                .with_source(anyhow::anyhow!(inner))
                .into()
        }
    })
}

async fn retrieve(
    State(state): State<GateState>,
    Path(file): Path<String>,
) -> Result<Response, GateAxumError> {
    let path = BlobPath::from_segment(&file).ok_or_else(|| GateError::not_found("not found"))?;
    let opened = state.adapter.open(&path.id, &path.extension).await?;

    Ok(([(CONTENT_TYPE, opened.content_type)], opened.bytes).into_response())
}

async fn preflight(State(state): State<GateState>, headers: HeaderMap) -> Response {
    cors::preflight_response(&headers, state.origins.as_ref())
}

async fn fallback(State(state): State<GateState>, method: Method, headers: HeaderMap) -> Response {
    if method == Method::OPTIONS {
        return cors::preflight_response(&headers, state.origins.as_ref());
    }
    GateAxumError::from(GateError::not_found("not found")).into_response()
}
