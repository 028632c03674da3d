// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Patchbay-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Patchbay and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! HTTP surface: a fixed table of routes over the patch graph.
//!
//! Reads go through the correlator when a host link is up and fall back to
//! the in-memory mirror otherwise; mutations are relayed outward as script
//! commands, or applied to the mirror in standalone mode. Every read answers
//! `{"results": ...}`, every accepted mutation `{"ok": true}`.

pub mod types;

use std::fmt;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, patch, post};
use axum::{Json, Router};
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::info;

use crate::bridge::{Correlator, QueryError};
use crate::console::{ConsoleRing, LogLevel};
use crate::host::{self, MirrorDocument};
use crate::model::{Rect, VarName};
use crate::protocol::{BoxAttributes, HostCommand, HostQuery, PatchSnapshot};

use types::{
    ConnectionRequest, ConsoleParams, CreateObjectRequest, ErrorResponse, OkResponse,
    ResultsResponse, SendMessageRequest, SetAttributeRequest, SetNumberRequest, SetTextRequest,
    StatusResponse,
};

/// Shared state behind every handler.
#[derive(Clone)]
pub struct AppState {
    correlator: Arc<Correlator>,
    mirror: Arc<Mutex<MirrorDocument>>,
    console: Arc<Mutex<ConsoleRing>>,
}

impl AppState {
    pub fn new(correlator: Arc<Correlator>) -> Self {
        Self {
            correlator,
            mirror: Arc::new(Mutex::new(MirrorDocument::new())),
            console: Arc::new(Mutex::new(ConsoleRing::new())),
        }
    }

    /// State with no host link; all traffic targets the mirror graph.
    pub fn standalone() -> Self {
        Self::new(Arc::new(Correlator::standalone()))
    }

    pub fn correlator(&self) -> Arc<Correlator> {
        Arc::clone(&self.correlator)
    }

    pub fn console(&self) -> Arc<Mutex<ConsoleRing>> {
        Arc::clone(&self.console)
    }

    #[cfg(test)]
    pub(crate) fn mirror(&self) -> Arc<Mutex<MirrorDocument>> {
        Arc::clone(&self.mirror)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(String),
    Timeout(String),
    Internal(String),
}

impl ApiError {
    fn missing_fields(fields: &str) -> Self {
        Self::BadRequest(format!("missing required fields: {fields}"))
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadRequest(msg) | Self::Timeout(msg) | Self::Internal(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::Timeout { .. } => Self::Timeout(err.to_string()),
            QueryError::Cancelled { .. } | QueryError::Transport(_) => {
                Self::Internal(err.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(ErrorResponse { error: self.to_string() })).into_response()
    }
}

/// Builds the full route table over `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(status))
        .route("/objects", get(list_objects).post(create_object))
        .route("/objects/selected", get(list_selected))
        .route("/objects/bounds", get(get_bounds))
        .route("/objects/{varname}", delete(delete_object))
        .route("/objects/{varname}/attributes", get(get_attributes).patch(set_attribute))
        .route("/objects/{varname}/text", patch(set_text))
        .route("/objects/{varname}/message", post(send_message))
        .route("/objects/{varname}/bang", post(send_bang))
        .route("/objects/{varname}/number", patch(set_number))
        .route("/connections", post(create_connection).delete(delete_connection))
        .route("/console", get(get_console))
        .with_state(state)
}

async fn status() -> Json<StatusResponse> {
    Json(StatusResponse { status: "ok" })
}

/// Answers a read from the host when connected, from the mirror otherwise.
async fn query_or_mirror<F>(
    state: &AppState,
    query: HostQuery,
    mirror_read: F,
) -> Result<Json<ResultsResponse>, ApiError>
where
    F: FnOnce(&MirrorDocument) -> Result<Value, serde_json::Error>,
{
    let results = if state.correlator.is_connected() {
        state.correlator.issue(query).await?
    } else {
        let doc = state.mirror.lock().await;
        mirror_read(&doc).map_err(|err| ApiError::Internal(err.to_string()))?
    };
    Ok(Json(ResultsResponse { results }))
}

/// Relays a mutation outward when connected, applies it to the mirror
/// otherwise. Relayed commands carry no confirmation.
async fn relay_or_mirror(
    state: &AppState,
    command: HostCommand,
) -> Result<Json<OkResponse>, ApiError> {
    if state.correlator.is_connected() {
        state
            .correlator
            .send_command(&command)
            .map_err(|err| ApiError::Internal(err.to_string()))?;
    } else {
        let mut doc = state.mirror.lock().await;
        host::apply_command(&mut *doc, &command);
    }
    Ok(Json(OkResponse::ok()))
}

fn parse_varname(raw: &str) -> Result<VarName, ApiError> {
    VarName::new(raw).map_err(|err| ApiError::BadRequest(format!("invalid varname: {err}")))
}

async fn list_objects(State(state): State<AppState>) -> Result<Json<ResultsResponse>, ApiError> {
    query_or_mirror(&state, HostQuery::ObjectsInPatch, |doc| {
        serde_json::to_value(PatchSnapshot::from(doc.patch()))
    })
    .await
}

async fn list_selected(State(state): State<AppState>) -> Result<Json<ResultsResponse>, ApiError> {
    // The mirror has no interactive selection; standalone reads answer an
    // empty snapshot.
    query_or_mirror(&state, HostQuery::ObjectsInSelection, |_doc| {
        serde_json::to_value(PatchSnapshot { boxes: Vec::new(), lines: Vec::new() })
    })
    .await
}

async fn get_attributes(
    State(state): State<AppState>,
    Path(varname): Path<String>,
) -> Result<Json<ResultsResponse>, ApiError> {
    let varname = parse_varname(&varname)?;
    query_or_mirror(&state, HostQuery::ObjectAttributes { varname: varname.clone() }, |doc| {
        let attributes = doc
            .patch()
            .get(varname.as_str())
            .map(|node| BoxAttributes::from_box(&varname, node));
        serde_json::to_value(attributes)
    })
    .await
}

async fn get_bounds(State(state): State<AppState>) -> Result<Json<ResultsResponse>, ApiError> {
    query_or_mirror(&state, HostQuery::PatchBounds, |doc| {
        serde_json::to_value(doc.patch().bounds())
    })
    .await
}

async fn create_object(
    State(state): State<AppState>,
    Json(body): Json<CreateObjectRequest>,
) -> Result<Json<OkResponse>, ApiError> {
    let (Some(obj_type), Some(position), Some(varname)) =
        (body.obj_type, body.position, body.varname)
    else {
        return Err(ApiError::missing_fields("obj_type, position, varname"));
    };
    let varname = parse_varname(&varname)?;
    let args = body
        .args
        .as_deref()
        .map(|raw| raw.split_whitespace().map(str::to_owned).collect())
        .unwrap_or_default();

    info!(%varname, obj_type, x = position[0], y = position[1], "add object");
    relay_or_mirror(
        &state,
        HostCommand::NewObject {
            varname,
            maxclass: obj_type,
            rect: Rect::at(position[0], position[1]),
            args,
        },
    )
    .await
}

async fn delete_object(
    State(state): State<AppState>,
    Path(varname): Path<String>,
) -> Result<Json<OkResponse>, ApiError> {
    let varname = parse_varname(&varname)?;
    info!(%varname, "delete object");
    relay_or_mirror(&state, HostCommand::Delete { varname }).await
}

async fn create_connection(
    State(state): State<AppState>,
    Json(body): Json<ConnectionRequest>,
) -> Result<Json<OkResponse>, ApiError> {
    let command = connection_command(body, true)?;
    relay_or_mirror(&state, command).await
}

async fn delete_connection(
    State(state): State<AppState>,
    Json(body): Json<ConnectionRequest>,
) -> Result<Json<OkResponse>, ApiError> {
    let command = connection_command(body, false)?;
    relay_or_mirror(&state, command).await
}

fn connection_command(body: ConnectionRequest, connect: bool) -> Result<HostCommand, ApiError> {
    let (Some(source), Some(destination)) = (body.src_varname, body.dst_varname) else {
        return Err(ApiError::missing_fields("src_varname, dst_varname"));
    };
    let source = parse_varname(&source)?;
    let destination = parse_varname(&destination)?;
    let outlet = body.outlet_idx.unwrap_or(0);
    let inlet = body.inlet_idx.unwrap_or(0);

    info!(%source, outlet, %destination, inlet, connect, "patch line edit");
    Ok(if connect {
        HostCommand::Connect { source, outlet, destination, inlet }
    } else {
        HostCommand::Disconnect { source, outlet, destination, inlet }
    })
}

async fn set_attribute(
    State(state): State<AppState>,
    Path(varname): Path<String>,
    Json(body): Json<SetAttributeRequest>,
) -> Result<Json<OkResponse>, ApiError> {
    let (Some(name), Some(value)) = (body.attr_name, body.attr_value) else {
        return Err(ApiError::missing_fields("attr_name, attr_value"));
    };
    let varname = parse_varname(&varname)?;
    info!(%varname, attr = %name, "set attribute");
    relay_or_mirror(&state, HostCommand::SetAttribute { varname, name, value }).await
}

async fn set_text(
    State(state): State<AppState>,
    Path(varname): Path<String>,
    Json(body): Json<SetTextRequest>,
) -> Result<Json<OkResponse>, ApiError> {
    let Some(text) = body.new_text else {
        return Err(ApiError::missing_fields("new_text"));
    };
    let varname = parse_varname(&varname)?;
    info!(%varname, "set text");
    relay_or_mirror(&state, HostCommand::SetText { varname, text }).await
}

async fn send_message(
    State(state): State<AppState>,
    Path(varname): Path<String>,
    Json(body): Json<SendMessageRequest>,
) -> Result<Json<OkResponse>, ApiError> {
    let Some(message) = body.message else {
        return Err(ApiError::missing_fields("message"));
    };
    let varname = parse_varname(&varname)?;
    info!(%varname, "send message");
    relay_or_mirror(&state, HostCommand::SendMessage { varname, message }).await
}

async fn send_bang(
    State(state): State<AppState>,
    Path(varname): Path<String>,
) -> Result<Json<OkResponse>, ApiError> {
    let varname = parse_varname(&varname)?;
    info!(%varname, "send bang");
    relay_or_mirror(&state, HostCommand::SendBang { varname }).await
}

async fn set_number(
    State(state): State<AppState>,
    Path(varname): Path<String>,
    Json(body): Json<SetNumberRequest>,
) -> Result<Json<OkResponse>, ApiError> {
    let Some(value) = body.num else {
        return Err(ApiError::missing_fields("num"));
    };
    let varname = parse_varname(&varname)?;
    info!(%varname, value, "set number");
    relay_or_mirror(&state, HostCommand::SetNumber { varname, value }).await
}

async fn get_console(
    State(state): State<AppState>,
    Query(params): Query<ConsoleParams>,
) -> Result<Json<ResultsResponse>, ApiError> {
    // An unknown level filter degrades to the most permissive one.
    let min_level = params
        .level
        .as_deref()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(LogLevel::Info);
    let since_last_call = params.since_last_call.unwrap_or(false);

    let page = state.console.lock().await.messages(min_level, since_last_call);
    let results =
        serde_json::to_value(page).map_err(|err| ApiError::Internal(err.to_string()))?;
    Ok(Json(ResultsResponse { results }))
}
