// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Patchbay-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Patchbay and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

/// Envelope for every read result (`{"results": ...}`).
#[derive(Debug, Clone, Serialize)]
pub struct ResultsResponse {
    pub results: Value,
}

/// Acknowledgment for every accepted mutation (`{"ok": true}`).
#[derive(Debug, Clone, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Body of `POST /objects`. All fields except `args` are required.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateObjectRequest {
    pub obj_type: Option<String>,
    pub position: Option<[f64; 2]>,
    pub varname: Option<String>,
    /// Space-separated init arguments for the new box.
    pub args: Option<String>,
}

/// Body of `POST /connections` and `DELETE /connections`.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionRequest {
    pub src_varname: Option<String>,
    pub dst_varname: Option<String>,
    pub outlet_idx: Option<u32>,
    pub inlet_idx: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetAttributeRequest {
    pub attr_name: Option<String>,
    pub attr_value: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetTextRequest {
    pub new_text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageRequest {
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetNumberRequest {
    pub num: Option<f64>,
}

/// Query parameters of `GET /console`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConsoleParams {
    pub level: Option<String>,
    pub since_last_call: Option<bool>,
}
