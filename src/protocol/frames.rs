// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Patchbay-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Patchbay and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{HostCommand, HostQuery, RequestId};

/// Frame written to the host link, one JSON object per line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum OutboundFrame {
    /// A read query: identifier, action label, ordered extra arguments.
    Query {
        request_id: String,
        action: String,
        args: Vec<Value>,
    },
    /// One `script` edit message as a token sequence.
    Script { tokens: Vec<Value> },
}

impl OutboundFrame {
    pub fn query(request_id: &RequestId, query: &HostQuery) -> Self {
        Self::Query {
            request_id: request_id.as_str().to_owned(),
            action: query.action().to_owned(),
            args: query.extra_args(),
        }
    }

    /// Expands a command into its `script` frames, in send order.
    pub fn script_frames(command: &HostCommand) -> Vec<Self> {
        command
            .script_messages()
            .into_iter()
            .map(|tokens| Self::Script { tokens })
            .collect()
    }
}

/// Frame read from the host link.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum InboundFrame {
    /// Reply to an issued query, tagged with its request id. A missing
    /// `results` field counts as `null`.
    Response {
        request_id: String,
        #[serde(default)]
        results: Value,
    },
    /// Console output forwarded from the patcher.
    ConsoleMsg { message: String },
}

/// Reply envelope produced by the host-side dispatcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostReply {
    pub request_id: String,
    pub results: Value,
}
