// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Patchbay-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Patchbay and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Wire protocol shared by the HTTP facade and the host link.
//!
//! Queries and commands are typed enums; on the link they become labeled
//! frames (`query <id> <action> [args…]`, `script <tokens…>`) carried as
//! newline-delimited JSON. Replies come back tagged with the request id.

mod command;
mod frames;
mod query;
mod snapshot;

pub use command::HostCommand;
pub use frames::{HostReply, InboundFrame, OutboundFrame};
pub use query::HostQuery;
pub use snapshot::{BoxAttributes, BoxRecord, LineRecord, PatchLineRecord, PatchSnapshot};

use std::fmt;

use uuid::Uuid;

/// Opaque unique token correlating a query with its out-of-band reply.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestId(String);

impl RequestId {
    /// Generates a fresh identifier, unique per issued query.
    pub fn fresh() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RequestId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}
