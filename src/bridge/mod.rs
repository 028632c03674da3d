// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Patchbay-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Patchbay and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Request/response correlation over a fire-and-forget host link.
//!
//! Each issued query gets a fresh identifier and a pending entry; a labeled
//! reply or the fixed deadline resolves it, whichever removes the entry
//! first. Without a transport the correlator runs standalone and resolves
//! every query immediately with `null`.

pub mod stdio;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::sync::{oneshot, Mutex};
use tracing::{debug, info, warn};

use crate::protocol::{HostCommand, HostQuery, RequestId};

/// Hard per-request deadline for host replies.
pub const RESPONSE_TIMEOUT_MS: u64 = 5_000;

/// Outbound half of the host link.
///
/// Sends are one-way; replies, if any, arrive out-of-band through
/// [`Correlator::deliver`].
pub trait Transport: Send + Sync {
    fn send_query(&self, request_id: &RequestId, query: &HostQuery) -> Result<(), TransportError>;
    fn send_command(&self, command: &HostCommand) -> Result<(), TransportError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    Closed,
    Encode(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => f.write_str("host link is closed"),
            Self::Encode(reason) => write!(f, "failed to encode frame: {reason}"),
        }
    }
}

impl std::error::Error for TransportError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// No reply arrived within the deadline; the entry was removed and any
    /// later reply for this id will be dropped.
    Timeout { request_id: String },
    /// The pending entry vanished without a reply (correlator shut down).
    Cancelled { request_id: String },
    Transport(TransportError),
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout { request_id } => write!(f, "request {request_id} timed out"),
            Self::Cancelled { request_id } => write!(f, "request {request_id} was cancelled"),
            Self::Transport(err) => write!(f, "transport failure: {err}"),
        }
    }
}

impl std::error::Error for QueryError {}

impl From<TransportError> for QueryError {
    fn from(err: TransportError) -> Self {
        Self::Transport(err)
    }
}

/// Pending-request table plus the outbound transport, if any.
pub struct Correlator {
    pending: Mutex<HashMap<String, oneshot::Sender<Value>>>,
    transport: Option<Arc<dyn Transport>>,
    timeout: Duration,
}

impl Correlator {
    /// Degraded/standalone mode: queries resolve immediately with `null`.
    pub fn standalone() -> Self {
        Self {
            pending: Mutex::new(HashMap::new()),
            transport: None,
            timeout: Duration::from_millis(RESPONSE_TIMEOUT_MS),
        }
    }

    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            pending: Mutex::new(HashMap::new()),
            transport: Some(transport),
            timeout: Duration::from_millis(RESPONSE_TIMEOUT_MS),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_deadline(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn is_connected(&self) -> bool {
        self.transport.is_some()
    }

    /// Issues a query and waits for its labeled reply or the deadline.
    pub async fn issue(&self, query: HostQuery) -> Result<Value, QueryError> {
        let request_id = RequestId::fresh();

        let Some(transport) = self.transport.as_deref() else {
            debug!(request_id = %request_id, action = query.action(), "standalone query, resolving null");
            return Ok(Value::Null);
        };

        let (sender, receiver) = oneshot::channel();
        self.pending
            .lock()
            .await
            .insert(request_id.as_str().to_owned(), sender);

        if let Err(err) = transport.send_query(&request_id, &query) {
            self.pending.lock().await.remove(request_id.as_str());
            return Err(err.into());
        }
        info!(request_id = %request_id, action = query.action(), "query issued");

        match tokio::time::timeout(self.timeout, receiver).await {
            Ok(Ok(results)) => Ok(results),
            Ok(Err(_)) => Err(QueryError::Cancelled { request_id: request_id.into_string() }),
            Err(_elapsed) => {
                // Remove-before-fail: a delivery that already removed the
                // entry won the race and this branch must not fire for it.
                let removed = self.pending.lock().await.remove(request_id.as_str());
                if removed.is_some() {
                    warn!(request_id = %request_id, "query timed out");
                }
                Err(QueryError::Timeout { request_id: request_id.into_string() })
            }
        }
    }

    /// Resolves the pending entry for `request_id`, if one is still live.
    ///
    /// Unknown, already-resolved, and timed-out identifiers are silently
    /// dropped; at most one resolution per identifier is honored.
    pub async fn deliver(&self, request_id: &str, results: Value) {
        let Some(sender) = self.pending.lock().await.remove(request_id) else {
            debug!(request_id, "dropping reply with no pending entry");
            return;
        };
        if sender.send(results).is_err() {
            debug!(request_id, "pending caller went away before resolution");
        }
    }

    /// Relays a fire-and-forget command outward. Callers check
    /// [`is_connected`](Self::is_connected) first; standalone mode has no
    /// outward path.
    pub fn send_command(&self, command: &HostCommand) -> Result<(), TransportError> {
        match self.transport.as_deref() {
            Some(transport) => transport.send_command(command),
            None => Ok(()),
        }
    }

    #[cfg(test)]
    pub(crate) async fn pending_len(&self) -> usize {
        self.pending.lock().await.len()
    }
}
