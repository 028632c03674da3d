// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Patchbay-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Patchbay and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Host link over the process's stdin/stdout as newline-delimited JSON.
//!
//! The host embeds this process and speaks the frame protocol on its pipes:
//! outbound query/script frames on stdout, inbound response/console frames
//! on stdin. Diagnostics go to stderr so they never corrupt the link.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::console::ConsoleRing;
use crate::protocol::{HostCommand, HostQuery, InboundFrame, OutboundFrame, RequestId};

use super::{Correlator, Transport, TransportError};

/// Transport writing frames to stdout through a dedicated writer task.
pub struct StdioTransport {
    outbound: mpsc::UnboundedSender<OutboundFrame>,
}

impl StdioTransport {
    /// Spawns the writer task and returns the send handle.
    pub fn spawn() -> Arc<Self> {
        let (outbound, receiver) = mpsc::unbounded_channel();
        tokio::spawn(write_frames(receiver));
        Arc::new(Self { outbound })
    }

    fn send(&self, frame: OutboundFrame) -> Result<(), TransportError> {
        self.outbound.send(frame).map_err(|_| TransportError::Closed)
    }
}

impl Transport for StdioTransport {
    fn send_query(&self, request_id: &RequestId, query: &HostQuery) -> Result<(), TransportError> {
        self.send(OutboundFrame::query(request_id, query))
    }

    fn send_command(&self, command: &HostCommand) -> Result<(), TransportError> {
        for frame in OutboundFrame::script_frames(command) {
            self.send(frame)?;
        }
        Ok(())
    }
}

async fn write_frames(mut receiver: mpsc::UnboundedReceiver<OutboundFrame>) {
    let mut stdout = tokio::io::stdout();
    while let Some(frame) = receiver.recv().await {
        let mut line = match serde_json::to_string(&frame) {
            Ok(line) => line,
            Err(err) => {
                warn!(%err, "failed to encode outbound frame");
                continue;
            }
        };
        line.push('\n');
        if stdout.write_all(line.as_bytes()).await.is_err() {
            break;
        }
        let _ = stdout.flush().await;
    }
    info!("host link writer stopped");
}

/// Spawns the reader feeding stdin lines into the correlator and console.
pub fn spawn_stdio_reader(
    correlator: Arc<Correlator>,
    console: Arc<Mutex<ConsoleRing>>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => handle_line(&line, &correlator, &console).await,
                Ok(None) => break,
                Err(err) => {
                    warn!(%err, "host link read error");
                    break;
                }
            }
        }
        info!("host link closed");
    })
}

/// Dispatches one inbound line. Malformed frames are logged and dropped
/// without touching any pending entry.
pub(crate) async fn handle_line(
    line: &str,
    correlator: &Correlator,
    console: &Mutex<ConsoleRing>,
) {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return;
    }
    match serde_json::from_str::<InboundFrame>(trimmed) {
        Ok(InboundFrame::Response { request_id, results }) => {
            correlator.deliver(&request_id, results).await;
        }
        Ok(InboundFrame::ConsoleMsg { message }) => {
            console.lock().await.push(message);
        }
        Err(err) => {
            warn!(%err, line = trimmed, "dropping malformed host frame");
        }
    }
}
