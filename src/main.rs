// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Patchbay-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Patchbay and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Patchbay CLI entrypoint.
//!
//! By default this serves the REST facade at `http://127.0.0.1:<port>/` over
//! the in-memory mirror graph.
//!
//! Use `--host-stdio` when a patcher host embeds this process and speaks the
//! frame protocol on stdin/stdout (intended for host integrations; logs go
//! to stderr so they never corrupt the link).

use std::error::Error;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use patchbay::bridge::stdio::{spawn_stdio_reader, StdioTransport};
use patchbay::bridge::Correlator;
use patchbay::facade::{router, AppState};

const DEFAULT_HTTP_PORT: u16 = 3009;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--port <port>] [--host-stdio]\n\nServes the REST facade at `http://127.0.0.1:<port>/`.\n--port selects the port (default {DEFAULT_HTTP_PORT}, or the PORT environment variable).\n\n--host-stdio attaches to an embedding patcher host over stdin/stdout; without it\nthe server runs standalone against an in-memory mirror of the patch graph."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    port: Option<u16>,
    host_stdio: bool,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--port" => {
                if options.port.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                let port: u16 = raw.parse().map_err(|_| ())?;
                options.port = Some(port);
            }
            "--host-stdio" => {
                if options.host_stdio {
                    return Err(());
                }
                options.host_stdio = true;
            }
            _ => return Err(()),
        }
    }

    Ok(options)
}

fn port_from_env() -> Option<u16> {
    std::env::var("PORT").ok()?.parse().ok()
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "patchbay".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("patchbay=info")),
            )
            .with_writer(std::io::stderr)
            .init();

        let port = options.port.or_else(port_from_env).unwrap_or(DEFAULT_HTTP_PORT);

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

        runtime.block_on(async move {
            let state = if options.host_stdio {
                let correlator = Arc::new(Correlator::with_transport(StdioTransport::spawn()));
                let state = AppState::new(Arc::clone(&correlator));
                spawn_stdio_reader(correlator, state.console());
                state
            } else {
                AppState::standalone()
            };

            let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
            info!(port, host_stdio = options.host_stdio, "listening");
            axum::serve(listener, router(state)).await?;
            Ok::<(), Box<dyn Error>>(())
        })?;

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("patchbay: {err}");
        std::process::exit(1);
    }
}
