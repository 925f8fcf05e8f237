// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `nb serve` - JSON-lines command loop.
//!
//! Each stdin line is an invoke (`{"id"?, "cmd", "args"?}`); each stdout
//! line is either a response (`{"id"?, "ok", ...}`) or a canonical event
//! (`{"event", "payload"}`). The loop ends at end of input.

use anyhow::Result;
use nb_adapters::NotifyAdapter;
use nb_core::{EventKind, NativeEvent};
use nb_engine::{dispatch, Invoke, NotificationService, Response};
use nb_storage::StoreBackend;
use serde::Serialize;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

fn write_line<T: Serialize>(value: &T) -> Result<()> {
    let line = serde_json::to_string(value)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{line}")?;
    stdout.flush()?;
    Ok(())
}

/// Parse one input line; malformed lines become error responses.
pub fn parse_invoke(line: &str) -> Result<Invoke, Response> {
    serde_json::from_str(line).map_err(|e| Response::error(None, format!("invalid request: {e}")))
}

pub async fn handle<A, B>(
    service: NotificationService<A, B>,
    events: mpsc::Receiver<NativeEvent>,
) -> Result<()>
where
    A: NotifyAdapter,
    B: StoreBackend,
{
    for kind in [EventKind::Received, EventKind::ActionPerformed] {
        service.listen(kind, |event| {
            if let Err(e) = write_line(event) {
                tracing::warn!(error = %e, "failed to write event");
            }
        });
    }

    let restored = service.restore().await?;
    tracing::info!(restored, "serving commands on stdin");

    let bridge = service.clone();
    let event_loop = tokio::spawn(async move { bridge.run(events).await });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let response = match parse_invoke(line) {
            Ok(invoke) => dispatch(&service, invoke).await,
            Err(response) => response,
        };
        write_line(&response)?;
    }

    event_loop.abort();
    tracing::info!("input closed, stopping");
    Ok(())
}
