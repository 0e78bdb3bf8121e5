// nise-rs: Director-less BOSH Release Installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! I/O streaming and output capture for processes.
//!
//! ```text
//! run_child()
//!   stdout/stderr reader tasks (lines)
//!   wait
//!   join readers --> ProcessOutput { exit_code, stdout, stderr }
//! ```

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Child;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::builder::{ProcessBuilder, ProcessOutput, StreamFlags};
use crate::error::Result;

fn spawn_reader<R>(
    stream: Option<R>,
    flags: StreamFlags,
    process_name: &str,
    stream_name: &'static str,
) -> Option<JoinHandle<String>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    if !flags.intersects(StreamFlags::FORWARD_TO_LOG | StreamFlags::KEEP_IN_STRING) {
        return None;
    }
    let name = process_name.to_string();
    stream.map(|stream| tokio::spawn(async move { read_stream(stream, flags, &name, stream_name).await }))
}

async fn join_reader(handle: Option<JoinHandle<String>>) -> String {
    match handle {
        Some(handle) => handle.await.unwrap_or_else(|e| {
            warn!(error = %e, "output reader task failed");
            String::new()
        }),
        None => String::new(),
    }
}

impl ProcessBuilder {
    /// Drains the child's output while waiting for it to exit.
    pub(super) async fn run_child(&self, name: &str, child: &mut Child) -> Result<ProcessOutput> {
        let stdout = spawn_reader(child.stdout.take(), self.stdout_stream(), name, "stdout");
        let stderr = spawn_reader(child.stderr.take(), self.stderr_stream(), name, "stderr");

        let status = child
            .wait()
            .await
            .with_context(|| format!("failed waiting for process {name}"))?;

        Ok(ProcessOutput::new(
            status.code().unwrap_or(-1),
            join_reader(stdout).await,
            join_reader(stderr).await,
        ))
    }
}

/// Reads a stream line by line, logging and optionally keeping each line.
async fn read_stream<R>(
    reader: R,
    flags: StreamFlags,
    process_name: &str,
    stream_name: &str,
) -> String
where
    R: AsyncRead + Unpin,
{
    let mut kept = String::new();
    let mut lines = BufReader::new(reader).lines();

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if flags.contains(StreamFlags::FORWARD_TO_LOG) {
                    debug!(process = %process_name, stream = %stream_name, "{line}");
                }
                if flags.contains(StreamFlags::KEEP_IN_STRING) {
                    kept.push_str(&line);
                    kept.push('\n');
                }
            }
            Ok(None) => break,
            Err(e) => {
                warn!(process = %process_name, stream = %stream_name, error = %e, "error reading stream");
                break;
            }
        }
    }

    kept
}
