//! Line-delimited JSON host loop.
//!
//! Each stdin line is one call:
//!
//! ```text
//! {"extension":"echo","instance":7,"message":"hi","mode":"send"}
//! ```
//!
//! Each stdout line is one outcome:
//!
//! ```text
//! {"kind":"reply","instance":7,"message":"From java sync: hi"}
//! {"kind":"post","instance":7,"message":"7: from java: hi"}
//! {"kind":"error","instance":7,"error":"no extension registered as 'camera'"}
//! ```
//!
//! Calls run on the blocking pool, so replies may be written in a different
//! order than the requests arrived; the instance id correlates them.

use std::sync::Arc;

use futures_util::StreamExt;
use hx_core::{Config, InstanceId};
use hx_extensions::{ChannelSink, ExtensionEndpoint, ExtensionRegistry, PostedMessage};
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::codec::{FramedRead, LinesCodec, LinesCodecError};
use tracing::{debug, info, warn};

/// Longest accepted request line, in bytes.
const MAX_LINE_LENGTH: usize = 1024 * 1024;

/// Calling convention requested by a line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Fire-and-forget; the reply arrives as a `post` line.
    Send,
    /// Request/response; the reply arrives as a `reply` line.
    #[default]
    Request,
}

/// One inbound call.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Request {
    /// Registered extension name.
    pub extension: String,
    /// Caller's instance id.
    #[serde(default)]
    pub instance: InstanceId,
    /// Message payload.
    pub message: String,
    /// Calling convention.
    #[serde(default)]
    pub mode: Mode,
}

/// One outbound line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Outbound {
    /// Inline reply to a `request`.
    Reply {
        /// Instance the reply belongs to.
        instance: InstanceId,
        /// Reply text.
        message: String,
    },
    /// Delivery for a `send`.
    Post {
        /// Instance the delivery belongs to.
        instance: InstanceId,
        /// Delivered text.
        message: String,
    },
    /// The line could not be dispatched.
    Error {
        /// Instance of the failed call, when the line parsed far enough.
        #[serde(skip_serializing_if = "Option::is_none")]
        instance: Option<InstanceId>,
        /// What went wrong.
        error: String,
    },
}

impl Outbound {
    fn error(instance: Option<InstanceId>, error: impl Into<String>) -> Self {
        Self::Error {
            instance,
            error: error.into(),
        }
    }

    /// Compact JSON form, without the trailing newline.
    pub fn to_line(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|err| {
            format!(r#"{{"kind":"error","error":"cannot encode output: {err}"}}"#)
        })
    }
}

impl From<PostedMessage> for Outbound {
    fn from(posted: PostedMessage) -> Self {
        Self::Post {
            instance: posted.instance,
            message: posted.message,
        }
    }
}

/// Serves stdin to stdout until stdin closes.
pub async fn run_serve(config: &Config) -> color_eyre::Result<()> {
    serve(config, tokio::io::stdin(), tokio::io::stdout()).await
}

/// Serves `input` to `output` until `input` closes.
///
/// Every in-flight call finishes and every posted reply is written before
/// this returns.
pub async fn serve<R, W>(config: &Config, input: R, output: W) -> color_eyre::Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (sink, posts) = ChannelSink::channel();
    let registry = Arc::new(ExtensionRegistry::with_defaults(config, Arc::new(sink))?);
    let (out_tx, out_rx) = mpsc::unbounded_channel();
    let writer = tokio::spawn(write_output(output, out_rx, posts));

    info!(extensions = ?registry.names(), "Serving requests on stdin");

    let mut lines = FramedRead::new(input, LinesCodec::new_with_max_length(MAX_LINE_LENGTH));
    let mut calls = JoinSet::new();
    let mut received = 0_u64;

    // After a decode error the framed stream yields a single `None` before
    // it resumes reading; only a `None` that follows a line is end of input.
    let mut after_error = false;

    loop {
        let Some(line) = lines.next().await else {
            if after_error {
                after_error = false;
                continue;
            }
            break;
        };
        let line = match line {
            Ok(line) => {
                after_error = false;
                line
            }
            Err(LinesCodecError::MaxLineLengthExceeded) => {
                after_error = true;
                warn!(max = MAX_LINE_LENGTH, "Request line too long");
                let _ = out_tx.send(Outbound::error(None, "request line too long"));
                continue;
            }
            Err(LinesCodecError::Io(err)) => return Err(err.into()),
        };
        if line.trim().is_empty() {
            continue;
        }
        received += 1;

        match dispatch(&registry, &line) {
            Ok(call) => {
                let out_tx = out_tx.clone();
                calls.spawn_blocking(move || {
                    if let Some(reply) = call.run() {
                        let _ = out_tx.send(reply);
                    }
                });
            }
            Err(outbound) => {
                let _ = out_tx.send(outbound);
            }
        }
    }

    while let Some(joined) = calls.join_next().await {
        if let Err(err) = joined {
            warn!(error = %err, "Call task failed");
        }
    }

    // Closing both channels lets the writer drain and stop.
    drop(out_tx);
    drop(registry);
    writer.await??;

    info!(received, "Input closed, stopping");
    Ok(())
}

/// A parsed call bound to its endpoint.
struct Call {
    endpoint: ExtensionEndpoint,
    request: Request,
}

impl Call {
    fn run(self) -> Option<Outbound> {
        let Request {
            instance,
            message,
            mode,
            ..
        } = self.request;
        match mode {
            Mode::Request => Some(Outbound::Reply {
                instance,
                message: self.endpoint.request(instance, &message),
            }),
            Mode::Send => {
                self.endpoint.send(instance, &message);
                None
            }
        }
    }
}

fn dispatch(registry: &ExtensionRegistry, line: &str) -> Result<Call, Outbound> {
    let request: Request = serde_json::from_str(line).map_err(|err| {
        debug!(error = %err, "Malformed request line");
        Outbound::error(None, format!("malformed request: {err}"))
    })?;
    let endpoint = registry
        .endpoint(&request.extension)
        .map_err(|err| Outbound::error(Some(request.instance), err.to_string()))?;
    Ok(Call { endpoint, request })
}

async fn write_output<W>(
    mut output: W,
    mut replies: mpsc::UnboundedReceiver<Outbound>,
    mut posts: mpsc::UnboundedReceiver<PostedMessage>,
) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut replies_open = true;
    let mut posts_open = true;

    while replies_open || posts_open {
        let outbound = tokio::select! {
            reply = replies.recv(), if replies_open => match reply {
                Some(reply) => reply,
                None => {
                    replies_open = false;
                    continue;
                }
            },
            posted = posts.recv(), if posts_open => match posted {
                Some(posted) => Outbound::from(posted),
                None => {
                    posts_open = false;
                    continue;
                }
            },
        };

        let mut line = outbound.to_line();
        line.push('\n');
        output.write_all(line.as_bytes()).await?;
        output.flush().await?;
    }
    Ok(())
}
