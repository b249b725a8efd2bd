//! Newline-delimited JSON-RPC over stdin/stdout.
//!
//! Every line read is one JSON-RPC message; every response is written as
//! one line. Logging goes to stderr so stdout carries protocol traffic only.

use futures::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::bytes::BytesMut;
use tokio_util::codec::{Decoder, FramedRead, FramedWrite, LinesCodec, LinesCodecError};
use tracing::{info, warn};

use super::{McpResponse, handle_message, parse_error};
use crate::error::{ServiceError, ServiceResult};
use crate::service::MlbService;

/// Longest accepted message line, in bytes
const MAX_LINE_LENGTH: usize = 4 * 1024 * 1024;

/// Serve MCP on the process's stdin and stdout until stdin closes
pub async fn serve_stdio(service: &MlbService) -> ServiceResult<()> {
    info!("MCP server listening on stdio");
    serve(service, tokio::io::stdin(), tokio::io::stdout()).await
}

/// Serve MCP over any line-oriented byte stream pair
pub async fn serve<R, W>(service: &MlbService, reader: R, writer: W) -> ServiceResult<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = FramedRead::new(reader, MessageLines::new());
    let mut out = FramedWrite::new(writer, LinesCodec::new());

    while let Some(frame) = lines.next().await {
        let response = match frame.map_err(codec_error)? {
            Frame::Line(line) if line.trim().is_empty() => continue,
            Frame::Line(line) => handle_message(service, line.as_bytes()).await,
            Frame::Malformed(reason) => {
                warn!(%reason, "Unreadable JSON-RPC line");
                Some(parse_error(format!("Parse error: {}", reason)))
            }
        };

        let Some(response) = response else {
            continue;
        };
        send(&mut out, &response).await?;
    }

    info!("stdin closed, MCP server stopping");
    Ok(())
}

async fn send<W>(out: &mut FramedWrite<W, LinesCodec>, response: &McpResponse) -> ServiceResult<()>
where
    W: AsyncWrite + Unpin,
{
    let encoded = serde_json::to_string(response).map_err(|e| ServiceError::Internal {
        message: format!("Failed to encode response: {}", e),
    })?;
    out.send(encoded).await.map_err(codec_error)
}

/// One decoded input line, or the reason a line could not be read
#[derive(Debug, PartialEq)]
enum Frame {
    Line(String),
    Malformed(String),
}

/// `LinesCodec` that reports bad lines as frames so the stream keeps going
struct MessageLines {
    inner: LinesCodec,
}

impl MessageLines {
    fn new() -> Self {
        Self {
            inner: LinesCodec::new_with_max_length(MAX_LINE_LENGTH),
        }
    }

    fn recover(
        result: Result<Option<String>, LinesCodecError>,
    ) -> Result<Option<Frame>, LinesCodecError> {
        match result {
            Ok(line) => Ok(line.map(Frame::Line)),
            Err(LinesCodecError::MaxLineLengthExceeded) => Ok(Some(Frame::Malformed(format!(
                "line exceeds {} bytes",
                MAX_LINE_LENGTH
            )))),
            Err(LinesCodecError::Io(e)) if e.kind() == std::io::ErrorKind::InvalidData => {
                Ok(Some(Frame::Malformed(e.to_string())))
            }
            Err(e) => Err(e),
        }
    }
}

impl Decoder for MessageLines {
    type Item = Frame;
    type Error = LinesCodecError;

    fn decode(&mut self, buf: &mut BytesMut) -> Result<Option<Frame>, LinesCodecError> {
        Self::recover(self.inner.decode(buf))
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<Frame>, LinesCodecError> {
        Self::recover(self.inner.decode_eof(buf))
    }
}

fn codec_error(error: LinesCodecError) -> ServiceError {
    match error {
        LinesCodecError::Io(e) => ServiceError::Io(e),
        other => ServiceError::Internal {
            message: other.to_string(),
        },
    }
}
