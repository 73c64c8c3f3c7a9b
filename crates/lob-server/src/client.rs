// crates/lob-server/src/client.rs
// Handles BOTH JSON and CSV line protocols

use anyhow::Result;
use lob_core::Response;
use lob_protocol::{csv_codec, json_codec, LineProtocol};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::OwnedWriteHalf;
use tokio::net::TcpStream;
use tracing::{debug, info, warn};

use crate::engine_task::EngineHandle;
use crate::types::{ClientId, ClientRegistry};

/// Run the client I/O loop for a single connection.
///
/// The first non-blank line fixes the connection's protocol; every
/// following line is decoded with it and answered in the same format.
pub async fn run_client(
    client_id: ClientId,
    stream: TcpStream,
    engine: EngineHandle,
    clients: ClientRegistry,
) -> Result<()> {
    let (read_stream, mut write_stream) = stream.into_split();
    let mut lines = BufReader::new(read_stream).lines();
    let mut protocol: Option<LineProtocol> = None;

    let outcome = async {
        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let protocol = *protocol.get_or_insert_with(|| {
                let detected = LineProtocol::detect(line);
                info!(client = client_id.0, protocol = ?detected, "protocol detected");
                detected
            });

            debug!(client = client_id.0, %line, "request");
            let reply = handle_line(protocol, line, &engine).await?;
            write_lines(&mut write_stream, &reply).await?;
        }
        anyhow::Ok(())
    }
    .await;

    // Remove client from registry
    {
        let mut guard = clients.write().await;
        guard.remove(&client_id);
    }

    outcome
}

/// Decode one line, run it through the engine, and encode the answer.
async fn handle_line(
    protocol: LineProtocol,
    line: &str,
    engine: &EngineHandle,
) -> Result<Vec<String>> {
    match protocol {
        LineProtocol::Json => match json_codec::decode_request(line) {
            Ok(request) => {
                let response = engine.request(request).await?;
                log_rejection(&response);
                Ok(vec![json_codec::encode_response(&response)?])
            }
            Err(err) => {
                warn!(%err, "rejecting JSON request");
                Ok(vec![json_codec::encode_protocol_error(&err)?])
            }
        },
        LineProtocol::Csv => match csv_codec::parse_input_line(line) {
            Ok(Some(request)) => {
                let response = engine.request(request).await?;
                log_rejection(&response);
                Ok(csv_codec::format_response(&response))
            }
            // Comment line.
            Ok(None) => Ok(Vec::new()),
            Err(err) => {
                warn!(%err, "rejecting CSV request");
                Ok(vec![csv_codec::format_protocol_error(&err)])
            }
        },
    }
}

fn log_rejection(response: &Response) {
    if let Response::Rejected(err) = response {
        debug!(%err, "book rejected request");
    }
}

async fn write_lines(stream: &mut OwnedWriteHalf, lines: &[String]) -> Result<(), std::io::Error> {
    if lines.is_empty() {
        return Ok(());
    }

    let mut data = lines.join("\n");
    data.push('\n');

    stream.write_all(data.as_bytes()).await?;
    stream.flush().await
}
