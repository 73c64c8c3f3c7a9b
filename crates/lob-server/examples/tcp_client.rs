//! Interactive line client for lob-server.
//!
//! ```bash
//! cargo run -p lob-server
//! cargo run -p lob-server --example tcp_client
//! ```
//!
//! Whatever you type is sent as one line; the server's reply lines are
//! printed back. The first line picks the protocol for the session.

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::time::timeout;

#[tokio::main]
async fn main() -> Result<()> {
    // Where to connect: env override or default.
    let addr = env::var("LOB_CLIENT_ADDR").unwrap_or_else(|_| "127.0.0.1:9000".to_string());

    println!("Connecting to {addr}...");
    let stream = TcpStream::connect(&addr)
        .await
        .with_context(|| format!("could not connect to {addr}"))?;
    println!("Connected.");
    println!("Type CSV commands like:");
    println!("  N, B, 100, 10      (submit buy 10 @ 100)");
    println!("  C, <orderId>, B    (cancel)");
    println!("  Q                  (top of book)");
    println!("  D, 5               (depth)");
    println!("or JSON like:");
    println!(r#"  {{"type":"submit","side":"sell","price":100,"quantity":4}}"#);
    println!("Type 'quit' or 'exit' to leave.\n");

    let (read_half, mut write_half) = stream.into_split();
    let mut replies = BufReader::new(read_half).lines();
    let mut stdin = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = stdin.next_line().await? {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.eq_ignore_ascii_case("quit") || trimmed.eq_ignore_ascii_case("exit") {
            println!("Exiting client.");
            break;
        }

        write_half.write_all(format!("{trimmed}\n").as_bytes()).await?;
        write_half.flush().await?;

        // Print every reply line that arrives shortly after the request.
        while let Ok(Ok(Some(reply))) = timeout(Duration::from_millis(200), replies.next_line()).await {
            println!("<< {reply}");
        }
    }

    Ok(())
}
