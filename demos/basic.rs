//! Basic NNTP client example
//!
//! Run with: cargo run --example basic
//!
//! Set RUST_LOG=nntp_engine=debug to see the command traffic.

use nntp_engine::{Event, NntpClient, ServerConfig};
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Configure the NNTP server
    let host = std::env::var("NNTP_HOST").unwrap_or_else(|_| "news.example.com".to_string());
    let port = std::env::var("NNTP_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(119);
    let config = ServerConfig::new(host, port, port == 563)
        .with_response_timeout(Duration::from_secs(60));

    println!("Connecting to {}:{}...", config.host, config.port);
    let (client, mut events) = NntpClient::connect(Arc::new(config)).await?;

    // Everything is queued up front; responses arrive in order
    let group = std::env::var("NNTP_GROUP").unwrap_or_else(|_| "alt.test".to_string());
    client.capabilities()?;
    client.date()?;
    client.group(&group)?;
    client.head(None)?;
    client.quit()?;

    while let Some(event) = events.recv().await {
        match event {
            Event::Welcome { banner, posting_allowed } => {
                let posting = if posting_allowed { "allowed" } else { "not allowed" };
                println!("Connected: {} (posting {})", banner, posting);
            }
            Event::Capabilities(lines) => println!("Capabilities: {}", lines.join(", ")),
            Event::Date(stamp) => println!("Server time: {}", stamp),
            Event::Group(info) => println!(
                "Selected group '{}': {} articles ({}-{})",
                info.name, info.count, info.low, info.high
            ),
            Event::Head(headers) => {
                let wanted = |h: &&String| h.starts_with("Subject:") || h.starts_with("From:");
                for header in headers.iter().filter(wanted) {
                    println!("  {}", header);
                }
            }
            Event::Quit => println!("Disconnected"),
            event if event.is_failure() => eprintln!("Failed: {:?}", event),
            _ => {}
        }
    }

    Ok(())
}
