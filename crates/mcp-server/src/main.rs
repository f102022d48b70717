//! Wiki MCP Server
//!
//! Exposes read-only wiki query operations as MCP tools.
//!
//! ## Tools
//!
//! - `search_pages` - Full-text search with URLs and snippets
//! - `get_page` - Page content (wikitext or rendered HTML) plus metadata
//! - `get_page_history` - Revision history with size deltas
//! - `list_categories` - Categories with member counts
//! - `get_category_members` - Contents of one category
//! - `get_recent_changes` - Activity feed with size deltas
//! - `get_page_links` - Outgoing links or backlinks
//!
//! ## Usage
//!
//! Configure the target wiki through the environment and add the binary to
//! your MCP client configuration:
//! ```json
//! {
//!   "mcpServers": {
//!     "wiki": {
//!       "command": "wiki-mcp",
//!       "env": { "WIKI_BASE_URL": "https://en.wikipedia.org" }
//!     }
//!   }
//! }
//! ```
//!
//! Pass `--http ADDR` to serve over SSE instead of stdio.

use anyhow::{Context, Result};
use clap::Parser;
use rmcp::transport::stdio;
use rmcp::ServiceExt;
use wiki_client::{WikiClient, WikiConfig};

mod http;
mod render;
mod tools;

use tools::WikiService;

#[derive(Debug, Parser)]
#[command(
    name = "wiki-mcp",
    version,
    about = "MCP server exposing read-only wiki query tools"
)]
struct Cli {
    /// Serve over HTTP/SSE on this address instead of stdio
    #[arg(long, value_name = "ADDR")]
    http: Option<std::net::SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Configure logging to stderr only (stdout is for MCP protocol)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();

    // Missing base address is fatal before any invocation is served.
    let config = WikiConfig::from_env().context("wiki configuration")?;
    let client = WikiClient::new(&config).context("wiki client construction")?;

    log::info!("Starting wiki MCP server for {}", config.base_url);

    match cli.http {
        Some(addr) => http::serve(addr, client).await,
        None => {
            let service = WikiService::new(client);
            let server = service.serve(stdio()).await?;
            server.waiting().await?;
            log::info!("wiki MCP server stopped");
            Ok(())
        }
    }
}
