//! palimpsest server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), loads the
//! decoded chain snapshot, connects to the IPFS content store, and serves the
//! JSON API over HTTP.
//!
//! # One-shot history
//!
//! To print the resolved edit history of a single entity and exit:
//!
//! ```text
//! cargo run -p palimpsest-server -- --history post:42
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use palimpsest_ipfs::IpfsClient;
use palimpsest_server::{EntityRef, ServerConfig, app, expand_tilde, history_json, load_chain};
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Palimpsest edit-history server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Print the edit history of one entity (`blog:<id>`, `post:<id>`,
  /// `comment:<id>` or `profile:<account>`) as JSON and exit.
  #[arg(long, value_name = "KIND:ID")]
  history: Option<EntityRef>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg = ServerConfig::load(&cli.config).context("failed to load configuration")?;

  let snapshot_path = expand_tilde(&server_cfg.chain_snapshot);
  let chain = load_chain(&snapshot_path)
    .with_context(|| format!("failed to load chain snapshot at {snapshot_path:?}"))?;

  let content = IpfsClient::new(server_cfg.ipfs()).context("failed to build IPFS client")?;

  // Helper mode: print one history and exit.
  if let Some(entity) = cli.history {
    let history = history_json(&chain, &content, &entity)
      .await
      .with_context(|| format!("failed to load history of {entity}"))?;
    println!("{}", serde_json::to_string_pretty(&history)?);
    return Ok(());
  }

  let router = app(Arc::new(chain), Arc::new(content));
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!(ipfs = %server_cfg.ipfs_base_url, "Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, router).await.context("server error")?;

  Ok(())
}
