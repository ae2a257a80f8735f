// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use anyhow::Context;
use clap::Parser;
use es_toolkit::app::{create_router, AppState, VERSION};
use es_toolkit::models::paging::PagingMode;
use es_toolkit::services::elasticsearch::{ElasticsearchClient, ElasticsearchConfig};
use es_toolkit::services::logging::init_tracing;
use es_toolkit::services::search::SearchClient;
use std::net::SocketAddr;
use std::sync::Arc;

/// HTTP front for Elasticsearch index, document and search helpers
#[derive(Debug, Parser)]
#[command(name = "es-toolkit", version = VERSION)]
struct Cli {
    /// Address the HTTP API listens on
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:3000")]
    listen: SocketAddr,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_filter: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_filter);

    let es_config = ElasticsearchConfig::from_env()?;
    let paging_mode = PagingMode::from_env()?;

    let engine = ElasticsearchClient::new(es_config)?;
    let search_client = SearchClient::with_paging_mode(Arc::new(engine), paging_mode);

    let app = create_router(AppState { search_client });

    let listener = tokio::net::TcpListener::bind(cli.listen)
        .await
        .with_context(|| format!("Failed to bind {}", cli.listen))?;

    tracing::info!(
        version = VERSION,
        addr = %cli.listen,
        paging_mode = %paging_mode,
        "es-toolkit listening"
    );

    axum::serve(listener, app).await.context("HTTP server failed")?;

    Ok(())
}
