// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! HTTP server command

use anyhow::{Context, Result};
use clap::Args;
use std::sync::Arc;
use tracing::info;

use scholar_core::assistant_config::AssistantConfigManifest;

use crate::server;

#[derive(Args)]
pub struct ServeArgs {
    /// Bind address (overrides server.bind_address)
    #[arg(long, env = "SCHOLAR_BIND_ADDRESS")]
    pub bind: Option<String>,

    /// HTTP port (overrides server.port)
    #[arg(short, long, env = "SCHOLAR_PORT")]
    pub port: Option<u16>,
}

pub async fn execute(args: ServeArgs, mut manifest: AssistantConfigManifest) -> Result<()> {
    if let Some(bind) = args.bind {
        manifest.spec.server.bind_address = bind;
    }
    if let Some(port) = args.port {
        manifest.spec.server.port = port;
    }

    let pipeline = Arc::new(super::build_pipeline(&manifest)?);

    let metrics = manifest
        .spec
        .observability
        .as_ref()
        .and_then(|o| o.metrics.as_ref())
        .filter(|m| m.enabled);
    if let Some(metrics) = metrics {
        metrics_exporter_prometheus::PrometheusBuilder::new()
            .with_http_listener(([0, 0, 0, 0], metrics.port))
            .install()
            .context("Failed to start Prometheus exporter")?;
        info!("Prometheus metrics on port {}", metrics.port);
    }

    let addr = format!(
        "{}:{}",
        manifest.spec.server.bind_address, manifest.spec.server.port
    );
    server::serve(&addr, pipeline).await
}
