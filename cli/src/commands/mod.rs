// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Command implementations for Scholar CLI

pub mod ask;
pub mod check;
pub mod config;
pub mod serve;

pub use self::ask::AskArgs;
pub use self::config::ConfigCommand;
pub use self::serve::ServeArgs;

use anyhow::{Context, Result};
use scholar_core::assistant_config::AssistantConfigManifest;
use scholar_core::infrastructure::db::Database;
use scholar_core::ResearchPipeline;

/// Validate the manifest and wire a pipeline over a lazily connected pool.
///
/// Nothing touches the network here; an unreachable datastore surfaces per
/// request as the retrieval fallback.
pub(crate) fn build_pipeline(manifest: &AssistantConfigManifest) -> Result<ResearchPipeline> {
    manifest
        .validate()
        .context("Configuration validation failed")?;

    let database =
        Database::connect_lazy(&manifest.spec.database).context("Failed to configure database pool")?;

    ResearchPipeline::from_config(&manifest.spec, &database)
        .context("Failed to initialize research pipeline")
}
