// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Connectivity checks
//!
//! Pings the datastore and asks the generation provider for its model, then
//! reports each result. Fails if either check fails.

use anyhow::{Context, Result};
use colored::Colorize;

use scholar_core::assistant_config::AssistantConfigManifest;
use scholar_core::infrastructure::db::Database;
use scholar_core::infrastructure::ProviderRegistry;

pub async fn execute(manifest: AssistantConfigManifest) -> Result<()> {
    manifest
        .validate()
        .context("Configuration validation failed")?;
    let spec = &manifest.spec;

    let mut failures = 0;

    let db_target = format!(
        "{}@{}:{}/{}",
        spec.database.user, spec.database.host, spec.database.port, spec.database.name
    );
    match Database::connect(&spec.database).await {
        Ok(_) => println!("{} Datastore reachable ({})", "✓".green(), db_target),
        Err(e) => {
            failures += 1;
            println!("{} Datastore unreachable ({}): {:#}", "✗".red(), db_target, e);
        }
    }

    let registry = ProviderRegistry::from_config(spec).context("Failed to initialize providers")?;
    let generation_target = format!("{} ({})", spec.generation.provider_type, spec.generation.model);
    match registry.health_check().await {
        Ok(()) => println!("{} Generation provider healthy: {}", "✓".green(), generation_target),
        Err(e) => {
            failures += 1;
            println!(
                "{} Generation provider unhealthy: {}: {}",
                "✗".red(),
                generation_target,
                e
            );
        }
    }

    if failures > 0 {
        anyhow::bail!("{} connectivity check(s) failed", failures);
    }
    Ok(())
}
