// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # PostgreSQL Connection Pool
//!
//! Wraps `sqlx::postgres::PgPool` in a thin `Database` newtype that is built
//! once per process and shared by every research run. Each similarity search
//! borrows one connection from it and returns it when the search finishes.

use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions, PgSslMode};
use std::time::Duration;

use crate::domain::assistant_config::{resolve_secret, DatabaseConfig};

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Build the pool without opening a connection.
    ///
    /// Connections are established on first use, so an unreachable datastore
    /// surfaces as a per-request retrieval error instead of a startup failure.
    pub fn connect_lazy(config: &DatabaseConfig) -> Result<Self> {
        let options = Self::connect_options(config)?;

        tracing::info!(
            host = %config.host,
            port = config.port,
            database = %config.name,
            user = %config.user,
            max_connections = config.max_connections,
            ssl_mode = %config.ssl_mode,
            "Configuring paper datastore pool"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_millis(config.acquire_timeout_ms))
            .connect_lazy_with(options);

        Ok(Self { pool })
    }

    /// Build the pool and verify connectivity with a first connection
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let database = Self::connect_lazy(config)?;
        database.ping().await?;
        Ok(database)
    }

    pub fn get_pool(&self) -> &PgPool {
        &self.pool
    }

    /// Round-trip a trivial query through a pooled connection
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .context("Paper datastore is not reachable")?;
        Ok(())
    }

    fn connect_options(config: &DatabaseConfig) -> Result<PgConnectOptions> {
        let password = resolve_secret(&config.password)
            .context("Failed to resolve database password")?;

        let options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .database(&config.name)
            .username(&config.user)
            .password(&password)
            .ssl_mode(parse_ssl_mode(&config.ssl_mode)?);

        Ok(options)
    }
}

fn parse_ssl_mode(mode: &str) -> Result<PgSslMode> {
    match mode {
        "disable" => Ok(PgSslMode::Disable),
        "prefer" => Ok(PgSslMode::Prefer),
        "require" => Ok(PgSslMode::Require),
        other => anyhow::bail!("Unsupported ssl_mode: {}", other),
    }
}
