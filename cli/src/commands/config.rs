// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Configuration management commands
//!
//! Commands: show, validate, generate

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use std::path::PathBuf;

use scholar_core::assistant_config::AssistantConfigManifest;

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Show config file paths checked
        #[arg(long)]
        paths: bool,
    },

    /// Validate configuration file
    Validate {
        /// Path to config file (default: discover)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Generate sample configuration
    Generate {
        /// Output path (default: ./scholar-config.yaml)
        #[arg(short, long, default_value = "./scholar-config.yaml")]
        output: PathBuf,

        /// Include examples and comments
        #[arg(long)]
        examples: bool,
    },
}

pub async fn handle_command(
    command: ConfigCommand,
    config_override: Option<PathBuf>,
) -> Result<()> {
    match command {
        ConfigCommand::Show { paths } => show(config_override, paths).await,
        ConfigCommand::Validate { file } => validate(file.or(config_override)).await,
        ConfigCommand::Generate { output, examples } => generate(output, examples).await,
    }
}

fn secret_display(value: &Option<String>) -> String {
    match value {
        Some(v) if v.starts_with("env:") => v.clone(),
        Some(_) => "(set)".to_string(),
        None => "(none)".to_string(),
    }
}

async fn show(config_override: Option<PathBuf>, show_paths: bool) -> Result<()> {
    let config = AssistantConfigManifest::load_or_default(config_override.clone())
        .context("Failed to load configuration")?;

    if show_paths {
        println!("{}", "Configuration discovery paths:".bold());
        if let Some(path) = &config_override {
            println!("  1. --config flag: {}", path.display());
        } else {
            println!("  1. --config flag: {}", "(not set)".dimmed());
        }
        println!(
            "  2. SCHOLAR_CONFIG_PATH: {}",
            std::env::var("SCHOLAR_CONFIG_PATH")
                .unwrap_or_else(|_| "(not set)".to_string())
                .dimmed()
        );
        println!("  3. ./scholar-config.yaml");
        println!("  4. ~/.scholar/config.yaml");
        println!("  5. /etc/scholar/config.yaml");
        println!();
    }

    let spec = &config.spec;

    println!("{}", "Current configuration:".bold());
    println!("  Name: {}", config.metadata.name);
    println!();

    println!("{}", "Paper Datastore:".bold());
    println!(
        "  {}@{}:{}/{}",
        spec.database.user, spec.database.host, spec.database.port, spec.database.name
    );
    println!("  Password: {}", secret_display(&spec.database.password));
    println!("  Pool size: {}", spec.database.max_connections);
    println!("  SSL mode: {}", spec.database.ssl_mode);
    println!();

    println!("{}", "Embedding Provider:".bold());
    println!(
        "  {} ({})",
        spec.embedding.model.bold(),
        spec.embedding.provider_type
    );
    println!("    Endpoint: {}", spec.embedding.endpoint);
    println!("    API key: {}", secret_display(&spec.embedding.api_key));
    println!("    Dimension: {}", spec.embedding.dimension);
    println!();

    println!("{}", "Generation Provider:".bold());
    println!(
        "  {} ({})",
        spec.generation.model.bold(),
        spec.generation.provider_type
    );
    println!("    Endpoint: {}", spec.generation.endpoint);
    println!("    API key: {}", secret_display(&spec.generation.api_key));
    println!(
        "    Temperature: {}  Max output tokens: {}",
        spec.generation.temperature, spec.generation.max_output_tokens
    );
    println!();

    println!("{}", "Retrieval:".bold());
    println!(
        "  Top {} from '{}' by {} distance",
        spec.retrieval.top_k, spec.retrieval.table, spec.retrieval.metric
    );
    println!(
        "  Timeouts: embedding {}ms, search {}ms, generation {}ms",
        spec.timeouts.embedding_ms, spec.timeouts.search_ms, spec.timeouts.generation_ms
    );
    println!();

    Ok(())
}

async fn validate(config_path: Option<PathBuf>) -> Result<()> {
    println!("Validating configuration...");

    let config = AssistantConfigManifest::load_or_default(config_path)
        .context("Failed to load configuration")?;

    config
        .validate()
        .context("Configuration validation failed")?;

    println!("{}", "✓ Configuration is valid".green());

    Ok(())
}

async fn generate(output: PathBuf, with_examples: bool) -> Result<()> {
    let sample = if with_examples {
        include_str!("../../templates/config-with-examples.yaml")
    } else {
        include_str!("../../templates/config-minimal.yaml")
    };

    std::fs::write(&output, sample)
        .with_context(|| format!("Failed to write config to {:?}", output))?;

    println!(
        "{}",
        format!("✓ Configuration generated: {}", output.display()).green()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_parse_and_validate() {
        for template in [
            include_str!("../../templates/config-minimal.yaml"),
            include_str!("../../templates/config-with-examples.yaml"),
        ] {
            let manifest = AssistantConfigManifest::from_yaml_str(template).unwrap();
            manifest.validate().unwrap();
        }
    }

    #[test]
    fn test_secret_display_hides_literals() {
        assert_eq!(secret_display(&Some("env:GEMINI_API_KEY".to_string())), "env:GEMINI_API_KEY");
        assert_eq!(secret_display(&Some("sk-live-123".to_string())), "(set)");
        assert_eq!(secret_display(&None), "(none)");
    }

    #[tokio::test]
    async fn test_generate_writes_template() {
        let dir = std::env::temp_dir().join(format!("scholar-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let output = dir.join("scholar-config.yaml");

        generate(output.clone(), false).await.unwrap();

        let written = AssistantConfigManifest::from_yaml_file(&output).unwrap();
        assert_eq!(written.spec.retrieval.top_k, 5);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
