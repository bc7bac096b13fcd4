// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! One-shot research query

use anyhow::Result;
use clap::Args;
use tracing::debug;

use scholar_core::assistant_config::AssistantConfigManifest;

#[derive(Args)]
pub struct AskArgs {
    /// Research question, passed to the pipeline verbatim
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Number of papers to retrieve (overrides retrieval.top_k)
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,
}

pub async fn execute(args: AskArgs, mut manifest: AssistantConfigManifest) -> Result<()> {
    if let Some(top_k) = args.top_k {
        manifest.spec.retrieval.top_k = top_k;
    }

    let pipeline = super::build_pipeline(&manifest)?;
    debug!(top_k = pipeline.top_k(), "Pipeline ready");

    // Fallback messages are answers too; they go to stdout like generated text
    let answer = pipeline.answer(&args.query).await;
    println!("{}", answer);

    Ok(())
}
