// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

pub mod similarity_search;
pub mod context_assembler;
pub mod prompt_builder;
pub mod research_pipeline;

// Re-export use cases for convenience
pub use similarity_search::{SearchError, SimilaritySearch};
pub use context_assembler::{assemble, ContextBlock};
pub use prompt_builder::{Prompt, PromptBuilder};
pub use research_pipeline::{ResearchPipeline, StageTimeouts};
