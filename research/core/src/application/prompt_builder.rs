// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Prompt Builder
//!
//! Wraps a context block and the user's query in fixed grounding instructions.
//!
//! # Architecture
//!
//! - **Layer:** Application Layer
//! - **Purpose:** Constrain the generation model to the retrieved papers
//!
//! The query is inserted verbatim after the papers. Nothing is escaped, so a
//! query can try to override the instructions; that risk is accepted.

use std::fmt;

use super::context_assembler::ContextBlock;
use crate::domain::paper::Query;

pub const GROUNDING_INSTRUCTIONS: &str = "You are an expert academic research assistant specializing in providing factual answers derived from provided scientific literature. \
Your primary directive is to answer the \"User Query\" **strictly and solely** based on the information found within the \"<papers>\" section below. \
Do not use any external knowledge. \
If the provided papers do not contain sufficient information to fully answer the query, clearly state that and explain what information is missing. \
For every factual statement you make, you **must** cite the source by including the exact \"Title\" of the paper (e.g., [Title of the Paper]) at the end of the paragraph where the information is used. \
After your main answer, provide a comprehensive \"References\" section listing all cited papers by their full titles, journal they were published in, doi and year of publication.";

/// Complete text sent to the generation model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt(String);

impl Prompt {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub struct PromptBuilder;

impl PromptBuilder {
    pub fn build(context: &ContextBlock, query: &Query) -> Prompt {
        Prompt(format!(
            "{}\n\n<papers>\n{}\n</papers>\n\nUser Query: {}\n\n---\n\nAnswer:\n",
            GROUNDING_INSTRUCTIONS,
            context.as_str(),
            query.as_str(),
        ))
    }
}
