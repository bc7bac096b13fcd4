// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Context Assembler
//!
//! Formats ranked papers into the block the generation model reads. The model
//! is told to cite by exact title, so titles are copied through untouched.

use std::fmt;

use crate::domain::paper::PaperRecord;

const MISSING: &str = "N/A";
const RECORD_SEPARATOR: &str = "---";

/// Formatted papers, in ranking order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextBlock(String);

impl ContextBlock {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContextBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn or_missing(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => MISSING,
    }
}

fn format_record(paper: &PaperRecord) -> String {
    format!(
        "Title: {}\nAbstract: {}\nDOI: {}\nURL: {}\n{}",
        paper.title,
        paper.abstract_text,
        or_missing(paper.doi.as_deref()),
        or_missing(paper.url.as_deref()),
        RECORD_SEPARATOR,
    )
}

/// Build the context block for `papers`, one record per paper joined by a blank line
pub fn assemble(papers: &[PaperRecord]) -> ContextBlock {
    let records: Vec<String> = papers.iter().map(format_record).collect();
    ContextBlock(records.join("\n\n"))
}
