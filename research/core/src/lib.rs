// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Scholar Research Core
//!
//! Retrieval-augmented answering of research questions over a pgvector paper store.
//!
//! # Architecture
//!
//! - **Layer:** Core System
//! - **Purpose:** Embed a query, retrieve the nearest papers, and ask a
//!   generation model for a grounded, cited answer

pub mod domain;
pub mod application;
pub mod infrastructure;

pub use domain::*;
pub use application::research_pipeline::ResearchPipeline;
