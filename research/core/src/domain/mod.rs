// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Mod
//!
//! Provides the domain model of the research assistant.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Value types, provider interfaces, repository contracts and configuration

pub mod paper;
pub mod embedding;
pub mod llm;
pub mod repository;
pub mod outcome;
pub mod assistant_config;
