// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

pub mod db;
pub mod embedding;
pub mod llm;
pub mod registry;
pub mod repositories;

pub use registry::ProviderRegistry;
