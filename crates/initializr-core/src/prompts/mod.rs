//! Prompt schema construction and dependency search
//!
//! This module provides:
//! - `build_prompts`, turning an option catalog into ordered `PromptSpec`s
//! - `DependencyIndex`, the searchable list behind the dependency prompt

pub mod schema;
pub mod search;

pub use schema::{
    build_prompts, label_for, Applicability, DefaultRule, PromptKind, PromptSpec, EXTRACT_KEY,
    FORMAT_BUILD, FORMAT_KEY, FORMAT_PROJECT, TOOLCHAIN_KEY,
};
pub use search::{merge_selection, DependencyEntry, DependencyIndex};
