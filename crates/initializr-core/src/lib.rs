//! Initializr Core - Shared library for generating Spring projects
//!
//! This library turns a Spring Initializr option catalog into interactive
//! prompts, collects and persists the answers, and downloads the generated
//! project from the service.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Catalog parsing, prompt schema building,
//!   dependency search, project download and extraction
//! - **Layer 2: Workflow Orchestration** - `ProductConfig` trait, persisted
//!   answers and `project::generate` for custom UIs
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use initializr_core::{build_prompts, catalog::CatalogFetcher, Answers};
//!
//! let fetcher = CatalogFetcher::from_config(&MyConfig)?;
//! let resolved = fetcher.fetch_or_bundled().await?;
//! let prompts = build_prompts(&resolved.catalog, &Answers::default());
//! ```

pub mod answers;
pub mod catalog;
pub mod product;
pub mod project;
pub mod prompts;
pub mod runtime;
pub mod service;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use answers::{AnswerStore, AnswerValue, Answers};
pub use catalog::{CatalogFetcher, OptionCatalog, OptionField};
pub use product::ProductConfig;
pub use project::{Format, ProjectFetcher, ProjectRequest, Toolchain};
pub use prompts::{build_prompts, DependencyIndex, PromptKind, PromptSpec};

#[cfg(feature = "tui")]
pub use tui::run;
