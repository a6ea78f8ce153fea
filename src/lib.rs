//! tend - Markdown Task Vault Library
//!
//! This library provides the core functionality for the tend CLI tool:
//! parsing markdown task files, planning lifecycle transitions, and
//! applying retention policy over a vault of per-task files.
//!
//! # Core Concepts
//!
//! - **Documents**: markdown files with a strict YAML frontmatter grammar
//! - **Tasks**: the domain entity decoded from a document
//! - **Modifiers**: first-class, composable state transitions over tasks
//! - **Lifecycle Plans**: per-task dispositions computed from state,
//!   retention policy, and the current time
//! - **Vault**: the active / completed / archive directory layout
//!
//! # Module Organization
//!
//! - `cli`: Command-line interface using clap
//! - `config`: Configuration loading from `tend.toml`
//! - `document`: Frontmatter grammar, parsing and rendering
//! - `error`: Error types and result aliases
//! - `frontmatter`: Typed accessors over the untyped metadata map
//! - `lifecycle`: State classification and action planning
//! - `modifier`: Task modifiers and ordered composition
//! - `process`: Batch passes over the vault stores
//! - `task`: Task and record entities and their document codec
//! - `vault`: Directory layout and filesystem primitives
//! - `output`: Shared CLI output formatting

pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod frontmatter;
pub mod lifecycle;
pub mod modifier;
pub mod output;
pub mod process;
pub mod task;
pub mod vault;

pub use error::{Error, Result};
