//! # nswrap - wrap C code in a C++ namespace
//!
//! nswrap rewrites a tree of C headers and sources so their declarations
//! live inside a named namespace, while include guards, `#pragma once` and
//! `#include` lines stay outside of it.
//!
//! ## Quick Start
//!
//! ```bash
//! # Wrap everything under src/ into out/ using namespace `clips`
//! nswrap src out
//!
//! # Pick another namespace and preview without writing
//! nswrap src out --namespace engine --dry-run
//! ```
//!
//! ## Limitations
//!
//! Lines are classified by their leading keyword only. There is no C
//! parser: directives inside comments or string literals are taken at face
//! value, and wrapping a file twice nests the markers.
//!
//! ## Module Organization
//!
//! - [`wrap`] - Per-file namespace wrapping (header and source modes)
//! - [`walk`] - Source-tree traversal and mirrored output
//! - [`config`] - Configuration parsing (`nswrap.toml`)
//! - [`ui`] - Terminal tables

/// Run configuration (`nswrap.toml`).
pub mod config;

/// Terminal UI utilities (tables).
pub mod ui;

/// Directory traversal and file output.
pub mod walk;

/// Namespace wrapping of a single file.
pub mod wrap;
