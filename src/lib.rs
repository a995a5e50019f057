//! stubgen - HTTP client stubs from annotated TypeScript declarations
//!
//! stubgen reads `@key value` annotations from the doc comments of
//! TypeScript interfaces, type aliases and classes, and generates a
//! `fetch`-based client class for every declaration marked `@HttpClient`.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Annotation model and extraction engine
//! - `generator`: Service definitions and client rendering
//! - `issues`: Issue type definitions and reporting
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod generator;
pub mod issues;
pub mod utils;
