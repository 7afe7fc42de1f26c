/// Handles argument parsing and the command line workflow.
pub mod cli;

/// Defines custom error types.
pub mod error;

/// Constants shared across the crate.
pub mod constants;

/// Game name and package sanitizing.
pub mod sanitize;

/// Libraries a project may depend on.
pub mod catalog;

/// Directive processing for template paths and contents.
pub mod merge;

/// Project generation from a template tree.
pub mod generator;

/// Configuration handling for template bundles.
pub mod config;

/// Reads template bundles from disk.
pub mod loader;

/// A set of helpers for working with the file system.
pub mod ioutils;

/// Extension traits for standard library types.
pub mod ext;
