//! Error module for the Mauka search index.
//!
//! This module provides a comprehensive error handling framework for the
//! entire crate, following Rust's idiomatic error handling patterns with
//! explicit error types, proper error propagation, and helpful context
//! information.

use std::fmt::{Display, Formatter};
use std::sync::Arc;
use thiserror::Error;

pub mod config;
pub mod core;
pub mod tokenize;

pub use core::{CoreError, CoreResult};
pub use tokenize::TokenizeError;

/// Result type alias used throughout the crate.
pub type MaukaResult<T> = Result<T, MaukaError>;

/// Top-level error enum for the crate.
#[derive(Error, Debug)]
pub enum MaukaError {
    /// Errors occurring during configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Errors from the posting-list pool, trie, indexer, or query engine.
    #[error("Index error: {0}")]
    Core(#[from] core::CoreError),

    /// Errors from tokenization or the text-source collaborator.
    #[error("Tokenize error: {0}")]
    Tokenize(#[from] tokenize::TokenizeError),

    /// IO errors that may occur during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Custom error with message for cases where specific error types are not defined.
    #[error("{0}")]
    Custom(String),
}

/// Error reporting structure to provide context and debugging information.
#[derive(Debug)]
pub struct ErrorContext {
    /// The original error that occurred.
    pub error: MaukaError,

    /// The component where the error occurred.
    pub component: String,

    /// Additional context information to help with debugging.
    pub details: Option<String>,
}

impl ErrorContext {
    /// Creates a new error context with the given error and component.
    pub fn new<S: Into<String>>(error: MaukaError, component: S) -> Self {
        Self {
            error,
            component: component.into(),
            details: None,
        }
    }

    /// Adds detail information to the error context.
    pub fn with_details<S: Into<String>>(mut self, details: S) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl Display for ErrorContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error in {}: {}", self.component, self.error)?;
        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }
        Ok(())
    }
}

/// Error reporter trait for reporting errors to various sinks.
pub trait ErrorReporter: Send + Sync + std::fmt::Debug {
    /// Report an error with context.
    fn report(&self, context: ErrorContext);
}

/// A simple error reporter implementation that logs errors using the tracing framework.
#[derive(Default, Debug)]
pub struct TracingErrorReporter;

impl ErrorReporter for TracingErrorReporter {
    fn report(&self, context: ErrorContext) {
        tracing::error!(
            error = %context.error,
            component = %context.component,
            details = context.details.as_deref().unwrap_or("None"),
            "error reported"
        );
    }
}

/// Error reporting accessor. Owned by `Session` rather than kept as a
/// process-wide singleton — see DESIGN.md's note on replacing the
/// teacher's `static mut` global with struct ownership.
#[derive(Debug)]
pub struct ErrorReporting {
    reporter: Arc<dyn ErrorReporter>,
}

impl Default for ErrorReporting {
    fn default() -> Self {
        Self {
            reporter: Arc::new(TracingErrorReporter),
        }
    }
}

impl ErrorReporting {
    /// Creates a reporter with the given sink.
    pub fn new(reporter: Arc<dyn ErrorReporter>) -> Self {
        Self { reporter }
    }

    /// Report an error with context.
    pub fn report(&self, context: ErrorContext) {
        self.reporter.report(context);
    }
}
