// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for the recast library.
//!
//! The operator core never classifies or retries upstream failures; it only
//! routes them. [`RecastError`] therefore stays small: an opaque upstream
//! failure with context, or a wrapped user error.

/// Root error type for all recast operations.
#[derive(Debug, thiserror::Error)]
pub enum RecastError {
    /// The multiplexed upstream producer failed.
    ///
    /// The payload is carried through to every attached subscriber unchanged;
    /// recast never retries it.
    #[error("Upstream error: {context}")]
    UpstreamError {
        /// Description of the upstream failure
        context: String,
    },

    /// Custom error from user code.
    ///
    /// This wraps errors produced by user-provided sources, allowing them to
    /// be propagated through the recast error system.
    #[error("User error: {0}")]
    UserError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl RecastError {
    /// Create an upstream error with the given context.
    pub fn upstream_error(context: impl Into<String>) -> Self {
        Self::UpstreamError {
            context: context.into(),
        }
    }

    /// Wrap a user error.
    pub fn user_error(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::UserError(Box::new(error))
    }
}

/// Specialized Result type for recast operations.
pub type Result<T> = std::result::Result<T, RecastError>;

impl Clone for RecastError {
    fn clone(&self) -> Self {
        match self {
            Self::UpstreamError { context } => Self::UpstreamError {
                context: context.clone(),
            },
            // The boxed error cannot be cloned; fall back to its message
            Self::UserError(e) => Self::UpstreamError {
                context: format!("User error: {}", e),
            },
        }
    }
}
