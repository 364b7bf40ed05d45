//! Limits for schema and document processing
//!
//! The reference behavior places no bound on document size or nesting
//! depth, so limits are enforced here on every parse and render to
//! protect against resource exhaustion on adversarial input.

use crate::error::{Error, Result};

/// Caller-configurable limits applied to schema and instance documents
#[derive(Debug, Clone)]
pub struct Limits {
    /// Maximum document size in bytes
    pub max_document_size: usize,

    /// Maximum element nesting depth
    pub max_nesting_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_document_size: 10 * 1024 * 1024, // 10 MB
            max_nesting_depth: 100,
        }
    }
}

impl Limits {
    /// Create a new Limits with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create strict limits (more restrictive)
    pub fn strict() -> Self {
        Self {
            max_document_size: 1024 * 1024, // 1 MB
            max_nesting_depth: 20,
        }
    }

    /// Create permissive limits (less restrictive, use with caution)
    pub fn permissive() -> Self {
        Self {
            max_document_size: 100 * 1024 * 1024, // 100 MB
            max_nesting_depth: 1000,
        }
    }

    /// Check if a document size is within limits
    pub fn check_document_size(&self, size: usize) -> Result<()> {
        if size > self.max_document_size {
            Err(Error::LimitExceeded(format!(
                "document size {} bytes exceeds maximum {} bytes",
                size, self.max_document_size
            )))
        } else {
            Ok(())
        }
    }

    /// Check if a nesting depth is within limits
    pub fn check_depth(&self, depth: usize) -> Result<()> {
        if depth > self.max_nesting_depth {
            Err(Error::LimitExceeded(format!(
                "nesting depth {} exceeds maximum {}",
                depth, self.max_nesting_depth
            )))
        } else {
            Ok(())
        }
    }
}
